//! Error types for the Galaxy3D shader asset pipeline
//!
//! This module defines the error taxonomy shared by the container codec,
//! the platform resolver and the import/export façade.

use std::fmt;
use std::io;
use crate::asset::{CompiledBytecodeKind, ShadingLanguage};
use crate::platform::PlatformCapabilities;

/// Result type for shader asset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shader asset errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed container bytes (bad header, truncated section, length mismatch)
    FormatError(String),

    /// Well-formed bytes whose header and section contents contradict each other
    ConsistencyError(String),

    /// The resolver has no mapping for the given platform capabilities
    PlatformUnsupported(PlatformCapabilities),

    /// The asset holds none of the variants that were asked for
    VariantUnavailable {
        requested_languages: ShadingLanguage,
        requested_kinds: CompiledBytecodeKind,
        available_languages: ShadingLanguage,
        available_kinds: CompiledBytecodeKind,
    },

    /// Underlying stream failure (read, seek, write)
    IoError {
        kind: io::ErrorKind,
        message: String,
    },

    /// In-memory asset description rejected while being assembled
    InvalidAsset(String),
}

impl Error {
    /// True when the caller can reasonably substitute another asset
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::VariantUnavailable { .. })
    }

    /// True for malformed or self-contradicting container data
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::FormatError(_) | Error::ConsistencyError(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FormatError(msg) => write!(f, "Format error: {}", msg),
            Error::ConsistencyError(msg) => write!(f, "Consistency error: {}", msg),
            Error::PlatformUnsupported(platform) => {
                write!(f, "Platform unsupported: {:?}", platform)
            }
            Error::VariantUnavailable {
                requested_languages,
                requested_kinds,
                available_languages,
                available_kinds,
            } => write!(
                f,
                "Variant unavailable: requested languages {:?} / kinds {:?}, available languages {:?} / kinds {:?}",
                requested_languages, requested_kinds, available_languages, available_kinds
            ),
            Error::IoError { kind, message } => write!(f, "I/O error ({:?}): {}", kind, message),
            Error::InvalidAsset(msg) => write!(f, "Invalid asset: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IoError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

// ===== ERROR MACROS =====

/// Build an error variant from a format string
///
/// # Example
///
/// ```ignore
/// let err = shader_err!(FormatError, "bad magic {:?}", magic);
/// ```
#[macro_export]
macro_rules! shader_err {
    ($variant:ident, $($arg:tt)*) => {
        $crate::galaxy3d::Error::$variant(format!($($arg)*))
    };
}

/// Return early with an error variant built from a format string
///
/// # Example
///
/// ```ignore
/// shader_bail!(InvalidAsset, "duplicate language {:?}", language);
/// ```
#[macro_export]
macro_rules! shader_bail {
    ($variant:ident, $($arg:tt)*) => {
        return Err($crate::shader_err!($variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
