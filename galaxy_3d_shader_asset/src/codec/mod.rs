//! Container codec
//!
//! Translates a `ShaderAsset` to and from a linear byte stream. Decoding can
//! stop after the header or materialize only the languages/kinds a caller
//! asks for; skipped payloads are seeked past, never read.
//!
//! See `asset::AssetHeader` for the header layout. Each section is a run of
//! entries `{ tag: u8, length: u32 LE, payload[length] }`.

mod header_codec;
mod section;
mod decoder;
mod encoder;

use crate::asset::{CompiledBytecodeKind, ShadingLanguage};

pub use header_codec::{read_header, write_header};
pub use decoder::{decode, decode_header, decode_sections};
pub use encoder::{encode, encode_to_vec};

/// Log source used by the codec
pub(crate) const CODEC_LOG_SOURCE: &str = "galaxy3d::ShaderCodec";

/// Codec limits
///
/// Protects allocations against corrupt length fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest accepted section, in bytes
    pub max_section_size: u64,
    /// Largest accepted entry payload, in bytes
    pub max_entry_size: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_section_size: 256 * 1024 * 1024,
            max_entry_size: 128 * 1024 * 1024,
        }
    }
}

/// Which sections (and which variants inside them) a decode materializes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeRequest {
    /// Languages to materialize from the source section (empty: skip section)
    pub languages: ShadingLanguage,
    /// Kinds to materialize from the compiled section (empty: skip section)
    pub kinds: CompiledBytecodeKind,
}

impl DecodeRequest {
    /// Read the header only
    pub fn header_only() -> Self {
        Self {
            languages: ShadingLanguage::empty(),
            kinds: CompiledBytecodeKind::empty(),
        }
    }

    /// Read both sections completely
    pub fn full() -> Self {
        Self {
            languages: ShadingLanguage::ALL,
            kinds: CompiledBytecodeKind::ALL,
        }
    }

    /// Read the header and the given source languages
    pub fn source(languages: ShadingLanguage) -> Self {
        Self {
            languages,
            kinds: CompiledBytecodeKind::empty(),
        }
    }

    /// Read the header and the given compiled kinds
    pub fn compiled(kinds: CompiledBytecodeKind) -> Self {
        Self {
            languages: ShadingLanguage::empty(),
            kinds,
        }
    }

    /// The source section is read
    pub fn wants_source(&self) -> bool {
        !self.languages.is_empty()
    }

    /// The compiled section is read
    pub fn wants_compiled(&self) -> bool {
        !self.kinds.is_empty()
    }
}

impl Default for DecodeRequest {
    fn default() -> Self {
        Self::full()
    }
}
