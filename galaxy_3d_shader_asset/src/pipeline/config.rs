/// Import/export configuration.

use crate::codec::CodecConfig;

/// Importer configuration
#[derive(Debug, Clone, Copy)]
pub struct ImportConfig {
    /// Codec limits applied while decoding
    pub codec: CodecConfig,
    /// Load source code for just-in-time compilation when no bytecode matches
    pub allow_source_fallback: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            codec: CodecConfig::default(),
            allow_source_fallback: true,
        }
    }
}

/// Exporter configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportConfig {
    /// Codec limits applied while encoding
    pub codec: CodecConfig,
}
