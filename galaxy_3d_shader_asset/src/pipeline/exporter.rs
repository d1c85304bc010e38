/// Shader asset export.

use std::io::Write;
use std::sync::Arc;
use crate::asset::{CompiledBytecodeKind, ShaderAsset, ShadingLanguage};
use crate::codec::encode_to_vec;
use crate::error::{Error, Result};
use crate::log::Logger;
use crate::pipeline::{log_and_return_error, ExportConfig};
use crate::{shader_debug, shader_warn};

const EXPORTER_LOG_SOURCE: &str = "galaxy3d::ShaderExporter";

/// Writes shader assets restricted to a subset of their variants
pub struct ShaderExporter {
    logger: Arc<dyn Logger>,
    config: ExportConfig,
}

impl ShaderExporter {
    /// Create an exporter with the default configuration
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_config(logger, ExportConfig::default())
    }

    /// Create an exporter with an explicit configuration
    pub fn with_config(logger: Arc<dyn Logger>, config: ExportConfig) -> Self {
        Self { logger, config }
    }

    /// Exporter configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Write the variants of `asset` selected by `target_languages` and
    /// `target_kinds` to `stream`
    ///
    /// The container is built in memory first, so a failure never leaves a
    /// partial container behind. Requested variants the asset does not hold
    /// are reported by one warning.
    ///
    /// # Errors
    ///
    /// - `VariantUnavailable` if none of the requested variants is present
    ///   (nothing is written)
    /// - `InvalidAsset` if the filtered asset exceeds the codec limits
    /// - `IoError` on stream failure
    pub fn export<W: Write>(
        &self,
        asset: &ShaderAsset,
        target_languages: ShadingLanguage,
        target_kinds: CompiledBytecodeKind,
        stream: W,
    ) -> Result<()> {
        export_with(self.logger.as_ref(), &self.config, asset, target_languages, target_kinds, stream)
    }
}

/// One-shot export with the default configuration
pub fn export_shader_asset<W: Write>(
    asset: &ShaderAsset,
    target_languages: ShadingLanguage,
    target_kinds: CompiledBytecodeKind,
    stream: W,
    logger: &dyn Logger,
) -> Result<()> {
    export_with(logger, &ExportConfig::default(), asset, target_languages, target_kinds, stream)
}

fn export_with<W: Write>(
    logger: &dyn Logger,
    config: &ExportConfig,
    asset: &ShaderAsset,
    target_languages: ShadingLanguage,
    target_kinds: CompiledBytecodeKind,
    mut stream: W,
) -> Result<()> {
    write_filtered(logger, config, asset, target_languages, target_kinds, &mut stream)
        .map_err(|error| log_and_return_error(logger, EXPORTER_LOG_SOURCE, "export", error))
}

fn write_filtered<W: Write>(
    logger: &dyn Logger,
    config: &ExportConfig,
    asset: &ShaderAsset,
    target_languages: ShadingLanguage,
    target_kinds: CompiledBytecodeKind,
    stream: &mut W,
) -> Result<()> {
    let description = asset.description().filtered(target_languages, target_kinds);
    if description.is_empty() {
        return Err(Error::VariantUnavailable {
            requested_languages: target_languages,
            requested_kinds: target_kinds,
            available_languages: asset.available_languages(),
            available_kinds: asset.available_kinds(),
        });
    }

    // Wildcard targets are not a list of expectations
    let missing_languages = if target_languages == ShadingLanguage::ALL {
        ShadingLanguage::empty()
    } else {
        target_languages.difference(description.languages())
    };
    let missing_kinds = if target_kinds == CompiledBytecodeKind::ALL {
        CompiledBytecodeKind::empty()
    } else {
        target_kinds.difference(description.kinds())
    };
    if !missing_languages.is_empty() || !missing_kinds.is_empty() {
        shader_warn!(logger, EXPORTER_LOG_SOURCE,
            "Exporting without requested variants: languages {:?}, kinds {:?}",
            missing_languages, missing_kinds);
    }

    let bytes = encode_to_vec(&description, &config.codec)?;
    stream.write_all(&bytes)?;
    stream.flush()?;

    shader_debug!(logger, EXPORTER_LOG_SOURCE,
        "Exported {} bytes (languages {:?}, kinds {:?})",
        bytes.len(), description.languages(), description.kinds());

    Ok(())
}

#[cfg(test)]
#[path = "exporter_tests.rs"]
mod tests;
