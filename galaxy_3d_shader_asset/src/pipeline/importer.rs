/// Platform-aware shader asset import.

use std::io::{Read, Seek};
use std::sync::Arc;
use crate::asset::{
    has_compiled_data, has_source_code, AssetHeader, CompiledBytecodeKind, SelectedVariant,
    ShaderAsset, ShadingLanguage,
};
use crate::codec::{decode_header, decode_sections, DecodeRequest};
use crate::error::{Error, Result};
use crate::log::Logger;
use crate::pipeline::{log_and_return_error, ImportConfig};
use crate::platform::{resolve_platform, PlatformCapabilities, PlatformRequirements};
use crate::{shader_debug, shader_warn};

const IMPORTER_LOG_SOURCE: &str = "galaxy3d::ShaderImporter";

/// Imports shader assets for a platform
///
/// Holds no per-import state: one importer can serve concurrent imports of
/// distinct assets from a worker pool.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use galaxy_3d_shader_asset::galaxy3d::log::DefaultLogger;
/// use galaxy_3d_shader_asset::galaxy3d::pipeline::ShaderImporter;
/// use galaxy_3d_shader_asset::galaxy3d::platform::PlatformCapabilities;
///
/// let importer = ShaderImporter::new(Arc::new(DefaultLogger));
/// let file = std::fs::File::open("shaders/lit.g3sa")?;
/// let platform = PlatformCapabilities::WINDOWS | PlatformCapabilities::DIRECT3D12;
/// let asset = importer.import(std::io::BufReader::new(file), platform)?;
/// if asset.needs_compilation() {
///     // hand the source to the shader compiler
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ShaderImporter {
    logger: Arc<dyn Logger>,
    config: ImportConfig,
}

impl ShaderImporter {
    /// Create an importer with the default configuration
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_config(logger, ImportConfig::default())
    }

    /// Create an importer with an explicit configuration
    pub fn with_config(logger: Arc<dyn Logger>, config: ImportConfig) -> Self {
        Self { logger, config }
    }

    /// Importer configuration
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import the asset starting at the current stream position
    ///
    /// The stream is owned by the call and dropped on every exit path. Pass
    /// `&mut stream` to keep it.
    ///
    /// # Errors
    ///
    /// - `PlatformUnsupported` if the platform is not recognized
    /// - `FormatError` / `ConsistencyError` for a corrupt container
    /// - `VariantUnavailable` if the asset has neither a matching bytecode kind
    ///   nor (when fallback is enabled) any source code
    /// - `IoError` on stream failure
    ///
    /// Every failure is logged once at error level.
    pub fn import<R: Read + Seek>(&self, stream: R, platform: PlatformCapabilities) -> Result<ShaderAsset> {
        import_with(self.logger.as_ref(), &self.config, stream, platform)
    }
}

/// One-shot import with the default configuration
pub fn import_shader_asset<R: Read + Seek>(
    stream: R,
    platform: PlatformCapabilities,
    logger: &dyn Logger,
) -> Result<ShaderAsset> {
    import_with(logger, &ImportConfig::default(), stream, platform)
}

fn import_with<R: Read + Seek>(
    logger: &dyn Logger,
    config: &ImportConfig,
    mut stream: R,
    platform: PlatformCapabilities,
) -> Result<ShaderAsset> {
    let session = ImportSession { logger, config };
    session
        .run(&mut stream, platform)
        .map_err(|error| log_and_return_error(logger, IMPORTER_LOG_SOURCE, "import", error))
}

/// State of one import call
struct ImportSession<'a> {
    logger: &'a dyn Logger,
    config: &'a ImportConfig,
}

impl ImportSession<'_> {
    fn run<R: Read + Seek>(&self, stream: &mut R, platform: PlatformCapabilities) -> Result<ShaderAsset> {
        let requirements = resolve_platform(platform)?;

        let (header, base) = decode_header(stream, &self.config.codec)?;

        if let Some(kind) = self.compiled_candidate(&header, &requirements) {
            return self.import_compiled(stream, base, header, kind, &requirements);
        }

        if let Some(languages) = self.source_candidate(&header, &requirements) {
            return self.import_source(stream, base, header, languages, &requirements);
        }

        Err(Error::VariantUnavailable {
            requested_languages: if self.config.allow_source_fallback {
                requirements.preferred_language
            } else {
                ShadingLanguage::empty()
            },
            requested_kinds: requirements.required_kinds,
            available_languages: header.source_languages,
            available_kinds: header.compiled_kinds,
        })
    }

    /// Preferred required kind the header declares, if any
    fn compiled_candidate(
        &self,
        header: &AssetHeader,
        requirements: &PlatformRequirements,
    ) -> Option<CompiledBytecodeKind> {
        if !has_compiled_data(Some(header), None) {
            return None;
        }
        requirements.preferred_kind_in(header.compiled_kinds)
    }

    /// Languages to load for just-in-time compilation, if fallback applies
    ///
    /// The preferred language alone when declared, otherwise every declared
    /// known language.
    fn source_candidate(
        &self,
        header: &AssetHeader,
        requirements: &PlatformRequirements,
    ) -> Option<ShadingLanguage> {
        if !self.config.allow_source_fallback || !has_source_code(Some(header), None) {
            return None;
        }
        let declared = header.source_languages.intersection(ShadingLanguage::ALL);
        if declared.contains(requirements.preferred_language) {
            Some(requirements.preferred_language)
        } else if declared.is_empty() {
            None
        } else {
            Some(declared)
        }
    }

    fn import_compiled<R: Read + Seek>(
        &self,
        stream: &mut R,
        base: u64,
        header: AssetHeader,
        kind: CompiledBytecodeKind,
        requirements: &PlatformRequirements,
    ) -> Result<ShaderAsset> {
        let request = DecodeRequest::compiled(kind);
        let decoded = decode_sections(stream, base, header, &request, &self.config.codec, self.logger)?;

        shader_debug!(self.logger, IMPORTER_LOG_SOURCE,
            "Loaded {} bytecode for platform {:?}", kind.name(), requirements.platform);

        Ok(ShaderAsset::from_parts(
            header,
            decoded.into_description(),
            Some(SelectedVariant::Compiled(kind)),
        ))
    }

    fn import_source<R: Read + Seek>(
        &self,
        stream: &mut R,
        base: u64,
        header: AssetHeader,
        languages: ShadingLanguage,
        requirements: &PlatformRequirements,
    ) -> Result<ShaderAsset> {
        let request = DecodeRequest::source(languages);
        let decoded = decode_sections(stream, base, header, &request, &self.config.codec, self.logger)?;

        if languages == requirements.preferred_language {
            shader_warn!(self.logger, IMPORTER_LOG_SOURCE,
                "No {:?} bytecode for platform {:?}, falling back to {} source for just-in-time compilation",
                requirements.required_kinds, requirements.platform, languages.name());
        } else {
            shader_warn!(self.logger, IMPORTER_LOG_SOURCE,
                "No {:?} bytecode and no {} source for platform {:?}, falling back to {:?} source for just-in-time compilation",
                requirements.required_kinds, requirements.preferred_language.name(),
                requirements.platform, languages);
        }

        Ok(ShaderAsset::from_parts(
            header,
            decoded.into_description(),
            Some(SelectedVariant::Source(languages)),
        ))
    }
}

#[cfg(test)]
#[path = "importer_tests.rs"]
mod tests;
