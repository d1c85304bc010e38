//! Shader asset record.
//!
//! A `ShaderAsset` owns one shader's complete multi-variant payload: the
//! header, the parsed description and, after an import, which variant the
//! importer selected for the running platform.
//!
//! The presence predicates in this module never fail. They report a
//! tri-state `SectionPresence`; callers decide whether `Inconsistent` is fatal.

use crate::asset::{
    AssetDescription, AssetHeader, CompiledBytecodeKind, ShadingLanguage,
    ASSET_HEADER_SIZE, ENTRY_PREFIX_SIZE,
};
use crate::error::Result;
use crate::shader_bail;

// ============================================================================
// SECTION PRESENCE
// ============================================================================

/// Presence of a section as seen by the header and, optionally, the description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPresence {
    /// Neither side reports the section
    Absent,
    /// The header declares the section and the description (if any) agrees
    Present,
    /// The header and the description disagree
    Inconsistent,
}

impl SectionPresence {
    fn resolve(declared: bool, described: Option<bool>) -> Self {
        match (declared, described) {
            (false, None) | (false, Some(false)) => SectionPresence::Absent,
            (true, None) | (true, Some(true)) => SectionPresence::Present,
            _ => SectionPresence::Inconsistent,
        }
    }
}

/// Presence of the source section
///
/// Without a header the section is `Absent`. Without a description the header
/// alone is trusted (header-only reads).
pub fn source_code_presence(
    header: Option<&AssetHeader>,
    description: Option<&AssetDescription>,
) -> SectionPresence {
    match header {
        Some(header) => SectionPresence::resolve(
            header.declares_source_code(),
            description.map(AssetDescription::has_source_section),
        ),
        None => SectionPresence::Absent,
    }
}

/// Presence of the compiled section
///
/// A described compiled section must also hold exactly
/// `compiled_data_block_count` blocks to be `Present`.
pub fn compiled_data_presence(
    header: Option<&AssetHeader>,
    description: Option<&AssetDescription>,
) -> SectionPresence {
    match header {
        Some(header) => {
            let presence = SectionPresence::resolve(
                header.declares_compiled_data(),
                description.map(AssetDescription::has_compiled_section),
            );
            match description {
                Some(description)
                    if presence == SectionPresence::Present
                        && description.compiled_blocks.len() != header.compiled_data_block_count as usize =>
                {
                    SectionPresence::Inconsistent
                }
                _ => presence,
            }
        }
        None => SectionPresence::Absent,
    }
}

/// True only when the source section is present and consistent
pub fn has_source_code(header: Option<&AssetHeader>, description: Option<&AssetDescription>) -> bool {
    source_code_presence(header, description) == SectionPresence::Present
}

/// True only when the compiled section is present and consistent
pub fn has_compiled_data(header: Option<&AssetHeader>, description: Option<&AssetDescription>) -> bool {
    compiled_data_presence(header, description) == SectionPresence::Present
}

// ============================================================================
// HEADER LAYOUT
// ============================================================================

impl AssetHeader {
    /// Header the encoder writes for a description
    ///
    /// The source section immediately follows the header; the compiled section
    /// follows the source section, or the header when there is no source.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAsset` when a payload does not fit a 32-bit length or
    /// there are more blocks than a 32-bit count can hold.
    pub fn for_description(description: &AssetDescription) -> Result<Self> {
        let mut header = AssetHeader::empty();
        let mut cursor = ASSET_HEADER_SIZE;

        if description.has_source_section() {
            let mut size = 0u64;
            for (language, code) in &description.source_code {
                size += entry_size(language.name(), code.len())?;
            }
            header.source_languages = description.languages();
            header.source_code_offset = cursor;
            header.source_code_size = size;
            cursor += size;
        }

        if description.has_compiled_section() {
            let mut size = 0u64;
            for block in &description.compiled_blocks {
                size += entry_size(block.kind.name(), block.data.len())?;
            }
            let count = match u32::try_from(description.compiled_blocks.len()) {
                Ok(count) => count,
                Err(_) => shader_bail!(InvalidAsset,
                    "{} compiled blocks exceed the block count range",
                    description.compiled_blocks.len()),
            };
            header.compiled_kinds = description.kinds();
            header.compiled_data_offset = cursor;
            header.compiled_data_size = size;
            header.compiled_data_block_count = count;
        }

        Ok(header)
    }
}

fn entry_size(name: &str, len: usize) -> Result<u64> {
    if u32::try_from(len).is_err() {
        shader_bail!(InvalidAsset, "{} payload of {} bytes exceeds the 32-bit entry length", name, len);
    }
    Ok(ENTRY_PREFIX_SIZE + len as u64)
}

// ============================================================================
// SHADER ASSET
// ============================================================================

/// Variant an import selected for the running platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedVariant {
    /// Precompiled bytecode ready for the graphics layer
    Compiled(CompiledBytecodeKind),
    /// Source code the caller must compile just-in-time
    ///
    /// Holds several languages when the preferred one was missing.
    Source(ShadingLanguage),
}

/// One packaged shader with all its stored variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderAsset {
    header: AssetHeader,
    description: AssetDescription,
    selected_variant: Option<SelectedVariant>,
}

/// Descriptor for assembling a shader asset in memory (export preparation)
#[derive(Debug, Clone, Default)]
pub struct ShaderAssetDesc {
    /// Source code per language (single flag each)
    pub source_code: Vec<(ShadingLanguage, Vec<u8>)>,
    /// Compiled blobs per kind (single flag each), in container order
    pub compiled_blocks: Vec<(CompiledBytecodeKind, Vec<u8>)>,
}

impl ShaderAsset {
    /// Assemble an asset from a descriptor
    ///
    /// # Errors
    ///
    /// Returns `InvalidAsset` if a key is not exactly one known flag, a
    /// language or kind appears twice, or a payload is too large for the format.
    pub fn from_desc(desc: ShaderAssetDesc) -> Result<Self> {
        let mut description = AssetDescription::new();

        for (language, code) in desc.source_code {
            if !language.is_single() {
                shader_bail!(InvalidAsset,
                    "Source entry key {:?} must be exactly one known language", language);
            }
            if description.insert_source(language, code).is_some() {
                shader_bail!(InvalidAsset, "Duplicate source language {}", language.name());
            }
        }

        for (kind, data) in desc.compiled_blocks {
            if !kind.is_single() {
                shader_bail!(InvalidAsset,
                    "Compiled block key {:?} must be exactly one known kind", kind);
            }
            if description.insert_compiled(kind, data).is_some() {
                shader_bail!(InvalidAsset, "Duplicate compiled kind {}", kind.name());
            }
        }

        Self::from_description(description)
    }

    /// Assemble an asset around an existing description
    ///
    /// # Errors
    ///
    /// Returns `InvalidAsset` when the description fails validation.
    pub fn from_description(description: AssetDescription) -> Result<Self> {
        description.validate()?;
        let header = AssetHeader::for_description(&description)?;
        Ok(Self {
            header,
            description,
            selected_variant: None,
        })
    }

    /// Build from decoded parts (internal use by the codec and importer)
    pub(crate) fn from_parts(
        header: AssetHeader,
        description: AssetDescription,
        selected_variant: Option<SelectedVariant>,
    ) -> Self {
        Self {
            header,
            description,
            selected_variant,
        }
    }

    /// Header as read from (or computed for) the container
    pub fn header(&self) -> &AssetHeader {
        &self.header
    }

    /// Materialized section contents
    pub fn description(&self) -> &AssetDescription {
        &self.description
    }

    /// Consume the asset, returning its description
    pub fn into_description(self) -> AssetDescription {
        self.description
    }

    /// Variant selected by the importer, `None` for decoded or assembled assets
    pub fn selected_variant(&self) -> Option<SelectedVariant> {
        self.selected_variant
    }

    /// True when the importer fell back to source code
    pub fn needs_compilation(&self) -> bool {
        matches!(self.selected_variant, Some(SelectedVariant::Source(_)))
    }

    /// Languages declared by the header (materialized or not)
    pub fn declared_languages(&self) -> ShadingLanguage {
        self.header.source_languages
    }

    /// Kinds declared by the header (materialized or not)
    pub fn declared_kinds(&self) -> CompiledBytecodeKind {
        self.header.compiled_kinds
    }

    /// Languages actually materialized in this asset
    pub fn available_languages(&self) -> ShadingLanguage {
        self.description.languages()
    }

    /// Kinds actually materialized in this asset
    pub fn available_kinds(&self) -> CompiledBytecodeKind {
        self.description.kinds()
    }

    /// Source code for one language
    pub fn source_code(&self, language: ShadingLanguage) -> Option<&[u8]> {
        self.description.source(language)
    }

    /// Bytecode of one kind
    pub fn byte_code(&self, kind: CompiledBytecodeKind) -> Option<&[u8]> {
        self.description.compiled(kind)
    }

    pub fn byte_code_dxbc(&self) -> Option<&[u8]> {
        self.byte_code(CompiledBytecodeKind::DXBC)
    }

    pub fn byte_code_dxil(&self) -> Option<&[u8]> {
        self.byte_code(CompiledBytecodeKind::DXIL)
    }

    pub fn byte_code_spirv(&self) -> Option<&[u8]> {
        self.byte_code(CompiledBytecodeKind::SPIRV)
    }

    pub fn byte_code_metal(&self) -> Option<&[u8]> {
        self.byte_code(CompiledBytecodeKind::METAL)
    }

    /// True when source code was materialized in this asset
    ///
    /// A filtered import may leave a declared section unmaterialized; use
    /// `has_source_code(Some(asset.header()), None)` for the on-disk view.
    pub fn has_source_code(&self) -> bool {
        self.description.has_source_section()
    }

    /// True when bytecode was materialized in this asset
    pub fn has_compiled_data(&self) -> bool {
        self.description.has_compiled_section()
    }
}

#[cfg(test)]
#[path = "shader_asset_tests.rs"]
mod tests;
