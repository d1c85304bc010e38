//! Parsed view of the variable-length sections.
//!
//! An empty source map or an empty block list means "section absent": the
//! container format has no way to store a present-but-empty section.

use std::collections::BTreeMap;
use crate::asset::{CompiledBytecodeKind, ShadingLanguage};
use crate::error::Result;
use crate::shader_bail;

/// One precompiled bytecode blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBlock {
    /// Bytecode format of `data` (single flag)
    pub kind: CompiledBytecodeKind,
    /// Raw bytecode
    pub data: Vec<u8>,
}

/// Structured content of the source and compiled sections
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetDescription {
    /// Source code keyed by a single language, in tag order
    pub source_code: BTreeMap<ShadingLanguage, Vec<u8>>,
    /// Compiled blobs in container order, at most one per kind
    pub compiled_blocks: Vec<CompiledBlock>,
}

impl AssetDescription {
    /// Create an empty description
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the source for a language, returning the previous source
    pub fn insert_source(&mut self, language: ShadingLanguage, code: Vec<u8>) -> Option<Vec<u8>> {
        self.source_code.insert(language, code)
    }

    /// Insert or replace the blob of a kind, returning the previous blob
    ///
    /// A replaced blob keeps its position in the block order.
    pub fn insert_compiled(&mut self, kind: CompiledBytecodeKind, data: Vec<u8>) -> Option<Vec<u8>> {
        match self.compiled_blocks.iter_mut().find(|block| block.kind == kind) {
            Some(block) => Some(std::mem::replace(&mut block.data, data)),
            None => {
                self.compiled_blocks.push(CompiledBlock { kind, data });
                None
            }
        }
    }

    /// Source for one language
    pub fn source(&self, language: ShadingLanguage) -> Option<&[u8]> {
        self.source_code.get(&language).map(Vec::as_slice)
    }

    /// Blob of one kind
    pub fn compiled(&self, kind: CompiledBytecodeKind) -> Option<&[u8]> {
        self.compiled_blocks
            .iter()
            .find(|block| block.kind == kind)
            .map(|block| block.data.as_slice())
    }

    /// Union of the languages present
    pub fn languages(&self) -> ShadingLanguage {
        self.source_code
            .keys()
            .fold(ShadingLanguage::empty(), |acc, language| acc | *language)
    }

    /// Union of the kinds present
    pub fn kinds(&self) -> CompiledBytecodeKind {
        self.compiled_blocks
            .iter()
            .fold(CompiledBytecodeKind::empty(), |acc, block| acc | block.kind)
    }

    /// True when the source section would be written
    pub fn has_source_section(&self) -> bool {
        !self.source_code.is_empty()
    }

    /// True when the compiled section would be written
    pub fn has_compiled_section(&self) -> bool {
        !self.compiled_blocks.is_empty()
    }

    /// True when neither section holds anything
    pub fn is_empty(&self) -> bool {
        !self.has_source_section() && !self.has_compiled_section()
    }

    /// Check that every key is one known flag and no kind repeats
    ///
    /// # Errors
    ///
    /// Returns `InvalidAsset` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if let Some(language) = self.source_code.keys().find(|language| !language.is_single()) {
            shader_bail!(InvalidAsset,
                "Source entry key {:?} must be exactly one known language", language);
        }

        let mut seen = CompiledBytecodeKind::empty();
        for block in &self.compiled_blocks {
            if !block.kind.is_single() {
                shader_bail!(InvalidAsset,
                    "Compiled block key {:?} must be exactly one known kind", block.kind);
            }
            if seen.contains(block.kind) {
                shader_bail!(InvalidAsset, "Duplicate compiled kind {}", block.kind.name());
            }
            seen |= block.kind;
        }

        Ok(())
    }

    /// Copy of the variants matching the given languages and kinds
    pub fn filtered(&self, languages: ShadingLanguage, kinds: CompiledBytecodeKind) -> Self {
        Self {
            source_code: self
                .source_code
                .iter()
                .filter(|(language, _)| languages.contains(**language))
                .map(|(language, code)| (*language, code.clone()))
                .collect(),
            compiled_blocks: self
                .compiled_blocks
                .iter()
                .filter(|block| kinds.contains(block.kind))
                .cloned()
                .collect(),
        }
    }
}
