//! Fixed-size asset header.
//!
//! The header is written first in every container. It addresses the two
//! variable-length sections by offset/size and declares which languages and
//! bytecode kinds those sections hold, so a loader can pick a variant before
//! reading any section body.
//!
//! # Layout (format version 1, little-endian, no padding)
//!
//! ```text
//! offset  size  field
//!      0     4  magic "G3SA"
//!      4     2  format version
//!      6     2  reserved (0)
//!      8     4  declared source languages
//!     12     4  declared compiled kinds
//!     16     8  source code offset
//!     24     8  source code size
//!     32     8  compiled data offset
//!     40     8  compiled data size
//!     48     4  compiled data block count
//!     52     4  reserved (0)
//! ```
//!
//! Offsets are absolute from the start of the container (the header start).

use crate::asset::{CompiledBytecodeKind, ShadingLanguage};
use crate::error::Result;
use crate::shader_bail;

/// Container magic
pub const ASSET_MAGIC: [u8; 4] = *b"G3SA";

/// Current container format version
pub const ASSET_FORMAT_VERSION: u16 = 1;

/// Size of the encoded header in bytes
pub const ASSET_HEADER_SIZE: u64 = 56;

/// Size of an entry prefix (tag: u8 + length: u32)
pub const ENTRY_PREFIX_SIZE: u64 = 5;

/// Fixed-size record addressing the container sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetHeader {
    /// Languages held by the source section
    pub source_languages: ShadingLanguage,
    /// Kinds held by the compiled section
    pub compiled_kinds: CompiledBytecodeKind,
    /// Absolute offset of the source section (0 when absent)
    pub source_code_offset: u64,
    /// Size of the source section in bytes (0 when absent)
    pub source_code_size: u64,
    /// Absolute offset of the compiled section (0 when absent)
    pub compiled_data_offset: u64,
    /// Size of the compiled section in bytes (0 when absent)
    pub compiled_data_size: u64,
    /// Number of entries in the compiled section
    pub compiled_data_block_count: u32,
}

impl AssetHeader {
    /// Header of an asset with no sections at all
    pub fn empty() -> Self {
        Self {
            source_languages: ShadingLanguage::empty(),
            compiled_kinds: CompiledBytecodeKind::empty(),
            source_code_offset: 0,
            source_code_size: 0,
            compiled_data_offset: 0,
            compiled_data_size: 0,
            compiled_data_block_count: 0,
        }
    }

    /// The header declares a source section
    pub fn declares_source_code(&self) -> bool {
        self.source_code_offset != 0 && self.source_code_size != 0
    }

    /// The header declares a compiled section
    pub fn declares_compiled_data(&self) -> bool {
        self.compiled_data_offset != 0
            && self.compiled_data_size != 0
            && self.compiled_data_block_count != 0
    }

    /// Total container length described by this header
    pub fn container_size(&self) -> u64 {
        let source_end = self.source_code_offset.saturating_add(self.source_code_size);
        let compiled_end = self.compiled_data_offset.saturating_add(self.compiled_data_size);
        ASSET_HEADER_SIZE.max(source_end).max(compiled_end)
    }

    /// Check the header invariants against the container length
    ///
    /// `container_len` is the number of bytes available from the header start.
    ///
    /// # Errors
    ///
    /// Returns `FormatError` naming the offending fields when:
    /// - an offset/size pair is half zero
    /// - a section overlaps the header, the other section, or runs past the end
    /// - the block count disagrees with the compiled section presence
    /// - the declared flag sets disagree with section presence
    pub fn validate(&self, container_len: u64) -> Result<()> {
        check_section("source", self.source_code_offset, self.source_code_size, container_len)?;
        check_section("compiled", self.compiled_data_offset, self.compiled_data_size, container_len)?;

        if (self.compiled_data_block_count == 0) != (self.compiled_data_size == 0) {
            shader_bail!(FormatError,
                "compiled data block count {} disagrees with compiled data size {}",
                self.compiled_data_block_count, self.compiled_data_size);
        }

        if self.compiled_data_size != 0
            && (self.compiled_data_block_count as u64) * ENTRY_PREFIX_SIZE > self.compiled_data_size
        {
            shader_bail!(FormatError,
                "compiled data size {} cannot hold {} blocks",
                self.compiled_data_size, self.compiled_data_block_count);
        }

        if self.source_languages.is_empty() != (self.source_code_size == 0) {
            shader_bail!(FormatError,
                "declared languages {:?} disagree with source section size {}",
                self.source_languages, self.source_code_size);
        }

        if self.compiled_kinds.is_empty() != (self.compiled_data_size == 0) {
            shader_bail!(FormatError,
                "declared kinds {:?} disagree with compiled section size {}",
                self.compiled_kinds, self.compiled_data_size);
        }

        if self.source_code_size != 0 && self.compiled_data_size != 0 {
            let source_end = self.source_code_offset + self.source_code_size;
            let compiled_end = self.compiled_data_offset + self.compiled_data_size;
            if self.source_code_offset < compiled_end && self.compiled_data_offset < source_end {
                shader_bail!(FormatError,
                    "source section [{}, {}) overlaps compiled section [{}, {})",
                    self.source_code_offset, source_end,
                    self.compiled_data_offset, compiled_end);
            }
        }

        Ok(())
    }
}

impl Default for AssetHeader {
    fn default() -> Self {
        Self::empty()
    }
}

/// Validate one offset/size pair
fn check_section(name: &str, offset: u64, size: u64, container_len: u64) -> Result<()> {
    if (offset == 0) != (size == 0) {
        shader_bail!(FormatError,
            "{} section offset {} and size {} must both be zero or both non-zero",
            name, offset, size);
    }
    if offset == 0 {
        return Ok(());
    }
    if offset < ASSET_HEADER_SIZE {
        shader_bail!(FormatError,
            "{} section offset {} overlaps the {}-byte header",
            name, offset, ASSET_HEADER_SIZE);
    }
    if size < ENTRY_PREFIX_SIZE {
        shader_bail!(FormatError,
            "{} section size {} is smaller than one entry prefix", name, size);
    }
    match offset.checked_add(size) {
        Some(end) if end <= container_len => Ok(()),
        _ => shader_bail!(FormatError,
            "{} section [offset {}, size {}] exceeds container length {}",
            name, offset, size, container_len),
    }
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod tests;
