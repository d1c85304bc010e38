/// Container encoding (export path).

use std::io::Write;
use crate::asset::{AssetDescription, AssetHeader};
use crate::codec::section::write_entry;
use crate::codec::{write_header, CodecConfig};
use crate::error::Result;
use crate::shader_bail;

/// Encode a description as a complete container
///
/// Section sizes are computed first, then the header, the source section and
/// the compiled section are written back to back. Empty sections are never
/// written: their header fields stay zero.
///
/// Writes go straight to `writer`; use `encode_to_vec` when a failure must not
/// leave partial output behind.
///
/// # Returns
///
/// The header that was written.
///
/// # Errors
///
/// - `InvalidAsset` if the description is invalid or exceeds the codec limits
/// - `IoError` on stream failure
pub fn encode<W: Write>(
    description: &AssetDescription,
    writer: &mut W,
    config: &CodecConfig,
) -> Result<AssetHeader> {
    let header = layout(description, config)?;

    write_header(writer, &header)?;

    for (language, code) in &description.source_code {
        if let Some(tag) = language.tag() {
            write_entry(writer, tag, code)?;
        }
    }

    for block in &description.compiled_blocks {
        if let Some(tag) = block.kind.tag() {
            write_entry(writer, tag, &block.data)?;
        }
    }

    Ok(header)
}

/// Encode a description into a new buffer
pub fn encode_to_vec(description: &AssetDescription, config: &CodecConfig) -> Result<Vec<u8>> {
    let header = layout(description, config)?;
    let mut buffer = Vec::with_capacity(header.container_size() as usize);
    encode(description, &mut buffer, config)?;
    debug_assert_eq!(buffer.len() as u64, header.container_size());
    Ok(buffer)
}

/// Validate the description and compute the header it encodes to
fn layout(description: &AssetDescription, config: &CodecConfig) -> Result<AssetHeader> {
    description.validate()?;

    let oversized_source = description
        .source_code
        .iter()
        .find(|(_, code)| code.len() as u64 > config.max_entry_size as u64);
    if let Some((language, code)) = oversized_source {
        shader_bail!(InvalidAsset,
            "{} source of {} bytes exceeds the {} byte entry limit",
            language.name(), code.len(), config.max_entry_size);
    }

    let oversized_block = description
        .compiled_blocks
        .iter()
        .find(|block| block.data.len() as u64 > config.max_entry_size as u64);
    if let Some(block) = oversized_block {
        shader_bail!(InvalidAsset,
            "{} bytecode of {} bytes exceeds the {} byte entry limit",
            block.kind.name(), block.data.len(), config.max_entry_size);
    }

    let header = AssetHeader::for_description(description)?;
    if header.source_code_size > config.max_section_size
        || header.compiled_data_size > config.max_section_size
    {
        shader_bail!(InvalidAsset,
            "Section sizes (source {}, compiled {}) exceed the {} byte section limit",
            header.source_code_size, header.compiled_data_size, config.max_section_size);
    }

    Ok(header)
}

#[cfg(test)]
#[path = "encoder_tests.rs"]
mod tests;
