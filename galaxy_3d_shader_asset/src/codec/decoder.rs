/// Container decoding with partial (per-section, per-variant) reads.

use std::io::{Read, Seek, SeekFrom};
use crate::asset::{
    compiled_data_presence, has_compiled_data, has_source_code, source_code_presence,
    AssetDescription, AssetHeader, SectionPresence, ShaderAsset, ASSET_HEADER_SIZE,
};
use crate::codec::section::{read_compiled_section, read_source_section};
use crate::codec::{read_header, CodecConfig, DecodeRequest};
use crate::error::Result;
use crate::log::Logger;
use crate::shader_bail;

/// Read and validate the header of the container at the current position
///
/// Leaves the stream positioned right after the header.
///
/// # Returns
///
/// The header and the stream position of the container start (the base
/// every section offset is relative to).
///
/// # Errors
///
/// - `FormatError` if the header is truncated or violates an invariant
/// - `IoError` on stream failure
pub fn decode_header<R: Read + Seek>(reader: &mut R, config: &CodecConfig) -> Result<(AssetHeader, u64)> {
    let base = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(base))?;

    let container_len = end.saturating_sub(base);
    if container_len < ASSET_HEADER_SIZE {
        shader_bail!(FormatError,
            "Truncated header: {} bytes available, {} required", container_len, ASSET_HEADER_SIZE);
    }

    let header = read_header(reader)?;
    header.validate(container_len)?;

    if header.source_code_size > config.max_section_size {
        shader_bail!(FormatError,
            "Source section of {} bytes exceeds the {} byte section limit",
            header.source_code_size, config.max_section_size);
    }
    if header.compiled_data_size > config.max_section_size {
        shader_bail!(FormatError,
            "Compiled section of {} bytes exceeds the {} byte section limit",
            header.compiled_data_size, config.max_section_size);
    }

    Ok((header, base))
}

/// Decode a container, materializing only what `request` asks for
///
/// 1. Read and validate the header.
/// 2. If source is requested and declared, parse the source section.
/// 3. If compiled data is requested and declared, parse exactly
///    `compiled_data_block_count` blocks.
/// 4. Cross-check parsed sections against the header.
///
/// On success the stream is left at the end of the container.
///
/// # Errors
///
/// - `FormatError` for malformed bytes (bad header, truncated or overrunning entries,
///   duplicate variants)
/// - `ConsistencyError` when the header and the sections contradict each other
/// - `IoError` on stream failure
pub fn decode<R: Read + Seek>(
    reader: &mut R,
    request: &DecodeRequest,
    config: &CodecConfig,
    logger: &dyn Logger,
) -> Result<ShaderAsset> {
    let (header, base) = decode_header(reader, config)?;
    decode_sections(reader, base, header, request, config, logger)
}

/// Decode the sections of a container whose header was already read
///
/// `base` and `header` are the values returned by `decode_header`. This is
/// steps 2 to 4 of `decode`, letting a caller choose the request after
/// inspecting the header.
pub fn decode_sections<R: Read + Seek>(
    reader: &mut R,
    base: u64,
    header: AssetHeader,
    request: &DecodeRequest,
    config: &CodecConfig,
    logger: &dyn Logger,
) -> Result<ShaderAsset> {
    let mut description = AssetDescription::new();

    let source_requested = request.wants_source() && has_source_code(Some(&header), None);
    if source_requested {
        let section = read_source_section(reader, base, &header, request.languages, config, logger)?;
        description.source_code = section.sources;
    }

    let compiled_requested = request.wants_compiled() && has_compiled_data(Some(&header), None);
    let mut skipped_blocks = 0;
    if compiled_requested {
        let section = read_compiled_section(reader, base, &header, request.kinds, config, logger)?;
        description.compiled_blocks = section.blocks;
        skipped_blocks = section.skipped;
    }

    // An unfiltered read must describe exactly what the header declares
    if source_requested && request.languages.contains(header.source_languages) {
        check_presence("source", source_code_presence(Some(&header), Some(&description)))?;
    }
    if compiled_requested && request.kinds.contains(header.compiled_kinds) {
        // Unknown blocks count on disk but never reach the description
        let known = AssetHeader {
            compiled_data_block_count: header.compiled_data_block_count - skipped_blocks,
            ..header
        };
        check_presence("compiled", compiled_data_presence(Some(&known), Some(&description)))?;
    }

    reader.seek(SeekFrom::Start(base + header.container_size()))?;

    Ok(ShaderAsset::from_parts(header, description, None))
}

fn check_presence(section: &str, presence: SectionPresence) -> Result<()> {
    if presence == SectionPresence::Inconsistent {
        shader_bail!(ConsistencyError,
            "Header and parsed {} section disagree on section presence", section);
    }
    Ok(())
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
