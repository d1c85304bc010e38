/// Tag + length + payload entries of the source and compiled sections.

use std::collections::BTreeMap;
use std::io::{self, Read, Seek, SeekFrom, Write};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crate::asset::{
    AssetHeader, CompiledBlock, CompiledBytecodeKind, ShadingLanguage, ENTRY_PREFIX_SIZE,
};
use crate::codec::header_codec::truncated;
use crate::codec::{CodecConfig, CODEC_LOG_SOURCE};
use crate::error::Result;
use crate::log::Logger;
use crate::{shader_bail, shader_warn};

/// Tag and payload length of one entry
#[derive(Debug, Clone, Copy)]
struct EntryPrefix {
    tag: u8,
    length: u32,
}

/// Read an entry prefix, checking it fits in the bytes left in the section
fn read_entry_prefix<R: Read>(
    reader: &mut R,
    section: &str,
    remaining: u64,
    config: &CodecConfig,
) -> Result<EntryPrefix> {
    if remaining < ENTRY_PREFIX_SIZE {
        shader_bail!(FormatError,
            "{} section has {} trailing bytes, too few for an entry prefix", section, remaining);
    }

    let eof = |err: io::Error| truncated(err, section);
    let tag = reader.read_u8().map_err(eof)?;
    let length = reader.read_u32::<LittleEndian>().map_err(eof)?;

    if length as u64 > remaining - ENTRY_PREFIX_SIZE {
        shader_bail!(FormatError,
            "{} entry (tag {}) declares {} bytes but only {} remain in the section",
            section, tag, length, remaining - ENTRY_PREFIX_SIZE);
    }
    if length > config.max_entry_size {
        shader_bail!(FormatError,
            "{} entry (tag {}) of {} bytes exceeds the {} byte entry limit",
            section, tag, length, config.max_entry_size);
    }

    Ok(EntryPrefix { tag, length })
}

fn read_payload<R: Read>(reader: &mut R, section: &str, length: u32) -> Result<Vec<u8>> {
    let mut payload = vec![0u8; length as usize];
    reader.read_exact(&mut payload).map_err(|err| truncated(err, section))?;
    Ok(payload)
}

fn skip_payload<R: Seek>(reader: &mut R, length: u32) -> Result<()> {
    reader.seek(SeekFrom::Current(length as i64))?;
    Ok(())
}

/// Source languages read from the source section
pub(crate) struct SourceSection {
    /// Materialized entries (requested languages only)
    pub sources: BTreeMap<ShadingLanguage, Vec<u8>>,
    /// Every known language found on disk
    pub found: ShadingLanguage,
}

/// Compiled blocks read from the compiled section
pub(crate) struct CompiledSection {
    /// Materialized blocks (requested kinds only), in container order
    pub blocks: Vec<CompiledBlock>,
    /// Every known kind found on disk
    pub found: CompiledBytecodeKind,
    /// Blocks skipped for an unknown kind tag
    pub skipped: u32,
}

/// Parse the source section, materializing only the `wanted` languages
///
/// Entries are parsed until the section is exhausted. Unknown tags are
/// skipped with a warning; a repeated language is a format error.
pub(crate) fn read_source_section<R: Read + Seek>(
    reader: &mut R,
    base: u64,
    header: &AssetHeader,
    wanted: ShadingLanguage,
    config: &CodecConfig,
    logger: &dyn Logger,
) -> Result<SourceSection> {
    reader.seek(SeekFrom::Start(base + header.source_code_offset))?;

    let mut section = SourceSection {
        sources: BTreeMap::new(),
        found: ShadingLanguage::empty(),
    };
    let mut remaining = header.source_code_size;

    while remaining > 0 {
        let prefix = read_entry_prefix(reader, "source", remaining, config)?;
        remaining -= ENTRY_PREFIX_SIZE + prefix.length as u64;

        match ShadingLanguage::from_tag(prefix.tag) {
            Some(language) => {
                if section.found.contains(language) {
                    shader_bail!(FormatError,
                        "Source section holds language {} twice", language.name());
                }
                section.found |= language;
                if wanted.contains(language) {
                    let code = read_payload(reader, "source", prefix.length)?;
                    section.sources.insert(language, code);
                } else {
                    skip_payload(reader, prefix.length)?;
                }
            }
            None => {
                shader_warn!(logger, CODEC_LOG_SOURCE,
                    "Skipping source entry with unknown language tag {} ({} bytes)",
                    prefix.tag, prefix.length);
                skip_payload(reader, prefix.length)?;
            }
        }
    }

    check_declared(
        "source",
        header.source_languages.intersection(ShadingLanguage::ALL).bits(),
        section.found.bits(),
        &format!("{:?}", header.source_languages),
        &format!("{:?}", section.found),
    )?;

    Ok(section)
}

/// Parse exactly `compiled_data_block_count` entries of the compiled section
///
/// Bytes after the last declared block are never read.
pub(crate) fn read_compiled_section<R: Read + Seek>(
    reader: &mut R,
    base: u64,
    header: &AssetHeader,
    wanted: CompiledBytecodeKind,
    config: &CodecConfig,
    logger: &dyn Logger,
) -> Result<CompiledSection> {
    reader.seek(SeekFrom::Start(base + header.compiled_data_offset))?;

    let mut section = CompiledSection {
        blocks: Vec::new(),
        found: CompiledBytecodeKind::empty(),
        skipped: 0,
    };
    let mut remaining = header.compiled_data_size;

    for index in 0..header.compiled_data_block_count {
        let prefix = read_entry_prefix(reader, "compiled", remaining, config)?;
        remaining -= ENTRY_PREFIX_SIZE + prefix.length as u64;

        match CompiledBytecodeKind::from_tag(prefix.tag) {
            Some(kind) => {
                if section.found.contains(kind) {
                    shader_bail!(FormatError,
                        "Compiled section holds kind {} twice (block {})", kind.name(), index);
                }
                section.found |= kind;
                if wanted.contains(kind) {
                    let data = read_payload(reader, "compiled", prefix.length)?;
                    section.blocks.push(CompiledBlock { kind, data });
                } else {
                    skip_payload(reader, prefix.length)?;
                }
            }
            None => {
                shader_warn!(logger, CODEC_LOG_SOURCE,
                    "Skipping compiled block {} with unknown kind tag {} ({} bytes)",
                    index, prefix.tag, prefix.length);
                section.skipped += 1;
                skip_payload(reader, prefix.length)?;
            }
        }
    }

    check_declared(
        "compiled",
        header.compiled_kinds.intersection(CompiledBytecodeKind::ALL).bits(),
        section.found.bits(),
        &format!("{:?}", header.compiled_kinds),
        &format!("{:?}", section.found),
    )?;

    Ok(section)
}

/// The known variants found on disk must match what the header declares
fn check_declared(section: &str, declared: u32, found: u32, declared_text: &str, found_text: &str) -> Result<()> {
    if found == 0 {
        shader_bail!(ConsistencyError,
            "Header declares a {} section ({}) but it holds no known entry", section, declared_text);
    }
    if declared != found {
        shader_bail!(ConsistencyError,
            "Header declares {} variants {} but the section holds {}", section, declared_text, found_text);
    }
    Ok(())
}

/// Write one entry
pub(crate) fn write_entry<W: Write>(writer: &mut W, tag: u8, payload: &[u8]) -> Result<()> {
    writer.write_u8(tag)?;
    writer.write_u32::<LittleEndian>(payload.len() as u32)?;
    writer.write_all(payload)?;
    Ok(())
}
