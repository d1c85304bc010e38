/// Binary encoding of the fixed-size asset header.

use std::io::{self, Read, Write};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crate::asset::{
    AssetHeader, CompiledBytecodeKind, ShadingLanguage,
    ASSET_FORMAT_VERSION, ASSET_MAGIC,
};
use crate::error::{Error, Result};
use crate::{shader_bail, shader_err};

/// Read a header at the current stream position
///
/// Only the fixed fields are checked here (magic, version, reserved words).
/// Offset/size invariants need the container length, see `AssetHeader::validate`.
///
/// # Errors
///
/// Returns `FormatError` for a short read or an unknown magic/version, and
/// `IoError` for any other stream failure.
pub fn read_header<R: Read>(reader: &mut R) -> Result<AssetHeader> {
    let eof = |err: io::Error| truncated(err, "header");

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(eof)?;
    if magic != ASSET_MAGIC {
        shader_bail!(FormatError, "Bad asset magic {:02x?}, expected {:02x?}", magic, ASSET_MAGIC);
    }

    let version = reader.read_u16::<LittleEndian>().map_err(eof)?;
    if version != ASSET_FORMAT_VERSION {
        shader_bail!(FormatError,
            "Unsupported asset format version {} (this build reads version {})",
            version, ASSET_FORMAT_VERSION);
    }

    let reserved = reader.read_u16::<LittleEndian>().map_err(eof)?;
    if reserved != 0 {
        shader_bail!(FormatError, "Reserved header word is {:#06x}, expected 0", reserved);
    }

    // Unknown bits are kept: they name variants written by a newer exporter
    let source_languages = ShadingLanguage::from_bits_retain(reader.read_u32::<LittleEndian>().map_err(eof)?);
    let compiled_kinds = CompiledBytecodeKind::from_bits_retain(reader.read_u32::<LittleEndian>().map_err(eof)?);

    let source_code_offset = reader.read_u64::<LittleEndian>().map_err(eof)?;
    let source_code_size = reader.read_u64::<LittleEndian>().map_err(eof)?;
    let compiled_data_offset = reader.read_u64::<LittleEndian>().map_err(eof)?;
    let compiled_data_size = reader.read_u64::<LittleEndian>().map_err(eof)?;
    let compiled_data_block_count = reader.read_u32::<LittleEndian>().map_err(eof)?;

    let reserved = reader.read_u32::<LittleEndian>().map_err(eof)?;
    if reserved != 0 {
        shader_bail!(FormatError, "Reserved header trailer is {:#010x}, expected 0", reserved);
    }

    Ok(AssetHeader {
        source_languages,
        compiled_kinds,
        source_code_offset,
        source_code_size,
        compiled_data_offset,
        compiled_data_size,
        compiled_data_block_count,
    })
}

/// Write a header at the current stream position
pub fn write_header<W: Write>(writer: &mut W, header: &AssetHeader) -> Result<()> {
    writer.write_all(&ASSET_MAGIC)?;
    writer.write_u16::<LittleEndian>(ASSET_FORMAT_VERSION)?;
    writer.write_u16::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(header.source_languages.bits())?;
    writer.write_u32::<LittleEndian>(header.compiled_kinds.bits())?;
    writer.write_u64::<LittleEndian>(header.source_code_offset)?;
    writer.write_u64::<LittleEndian>(header.source_code_size)?;
    writer.write_u64::<LittleEndian>(header.compiled_data_offset)?;
    writer.write_u64::<LittleEndian>(header.compiled_data_size)?;
    writer.write_u32::<LittleEndian>(header.compiled_data_block_count)?;
    writer.write_u32::<LittleEndian>(0)?;
    Ok(())
}

/// Map a read failure, reporting end-of-stream as truncation
pub(crate) fn truncated(err: io::Error, what: &str) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        shader_err!(FormatError, "Truncated {}: stream ended early", what)
    } else {
        Error::from(err)
    }
}

#[cfg(test)]
#[path = "header_codec_tests.rs"]
mod tests;
