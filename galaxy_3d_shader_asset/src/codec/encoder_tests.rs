//! Unit tests for encoder.rs

use std::io::{self, Write};
use crate::asset::{
    AssetDescription, AssetHeader, CompiledBlock, CompiledBytecodeKind, ShadingLanguage,
    ASSET_HEADER_SIZE,
};
use crate::codec::{encode, encode_to_vec, CodecConfig};
use crate::error::Error;

fn metal_description() -> AssetDescription {
    let mut description = AssetDescription::new();
    description.insert_source(ShadingLanguage::METAL, b"kernel void k() {}".to_vec());
    description.insert_compiled(CompiledBytecodeKind::METAL, vec![0x4D, 0x54, 0x4C, 0x42]);
    description
}

/// Writer failing after `budget` bytes
struct FailingWriter {
    budget: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
        }
        let written = buf.len().min(self.budget);
        self.budget -= written;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn test_encode_layout() {
    let description = metal_description();
    let bytes = encode_to_vec(&description, &CodecConfig::default()).unwrap();
    let header = AssetHeader::for_description(&description).unwrap();

    assert_eq!(bytes.len() as u64, header.container_size());
    assert_eq!(&bytes[0..4], b"G3SA");

    let source = &bytes[ASSET_HEADER_SIZE as usize..];
    assert_eq!(source[0], ShadingLanguage::METAL.bits() as u8);
    assert_eq!(&source[1..5], &18u32.to_le_bytes());
    assert_eq!(&source[5..23], b"kernel void k() {}");

    let compiled = &bytes[header.compiled_data_offset as usize..];
    assert_eq!(compiled[0], CompiledBytecodeKind::METAL.bits() as u8);
    assert_eq!(&compiled[1..5], &4u32.to_le_bytes());
    assert_eq!(&compiled[5..9], &[0x4D, 0x54, 0x4C, 0x42]);
}

#[test]
fn test_encode_returns_written_header() {
    let description = metal_description();
    let mut bytes = Vec::new();
    let header = encode(&description, &mut bytes, &CodecConfig::default()).unwrap();

    assert_eq!(header.source_code_offset, ASSET_HEADER_SIZE);
    assert_eq!(header.compiled_data_block_count, 1);
    assert_eq!(bytes.len() as u64, header.container_size());
}

#[test]
fn test_encode_empty_description_is_header_only() {
    let bytes = encode_to_vec(&AssetDescription::new(), &CodecConfig::default()).unwrap();
    assert_eq!(bytes.len() as u64, ASSET_HEADER_SIZE);
    assert!(bytes[8..56].iter().all(|byte| *byte == 0));
}

#[test]
fn test_encode_preserves_block_order() {
    let mut description = AssetDescription::new();
    description.insert_compiled(CompiledBytecodeKind::SPIRV, vec![1]);
    description.insert_compiled(CompiledBytecodeKind::DXBC, vec![2]);

    let bytes = encode_to_vec(&description, &CodecConfig::default()).unwrap();
    let first = ASSET_HEADER_SIZE as usize;

    assert_eq!(bytes[first], CompiledBytecodeKind::SPIRV.bits() as u8);
    assert_eq!(bytes[first + 6], CompiledBytecodeKind::DXBC.bits() as u8);
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_encode_rejects_invalid_description() {
    let mut description = AssetDescription::new();
    description.compiled_blocks.push(CompiledBlock { kind: CompiledBytecodeKind::DXIL, data: vec![1] });
    description.compiled_blocks.push(CompiledBlock { kind: CompiledBytecodeKind::DXIL, data: vec![2] });

    let mut bytes = Vec::new();
    let result = encode(&description, &mut bytes, &CodecConfig::default());

    assert!(matches!(result, Err(Error::InvalidAsset(_))));
    assert!(bytes.is_empty());
}

#[test]
fn test_encode_enforces_entry_limit() {
    let config = CodecConfig {
        max_entry_size: 8,
        ..CodecConfig::default()
    };
    let result = encode_to_vec(&metal_description(), &config);
    assert!(matches!(result, Err(Error::InvalidAsset(msg)) if msg.contains("Metal source")));
}

#[test]
fn test_encode_enforces_section_limit() {
    let config = CodecConfig {
        max_section_size: 10,
        ..CodecConfig::default()
    };
    let result = encode_to_vec(&metal_description(), &config);
    assert!(matches!(result, Err(Error::InvalidAsset(msg)) if msg.contains("section limit")));
}

#[test]
fn test_encode_reports_io_failure() {
    let mut writer = FailingWriter { budget: 10 };
    let result = encode(&metal_description(), &mut writer, &CodecConfig::default());

    assert!(matches!(result, Err(Error::IoError { kind: io::ErrorKind::WriteZero, .. })));
}
