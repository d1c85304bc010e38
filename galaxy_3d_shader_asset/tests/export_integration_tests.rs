//! Integration tests for shader asset export
//!
//! These tests verify filtered export, the no-partial-write guarantee and
//! that exported containers import back unchanged.
//!
//! Run with: cargo test --test export_integration_tests


use asset_test_utils::*;
use galaxy_3d_shader_asset::galaxy3d::asset::{CompiledBytecodeKind, ShaderAsset, ShadingLanguage};
use galaxy_3d_shader_asset::galaxy3d::codec::{decode, CodecConfig, DecodeRequest};
use galaxy_3d_shader_asset::galaxy3d::log::{LogSeverity, NullLogger};
use galaxy_3d_shader_asset::galaxy3d::pipeline::{
    export_shader_asset, import_shader_asset, ExportConfig, ShaderExporter,
};
use galaxy_3d_shader_asset::galaxy3d::platform::PlatformCapabilities;
use galaxy_3d_shader_asset::galaxy3d::Error;
use std::io::Cursor;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn decode_full(bytes: Vec<u8>) -> ShaderAsset {
    decode(&mut Cursor::new(bytes), &DecodeRequest::full(), &CodecConfig::default(), &NullLogger).unwrap()
}

// ============================================================================
// REJECTION
// ============================================================================

#[test]
fn test_integration_export_missing_metal_writes_zero_bytes() {
    let (logger, entries) = TestLogger::new();
    let mut sink = CountingWriter::new();

    let result = export_shader_asset(
        &dxbc_spirv_asset(),
        ShadingLanguage::empty(),
        CompiledBytecodeKind::METAL,
        &mut sink,
        &logger,
    );

    assert!(matches!(result, Err(Error::VariantUnavailable { .. })));
    assert_eq!(sink.written(), 0);
    assert!(!sink.flushed.load(Ordering::SeqCst));
    assert_eq!(entries_with(&entries, LogSeverity::Error).len(), 1);
}

#[test]
fn test_integration_export_oversized_writes_zero_bytes() {
    let (logger, _entries) = TestLogger::new();
    let config = ExportConfig {
        codec: CodecConfig {
            max_entry_size: 8,
            ..CodecConfig::default()
        },
    };
    let exporter = ShaderExporter::with_config(Arc::new(logger), config);
    let mut sink = CountingWriter::new();

    let result = exporter.export(&full_asset(), ShadingLanguage::ALL, CompiledBytecodeKind::ALL, &mut sink);

    assert!(matches!(result, Err(Error::InvalidAsset(_))));
    assert_eq!(sink.written(), 0);
}

#[test]
fn test_integration_export_write_failure_is_io_error() {
    let (logger, entries) = TestLogger::new();

    let result = export_shader_asset(
        &vulkan_asset(),
        ShadingLanguage::ALL,
        CompiledBytecodeKind::ALL,
        FailingWriter,
        &logger,
    );

    assert!(matches!(result, Err(Error::IoError { .. })));
    let errors = entries_with(&entries, LogSeverity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("Shader asset export failed"));
    assert_eq!(errors[0].source, "galaxy3d::ShaderExporter");
}

// ============================================================================
// FILTERED EXPORT
// ============================================================================

#[test]
fn test_integration_export_subset() {
    let (logger, entries) = TestLogger::new();
    let mut bytes = Vec::new();

    export_shader_asset(
        &full_asset(),
        ShadingLanguage::GLSL,
        CompiledBytecodeKind::SPIRV,
        &mut bytes,
        &logger,
    )
    .unwrap();

    let decoded = decode_full(bytes);
    assert_eq!(decoded.available_languages(), ShadingLanguage::GLSL);
    assert_eq!(decoded.available_kinds(), CompiledBytecodeKind::SPIRV);
    assert_eq!(decoded.source_code(ShadingLanguage::GLSL), Some(GLSL_SOURCE));
    assert_eq!(decoded.byte_code_spirv(), Some(spirv_blob().as_slice()));
    assert!(entries_with(&entries, LogSeverity::Warn).is_empty());
}

#[test]
fn test_integration_export_partial_match_warns_once() {
    let (logger, entries) = TestLogger::new();
    let mut sink = CountingWriter::new();

    export_shader_asset(
        &dxbc_spirv_asset(),
        ShadingLanguage::HLSL,
        CompiledBytecodeKind::DXBC | CompiledBytecodeKind::METAL,
        &mut sink,
        &logger,
    )
    .unwrap();

    assert!(sink.written() > 0);
    assert!(sink.flushed.load(Ordering::SeqCst));
    let warnings = entries_with(&entries, LogSeverity::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("METAL"));
    assert!(warnings[0].message.contains("HLSL"));
}

// ============================================================================
// ROUND TRIP
// ============================================================================

#[test]
fn test_integration_export_full_round_trip() {
    let asset = full_asset();
    let mut bytes = Vec::new();

    export_shader_asset(&asset, ShadingLanguage::ALL, CompiledBytecodeKind::ALL, &mut bytes, &NullLogger).unwrap();

    assert_eq!(decode_full(bytes), asset);
}

#[test]
fn test_integration_export_then_import() {
    let (logger, entries) = TestLogger::new();
    let mut bytes = Vec::new();
    export_shader_asset(
        &full_asset(),
        ShadingLanguage::GLSL,
        CompiledBytecodeKind::SPIRV,
        &mut bytes,
        &logger,
    )
    .unwrap();

    let platform = PlatformCapabilities::ANDROID | PlatformCapabilities::VULKAN;
    let imported = import_shader_asset(Cursor::new(bytes), platform, &logger).unwrap();

    assert_eq!(imported.byte_code_spirv(), Some(spirv_blob().as_slice()));
    assert!(entries_with(&entries, LogSeverity::Warn).is_empty());
}

#[test]
fn test_integration_partial_decodes_union_to_full_decode() {
    let asset = full_asset();
    let bytes = container(&asset);
    let config = CodecConfig::default();

    let compiled = decode(
        &mut Cursor::new(bytes.clone()),
        &DecodeRequest::compiled(CompiledBytecodeKind::ALL),
        &config,
        &NullLogger,
    )
    .unwrap();
    let source = decode(
        &mut Cursor::new(bytes.clone()),
        &DecodeRequest::source(ShadingLanguage::ALL),
        &config,
        &NullLogger,
    )
    .unwrap();

    let mut union = compiled.into_description();
    union.source_code = source.into_description().source_code;

    assert_eq!(&union, decode_full(bytes).description());
}

#[test]
fn test_integration_encoded_headers_keep_zero_pairs() {
    let assets = [
        ShaderAsset::from_desc(Default::default()).unwrap(),
        source_only_asset(),
        dxbc_spirv_asset(),
        vulkan_asset(),
        full_asset(),
    ];

    for asset in &assets {
        let header = *decode_full(container(asset)).header();
        assert_eq!(header.source_code_offset == 0, header.source_code_size == 0);
        assert_eq!(header.compiled_data_offset == 0, header.compiled_data_size == 0);
        assert_eq!(header.compiled_data_size == 0, header.compiled_data_block_count == 0);
        assert_eq!(&header, asset.header());
    }
}
