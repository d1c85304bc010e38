//! Unit tests for exporter.rs

use std::sync::{Arc, Mutex};
use crate::asset::{CompiledBytecodeKind, ShaderAsset, ShaderAssetDesc, ShadingLanguage};
use crate::error::Error;
use crate::log::{LogEntry, LogSeverity, Logger};
use crate::pipeline::{export_shader_asset, ShaderExporter};

/// Logger keeping every entry in memory
#[derive(Default)]
struct CaptureLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl CaptureLogger {
    fn count(&self, severity: LogSeverity) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn windows_asset() -> ShaderAsset {
    ShaderAsset::from_desc(ShaderAssetDesc {
        source_code: vec![(ShadingLanguage::HLSL, b"float4 main() : SV_Target { return 0; }".to_vec())],
        compiled_blocks: vec![
            (CompiledBytecodeKind::DXBC, vec![0x44; 16]),
            (CompiledBytecodeKind::DXIL, vec![0x49; 24]),
        ],
    })
    .unwrap()
}

#[test]
fn test_export_everything_without_warning() {
    let logger = CaptureLogger::default();
    let mut bytes = Vec::new();

    export_shader_asset(
        &windows_asset(),
        ShadingLanguage::ALL,
        CompiledBytecodeKind::ALL,
        &mut bytes,
        &logger,
    )
    .unwrap();

    assert_eq!(bytes.len() as u64, windows_asset().header().container_size());
    assert_eq!(logger.count(LogSeverity::Warn), 0);
    assert_eq!(logger.count(LogSeverity::Error), 0);
}

#[test]
fn test_export_warns_once_for_missing_variants() {
    let logger = Arc::new(CaptureLogger::default());
    let exporter = ShaderExporter::new(logger.clone());
    let mut bytes = Vec::new();

    exporter
        .export(
            &windows_asset(),
            ShadingLanguage::HLSL | ShadingLanguage::GLSL,
            CompiledBytecodeKind::DXIL | CompiledBytecodeKind::METAL,
            &mut bytes,
        )
        .unwrap();

    assert!(!bytes.is_empty());
    assert_eq!(logger.count(LogSeverity::Warn), 1);
}

#[test]
fn test_export_nothing_matching_writes_nothing() {
    let logger = CaptureLogger::default();
    let mut bytes = Vec::new();

    let result = export_shader_asset(
        &windows_asset(),
        ShadingLanguage::empty(),
        CompiledBytecodeKind::METAL,
        &mut bytes,
        &logger,
    );

    match result {
        Err(Error::VariantUnavailable { requested_kinds, available_kinds, .. }) => {
            assert_eq!(requested_kinds, CompiledBytecodeKind::METAL);
            assert_eq!(available_kinds, CompiledBytecodeKind::DXBC | CompiledBytecodeKind::DXIL);
        }
        other => panic!("Expected VariantUnavailable, got {:?}", other),
    }
    assert!(bytes.is_empty());
    assert_eq!(logger.count(LogSeverity::Error), 1);
}

#[test]
fn test_exporter_exposes_config() {
    let exporter = ShaderExporter::new(Arc::new(CaptureLogger::default()));
    assert_eq!(exporter.config().codec.max_entry_size, 128 * 1024 * 1024);
}
