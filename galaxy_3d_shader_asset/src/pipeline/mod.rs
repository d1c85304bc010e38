//! Import/export façade
//!
//! The only part of the crate that deals with caller-supplied streams and
//! loggers. Import resolves the platform, reads the header, then decodes just
//! the variant the platform can use. Export filters an asset down to the
//! requested variants and writes the container in one go.

mod config;
mod importer;
mod exporter;

use crate::error::Error;
use crate::log::Logger;
use crate::shader_error;

pub use config::{ImportConfig, ExportConfig};
pub use importer::{ShaderImporter, import_shader_asset};
pub use exporter::{ShaderExporter, export_shader_asset};

/// Log a failed operation once, then hand the error back
fn log_and_return_error(logger: &dyn Logger, source: &str, action: &str, error: Error) -> Error {
    match &error {
        Error::IoError { .. } => {
            logger.exception(source, &format!("Shader asset {} failed", action), &error);
        }
        _ => {
            shader_error!(logger, source, "Shader asset {} failed: {}", action, error);
        }
    }
    error
}
