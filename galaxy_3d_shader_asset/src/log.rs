//! Logging for the Galaxy3D shader asset pipeline
//!
//! This module provides a flexible logging system with:
//! - Customizable logger via Logger trait, injected into every import/export call
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - A bridge to the `log` crate facade for host applications
//! - File and line information for detailed ERROR logs

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to route pipeline messages elsewhere (file, editor console,
/// test capture, ...). Only `log` is required; the other methods build entries.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_shader_asset::galaxy3d::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    ///
    /// # Arguments
    ///
    /// * `entry` - The log entry to process
    fn log(&self, entry: &LogEntry);

    /// Log a warning message
    fn warning(&self, source: &str, message: &str) {
        self.log(&LogEntry::new(LogSeverity::Warn, source, message.to_string()));
    }

    /// Log an error message
    fn error(&self, source: &str, message: &str) {
        self.log(&LogEntry::new(LogSeverity::Error, source, message.to_string()));
    }

    /// Log an error message together with the error that caused it
    ///
    /// The full cause chain is appended to the message.
    fn exception(&self, source: &str, message: &str, cause: &dyn std::error::Error) {
        let mut text = format!("{}: {}", message, cause);
        let mut next = cause.source();
        while let Some(inner) = next {
            text.push_str(&format!(" (caused by: {})", inner));
            next = inner.source();
        }
        self.log(&LogEntry::new(LogSeverity::Error, source, text));
    }
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source component (e.g., "galaxy3d::ShaderImporter")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

impl LogEntry {
    /// Create an entry stamped with the current time, without file:line
    pub fn new(severity: LogSeverity, source: &str, message: String) -> Self {
        Self {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        }
    }

    /// Create an entry carrying the file:line of the call site
    pub fn detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            file: Some(file),
            line: Some(line),
            ..Self::new(severity, source, message)
        }
    }
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information (typically disabled in release)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (fallback paths, skipped data)
    Warn,

    /// Error messages (failed imports/exports, with file:line details)
    Error,
}

impl LogSeverity {
    /// Matching level of the `log` crate facade
    pub fn to_log_level(self) -> log::Level {
        match self {
            LogSeverity::Trace => log::Level::Trace,
            LogSeverity::Debug => log::Level::Debug,
            LogSeverity::Info => log::Level::Info,
            LogSeverity::Warn => log::Level::Warn,
            LogSeverity::Error => log::Level::Error,
        }
    }
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry the way it is printed, without colors
    pub fn format_plain(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity = match entry.severity {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        };

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity, entry.source, entry.message, file, line
            ),
            _ => format!("[{}] [{}] [{}] {}", timestamp, severity, entry.source, entry.message),
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        // Format timestamp as YYYY-MM-DD HH:MM:SS.mmm
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            );
        }
    }
}

/// Logger forwarding every entry to the `log` crate facade
///
/// The entry source becomes the log target, so hosts running `env_logger`
/// can filter with e.g. `RUST_LOG=galaxy3d::ShaderImporter=warn`.
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn log(&self, entry: &LogEntry) {
        let level = entry.severity.to_log_level();
        let target = entry.source.as_str();
        match (entry.file, entry.line) {
            (Some(file), Some(line)) => {
                log::log!(target: target, level, "{} ({}:{})", entry.message, file, line)
            }
            _ => log::log!(target: target, level, "{}", entry.message),
        }
    }
}

/// Logger discarding every entry
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _entry: &LogEntry) {}
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
///
/// # Example
///
/// ```ignore
/// shader_trace!(logger, "galaxy3d::ShaderCodec", "Reading entry at {}", position);
/// ```
#[macro_export]
macro_rules! shader_trace {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $logger.log(&$crate::galaxy3d::log::LogEntry::new(
            $crate::galaxy3d::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        ))
    };
}

/// Log a DEBUG message (development information)
///
/// # Example
///
/// ```ignore
/// shader_debug!(logger, "galaxy3d::ShaderImporter", "Selected {:?}", kind);
/// ```
#[macro_export]
macro_rules! shader_debug {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $logger.log(&$crate::galaxy3d::log::LogEntry::new(
            $crate::galaxy3d::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        ))
    };
}

/// Log an INFO message (important events)
#[macro_export]
macro_rules! shader_info {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $logger.log(&$crate::galaxy3d::log::LogEntry::new(
            $crate::galaxy3d::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        ))
    };
}

/// Log a WARN message (fallback paths, skipped data)
///
/// # Example
///
/// ```ignore
/// shader_warn!(logger, "galaxy3d::ShaderCodec", "Skipping unknown language tag {}", tag);
/// ```
#[macro_export]
macro_rules! shader_warn {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $logger.log(&$crate::galaxy3d::log::LogEntry::new(
            $crate::galaxy3d::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        ))
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```ignore
/// shader_error!(logger, "galaxy3d::ShaderImporter", "Import failed: {}", error);
/// ```
#[macro_export]
macro_rules! shader_error {
    ($logger:expr, $source:expr, $($arg:tt)*) => {
        $logger.log(&$crate::galaxy3d::log::LogEntry::detailed(
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        ))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
