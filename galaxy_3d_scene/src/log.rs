//! Logging for the Galaxy3D scene core
//!
//! - Pluggable sink via the [`Logger`] trait (installed with `Engine::set_logger`)
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default, with a minimum severity filter
//! - File and line information for ERROR entries built by `engine_error!`
//!
//! Per-frame code (sampling, matrix rebuilds) does not log. Logging happens
//! at construction and fitting boundaries only.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Sink for log entries.
///
/// ```no_run
/// use galaxy_3d_scene::galaxy3d::log::{Logger, LogEntry};
///
/// struct FrameLogger {
///     lines: std::sync::Mutex<Vec<String>>,
/// }
///
/// impl Logger for FrameLogger {
///     fn log(&self, entry: &LogEntry) {
///         self.lines.lock().unwrap().push(entry.plain_line());
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Process one entry
    fn log(&self, entry: &LogEntry);
}

/// One log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the entry was created
    pub timestamp: SystemTime,

    /// Emitting component (e.g. "galaxy3d::Sampler", "galaxy3d::CascadeSplitter")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

impl LogEntry {
    /// Format the entry without colors or timestamp.
    ///
    /// `[SEVERITY] [source] message` or `[SEVERITY] [source] message (file:line)`.
    pub fn plain_line(&self) -> String {
        match (self.file, self.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] {} ({}:{})",
                self.severity.label(), self.source, self.message, file, line
            ),
            _ => format!("[{}] [{}] {}", self.severity.label(), self.source, self.message),
        }
    }
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose information (scene graph edits)
    Trace,

    /// Development information (cascade fitting results)
    Debug,

    /// Important informational messages
    Info,

    /// Potential issues (approximated interpolation modes)
    Warn,

    /// Rejected construction input, with file:line details
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the console output
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Console logger with colored output.
///
/// Colors: Trace bright black, Debug cyan, Info green, Warn yellow,
/// Error bold red. Entries below `min_severity` are dropped.
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
#[derive(Debug, Clone, Copy)]
pub struct DefaultLogger {
    min_severity: LogSeverity,
}

impl DefaultLogger {
    /// Logger printing Debug and above
    pub fn new() -> Self {
        Self { min_severity: LogSeverity::Debug }
    }

    /// Logger printing `min_severity` and above
    pub fn with_min_severity(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }

    pub fn min_severity(&self) -> LogSeverity {
        self.min_severity
    }

    /// Whether an entry of this severity would be printed
    pub fn accepts(&self, severity: LogSeverity) -> bool {
        severity >= self.min_severity
    }
}

impl Default for DefaultLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        if !self.accepts(entry.severity) {
            return;
        }

        // YYYY-MM-DD HH:MM:SS.mmm
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
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

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// ```ignore
/// engine_trace!("galaxy3d::Scene", "Root {:?} inserted", key);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log(
            $crate::galaxy3d::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
///
/// ```ignore
/// engine_debug!("galaxy3d::CascadeSplitter", "Fitted {} cascades", count);
/// ```
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log(
            $crate::galaxy3d::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log(
            $crate::galaxy3d::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
///
/// ```ignore
/// engine_warn!("galaxy3d::Sampler", "Cubic spline requested, using nearest keyframe");
/// ```
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log(
            $crate::galaxy3d::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log_detailed(
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
