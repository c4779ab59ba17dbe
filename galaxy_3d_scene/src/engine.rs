/// Galaxy3D Engine - process-wide services for the scene core
///
/// The scene core owns no GPU state, so the only global service left is the
/// logger. It lives in thread-safe static storage behind a RwLock so that
/// the control, simulation and render threads can all log concurrently.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())))
}

/// Engine facade for global services
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_scene::galaxy3d::{Engine, log::{Logger, LogEntry}};
///
/// struct QuietLogger;
/// impl Logger for QuietLogger {
///     fn log(&self, _entry: &LogEntry) {}
/// }
///
/// Engine::set_logger(QuietLogger);
/// // ...
/// Engine::reset_logger();
/// ```
pub struct Engine;

impl Engine {
    // ===== LOGGING API =====

    /// Replace the current logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::new());
        }
    }

    /// Log without file:line
    ///
    /// Used by engine_trace!, engine_debug!, engine_info! and engine_warn!.
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Emitting component (e.g., "galaxy3d::Scene")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Log with file:line information
    ///
    /// Used by engine_error! (and therefore engine_err!).
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
