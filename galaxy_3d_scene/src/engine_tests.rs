//! Unit tests for the Engine logging facade
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! All tests are marked with #[serial] so that installed loggers do not
//! capture each other's entries.

use crate::galaxy3d::Engine;
use crate::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<String>>>,
}

impl TestLogger {
    fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        // Other unit tests log concurrently from their own sources
        if !entry.source.ends_with("test") {
            return;
        }
        let mut entries = self.entries.lock().unwrap();
        entries.push(format!("{:?}: {}", entry.severity, entry.message));
    }
}

/// Install a capturing logger and return its entry list
fn capture() -> Arc<Mutex<Vec<String>>> {
    let test_logger = TestLogger::new();
    let entries_ref = test_logger.entries.clone();
    Engine::set_logger(test_logger);
    entries_ref
}

// ============================================================================
// LOGGING API TESTS
// ============================================================================

#[test]
#[serial]
fn test_default_logger_logs_without_panic() {
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "test", "Test message".to_string());
    Engine::log(LogSeverity::Error, "test", "Error message".to_string());
    Engine::log(LogSeverity::Warn, "test", "Warning message".to_string());
}

#[test]
#[serial]
fn test_set_custom_logger() {
    let entries_ref = capture();

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    Engine::log(LogSeverity::Warn, "test", "Message 2".to_string());

    let entries = entries_ref.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].contains("Info"));
    assert!(entries[0].contains("Message 1"));
    assert!(entries[1].contains("Warn"));
    assert!(entries[1].contains("Message 2"));
    drop(entries);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_to_default() {
    let entries_ref = capture();
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "test", "After reset".to_string());

    // Custom logger should NOT receive this message (default logger is active)
    assert_eq!(entries_ref.lock().unwrap().len(), 0);
}

#[test]
#[serial]
fn test_log_detailed_with_file_line() {
    let entries_ref = capture();

    Engine::log_detailed(
        LogSeverity::Error,
        "galaxy3d::test",
        "Detailed error".to_string(),
        "test.rs",
        42,
    );

    let entries = entries_ref.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].contains("Error"));
    assert!(entries[0].contains("Detailed error"));
    drop(entries);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let entries_ref = capture();

    crate::engine_trace!("galaxy3d::test", "trace {}", 1);
    crate::engine_debug!("galaxy3d::test", "debug {}", 2);
    crate::engine_info!("galaxy3d::test", "info {}", 3);
    crate::engine_warn!("galaxy3d::test", "warn {}", 4);
    crate::engine_error!("galaxy3d::test", "error {}", 5);

    let entries = entries_ref.lock().unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0], "Trace: trace 1");
    assert_eq!(entries[4], "Error: error 5");
    drop(entries);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_logging_from_many_threads() {
    let entries_ref = capture();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                for j in 0..25 {
                    Engine::log(LogSeverity::Debug, "galaxy3d::test", format!("{}-{}", i, j));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(entries_ref.lock().unwrap().len(), 100);
    Engine::reset_logger();
}
