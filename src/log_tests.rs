/// Tests for the logging system.
///
/// These tests swap the global logger, so they are serialized with
/// `serial_test` to avoid cross-test interference.

use super::*;
use serial_test::serial;
use std::sync::{Arc, Mutex};

/// Captures entries into a shared vector for inspection.
struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install_capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    set_logger(Box::new(CaptureLogger { entries: entries.clone() }));
    entries
}

#[test]
#[serial]
fn test_macro_routes_through_custom_logger() {
    let entries = install_capture();

    crate::vis_warn!("roomvis::Test", "count = {}", 3);

    // Other tests may log concurrently; look only at our own source
    let entries = entries.lock().unwrap();
    let ours: Vec<_> = entries.iter().filter(|e| e.source == "roomvis::Test").collect();
    assert_eq!(ours.len(), 1);
    assert_eq!(ours[0].severity, LogSeverity::Warn);
    assert_eq!(ours[0].message, "count = 3");
    assert!(ours[0].file.is_none());

    drop(entries);
    set_logger(Box::new(DefaultLogger));
}

#[test]
#[serial]
fn test_error_macro_carries_file_and_line() {
    let entries = install_capture();

    crate::vis_error!("roomvis::Test", "boom");

    let entries = entries.lock().unwrap();
    let ours: Vec<_> = entries.iter().filter(|e| e.source == "roomvis::Test").collect();
    assert_eq!(ours.len(), 1);
    assert_eq!(ours[0].severity, LogSeverity::Error);
    assert!(ours[0].file.is_some());
    assert!(ours[0].line.is_some());

    drop(entries);
    set_logger(Box::new(DefaultLogger));
}

#[test]
#[serial]
fn test_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}
