//! Integration tests for the logging system as seen from the toolkit components
//!
//! These tests install a capturing logger and check what the scene graph and
//! render buffer proxy report.
//!
//! Run with: cargo test --test logging_integration_tests


use device_test_utils::create_test_device;
use galaxy_3d_toolkit::galaxy3d::log::{LogEntry, LogSeverity, Logger};
use galaxy_3d_toolkit::galaxy3d::render::{MsaaLevel, RenderBufferConfig, RenderBufferProxy};
use galaxy_3d_toolkit::galaxy3d::scene::{EmptyContent, SceneGraph};
use galaxy_3d_toolkit::galaxy3d::Engine;
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install_logger(min_severity: LogSeverity) -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(TestLogger { entries: entries.clone() });
    Engine::set_min_severity(min_severity);
    entries
}

fn from_source(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == source)
        .cloned()
        .collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_structural_error_is_logged_with_location() {
    let entries = install_logger(LogSeverity::Info);
    let mut graph = SceneGraph::new();
    let first = graph.create_group("first");
    let second = graph.create_group("second");
    let leaf = graph.create_leaf("leaf", EmptyContent);
    graph.add_child(first, leaf).unwrap();

    assert!(graph.add_child(second, leaf).is_err());

    let logged = from_source(&entries, "galaxy3d::SceneGraph");
    Engine::reset_logger();

    let errors: Vec<&LogEntry> = logged.iter().filter(|e| e.severity == LogSeverity::Error).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("'leaf'"));
    assert!(errors[0].message.contains("'first'"));
    assert!(errors[0].file.is_some());
    assert!(errors[0].line.is_some());
}

#[test]
#[serial]
fn test_integration_debug_messages_filtered_by_default() {
    let entries = install_logger(LogSeverity::Info);
    let mut graph = SceneGraph::new();
    let root = graph.root();
    let leaf = graph.create_leaf("leaf", EmptyContent);
    graph.add_child(root, leaf).unwrap();
    let filtered = from_source(&entries, "galaxy3d::SceneGraph");

    Engine::set_min_severity(LogSeverity::Trace);
    graph.remove_child(root, leaf);
    let verbose = from_source(&entries, "galaxy3d::SceneGraph");
    Engine::reset_logger();

    assert!(filtered.is_empty());
    assert!(verbose.iter().any(|e| e.severity == LogSeverity::Debug && e.message.contains("Removed")));
}

#[test]
#[serial]
fn test_integration_proxy_reports_creation_and_device_loss() {
    let entries = install_logger(LogSeverity::Info);
    let (_device, shared) = create_test_device(4);
    let mut proxy = RenderBufferProxy::new(shared, RenderBufferConfig::default()).unwrap();

    proxy.initialize(800, 600, MsaaLevel::Four).unwrap();
    proxy.raise_device_lost();

    let logged = from_source(&entries, "galaxy3d::RenderBufferProxy");
    Engine::reset_logger();

    let severities: Vec<LogSeverity> = logged.iter().map(|e| e.severity).collect();
    assert_eq!(severities, vec![LogSeverity::Info, LogSeverity::Warn]);
    assert!(logged[0].message.contains("800x600"));
    assert!(logged[1].message.contains("device lost"));
}

#[test]
#[serial]
fn test_integration_reset_logger_restores_default_filter() {
    let _entries = install_logger(LogSeverity::Error);
    assert_eq!(Engine::min_severity(), LogSeverity::Error);

    Engine::reset_logger();

    assert_eq!(Engine::min_severity(), LogSeverity::Info);
    assert!(!Engine::is_enabled(LogSeverity::Debug));
    assert!(Engine::is_enabled(LogSeverity::Warn));
}
