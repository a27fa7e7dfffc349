/// Galaxy3D Engine - global logging configuration
///
/// Holds the process-wide logger and the minimum severity filter used by the
/// `engine_*!` macros. Storage is a thread-safe static with RwLock so scene
/// graphs and buffer proxies on any thread share the same sink.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped before reaching the logger
static MIN_SEVERITY: OnceLock<RwLock<LogSeverity>> = OnceLock::new();

/// Severity filter applied until `Engine::set_min_severity` is called
pub const DEFAULT_MIN_SEVERITY: LogSeverity = LogSeverity::Info;

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

fn min_severity_lock() -> &'static RwLock<LogSeverity> {
    MIN_SEVERITY.get_or_init(|| RwLock::new(DEFAULT_MIN_SEVERITY))
}

// ===== PUBLIC API =====

/// Engine-wide services shared by every scene graph and buffer proxy
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_toolkit::galaxy3d::{Engine, log::LogSeverity};
///
/// Engine::set_min_severity(LogSeverity::Debug);
/// Engine::log(LogSeverity::Info, "app", "Render host ready".to_string());
/// Engine::reset_logger();
/// ```
pub struct Engine;

impl Engine {
    /// Replace the default logger with a custom implementation
    ///
    /// # Example
    ///
    /// ```no_run
    /// use galaxy_3d_toolkit::galaxy3d::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to DefaultLogger and the filter to `DEFAULT_MIN_SEVERITY`
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
        Self::set_min_severity(DEFAULT_MIN_SEVERITY);
    }

    /// Set the lowest severity that reaches the logger
    pub fn set_min_severity(severity: LogSeverity) {
        if let Ok(mut lock) = min_severity_lock().write() {
            *lock = severity;
        }
    }

    /// Current minimum severity
    pub fn min_severity() -> LogSeverity {
        min_severity_lock()
            .read()
            .map(|lock| *lock)
            .unwrap_or(DEFAULT_MIN_SEVERITY)
    }

    /// Whether an entry of this severity would be delivered
    pub fn is_enabled(severity: LogSeverity) -> bool {
        severity >= Self::min_severity()
    }

    /// Logging entry point for engine_trace! .. engine_warn!
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source subsystem (e.g., "galaxy3d::SceneGraph")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Logging entry point with file:line information (used by engine_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if !Self::is_enabled(severity) {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
