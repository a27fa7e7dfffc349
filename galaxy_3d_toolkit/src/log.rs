//! Logging for the Galaxy3D toolkit
//!
//! - Pluggable sink via the `Logger` trait (see `Engine::set_logger`)
//! - Severity levels from Trace to Error, filtered by `Engine::set_min_severity`
//! - Colored console output by default
//! - File and line information attached to ERROR entries

use colored::*;
use std::fmt;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Sink for log entries emitted by the scene graph and render buffer layer
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_toolkit::galaxy3d::log::{Logger, LogEntry};
///
/// struct FrameLogger {
///     lines: std::sync::Mutex<Vec<String>>,
/// }
///
/// impl Logger for FrameLogger {
///     fn log(&self, entry: &LogEntry) {
///         self.lines.lock().unwrap().push(entry.to_string());
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Handle one entry
    fn log(&self, entry: &LogEntry);
}

/// A single log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Creation time
    pub timestamp: SystemTime,

    /// Emitting subsystem (e.g. "galaxy3d::SceneGraph")
    pub source: String,

    /// Message text
    pub message: String,

    /// Source file (ERROR entries only)
    pub file: Option<&'static str>,

    /// Source line (ERROR entries only)
    pub line: Option<u32>,
}

impl LogEntry {
    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS.mmm` in local time
    pub fn formatted_timestamp(&self) -> String {
        let datetime: DateTime<Local> = self.timestamp.into();
        datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
    }
}

/// Plain (uncolored) form: `[timestamp] [SEVERITY] [source] message (file:line)`
impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] [{}] {}",
            self.formatted_timestamp(),
            self.severity.label(),
            self.source,
            self.message
        )?;
        if let (Some(file), Some(line)) = (self.file, self.line) {
            write!(f, " ({}:{})", file, line)?;
        }
        Ok(())
    }
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-node traversal detail
    Trace,

    /// Structural changes and state transitions
    Debug,

    /// Buffer (re)creation and other notable lifecycle events
    Info,

    /// Recoverable problems (device loss, failed child attach)
    Warn,

    /// Contract violations and resource failures
    Error,
}

impl LogSeverity {
    /// Fixed-width label used in console output
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

/// Console logger with colored severity and source
///
/// Trace is dimmed, Debug cyan, Info green, Warn yellow, Error bold red.
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let severity_str = match entry.severity {
            LogSeverity::Trace => entry.severity.label().bright_black(),
            LogSeverity::Debug => entry.severity.label().cyan(),
            LogSeverity::Info => entry.severity.label().green(),
            LogSeverity::Warn => entry.severity.label().yellow(),
            LogSeverity::Error => entry.severity.label().red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                entry.formatted_timestamp(),
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                entry.formatted_timestamp(),
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
/// ```no_run
/// # use galaxy_3d_toolkit::engine_trace;
/// engine_trace!("galaxy3d::SceneGraph", "Visiting node {}", "root");
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
/// ```no_run
/// # use galaxy_3d_toolkit::engine_debug;
/// engine_debug!("galaxy3d::SceneGraph", "Group has {} children", 3);
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
///
/// ```no_run
/// # use galaxy_3d_toolkit::engine_info;
/// engine_info!("galaxy3d::RenderBufferProxy", "Buffers created ({}x{})", 800, 600);
/// ```
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
/// ```no_run
/// # use galaxy_3d_toolkit::engine_warn;
/// engine_warn!("galaxy3d::RenderBufferProxy", "Device lost");
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
///
/// ```no_run
/// # use galaxy_3d_toolkit::engine_error;
/// engine_error!("galaxy3d::SceneGraph", "Node {} already parented", "cube");
/// ```
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
