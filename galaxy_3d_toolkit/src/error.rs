//! Error types for the Galaxy3D toolkit
//!
//! This module defines the error types used by the scene graph and the
//! render buffer layer, plus the `engine_err!` / `engine_bail!` macros that
//! log an error before handing it back to the caller.

use std::fmt;

/// Result type for Galaxy3D toolkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D toolkit errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (device, driver, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, view, node key, etc.)
    InvalidResource(String),

    /// Initialization failed (buffers, overlay surface, context pool)
    InitializationFailed(String),

    /// A scene node already belongs to a different group
    NodeAlreadyParented {
        /// Name of the node being added
        node: String,
        /// Name of the group that currently owns it
        current_parent: String,
    },

    /// Adding the node would make a group its own descendant
    CyclicHierarchy(String),

    /// The target node is not a group and cannot hold children
    NotAGroup(String),

    /// 2D drawing requested on a buffer proxy without an overlay surface
    NoOverlaySurface,

    /// The object has been disposed and cannot be used anymore
    Disposed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::NodeAlreadyParented { node, current_parent } => write!(
                f,
                "Scene node '{}' is already attached to a different group '{}'",
                node, current_parent
            ),
            Error::CyclicHierarchy(msg) => write!(f, "Cyclic hierarchy: {}", msg),
            Error::NotAGroup(name) => write!(f, "Scene node '{}' is not a group", name),
            Error::NoOverlaySurface => write!(f, "No 2D overlay surface available"),
            Error::Disposed(what) => write!(f, "{} has been disposed", what),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error message and build an `Error::BackendError` from it
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_toolkit::engine_err;
/// let err = engine_err!("galaxy3d::RenderBufferProxy", "Device rejected {}", "texture");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::BackendError(message)
    }};
}

/// Log an error message and return early with `Err(Error::BackendError)`
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_toolkit::engine_bail;
/// fn check(width: u32) -> galaxy_3d_toolkit::galaxy3d::Result<()> {
///     if width == 0 {
///         engine_bail!("galaxy3d::RenderBufferProxy", "Invalid width {}", width);
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
