/// RenderHost trait - the live rendering context scene nodes attach to

use std::sync::{Arc, Mutex};
use crate::graphics_device::GraphicsDevice;

/// Render host
///
/// Owns the device and drives per-frame rendering. Scene nodes attach to a
/// host when it becomes available and detach on teardown. A node is attached
/// to at most one host at a time; hosts are compared by identity.
pub trait RenderHost: Send + Sync {
    /// Host name (for logging)
    fn name(&self) -> &str;

    /// Whether the host can accept attachments (device created, surface alive)
    fn is_ready(&self) -> bool;

    /// Device that attached content may create resources on
    fn graphics_device(&self) -> Option<Arc<Mutex<dyn GraphicsDevice>>> {
        None
    }
}
