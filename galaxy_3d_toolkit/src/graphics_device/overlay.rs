/// OverlaySurface trait - 2D drawing surface composited over the 3D color buffer

use crate::error::Result;

/// 2D overlay surface bound to a render buffer's color buffer
///
/// Created by the graphics device alongside the color buffer and recreated
/// whenever the color buffer is.
pub trait OverlaySurface: Send {
    /// Open a 2D drawing batch
    fn begin_draw(&mut self) -> Result<()>;

    /// Close the current 2D drawing batch and flush it into the color buffer
    fn end_draw(&mut self) -> Result<()>;

    /// Whether a batch is currently open
    fn is_drawing(&self) -> bool;
}
