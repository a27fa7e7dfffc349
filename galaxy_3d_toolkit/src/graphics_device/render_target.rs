/// RenderTarget trait - a bindable view over a color or depth/stencil texture

use crate::graphics_device::TextureFormat;

/// Render target view
///
/// Represents a surface that draw output can be bound to. Color buffers get a
/// color view, depth/stencil buffers a depth/stencil view.
pub trait RenderTarget: Send + Sync {
    /// Get the width of the render target in pixels
    fn width(&self) -> u32;

    /// Get the height of the render target in pixels
    fn height(&self) -> u32;

    /// Get the pixel format of the render target
    fn format(&self) -> TextureFormat;

    /// Whether this view targets a depth/stencil buffer
    fn is_depth_stencil(&self) -> bool {
        self.format().is_depth()
    }
}
