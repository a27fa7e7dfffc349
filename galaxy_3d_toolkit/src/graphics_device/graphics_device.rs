/// GraphicsDevice trait - factory for the GPU resources render buffers own

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    Texture, TextureDesc, TextureFormat, RenderTarget, OverlaySurface, DeviceContextPool,
};

/// Graphics device
///
/// Central factory interface implemented by backends. Shared as
/// `Arc<Mutex<dyn GraphicsDevice>>` between render hosts and buffer proxies.
pub trait GraphicsDevice: Send + Sync {
    /// Create a 2D texture
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a render target view over a texture
    ///
    /// Color textures get a color view, depth formats a depth/stencil view.
    fn create_render_target_view(&mut self, texture: &Arc<dyn Texture>) -> Result<Arc<dyn RenderTarget>>;

    /// Highest multisample count the hardware supports for `format`
    ///
    /// Always at least 1.
    fn max_sample_count(&self, format: TextureFormat) -> u32;

    /// Create a 2D overlay surface drawing into `color_buffer`
    fn create_overlay_surface(&mut self, color_buffer: &Arc<dyn Texture>) -> Result<Box<dyn OverlaySurface>>;

    /// Create a pool of reusable device contexts
    fn create_device_context_pool(&mut self) -> Result<Arc<dyn DeviceContextPool>>;
}
