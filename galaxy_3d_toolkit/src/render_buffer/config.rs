/// Render buffer configuration

use crate::graphics_device::TextureFormat;
use crate::render_buffer::MsaaLevel;

/// Configuration for a `RenderBufferProxy`
#[derive(Debug, Clone)]
pub struct RenderBufferConfig {
    /// MSAA level reported before the first `initialize`
    pub msaa: MsaaLevel,
    /// Color buffer format
    pub color_format: TextureFormat,
    /// Depth/stencil buffer format
    pub depth_stencil_format: TextureFormat,
    /// Create a 2D overlay surface over the color buffer
    pub enable_overlay_2d: bool,
    /// Prefix for texture names and log messages
    pub debug_name: String,
}

impl Default for RenderBufferConfig {
    fn default() -> Self {
        Self {
            msaa: MsaaLevel::Disable,
            color_format: TextureFormat::B8G8R8A8_UNORM,
            depth_stencil_format: TextureFormat::D24_UNORM_S8_UINT,
            enable_overlay_2d: false,
            debug_name: "RenderBuffer".to_string(),
        }
    }
}
