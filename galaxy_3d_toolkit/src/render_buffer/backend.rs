/// Render buffer backends - how a proxy's color and depth/stencil buffers are made
///
/// `RenderBufferProxy` owns the lifecycle (teardown, notifications, state);
/// a backend only creates the resources and may hook `end_draw` / `present`.
/// `TextureBufferBackend` renders offscreen into plain textures; swap-chain
/// backends implement the same trait and present in `present()`.

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, Texture, TextureDesc, TextureUsage, RenderTarget,
};
use crate::render_buffer::RenderBufferConfig;

/// Resources created for one initialized generation of a proxy
pub struct RenderBuffers {
    pub color_buffer: Arc<dyn Texture>,
    pub depth_stencil_buffer: Arc<dyn Texture>,
    pub color_view: Arc<dyn RenderTarget>,
    pub depth_stencil_view: Arc<dyn RenderTarget>,
}

/// Buffer creation hook and draw/present overrides
pub trait RenderBufferBackend: Send {
    /// Create color and depth/stencil buffers plus their views
    fn create_buffers(
        &mut self,
        device: &mut dyn GraphicsDevice,
        config: &RenderBufferConfig,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Result<RenderBuffers>;

    /// Called when buffers are torn down (resize, device loss, dispose)
    fn release_buffers(&mut self) {}

    /// Finish drawing a frame
    fn end_draw(&mut self) -> Result<()> {
        Ok(())
    }

    /// Present the finished frame
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Offscreen backend: color and depth/stencil are ordinary textures
#[derive(Debug, Default)]
pub struct TextureBufferBackend;

impl TextureBufferBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RenderBufferBackend for TextureBufferBackend {
    fn create_buffers(
        &mut self,
        device: &mut dyn GraphicsDevice,
        config: &RenderBufferConfig,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Result<RenderBuffers> {
        let color_buffer = device.create_texture(TextureDesc {
            name: format!("{}_color", config.debug_name),
            width,
            height,
            format: config.color_format,
            usage: TextureUsage::SampledAndRenderTarget,
            samples: sample_count,
        })?;
        let depth_stencil_buffer = device.create_texture(TextureDesc {
            name: format!("{}_depth_stencil", config.debug_name),
            width,
            height,
            format: config.depth_stencil_format,
            usage: TextureUsage::DepthStencil,
            samples: sample_count,
        })?;

        let color_view = device.create_render_target_view(&color_buffer)?;
        let depth_stencil_view = device.create_render_target_view(&depth_stencil_buffer)?;

        Ok(RenderBuffers {
            color_buffer,
            depth_stencil_buffer,
            color_view,
            depth_stencil_view,
        })
    }
}
