/// DeviceContext trait - immediate-mode state and clear commands
///
/// A device context is what render buffer proxies bind their targets on and
/// clear through. Contexts are handed out by a `DeviceContextPool` so worker
/// threads can record in parallel.

use std::sync::Arc;
use bitflags::bitflags;
use crate::graphics_device::RenderTarget;

/// Viewport for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-target viewport with depth range [0, 1]
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// 2D rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

bitflags! {
    /// Which planes of a depth/stencil view to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const DEPTH = 1 << 0;
        const STENCIL = 1 << 1;
    }
}

/// Immediate-mode device context
pub trait DeviceContext: Send {
    /// Bind render targets for output.
    ///
    /// An empty `color_targets` slice and `None` depth/stencil unbinds everything.
    fn set_render_targets(
        &mut self,
        depth_stencil: Option<&Arc<dyn RenderTarget>>,
        color_targets: &[Arc<dyn RenderTarget>],
    );

    /// Set the rasterizer viewport
    fn set_viewport(&mut self, viewport: Viewport);

    /// Set the rasterizer scissor rectangle
    fn set_scissor(&mut self, scissor: Rect2D);

    /// Clear a color view to an RGBA value
    fn clear_render_target_view(&mut self, view: &Arc<dyn RenderTarget>, color: [f32; 4]);

    /// Clear the selected planes of a depth/stencil view
    fn clear_depth_stencil_view(
        &mut self,
        view: &Arc<dyn RenderTarget>,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    );
}

/// Pool of reusable device contexts
///
/// Checkout/return only; the pooling policy belongs to the backend.
pub trait DeviceContextPool: Send + Sync {
    /// Take a context out of the pool (creating one if the pool is empty)
    fn acquire(&self) -> Box<dyn DeviceContext>;

    /// Give a context back to the pool
    fn release(&self, context: Box<dyn DeviceContext>);
}
