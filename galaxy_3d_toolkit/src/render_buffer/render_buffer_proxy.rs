/// RenderBufferProxy - owner of a render host's color and depth/stencil buffers
///
/// Lifecycle: `initialize` → [`resize`]* → per frame `begin_draw` / `end_draw`
/// (optionally `begin_draw_2d` / `end_draw_2d`) / `present` → `dispose`.
///
/// Every (re)creation tears the previous buffers down first, so buffers are
/// only reachable while `is_initialized()` is true. Device loss is reported
/// through `subscribe_device_lost`; recovery means calling `initialize` again.

use std::sync::{Arc, Mutex};
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, Texture, RenderTarget, OverlaySurface,
    DeviceContext, DeviceContextPool, Viewport, Rect2D, ClearFlags,
};
use crate::render_buffer::{
    MsaaLevel, RenderBufferConfig, RenderBufferBackend, RenderBuffers, TextureBufferBackend,
};
use crate::utils::{EventHandlers, SubscriptionId};

const SOURCE: &str = "galaxy3d::RenderBufferProxy";

/// Depth value written by `clear_render_target`
pub const CLEAR_DEPTH: f32 = 1.0;
/// Stencil value written by `clear_render_target`
pub const CLEAR_STENCIL: u8 = 0;

pub struct RenderBufferProxy {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    backend: Box<dyn RenderBufferBackend>,
    config: RenderBufferConfig,
    context_pool: Option<Arc<dyn DeviceContextPool>>,
    buffers: Option<RenderBuffers>,
    overlay: Option<Box<dyn OverlaySurface>>,
    target_width: u32,
    target_height: u32,
    msaa: MsaaLevel,
    sample_count: u32,
    initialized: bool,
    disposed: bool,
    device_lost_raised: bool,
    on_new_buffer_created: EventHandlers<Arc<dyn Texture>>,
    on_device_lost: EventHandlers<bool>,
}

impl RenderBufferProxy {
    /// Create an offscreen proxy on `device`
    ///
    /// Creates the device context pool; no buffers exist until `initialize`.
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: RenderBufferConfig) -> Result<Self> {
        Self::with_backend(device, config, Box::new(TextureBufferBackend::new()))
    }

    /// Create a proxy whose buffers are made by `backend`
    pub fn with_backend(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        config: RenderBufferConfig,
        backend: Box<dyn RenderBufferBackend>,
    ) -> Result<Self> {
        let context_pool = device.lock().unwrap().create_device_context_pool()?;
        crate::engine_debug!(SOURCE, "Created '{}'", config.debug_name);

        Ok(Self {
            device,
            backend,
            msaa: config.msaa,
            config,
            context_pool: Some(context_pool),
            buffers: None,
            overlay: None,
            target_width: 0,
            target_height: 0,
            sample_count: 1,
            initialized: false,
            disposed: false,
            device_lost_raised: false,
            on_new_buffer_created: EventHandlers::new(),
            on_device_lost: EventHandlers::new(),
        })
    }

    // ===== BUFFER LIFECYCLE =====

    /// (Re)create all buffers at `width` x `height` with `msaa`
    ///
    /// Existing buffers are torn down first. On success the proxy is
    /// initialized and new-buffer-created is raised with the color buffer.
    /// On failure the proxy stays uninitialized.
    pub fn initialize(&mut self, width: u32, height: u32, msaa: MsaaLevel) -> Result<Arc<dyn Texture>> {
        self.create_render_target(width, height, msaa)
    }

    /// Recreate all buffers at the new size, keeping the current MSAA level
    pub fn resize(&mut self, width: u32, height: u32) -> Result<Arc<dyn Texture>> {
        self.create_render_target(width, height, self.msaa)
    }

    fn create_render_target(&mut self, width: u32, height: u32, msaa: MsaaLevel) -> Result<Arc<dyn Texture>> {
        if self.disposed {
            return Err(Self::log_and_return_error(Error::Disposed(self.config.debug_name.clone())));
        }

        self.msaa = msaa;
        self.target_width = width;
        self.target_height = height;
        self.dispose_buffers();

        if width == 0 || height == 0 {
            return Err(Self::log_and_return_error(Error::InitializationFailed(format!(
                "'{}': invalid buffer size {}x{}",
                self.config.debug_name, width, height
            ))));
        }

        let (buffers, overlay, sample_count) = {
            let mut device = self.device.lock().unwrap();
            let device_max = device
                .max_sample_count(self.config.color_format)
                .min(device.max_sample_count(self.config.depth_stencil_format));
            let sample_count = msaa.sample_count(device_max);

            let buffers = self
                .backend
                .create_buffers(&mut *device, &self.config, width, height, sample_count)
                .map_err(|e| {
                    crate::engine_error!(SOURCE, "'{}': failed to create {}x{} buffers: {}",
                        self.config.debug_name, width, height, e);
                    e
                })?;

            let overlay = if self.config.enable_overlay_2d {
                match device.create_overlay_surface(&buffers.color_buffer) {
                    Ok(overlay) => Some(overlay),
                    Err(e) => {
                        crate::engine_error!(SOURCE, "'{}': failed to create 2D overlay: {}",
                            self.config.debug_name, e);
                        drop(buffers);
                        self.backend.release_buffers();
                        return Err(e);
                    }
                }
            } else {
                None
            };

            (buffers, overlay, sample_count)
        };

        let color_buffer = buffers.color_buffer.clone();
        self.buffers = Some(buffers);
        self.overlay = overlay;
        self.sample_count = sample_count;
        self.initialized = true;
        self.device_lost_raised = false;

        crate::engine_info!(SOURCE, "'{}': created {}x{} buffers ({:?}, {} samples)",
            self.config.debug_name, width, height, msaa, sample_count);
        self.on_new_buffer_created.emit(&color_buffer);
        Ok(color_buffer)
    }

    /// Release buffers, views and overlay. Leaves the proxy uninitialized.
    fn dispose_buffers(&mut self) {
        self.initialized = false;
        let had_buffers = self.buffers.is_some();
        self.overlay = None;
        self.buffers = None;
        if had_buffers {
            self.backend.release_buffers();
            crate::engine_trace!(SOURCE, "'{}': released buffers", self.config.debug_name);
        }
    }

    // ===== FRAME =====

    /// Whether a frame can be drawn
    pub fn begin_draw(&self) -> bool {
        self.initialized
    }

    /// Finish the frame (backend hook, no-op offscreen)
    pub fn end_draw(&mut self) -> Result<()> {
        self.backend.end_draw()
    }

    /// Present the frame (backend hook, no-op offscreen)
    pub fn present(&mut self) -> Result<()> {
        self.backend.present()
    }

    /// Clear the color view and/or the depth/stencil view
    ///
    /// Depth is cleared to 1.0 and stencil to 0.
    pub fn clear_render_target(
        &self,
        context: &mut dyn DeviceContext,
        color: [f32; 4],
        clear_color: bool,
        clear_depth_stencil: bool,
    ) -> Result<()> {
        let buffers = self.require_buffers("clear_render_target")?;
        if clear_color {
            context.clear_render_target_view(&buffers.color_view, color);
        }
        if clear_depth_stencil {
            context.clear_depth_stencil_view(
                &buffers.depth_stencil_view,
                ClearFlags::DEPTH | ClearFlags::STENCIL,
                CLEAR_DEPTH,
                CLEAR_STENCIL,
            );
        }
        Ok(())
    }

    /// Clear both color and depth/stencil
    pub fn clear_render_target_all(&self, context: &mut dyn DeviceContext, color: [f32; 4]) -> Result<()> {
        self.clear_render_target(context, color, true, true)
    }

    /// Bind the proxy's views and set viewport and scissor to the full target
    pub fn set_default_render_targets(&self, context: &mut dyn DeviceContext) -> Result<()> {
        let buffers = self.require_buffers("set_default_render_targets")?;
        context.set_render_targets(
            Some(&buffers.depth_stencil_view),
            std::slice::from_ref(&buffers.color_view),
        );
        context.set_viewport(Viewport::full(self.target_width, self.target_height));
        context.set_scissor(Rect2D {
            x: 0,
            y: 0,
            width: self.target_width,
            height: self.target_height,
        });
        Ok(())
    }

    /// Unbind every render target
    pub fn clear_render_target_binding(&self, context: &mut dyn DeviceContext) {
        context.set_render_targets(None, &[]);
    }

    // ===== 2D OVERLAY =====

    /// Start drawing on the 2D overlay
    pub fn begin_draw_2d(&mut self) -> Result<()> {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.begin_draw(),
            None => Err(Self::log_and_return_error(Error::NoOverlaySurface)),
        }
    }

    /// Finish drawing on the 2D overlay
    pub fn end_draw_2d(&mut self) -> Result<()> {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.end_draw(),
            None => Err(Self::log_and_return_error(Error::NoOverlaySurface)),
        }
    }

    // ===== DEVICE LOSS =====

    /// Report that the device was lost
    ///
    /// Tears the buffers down and notifies device-lost subscribers once per
    /// initialized generation. Returns whether subscribers were notified.
    pub fn raise_device_lost(&mut self) -> bool {
        if self.disposed || self.device_lost_raised {
            return false;
        }
        crate::engine_warn!(SOURCE, "'{}': device lost, buffers released", self.config.debug_name);
        self.dispose_buffers();
        self.device_lost_raised = true;
        self.on_device_lost.emit(&true);
        true
    }

    // ===== NOTIFICATIONS =====

    /// Called with the new color buffer after every successful (re)creation
    pub fn subscribe_new_buffer_created<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&Arc<dyn Texture>) + Send + 'static,
    {
        self.on_new_buffer_created.subscribe(handler)
    }

    pub fn unsubscribe_new_buffer_created(&mut self, id: SubscriptionId) -> bool {
        self.on_new_buffer_created.unsubscribe(id)
    }

    /// Called with `true` when the device is lost
    pub fn subscribe_device_lost<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&bool) + Send + 'static,
    {
        self.on_device_lost.subscribe(handler)
    }

    pub fn unsubscribe_device_lost(&mut self, id: SubscriptionId) -> bool {
        self.on_device_lost.unsubscribe(id)
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &RenderBufferConfig {
        &self.config
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    pub fn target_height(&self) -> u32 {
        self.target_height
    }

    /// Configured MSAA level
    pub fn msaa(&self) -> MsaaLevel {
        self.msaa
    }

    /// Samples per pixel of the current buffers
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn color_buffer(&self) -> Option<&Arc<dyn Texture>> {
        self.buffers.as_ref().map(|b| &b.color_buffer)
    }

    pub fn depth_stencil_buffer(&self) -> Option<&Arc<dyn Texture>> {
        self.buffers.as_ref().map(|b| &b.depth_stencil_buffer)
    }

    pub fn color_view(&self) -> Option<&Arc<dyn RenderTarget>> {
        self.buffers.as_ref().map(|b| &b.color_view)
    }

    pub fn depth_stencil_view(&self) -> Option<&Arc<dyn RenderTarget>> {
        self.buffers.as_ref().map(|b| &b.depth_stencil_view)
    }

    /// 2D overlay surface, if enabled and initialized
    pub fn overlay(&self) -> Option<&dyn OverlaySurface> {
        self.overlay.as_deref()
    }

    pub fn device_context_pool(&self) -> Option<&Arc<dyn DeviceContextPool>> {
        self.context_pool.as_ref()
    }

    pub fn graphics_device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> {
        &self.device
    }

    // ===== DISPOSAL =====

    /// Release every GPU resource
    ///
    /// Subscribers are dropped first (no notification is raised), then the
    /// proxy becomes uninitialized and releases buffers, views, the overlay
    /// surface and the device context pool. Calling it again is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.on_new_buffer_created.clear();
        self.on_device_lost.clear();
        self.dispose_buffers();
        self.context_pool = None;
        self.disposed = true;
        crate::engine_debug!(SOURCE, "Disposed '{}'", self.config.debug_name);
    }

    // ===== HELPERS =====

    fn require_buffers(&self, operation: &str) -> Result<&RenderBuffers> {
        match (&self.buffers, self.initialized) {
            (Some(buffers), true) => Ok(buffers),
            _ => Err(Self::log_and_return_error(Error::InvalidResource(format!(
                "'{}': {} called while not initialized",
                self.config.debug_name, operation
            )))),
        }
    }

    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!(SOURCE, "{}", error);
        error
    }
}

impl Drop for RenderBufferProxy {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "render_buffer_proxy_tests.rs"]
mod tests;
