/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every command issued on contexts and overlays as a string, and
/// counts live textures so tests can verify that resources are released.

#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[cfg(test)]
use crate::graphics_device::{
    GraphicsDevice, Texture, TextureDesc, TextureInfo, TextureFormat,
    RenderTarget, OverlaySurface, DeviceContext, DeviceContextPool,
    Viewport, Rect2D, ClearFlags,
};
#[cfg(test)]
use crate::error::{Error, Result};

// ============================================================================
// Mock Texture
// ============================================================================

#[cfg(test)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub name: String,
    live: Arc<AtomicUsize>,
}

#[cfg(test)]
impl MockTexture {
    pub fn new(desc: &TextureDesc, live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self {
            info: TextureInfo::from(desc),
            name: desc.name.clone(),
            live,
        }
    }
}

#[cfg(test)]
impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

#[cfg(test)]
impl Drop for MockTexture {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock RenderTarget
// ============================================================================

#[cfg(test)]
#[derive(Debug)]
pub struct MockRenderTarget {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub name: String,
}

#[cfg(test)]
impl RenderTarget for MockRenderTarget {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        self.format
    }
}

// ============================================================================
// Mock DeviceContext
// ============================================================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockDeviceContext {
    pub commands: Vec<String>,
    pub viewport: Option<Viewport>,
    pub scissor: Option<Rect2D>,
    pub bound_color_targets: usize,
    pub depth_bound: bool,
}

#[cfg(test)]
impl MockDeviceContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl DeviceContext for MockDeviceContext {
    fn set_render_targets(
        &mut self,
        depth_stencil: Option<&Arc<dyn RenderTarget>>,
        color_targets: &[Arc<dyn RenderTarget>],
    ) {
        self.bound_color_targets = color_targets.len();
        self.depth_bound = depth_stencil.is_some();
        self.commands.push(format!(
            "set_render_targets(depth={}, colors={})",
            self.depth_bound, self.bound_color_targets
        ));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.commands.push("set_viewport".to_string());
    }

    fn set_scissor(&mut self, scissor: Rect2D) {
        self.scissor = Some(scissor);
        self.commands.push("set_scissor".to_string());
    }

    fn clear_render_target_view(&mut self, _view: &Arc<dyn RenderTarget>, color: [f32; 4]) {
        self.commands.push(format!("clear_color({:?})", color));
    }

    fn clear_depth_stencil_view(
        &mut self,
        _view: &Arc<dyn RenderTarget>,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        self.commands.push(format!(
            "clear_depth_stencil(depth={}, stencil={}, depth_value={}, stencil_value={})",
            flags.contains(ClearFlags::DEPTH),
            flags.contains(ClearFlags::STENCIL),
            depth,
            stencil
        ));
    }
}

// ============================================================================
// Mock DeviceContextPool
// ============================================================================

#[cfg(test)]
pub struct MockDeviceContextPool {
    free: Mutex<Vec<Box<dyn DeviceContext>>>,
    pub acquired: AtomicUsize,
    pub released: AtomicUsize,
    dropped: Arc<AtomicBool>,
}

#[cfg(test)]
impl MockDeviceContextPool {
    pub fn new(dropped: Arc<AtomicBool>) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            acquired: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
            dropped,
        }
    }

    pub fn free_count(&self) -> usize {
        self.free.lock().unwrap().len()
    }
}

#[cfg(test)]
impl DeviceContextPool for MockDeviceContextPool {
    fn acquire(&self) -> Box<dyn DeviceContext> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        self.free
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Box::new(MockDeviceContext::new()))
    }

    fn release(&self, context: Box<dyn DeviceContext>) {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.free.lock().unwrap().push(context);
    }
}

#[cfg(test)]
impl Drop for MockDeviceContextPool {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock OverlaySurface
// ============================================================================

#[cfg(test)]
pub struct MockOverlaySurface {
    pub log: Arc<Mutex<Vec<String>>>,
    drawing: bool,
}

#[cfg(test)]
impl MockOverlaySurface {
    pub fn new(log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { log, drawing: false }
    }
}

#[cfg(test)]
impl OverlaySurface for MockOverlaySurface {
    fn begin_draw(&mut self) -> Result<()> {
        self.drawing = true;
        self.log.lock().unwrap().push("overlay_begin".to_string());
        Ok(())
    }

    fn end_draw(&mut self) -> Result<()> {
        self.drawing = false;
        self.log.lock().unwrap().push("overlay_end".to_string());
        Ok(())
    }

    fn is_drawing(&self) -> bool {
        self.drawing
    }
}

#[cfg(test)]
impl Drop for MockOverlaySurface {
    fn drop(&mut self) {
        self.log.lock().unwrap().push("overlay_dropped".to_string());
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[cfg(test)]
pub struct MockGraphicsDevice {
    /// Reported by max_sample_count() for every format
    pub max_samples: u32,
    /// When set, create_texture() fails with OutOfMemory
    pub fail_texture_creation: bool,
    /// When set, create_overlay_surface() fails with OutOfMemory
    pub fail_overlay_creation: bool,
    /// Descriptors of every texture created, in order
    pub created_textures: Vec<TextureDesc>,
    /// Number of textures currently alive
    pub live_textures: Arc<AtomicUsize>,
    /// Commands issued on overlay surfaces
    pub overlay_log: Arc<Mutex<Vec<String>>>,
    /// Set when the context pool handed out by this device is dropped
    pub pool_dropped: Arc<AtomicBool>,
    pub pools_created: usize,
}

#[cfg(test)]
impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            max_samples: 4,
            fail_texture_creation: false,
            fail_overlay_creation: false,
            created_textures: Vec::new(),
            live_textures: Arc::new(AtomicUsize::new(0)),
            overlay_log: Arc::new(Mutex::new(Vec::new())),
            pool_dropped: Arc::new(AtomicBool::new(false)),
            pools_created: 0,
        }
    }

    pub fn with_max_samples(max_samples: u32) -> Self {
        Self { max_samples, ..Self::new() }
    }
}

#[cfg(test)]
impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if self.fail_texture_creation {
            return Err(Error::OutOfMemory);
        }
        let texture = MockTexture::new(&desc, self.live_textures.clone());
        self.created_textures.push(desc);
        Ok(Arc::new(texture))
    }

    fn create_render_target_view(&mut self, texture: &Arc<dyn Texture>) -> Result<Arc<dyn RenderTarget>> {
        let info = texture.info();
        Ok(Arc::new(MockRenderTarget {
            width: info.width,
            height: info.height,
            format: info.format,
            name: format!("view_{}x{}", info.width, info.height),
        }))
    }

    fn max_sample_count(&self, _format: TextureFormat) -> u32 {
        self.max_samples.max(1)
    }

    fn create_overlay_surface(&mut self, _color_buffer: &Arc<dyn Texture>) -> Result<Box<dyn OverlaySurface>> {
        if self.fail_overlay_creation {
            return Err(Error::OutOfMemory);
        }
        Ok(Box::new(MockOverlaySurface::new(self.overlay_log.clone())))
    }

    fn create_device_context_pool(&mut self) -> Result<Arc<dyn DeviceContextPool>> {
        self.pools_created += 1;
        Ok(Arc::new(MockDeviceContextPool::new(self.pool_dropped.clone())))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
