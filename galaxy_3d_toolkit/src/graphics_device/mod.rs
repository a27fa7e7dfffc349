/// Graphics device module - the GPU-facing interfaces the toolkit consumes

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod render_target;
pub mod device_context;
pub mod overlay;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use render_target::*;
pub use device_context::*;
pub use overlay::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
