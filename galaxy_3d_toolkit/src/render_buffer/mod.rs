/// Render buffer module - color/depth-stencil buffers of a render host

pub mod msaa;
pub mod config;
pub mod backend;
pub mod render_buffer_proxy;

pub use msaa::MsaaLevel;
pub use config::RenderBufferConfig;
pub use backend::{RenderBufferBackend, RenderBuffers, TextureBufferBackend};
pub use render_buffer_proxy::{RenderBufferProxy, CLEAR_DEPTH, CLEAR_STENCIL};
