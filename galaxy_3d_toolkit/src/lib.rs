/*!
# Galaxy 3D Toolkit

Retained-mode scene graph and render buffer management for Galaxy 3D render hosts.

The toolkit sits between a render host (a window, a viewport control) and a
graphics backend. It consumes the GPU through the `GraphicsDevice`,
`DeviceContext` and `DeviceContextPool` traits and never talks to a concrete
API itself.

## Architecture

- **SceneGraph**: arena of scene nodes with group composition, child change
  notifications, attach/detach propagation to a `RenderHost`, hit testing
  and draw traversal
- **RenderBufferProxy**: color and depth/stencil buffers of a render host,
  with resize, clear, bind, 2D overlay, device-loss and dispose lifecycle
- **GraphicsDevice**: factory trait implemented by backends
- **Engine**: process-wide logger used by every component
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod render_buffer;
pub mod scene;
pub mod utils;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::{Engine, DEFAULT_MIN_SEVERITY};

    // Graphics device factory trait
    pub use crate::graphics_device::GraphicsDevice;

    // Logging sub-module (types only, macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module: device interfaces and render buffers
    pub mod render {
        pub use crate::graphics_device::*;
        pub use crate::render_buffer::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Notification helpers
    pub mod utils {
        pub use crate::utils::*;
    }
}

// Re-export math library at crate root
pub use glam;
