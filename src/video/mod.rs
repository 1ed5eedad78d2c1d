//! A deferred OpenGL renderer.
//!
//! Commands are recorded into a `CommandBuffer`, a compact binary stream that
//! can be filled on any thread. The stream is handed to `VideoSystem::submit`
//! on the thread that owns the GL context, where the `Renderer` decodes it
//! and issues native calls through a `Device`.
//!
//! Fixed-function state is never applied eagerly. The renderer tracks both
//! the state the device is in and the state the next draw wants, and only
//! emits the calls needed to go from one to the other right before drawing.

pub mod assets;
pub mod errors;
pub mod fence;
pub mod settings;
#[macro_use]
pub mod command;
pub mod pipeline;
pub mod backends;
pub mod renderer;
pub mod resources;
pub mod system;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::backends::gl::GLDevice;
    pub use super::backends::headless::{Call, HeadlessDevice};
    pub use super::backends::{Device, Limits};
    pub use super::command::CommandBuffer;
    pub use super::fence::{FenceHandle, FenceStatus};
    pub use super::pipeline::Pipeline;
    pub use super::settings::VideoParams;
    pub use super::system::VideoSystem;
}
