//! # deferred-gl
//!
//! A deferred rendering front-end for OpenGL. Rendering operations are
//! recorded into a compact binary `CommandBuffer` on any thread, then replayed
//! on the thread that owns the GL context by a renderer that keeps a cache of
//! the GPU state and only issues the native calls needed to reach the state a
//! draw asks for.
//!
//! ```rust,ignore
//! let mut video = VideoSystem::new(unsafe { GLDevice::new(params.clone())? }, params);
//! let pipeline = video.create_pipeline(&info)?;
//!
//! let mut cmds = CommandBuffer::new(1024);
//! cmds.begin_render_pass(&pass);
//! cmds.bind_pipeline(video.pipeline(pipeline).unwrap());
//! cmds.draw(0, 3, 1);
//! cmds.end_render_pass();
//!
//! video.submit(&mut cmds);
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate serde;

extern crate byteorder;
extern crate gl;
extern crate serde_json;
extern crate smallvec;

#[macro_use]
pub mod utils;
pub mod errors;
pub mod video;

pub mod prelude {
    pub use crate::utils::prelude::*;
    pub use crate::video::prelude::*;
}
