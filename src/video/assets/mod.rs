//! Symbolic descriptors of the GPU objects owned by `VideoSystem`.
//!
//! Everything here is backend-agnostic: enums are resolved into native GL
//! values exactly once, when the object is created.

pub mod buffer;
pub mod framebuffer;
pub mod pipeline;
pub mod program;
pub mod render_pass;
pub mod sampler;
pub mod texture;
pub mod vertex_array;

pub mod prelude {
    pub use super::buffer::{BufferHandle, BufferKind, BufferParams};
    pub use super::framebuffer::{FramebufferHandle, FramebufferParams, MAX_COLOR_ATTACHMENTS};
    pub use super::pipeline::{
        BlendFactor, BlendOperation, Comparison, CullMode, FaceOrientation, PipelineHandle,
        PipelineInfo, PipelineState, StencilOperation, StencilOperationState, Topology,
    };
    pub use super::program::{ProgramHandle, ProgramParams, UniformLocation};
    pub use super::render_pass::{
        ColorAttachmentInfo, CopyFramebufferToBufferInfo, CopyFramebufferToTextureInfo,
        DataFormat, LoadOperation, RenderPassInfo, StoreOperation, Viewport,
    };
    pub use super::sampler::{Filter, SamplerHandle, SamplerParams, Wrap};
    pub use super::texture::{ColorFormat, TextureHandle, TextureKind, TextureParams};
    pub use super::vertex_array::{
        IndexFormat, VertexArrayHandle, VertexArrayParams, VertexAttribute, VertexAttributeFormat,
        VertexBufferBinding,
    };
}
