//! The binary command stream.
//!
//! Every record is a one byte `Header` naming the `Kind`, immediately
//! followed by the fixed-size payload of that kind. `UpdateBufferData` is
//! followed by `count` raw bytes in addition. The layout is only meaningful
//! inside the process that wrote it.

#[macro_use]
pub mod codec;
pub mod buffer;

pub use self::buffer::CommandBuffer;
pub use self::codec::{Decoder, Encoder, Field};

use super::assets::prelude::*;
use super::pipeline::Pipeline;

impl_field_handle!(BufferHandle, TextureHandle, SamplerHandle, FramebufferHandle);

impl_field_enum!(LoadOperation {
    Load = 0,
    Clear = 1,
    DontCare = 2,
});

impl_field_enum!(StoreOperation {
    Store = 0,
    DontCare = 1,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    CopyFramebufferToBuffer,
    CopyFramebufferToTexture,
    BeginRenderPass,
    EndRenderPass,
    SetViewport,
    BindPipeline,
    Uniform1f,
    Uniform1i,
    Uniform3f,
    Uniform4f,
    UniformMatrix4f,
    UniformBufferUnit,
    UniformBufferUnitRange,
    TextureUnit,
    SamplerUnit,
    Draw,
    DrawIndexed,
    UpdateBufferData,
}

impl_field_enum!(Kind {
    CopyFramebufferToBuffer = 0,
    CopyFramebufferToTexture = 1,
    BeginRenderPass = 2,
    EndRenderPass = 3,
    SetViewport = 4,
    BindPipeline = 5,
    Uniform1f = 6,
    Uniform1i = 7,
    Uniform3f = 8,
    Uniform4f = 9,
    UniformMatrix4f = 10,
    UniformBufferUnit = 11,
    UniformBufferUnitRange = 12,
    TextureUnit = 13,
    SamplerUnit = 14,
    Draw = 15,
    DrawIndexed = 16,
    UpdateBufferData = 17,
});

impl_field_struct! {
    pub struct Header {
        pub kind: Kind,
    }
}

/// A payload that is always preceded by a `Header` of its own kind.
pub trait Command: Field {
    const KIND: Kind;
}

macro_rules! impl_command {
    ($($name:ident),*) => {
        $(
            impl Command for $name {
                const KIND: Kind = Kind::$name;
            }
        )*
    };
}

impl_field_struct! {
    pub struct CopyFramebufferToBuffer {
        pub buffer: BufferHandle,
        pub x: i32,
        pub y: i32,
        pub width: i32,
        pub height: i32,
        /// Native pixel format.
        pub format: u32,
        /// Native component type.
        pub xtype: u32,
        pub buffer_offset: u32,
    }
}

impl_field_struct! {
    pub struct CopyFramebufferToTexture {
        pub texture: TextureHandle,
        pub texture_level: i32,
        pub texture_x: i32,
        pub texture_y: i32,
        pub framebuffer_x: i32,
        pub framebuffer_y: i32,
        pub width: i32,
        pub height: i32,
        pub generate_mipmaps: bool,
    }
}

impl_field_struct! {
    pub struct ColorAttachment {
        pub load_op: LoadOperation,
        pub store_op: StoreOperation,
        pub clear_value: [f32; 4],
    }
}

impl_field_struct! {
    pub struct BeginRenderPass {
        pub framebuffer: FramebufferHandle,
        pub viewport_x: i32,
        pub viewport_y: i32,
        pub viewport_width: i32,
        pub viewport_height: i32,
        pub colors: [ColorAttachment; MAX_COLOR_ATTACHMENTS],
        pub depth_load_op: LoadOperation,
        pub depth_store_op: StoreOperation,
        pub depth_clear_value: f32,
        pub depth_bias: f32,
        pub depth_slope_bias: f32,
        pub stencil_load_op: LoadOperation,
        pub stencil_store_op: StoreOperation,
        pub stencil_clear_value: i32,
    }
}

impl_field_struct! {
    pub struct EndRenderPass {}
}

impl_field_struct! {
    pub struct SetViewport {
        pub x: i32,
        pub y: i32,
        pub width: i32,
        pub height: i32,
    }
}

impl_field_struct! {
    pub struct BindPipeline {
        pub pipeline: Pipeline,
    }
}

impl_field_struct! {
    pub struct Uniform1f {
        pub location: i32,
        pub value: f32,
    }
}

impl_field_struct! {
    pub struct Uniform1i {
        pub location: i32,
        pub value: i32,
    }
}

impl_field_struct! {
    pub struct Uniform3f {
        pub location: i32,
        pub values: [f32; 3],
    }
}

impl_field_struct! {
    pub struct Uniform4f {
        pub location: i32,
        pub values: [f32; 4],
    }
}

impl_field_struct! {
    /// Column-major 4x4 matrix.
    pub struct UniformMatrix4f {
        pub location: i32,
        pub values: [f32; 16],
    }
}

impl_field_struct! {
    pub struct UniformBufferUnit {
        pub index: u32,
        pub buffer: BufferHandle,
    }
}

impl_field_struct! {
    pub struct UniformBufferUnitRange {
        pub index: u32,
        pub buffer: BufferHandle,
        pub offset: u32,
        pub size: u32,
    }
}

impl_field_struct! {
    pub struct TextureUnit {
        pub index: u32,
        pub texture: TextureHandle,
    }
}

impl_field_struct! {
    /// A nil `sampler` unbinds the unit.
    pub struct SamplerUnit {
        pub index: u32,
        pub sampler: SamplerHandle,
    }
}

impl_field_struct! {
    pub struct Draw {
        pub vertex_offset: i32,
        pub vertex_count: i32,
        pub instance_count: i32,
    }
}

impl_field_struct! {
    pub struct DrawIndexed {
        pub index_byte_offset: i32,
        pub index_count: i32,
        pub instance_count: i32,
    }
}

impl_field_struct! {
    /// Followed by `count` raw bytes.
    pub struct UpdateBufferData {
        pub buffer: BufferHandle,
        pub offset: u32,
        pub count: u32,
    }
}

impl_command!(
    CopyFramebufferToBuffer,
    CopyFramebufferToTexture,
    BeginRenderPass,
    EndRenderPass,
    SetViewport,
    BindPipeline,
    Uniform1f,
    Uniform1i,
    Uniform3f,
    Uniform4f,
    UniformMatrix4f,
    UniformBufferUnit,
    UniformBufferUnitRange,
    TextureUnit,
    SamplerUnit,
    Draw,
    DrawIndexed,
    UpdateBufferData
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn payload_sizes() {
        assert_eq!(Header::SIZE, 1);
        assert_eq!(EndRenderPass::SIZE, 0);
        assert_eq!(Draw::SIZE, 12);
        assert_eq!(ColorAttachment::SIZE, 18);
        assert_eq!(BeginRenderPass::SIZE, 8 + 16 + 4 * 18 + 2 + 12 + 2 + 4);
        assert_eq!(UniformMatrix4f::SIZE, 68);
        assert_eq!(UpdateBufferData::SIZE, 16);
    }

    #[test]
    #[should_panic]
    fn unknown_kind() {
        let bytes = [200u8];
        let mut d = Decoder::new(&bytes);
        let _ = Header::decode(&mut d);
    }
}
