//! Descriptors consumed by the render-pass and copy commands.

use super::buffer::BufferHandle;
use super::framebuffer::{FramebufferHandle, MAX_COLOR_ATTACHMENTS};
use super::texture::TextureHandle;

/// What happens to an attachment when a render pass begins.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadOperation {
    Load,
    Clear,
    DontCare,
}

/// What happens to an attachment when a render pass ends.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StoreOperation {
    Store,
    DontCare,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Viewport {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAttachmentInfo {
    pub load_op: LoadOperation,
    pub store_op: StoreOperation,
    pub clear_value: [f32; 4],
}

impl Default for ColorAttachmentInfo {
    fn default() -> Self {
        ColorAttachmentInfo {
            load_op: LoadOperation::Load,
            store_op: StoreOperation::Store,
            clear_value: [0.0; 4],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPassInfo {
    pub framebuffer: FramebufferHandle,
    pub viewport: Viewport,
    pub colors: [ColorAttachmentInfo; MAX_COLOR_ATTACHMENTS],
    pub depth_load_op: LoadOperation,
    pub depth_store_op: StoreOperation,
    pub depth_clear_value: f32,
    /// Constant depth offset applied to every polygon drawn in the pass.
    pub depth_bias: f32,
    /// Depth offset scaled by the polygon slope.
    pub depth_slope_bias: f32,
    pub stencil_load_op: LoadOperation,
    pub stencil_store_op: StoreOperation,
    pub stencil_clear_value: i32,
}

impl RenderPassInfo {
    /// A pass that loads and keeps every attachment of `framebuffer`.
    pub fn new(framebuffer: FramebufferHandle, viewport: Viewport) -> Self {
        RenderPassInfo {
            framebuffer,
            viewport,
            colors: [ColorAttachmentInfo::default(); MAX_COLOR_ATTACHMENTS],
            depth_load_op: LoadOperation::Load,
            depth_store_op: StoreOperation::Store,
            depth_clear_value: 1.0,
            depth_bias: 0.0,
            depth_slope_bias: 0.0,
            stencil_load_op: LoadOperation::Load,
            stencil_store_op: StoreOperation::Store,
            stencil_clear_value: 0,
        }
    }
}

/// Pixel layout of framebuffer read-backs.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DataFormat {
    RGBA8,
    RGBA16F,
    RGBA32F,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyFramebufferToBufferInfo {
    pub buffer: BufferHandle,
    pub offset: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub format: DataFormat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyFramebufferToTextureInfo {
    pub texture: TextureHandle,
    pub texture_level: u32,
    pub texture_x: u32,
    pub texture_y: u32,
    pub framebuffer_x: u32,
    pub framebuffer_y: u32,
    pub width: u32,
    pub height: u32,
    pub generate_mipmaps: bool,
}
