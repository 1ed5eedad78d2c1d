//! The backend of renderer, which should be responsible for only one thing:
//! issuing the native calls the renderer and resource system ask for.

pub mod gl;
pub mod headless;

use ::gl::types::*;

use super::assets::prelude::*;
use super::fence::{FenceHandle, FenceStatus};
use crate::errors::*;

/// An attachment to discard at the end of a render pass. The device picks
/// the native token, which differs between the default and offscreen
/// framebuffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Color(u32),
    Depth,
    Stencil,
    DepthStencil,
}

/// Implementation-dependent limits of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub uniform_buffer_offset_alignment: u32,
    pub max_color_attachments: u32,
    pub max_texture_size: u32,
    pub max_texture_units: u32,
    pub max_vertex_attributes: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            uniform_buffer_offset_alignment: 256,
            max_color_attachments: MAX_COLOR_ATTACHMENTS as u32,
            max_texture_size: 4096,
            max_texture_units: 16,
            max_vertex_attributes: 16,
        }
    }
}

/// Native attachments of an offscreen framebuffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramebufferAttachments {
    pub colors: [Option<GLuint>; MAX_COLOR_ATTACHMENTS],
    pub depth: Option<GLuint>,
    pub stencil: Option<GLuint>,
    pub depth_stencil: Option<GLuint>,
}

/// A vertex attribute pointing into a native buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttributeBinding {
    pub buffer: GLuint,
    pub location: GLuint,
    pub format: VertexAttributeFormat,
    pub stride: u32,
    pub offset: u32,
}

/// The table of native calls. Resource creation may fail; state changes
/// and draws are fire-and-forget, as they are in GL itself.
pub trait Device {
    fn limits(&self) -> Limits;

    /// Compiles and links a program. Compile and link failures are logged
    /// and yield a program that renders nothing.
    fn create_program(&mut self, params: &ProgramParams) -> Result<GLuint>;

    fn delete_program(&mut self, id: GLuint);

    fn uniform_location(&mut self, program: GLuint, name: &str) -> GLint;

    fn create_buffer(
        &mut self,
        target: GLenum,
        usage: GLenum,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<GLuint>;

    fn delete_buffer(&mut self, id: GLuint);

    fn create_texture(&mut self, params: &TextureParams, data: Option<&[u8]>) -> Result<GLuint>;

    fn delete_texture(&mut self, id: GLuint);

    fn create_sampler(&mut self, params: &SamplerParams) -> Result<GLuint>;

    fn delete_sampler(&mut self, id: GLuint);

    /// Creates a framebuffer object. Incompleteness is logged, not returned.
    fn create_framebuffer(&mut self, label: &str, attachments: &FramebufferAttachments)
        -> Result<GLuint>;

    fn delete_framebuffer(&mut self, id: GLuint);

    fn create_vertex_array(
        &mut self,
        attributes: &[VertexAttributeBinding],
        index_buffer: Option<GLuint>,
    ) -> Result<GLuint>;

    fn delete_vertex_array(&mut self, id: GLuint);

    fn enable(&mut self, cap: GLenum);

    fn disable(&mut self, cap: GLenum);

    fn cull_face(&mut self, face: GLenum);

    fn front_face(&mut self, mode: GLenum);

    fn depth_mask(&mut self, enabled: bool);

    fn depth_func(&mut self, func: GLenum);

    fn stencil_op_separate(&mut self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum);

    fn stencil_func_separate(&mut self, face: GLenum, func: GLenum, reference: GLint, mask: GLuint);

    fn stencil_mask_separate(&mut self, face: GLenum, mask: GLuint);

    fn color_mask(&mut self, mask: [bool; 4]);

    fn blend_color(&mut self, color: [f32; 4]);

    fn blend_equation_separate(&mut self, mode_rgb: GLenum, mode_alpha: GLenum);

    fn blend_func_separate(
        &mut self,
        src_rgb: GLenum,
        dst_rgb: GLenum,
        src_alpha: GLenum,
        dst_alpha: GLenum,
    );

    fn polygon_offset(&mut self, factor: f32, units: f32);

    fn use_program(&mut self, id: GLuint);

    fn bind_vertex_array(&mut self, id: GLuint);

    fn bind_framebuffer(&mut self, id: GLuint);

    fn viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);

    fn clear_color(&mut self, draw_buffer: GLint, value: [f32; 4]);

    fn clear_depth(&mut self, value: f32);

    fn clear_stencil(&mut self, value: GLint);

    fn clear_depth_stencil(&mut self, depth: f32, stencil: GLint);

    /// Hints that the content of `attachments` of the bound framebuffer is no
    /// longer needed.
    fn invalidate_framebuffer(&mut self, default: bool, attachments: &[Attachment]);

    fn uniform1f(&mut self, location: GLint, value: f32);

    fn uniform1i(&mut self, location: GLint, value: GLint);

    fn uniform3f(&mut self, location: GLint, values: [f32; 3]);

    fn uniform4f(&mut self, location: GLint, values: [f32; 4]);

    fn uniform_matrix4f(&mut self, location: GLint, values: &[f32; 16]);

    fn bind_buffer_base(&mut self, target: GLenum, index: GLuint, buffer: GLuint);

    fn bind_buffer_range(
        &mut self,
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
        offset: usize,
        size: usize,
    );

    fn bind_texture_unit(&mut self, unit: GLuint, target: GLenum, texture: GLuint);

    fn bind_sampler(&mut self, unit: GLuint, sampler: GLuint);

    fn draw_arrays_instanced(&mut self, mode: GLenum, first: GLint, count: GLsizei, instances: GLsizei);

    fn draw_elements_instanced(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        index_type: GLenum,
        offset: usize,
        instances: GLsizei,
    );

    /// Reads a region of the bound framebuffer into a pixel pack buffer.
    fn read_pixels_to_buffer(
        &mut self,
        buffer: GLuint,
        offset: usize,
        area: [GLint; 4],
        format: GLenum,
        xtype: GLenum,
    );

    /// Copies a region of the bound framebuffer into a texture level.
    fn copy_texture_sub_image(
        &mut self,
        target: GLenum,
        texture: GLuint,
        level: GLint,
        texture_offset: [GLint; 2],
        area: [GLint; 4],
    );

    fn generate_mipmap(&mut self, target: GLenum, texture: GLuint);

    /// Writes `data` into `buffer` through the `target` binding point, which
    /// is left unbound afterwards.
    fn buffer_sub_data(&mut self, target: GLenum, buffer: GLuint, offset: usize, data: &[u8]);

    /// Inserts a fence after all the work submitted so far.
    fn fence_sync(&mut self) -> FenceHandle;

    /// Polls a fence without blocking.
    fn fence_status(&mut self, fence: FenceHandle) -> Result<FenceStatus>;

    fn delete_fence(&mut self, fence: FenceHandle) -> Result<()>;
}
