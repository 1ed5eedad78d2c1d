//! A device without GPU. It hands out native ids and records every call,
//! which makes the renderer observable in tests.

use std::collections::HashMap;

use gl::types::*;

use super::super::assets::prelude::*;
use super::super::fence::{FenceHandle, FenceStatus};
use super::{Attachment, Device, FramebufferAttachments, Limits, VertexAttributeBinding};
use crate::errors::*;
use crate::utils::prelude::*;

/// A native call issued to `HeadlessDevice`.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateProgram(GLuint),
    DeleteProgram(GLuint),
    CreateBuffer(GLuint, GLenum, usize),
    DeleteBuffer(GLuint),
    CreateTexture(GLuint, TextureParams),
    DeleteTexture(GLuint),
    CreateSampler(GLuint),
    DeleteSampler(GLuint),
    CreateFramebuffer(GLuint, FramebufferAttachments),
    DeleteFramebuffer(GLuint),
    CreateVertexArray(GLuint, Vec<VertexAttributeBinding>, Option<GLuint>),
    DeleteVertexArray(GLuint),
    Enable(GLenum),
    Disable(GLenum),
    CullFace(GLenum),
    FrontFace(GLenum),
    DepthMask(bool),
    DepthFunc(GLenum),
    StencilOpSeparate(GLenum, GLenum, GLenum, GLenum),
    StencilFuncSeparate(GLenum, GLenum, GLint, GLuint),
    StencilMaskSeparate(GLenum, GLuint),
    ColorMask([bool; 4]),
    BlendColor([f32; 4]),
    BlendEquationSeparate(GLenum, GLenum),
    BlendFuncSeparate(GLenum, GLenum, GLenum, GLenum),
    PolygonOffset(f32, f32),
    UseProgram(GLuint),
    BindVertexArray(GLuint),
    BindFramebuffer(GLuint),
    Viewport(GLint, GLint, GLsizei, GLsizei),
    ClearColor(GLint, [f32; 4]),
    ClearDepth(f32),
    ClearStencil(GLint),
    ClearDepthStencil(f32, GLint),
    InvalidateFramebuffer(bool, Vec<Attachment>),
    Uniform1f(GLint, f32),
    Uniform1i(GLint, GLint),
    Uniform3f(GLint, [f32; 3]),
    Uniform4f(GLint, [f32; 4]),
    UniformMatrix4f(GLint, [f32; 16]),
    BindBufferBase(GLenum, GLuint, GLuint),
    BindBufferRange(GLenum, GLuint, GLuint, usize, usize),
    BindTextureUnit(GLuint, GLenum, GLuint),
    BindSampler(GLuint, GLuint),
    DrawArraysInstanced(GLenum, GLint, GLsizei, GLsizei),
    DrawElementsInstanced(GLenum, GLsizei, GLenum, usize, GLsizei),
    ReadPixelsToBuffer(GLuint, usize, [GLint; 4], GLenum, GLenum),
    CopyTextureSubImage(GLenum, GLuint, GLint, [GLint; 2], [GLint; 4]),
    GenerateMipmap(GLenum, GLuint),
    BufferSubData(GLenum, GLuint, usize, Vec<u8>),
    FenceSync(FenceHandle),
    DeleteFence(FenceHandle),
}

impl Call {
    /// Returns true for calls that change the fixed-function render state.
    pub fn is_state_change(&self) -> bool {
        match *self {
            Call::Enable(_)
            | Call::Disable(_)
            | Call::CullFace(_)
            | Call::FrontFace(_)
            | Call::DepthMask(_)
            | Call::DepthFunc(_)
            | Call::StencilOpSeparate(..)
            | Call::StencilFuncSeparate(..)
            | Call::StencilMaskSeparate(..)
            | Call::ColorMask(_)
            | Call::BlendColor(_)
            | Call::BlendEquationSeparate(..)
            | Call::BlendFuncSeparate(..) => true,
            _ => false,
        }
    }
}

pub struct HeadlessDevice {
    limits: Limits,
    next_id: GLuint,
    calls: Vec<Call>,
    uniforms: HashMap<(GLuint, String), GLint>,
    fences: ObjectPool<FenceHandle, FenceStatus>,
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        HeadlessDevice::new()
    }
}

impl HeadlessDevice {
    pub fn new() -> Self {
        HeadlessDevice {
            limits: Limits::default(),
            next_id: 0,
            calls: Vec::new(),
            uniforms: HashMap::new(),
            fences: ObjectPool::new(),
        }
    }

    pub fn with_limits(limits: Limits) -> Self {
        HeadlessDevice {
            limits,
            ..HeadlessDevice::new()
        }
    }

    /// Every call recorded since the last `take_calls`.
    #[inline]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        ::std::mem::replace(&mut self.calls, Vec::new())
    }

    /// Decides what the next polls of `fence` report.
    pub fn signal_fence(&mut self, fence: FenceHandle, status: FenceStatus) {
        if let Some(v) = self.fences.get_mut(fence) {
            *v = status;
        }
    }

    fn alloc(&mut self) -> GLuint {
        self.next_id += 1;
        self.next_id
    }

    #[inline]
    fn record(&mut self, call: Call) {
        self.calls.push(call);
    }
}

impl Device for HeadlessDevice {
    fn limits(&self) -> Limits {
        self.limits
    }

    fn create_program(&mut self, _: &ProgramParams) -> Result<GLuint> {
        let id = self.alloc();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn delete_program(&mut self, id: GLuint) {
        self.uniforms.retain(|&(program, _), _| program != id);
        self.record(Call::DeleteProgram(id));
    }

    fn uniform_location(&mut self, program: GLuint, name: &str) -> GLint {
        let next = self.uniforms.len() as GLint;
        *self
            .uniforms
            .entry((program, name.to_owned()))
            .or_insert(next)
    }

    fn create_buffer(
        &mut self,
        target: GLenum,
        _: GLenum,
        size: usize,
        _: Option<&[u8]>,
    ) -> Result<GLuint> {
        let id = self.alloc();
        self.record(Call::CreateBuffer(id, target, size));
        Ok(id)
    }

    fn delete_buffer(&mut self, id: GLuint) {
        self.record(Call::DeleteBuffer(id));
    }

    fn create_texture(&mut self, params: &TextureParams, _: Option<&[u8]>) -> Result<GLuint> {
        let id = self.alloc();
        self.record(Call::CreateTexture(id, *params));
        Ok(id)
    }

    fn delete_texture(&mut self, id: GLuint) {
        self.record(Call::DeleteTexture(id));
    }

    fn create_sampler(&mut self, _: &SamplerParams) -> Result<GLuint> {
        let id = self.alloc();
        self.record(Call::CreateSampler(id));
        Ok(id)
    }

    fn delete_sampler(&mut self, id: GLuint) {
        self.record(Call::DeleteSampler(id));
    }

    fn create_framebuffer(&mut self, _: &str, attachments: &FramebufferAttachments) -> Result<GLuint> {
        let id = self.alloc();
        self.record(Call::CreateFramebuffer(id, *attachments));
        Ok(id)
    }

    fn delete_framebuffer(&mut self, id: GLuint) {
        self.record(Call::DeleteFramebuffer(id));
    }

    fn create_vertex_array(
        &mut self,
        attributes: &[VertexAttributeBinding],
        index_buffer: Option<GLuint>,
    ) -> Result<GLuint> {
        let id = self.alloc();
        self.record(Call::CreateVertexArray(id, attributes.to_vec(), index_buffer));
        Ok(id)
    }

    fn delete_vertex_array(&mut self, id: GLuint) {
        self.record(Call::DeleteVertexArray(id));
    }

    fn enable(&mut self, cap: GLenum) {
        self.record(Call::Enable(cap));
    }

    fn disable(&mut self, cap: GLenum) {
        self.record(Call::Disable(cap));
    }

    fn cull_face(&mut self, face: GLenum) {
        self.record(Call::CullFace(face));
    }

    fn front_face(&mut self, mode: GLenum) {
        self.record(Call::FrontFace(mode));
    }

    fn depth_mask(&mut self, enabled: bool) {
        self.record(Call::DepthMask(enabled));
    }

    fn depth_func(&mut self, func: GLenum) {
        self.record(Call::DepthFunc(func));
    }

    fn stencil_op_separate(&mut self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        self.record(Call::StencilOpSeparate(face, sfail, dpfail, dppass));
    }

    fn stencil_func_separate(&mut self, face: GLenum, func: GLenum, reference: GLint, mask: GLuint) {
        self.record(Call::StencilFuncSeparate(face, func, reference, mask));
    }

    fn stencil_mask_separate(&mut self, face: GLenum, mask: GLuint) {
        self.record(Call::StencilMaskSeparate(face, mask));
    }

    fn color_mask(&mut self, mask: [bool; 4]) {
        self.record(Call::ColorMask(mask));
    }

    fn blend_color(&mut self, color: [f32; 4]) {
        self.record(Call::BlendColor(color));
    }

    fn blend_equation_separate(&mut self, mode_rgb: GLenum, mode_alpha: GLenum) {
        self.record(Call::BlendEquationSeparate(mode_rgb, mode_alpha));
    }

    fn blend_func_separate(
        &mut self,
        src_rgb: GLenum,
        dst_rgb: GLenum,
        src_alpha: GLenum,
        dst_alpha: GLenum,
    ) {
        self.record(Call::BlendFuncSeparate(src_rgb, dst_rgb, src_alpha, dst_alpha));
    }

    fn polygon_offset(&mut self, factor: f32, units: f32) {
        self.record(Call::PolygonOffset(factor, units));
    }

    fn use_program(&mut self, id: GLuint) {
        self.record(Call::UseProgram(id));
    }

    fn bind_vertex_array(&mut self, id: GLuint) {
        self.record(Call::BindVertexArray(id));
    }

    fn bind_framebuffer(&mut self, id: GLuint) {
        self.record(Call::BindFramebuffer(id));
    }

    fn viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&mut self, draw_buffer: GLint, value: [f32; 4]) {
        self.record(Call::ClearColor(draw_buffer, value));
    }

    fn clear_depth(&mut self, value: f32) {
        self.record(Call::ClearDepth(value));
    }

    fn clear_stencil(&mut self, value: GLint) {
        self.record(Call::ClearStencil(value));
    }

    fn clear_depth_stencil(&mut self, depth: f32, stencil: GLint) {
        self.record(Call::ClearDepthStencil(depth, stencil));
    }

    fn invalidate_framebuffer(&mut self, default: bool, attachments: &[Attachment]) {
        self.record(Call::InvalidateFramebuffer(default, attachments.to_vec()));
    }

    fn uniform1f(&mut self, location: GLint, value: f32) {
        self.record(Call::Uniform1f(location, value));
    }

    fn uniform1i(&mut self, location: GLint, value: GLint) {
        self.record(Call::Uniform1i(location, value));
    }

    fn uniform3f(&mut self, location: GLint, values: [f32; 3]) {
        self.record(Call::Uniform3f(location, values));
    }

    fn uniform4f(&mut self, location: GLint, values: [f32; 4]) {
        self.record(Call::Uniform4f(location, values));
    }

    fn uniform_matrix4f(&mut self, location: GLint, values: &[f32; 16]) {
        self.record(Call::UniformMatrix4f(location, *values));
    }

    fn bind_buffer_base(&mut self, target: GLenum, index: GLuint, buffer: GLuint) {
        self.record(Call::BindBufferBase(target, index, buffer));
    }

    fn bind_buffer_range(
        &mut self,
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
        offset: usize,
        size: usize,
    ) {
        self.record(Call::BindBufferRange(target, index, buffer, offset, size));
    }

    fn bind_texture_unit(&mut self, unit: GLuint, target: GLenum, texture: GLuint) {
        self.record(Call::BindTextureUnit(unit, target, texture));
    }

    fn bind_sampler(&mut self, unit: GLuint, sampler: GLuint) {
        self.record(Call::BindSampler(unit, sampler));
    }

    fn draw_arrays_instanced(&mut self, mode: GLenum, first: GLint, count: GLsizei, instances: GLsizei) {
        self.record(Call::DrawArraysInstanced(mode, first, count, instances));
    }

    fn draw_elements_instanced(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        index_type: GLenum,
        offset: usize,
        instances: GLsizei,
    ) {
        self.record(Call::DrawElementsInstanced(mode, count, index_type, offset, instances));
    }

    fn read_pixels_to_buffer(
        &mut self,
        buffer: GLuint,
        offset: usize,
        area: [GLint; 4],
        format: GLenum,
        xtype: GLenum,
    ) {
        self.record(Call::ReadPixelsToBuffer(buffer, offset, area, format, xtype));
    }

    fn copy_texture_sub_image(
        &mut self,
        target: GLenum,
        texture: GLuint,
        level: GLint,
        texture_offset: [GLint; 2],
        area: [GLint; 4],
    ) {
        self.record(Call::CopyTextureSubImage(target, texture, level, texture_offset, area));
    }

    fn generate_mipmap(&mut self, target: GLenum, texture: GLuint) {
        self.record(Call::GenerateMipmap(target, texture));
    }

    fn buffer_sub_data(&mut self, target: GLenum, buffer: GLuint, offset: usize, data: &[u8]) {
        self.record(Call::BufferSubData(target, buffer, offset, data.to_vec()));
    }

    fn fence_sync(&mut self) -> FenceHandle {
        let fence = self.fences.create(FenceStatus::NotReady);
        self.record(Call::FenceSync(fence));
        fence
    }

    fn fence_status(&mut self, fence: FenceHandle) -> Result<FenceStatus> {
        self.fences
            .get(fence)
            .cloned()
            .ok_or_else(|| format_err!("{} is invalid.", fence))
    }

    fn delete_fence(&mut self, fence: FenceHandle) -> Result<()> {
        self.fences
            .free(fence)
            .map(|_| ())
            .ok_or_else(|| format_err!("{} is invalid.", fence))?;

        self.record(Call::DeleteFence(fence));
        Ok(())
    }
}
