use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

use gl;
use gl::types::*;

use super::super::super::assets::prelude::*;
use super::super::super::fence::{FenceHandle, FenceStatus};
use super::super::super::settings::VideoParams;
use super::super::{Attachment, Device, FramebufferAttachments, Limits, VertexAttributeBinding};
use super::types;
use crate::errors::*;
use crate::utils::prelude::*;

// EXT_texture_filter_anisotropic, core since 4.6.
const TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FE;
const MAX_TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FF;

/// A `Device` issuing calls into the current OpenGL context.
pub struct GLDevice {
    params: VideoParams,
    limits: Limits,
    max_anisotropy: f32,
    fences: ObjectPool<FenceHandle, GLsync>,
}

impl GLDevice {
    /// Creates a device on top of the GL context current on this thread.
    ///
    /// # Safety
    ///
    /// The GL function pointers must have been loaded with `gl::load_with`, and the
    /// context must stay current on the calling thread for the whole lifetime of
    /// the device.
    pub unsafe fn new(params: VideoParams) -> Result<Self> {
        let version = get_string(gl::VERSION)?;
        let renderer = get_string(gl::RENDERER)?;
        info!("GLDevice {} on {}.", version, renderer);

        let limits = Limits {
            uniform_buffer_offset_alignment: get_integer(gl::UNIFORM_BUFFER_OFFSET_ALIGNMENT)
                as u32,
            max_color_attachments: get_integer(gl::MAX_COLOR_ATTACHMENTS) as u32,
            max_texture_size: get_integer(gl::MAX_TEXTURE_SIZE) as u32,
            max_texture_units: get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS) as u32,
            max_vertex_attributes: get_integer(gl::MAX_VERTEX_ATTRIBS) as u32,
        };

        info!("GLDevice {:#?}", limits);
        if (limits.max_color_attachments as usize) < MAX_COLOR_ATTACHMENTS {
            bail!(
                "The OpenGL implementation supports only {} color attachments.",
                limits.max_color_attachments
            );
        }

        let mut max_anisotropy = 1.0;
        gl::GetFloatv(MAX_TEXTURE_MAX_ANISOTROPY, &mut max_anisotropy);
        // Without the extension the query is an INVALID_ENUM error.
        if gl::GetError() != gl::NO_ERROR {
            max_anisotropy = 1.0;
        }

        check()?;
        Ok(GLDevice {
            params,
            limits,
            max_anisotropy,
            fences: ObjectPool::new(),
        })
    }

    fn check(&self, what: &str) {
        if self.params.check_errors {
            if let Err(err) = unsafe { check() } {
                error!("{} failed: {}", what, err);
            }
        }
    }
}

impl Drop for GLDevice {
    fn drop(&mut self) {
        for sync in self.fences.drain() {
            unsafe { gl::DeleteSync(sync) };
        }
    }
}

impl Device for GLDevice {
    fn limits(&self) -> Limits {
        self.limits
    }

    fn create_program(&mut self, params: &ProgramParams) -> Result<GLuint> {
        unsafe {
            let vs = compile(gl::VERTEX_SHADER, &params.vertex)?;
            let fs = compile(gl::FRAGMENT_SHADER, &params.fragment)?;

            let id = gl::CreateProgram();
            gl::AttachShader(id, vs);
            gl::AttachShader(id, fs);

            if let Err(err) = link(id) {
                error!("Program ({}) link error: {}", params.label, err);
            }

            gl::DetachShader(id, vs);
            gl::DeleteShader(vs);
            gl::DetachShader(id, fs);
            gl::DeleteShader(fs);

            if !params.texture_bindings.is_empty() {
                gl::UseProgram(id);
                for (name, unit) in &params.texture_bindings {
                    let location = self.uniform_location(id, name);
                    if location != -1 {
                        gl::Uniform1i(location, *unit as GLint);
                    }
                }
                gl::UseProgram(0);
            }

            for (name, index) in &params.uniform_bindings {
                let c_name = CString::new(name.as_bytes())?;
                let block = gl::GetUniformBlockIndex(id, c_name.as_ptr());
                if block != gl::INVALID_INDEX {
                    gl::UniformBlockBinding(id, block, *index);
                }
            }

            self.check("CreateProgram");
            Ok(id)
        }
    }

    fn delete_program(&mut self, id: GLuint) {
        unsafe { gl::DeleteProgram(id) };
    }

    fn uniform_location(&mut self, program: GLuint, name: &str) -> GLint {
        match CString::new(name.as_bytes()) {
            Ok(c_name) => unsafe { gl::GetUniformLocation(program, c_name.as_ptr()) },
            Err(_) => -1,
        }
    }

    fn create_buffer(
        &mut self,
        _target: GLenum,
        usage: GLenum,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<GLuint> {
        unsafe {
            let mut id = 0;
            gl::GenBuffers(1, &mut id);
            if id == 0 {
                bail!("Failed to generate buffer object.");
            }

            // The element array binding is part of the bound vertex array, so
            // uploads go through the copy target whatever `target` is.
            let ptr = data.map_or(ptr::null(), |v| v.as_ptr() as *const c_void);
            gl::BindBuffer(gl::COPY_WRITE_BUFFER, id);
            gl::BufferData(gl::COPY_WRITE_BUFFER, size as GLsizeiptr, ptr, usage);
            gl::BindBuffer(gl::COPY_WRITE_BUFFER, 0);

            self.check("CreateBuffer");
            Ok(id)
        }
    }

    fn delete_buffer(&mut self, id: GLuint) {
        unsafe { gl::DeleteBuffers(1, &id) };
    }

    fn create_texture(&mut self, params: &TextureParams, data: Option<&[u8]>) -> Result<GLuint> {
        unsafe {
            let mut id = 0;
            gl::GenTextures(1, &mut id);
            if id == 0 {
                bail!("Failed to generate texture object.");
            }

            gl::BindTexture(gl::TEXTURE_2D, id);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as GLint);

            if let TextureKind::Depth2D { comparable: true } = params.kind {
                gl::TexParameteri(
                    gl::TEXTURE_2D,
                    gl::TEXTURE_COMPARE_MODE,
                    gl::COMPARE_REF_TO_TEXTURE as GLint,
                );
            }

            let (internal_format, format, xtype) = types::texture_format(params.kind);
            gl::TexStorage2D(
                gl::TEXTURE_2D,
                params.levels() as GLsizei,
                internal_format,
                params.width as GLsizei,
                params.height as GLsizei,
            );

            if let Some(bytes) = data {
                gl::TexSubImage2D(
                    gl::TEXTURE_2D,
                    0,
                    0,
                    0,
                    params.width as GLsizei,
                    params.height as GLsizei,
                    format,
                    xtype,
                    bytes.as_ptr() as *const c_void,
                );

                if params.levels() > 1 {
                    gl::GenerateMipmap(gl::TEXTURE_2D);
                }
            }

            gl::BindTexture(gl::TEXTURE_2D, 0);
            self.check("CreateTexture");
            Ok(id)
        }
    }

    fn delete_texture(&mut self, id: GLuint) {
        unsafe { gl::DeleteTextures(1, &id) };
    }

    fn create_sampler(&mut self, params: &SamplerParams) -> Result<GLuint> {
        unsafe {
            let mut id = 0;
            gl::GenSamplers(1, &mut id);
            if id == 0 {
                bail!("Failed to generate sampler object.");
            }

            let wrap = GLenum::from(params.wrap) as GLint;
            gl::SamplerParameteri(id, gl::TEXTURE_WRAP_S, wrap);
            gl::SamplerParameteri(id, gl::TEXTURE_WRAP_T, wrap);
            gl::SamplerParameteri(id, gl::TEXTURE_WRAP_R, wrap);

            let (min, mag) = types::filter(params.filter, params.mipmapping);
            gl::SamplerParameteri(id, gl::TEXTURE_MIN_FILTER, min as GLint);
            gl::SamplerParameteri(id, gl::TEXTURE_MAG_FILTER, mag as GLint);

            if params.filter == Filter::Anisotropic && self.max_anisotropy > 1.0 {
                gl::SamplerParameterf(id, TEXTURE_MAX_ANISOTROPY, self.max_anisotropy);
            }

            if let Some(cmp) = params.comparison {
                gl::SamplerParameteri(
                    id,
                    gl::TEXTURE_COMPARE_MODE,
                    gl::COMPARE_REF_TO_TEXTURE as GLint,
                );
                gl::SamplerParameteri(id, gl::TEXTURE_COMPARE_FUNC, GLenum::from(cmp) as GLint);
            }

            self.check("CreateSampler");
            Ok(id)
        }
    }

    fn delete_sampler(&mut self, id: GLuint) {
        unsafe { gl::DeleteSamplers(1, &id) };
    }

    fn create_framebuffer(&mut self, label: &str, attachments: &FramebufferAttachments) -> Result<GLuint> {
        unsafe {
            let mut id = 0;
            gl::GenFramebuffers(1, &mut id);
            if id == 0 {
                bail!("Failed to generate framebuffer object.");
            }

            gl::BindFramebuffer(gl::FRAMEBUFFER, id);

            let mut draw_buffers = Vec::with_capacity(MAX_COLOR_ATTACHMENTS);
            for (i, v) in attachments.colors.iter().enumerate() {
                if let Some(texture) = *v {
                    let attachment = gl::COLOR_ATTACHMENT0 + i as GLenum;
                    gl::FramebufferTexture2D(gl::FRAMEBUFFER, attachment, gl::TEXTURE_2D, texture, 0);
                    draw_buffers.push(attachment);
                }
            }

            if let Some(texture) = attachments.depth_stencil {
                gl::FramebufferTexture2D(
                    gl::FRAMEBUFFER,
                    gl::DEPTH_STENCIL_ATTACHMENT,
                    gl::TEXTURE_2D,
                    texture,
                    0,
                );
            } else {
                if let Some(texture) = attachments.depth {
                    gl::FramebufferTexture2D(
                        gl::FRAMEBUFFER,
                        gl::DEPTH_ATTACHMENT,
                        gl::TEXTURE_2D,
                        texture,
                        0,
                    );
                }

                if let Some(texture) = attachments.stencil {
                    gl::FramebufferTexture2D(
                        gl::FRAMEBUFFER,
                        gl::STENCIL_ATTACHMENT,
                        gl::TEXTURE_2D,
                        texture,
                        0,
                    );
                }
            }

            if draw_buffers.is_empty() {
                gl::DrawBuffers(0, ptr::null());
            } else {
                gl::DrawBuffers(draw_buffers.len() as GLsizei, draw_buffers.as_ptr());
            }

            let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
            if status != gl::FRAMEBUFFER_COMPLETE {
                error!(
                    "Framebuffer ({}) is incomplete: {}",
                    label,
                    framebuffer_status(status)
                );
            }

            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
            self.check("CreateFramebuffer");
            Ok(id)
        }
    }

    fn delete_framebuffer(&mut self, id: GLuint) {
        unsafe { gl::DeleteFramebuffers(1, &id) };
    }

    fn create_vertex_array(
        &mut self,
        attributes: &[VertexAttributeBinding],
        index_buffer: Option<GLuint>,
    ) -> Result<GLuint> {
        unsafe {
            let mut id = 0;
            gl::GenVertexArrays(1, &mut id);
            if id == 0 {
                bail!("Failed to generate vertex array object.");
            }

            gl::BindVertexArray(id);
            for v in attributes {
                let (size, xtype, normalized, integer) = types::vertex_attribute(v.format);
                let offset = v.offset as usize as *const c_void;

                gl::BindBuffer(gl::ARRAY_BUFFER, v.buffer);
                gl::EnableVertexAttribArray(v.location);
                if integer {
                    gl::VertexAttribIPointer(v.location, size, xtype, v.stride as GLsizei, offset);
                } else {
                    gl::VertexAttribPointer(
                        v.location,
                        size,
                        xtype,
                        boolean(normalized),
                        v.stride as GLsizei,
                        offset,
                    );
                }
            }

            if let Some(ibo) = index_buffer {
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            self.check("CreateVertexArray");
            Ok(id)
        }
    }

    fn delete_vertex_array(&mut self, id: GLuint) {
        unsafe { gl::DeleteVertexArrays(1, &id) };
    }

    fn enable(&mut self, cap: GLenum) {
        unsafe { gl::Enable(cap) };
    }

    fn disable(&mut self, cap: GLenum) {
        unsafe { gl::Disable(cap) };
    }

    fn cull_face(&mut self, face: GLenum) {
        unsafe { gl::CullFace(face) };
    }

    fn front_face(&mut self, mode: GLenum) {
        unsafe { gl::FrontFace(mode) };
    }

    fn depth_mask(&mut self, enabled: bool) {
        unsafe { gl::DepthMask(boolean(enabled)) };
    }

    fn depth_func(&mut self, func: GLenum) {
        unsafe { gl::DepthFunc(func) };
    }

    fn stencil_op_separate(&mut self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        unsafe { gl::StencilOpSeparate(face, sfail, dpfail, dppass) };
    }

    fn stencil_func_separate(&mut self, face: GLenum, func: GLenum, reference: GLint, mask: GLuint) {
        unsafe { gl::StencilFuncSeparate(face, func, reference, mask) };
    }

    fn stencil_mask_separate(&mut self, face: GLenum, mask: GLuint) {
        unsafe { gl::StencilMaskSeparate(face, mask) };
    }

    fn color_mask(&mut self, mask: [bool; 4]) {
        unsafe {
            gl::ColorMask(
                boolean(mask[0]),
                boolean(mask[1]),
                boolean(mask[2]),
                boolean(mask[3]),
            )
        };
    }

    fn blend_color(&mut self, color: [f32; 4]) {
        unsafe { gl::BlendColor(color[0], color[1], color[2], color[3]) };
    }

    fn blend_equation_separate(&mut self, mode_rgb: GLenum, mode_alpha: GLenum) {
        unsafe { gl::BlendEquationSeparate(mode_rgb, mode_alpha) };
    }

    fn blend_func_separate(
        &mut self,
        src_rgb: GLenum,
        dst_rgb: GLenum,
        src_alpha: GLenum,
        dst_alpha: GLenum,
    ) {
        unsafe { gl::BlendFuncSeparate(src_rgb, dst_rgb, src_alpha, dst_alpha) };
    }

    fn polygon_offset(&mut self, factor: f32, units: f32) {
        unsafe { gl::PolygonOffset(factor, units) };
    }

    fn use_program(&mut self, id: GLuint) {
        unsafe { gl::UseProgram(id) };
    }

    fn bind_vertex_array(&mut self, id: GLuint) {
        unsafe { gl::BindVertexArray(id) };
    }

    fn bind_framebuffer(&mut self, id: GLuint) {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, id) };
    }

    fn viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn clear_color(&mut self, draw_buffer: GLint, value: [f32; 4]) {
        unsafe { gl::ClearBufferfv(gl::COLOR, draw_buffer, value.as_ptr()) };
        self.check("ClearBufferfv");
    }

    fn clear_depth(&mut self, value: f32) {
        unsafe { gl::ClearBufferfv(gl::DEPTH, 0, &value) };
        self.check("ClearBufferfv");
    }

    fn clear_stencil(&mut self, value: GLint) {
        unsafe { gl::ClearBufferiv(gl::STENCIL, 0, &value) };
        self.check("ClearBufferiv");
    }

    fn clear_depth_stencil(&mut self, depth: f32, stencil: GLint) {
        unsafe { gl::ClearBufferfi(gl::DEPTH_STENCIL, 0, depth, stencil) };
        self.check("ClearBufferfi");
    }

    fn invalidate_framebuffer(&mut self, default: bool, attachments: &[Attachment]) {
        let tokens: Vec<GLenum> = attachments
            .iter()
            .map(|&v| match (default, v) {
                (true, Attachment::Color(_)) => gl::COLOR,
                (true, Attachment::Depth) => gl::DEPTH,
                (true, Attachment::Stencil) => gl::STENCIL,
                // The default framebuffer has no combined token.
                (true, Attachment::DepthStencil) => gl::DEPTH,
                (false, Attachment::Color(i)) => gl::COLOR_ATTACHMENT0 + i,
                (false, Attachment::Depth) => gl::DEPTH_ATTACHMENT,
                (false, Attachment::Stencil) => gl::STENCIL_ATTACHMENT,
                (false, Attachment::DepthStencil) => gl::DEPTH_STENCIL_ATTACHMENT,
            })
            .collect();

        if tokens.is_empty() {
            return;
        }

        unsafe {
            gl::InvalidateFramebuffer(gl::FRAMEBUFFER, tokens.len() as GLsizei, tokens.as_ptr())
        };
        self.check("InvalidateFramebuffer");
    }

    fn uniform1f(&mut self, location: GLint, value: f32) {
        unsafe { gl::Uniform1f(location, value) };
    }

    fn uniform1i(&mut self, location: GLint, value: GLint) {
        unsafe { gl::Uniform1i(location, value) };
    }

    fn uniform3f(&mut self, location: GLint, values: [f32; 3]) {
        unsafe { gl::Uniform3f(location, values[0], values[1], values[2]) };
    }

    fn uniform4f(&mut self, location: GLint, values: [f32; 4]) {
        unsafe { gl::Uniform4f(location, values[0], values[1], values[2], values[3]) };
    }

    fn uniform_matrix4f(&mut self, location: GLint, values: &[f32; 16]) {
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, values.as_ptr()) };
    }

    fn bind_buffer_base(&mut self, target: GLenum, index: GLuint, buffer: GLuint) {
        unsafe { gl::BindBufferBase(target, index, buffer) };
    }

    fn bind_buffer_range(
        &mut self,
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
        offset: usize,
        size: usize,
    ) {
        unsafe {
            gl::BindBufferRange(
                target,
                index,
                buffer,
                offset as GLintptr,
                size as GLsizeiptr,
            )
        };
        self.check("BindBufferRange");
    }

    fn bind_texture_unit(&mut self, unit: GLuint, target: GLenum, texture: GLuint) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(target, texture);
        }
    }

    fn bind_sampler(&mut self, unit: GLuint, sampler: GLuint) {
        unsafe { gl::BindSampler(unit, sampler) };
    }

    fn draw_arrays_instanced(&mut self, mode: GLenum, first: GLint, count: GLsizei, instances: GLsizei) {
        unsafe { gl::DrawArraysInstanced(mode, first, count, instances) };
        self.check("DrawArraysInstanced");
    }

    fn draw_elements_instanced(
        &mut self,
        mode: GLenum,
        count: GLsizei,
        index_type: GLenum,
        offset: usize,
        instances: GLsizei,
    ) {
        unsafe {
            gl::DrawElementsInstanced(mode, count, index_type, offset as *const c_void, instances)
        };
        self.check("DrawElementsInstanced");
    }

    fn read_pixels_to_buffer(
        &mut self,
        buffer: GLuint,
        offset: usize,
        area: [GLint; 4],
        format: GLenum,
        xtype: GLenum,
    ) {
        unsafe {
            gl::BindBuffer(gl::PIXEL_PACK_BUFFER, buffer);
            gl::ReadPixels(
                area[0],
                area[1],
                area[2],
                area[3],
                format,
                xtype,
                offset as *mut c_void,
            );
            gl::BindBuffer(gl::PIXEL_PACK_BUFFER, 0);
        }
        self.check("ReadPixels");
    }

    fn copy_texture_sub_image(
        &mut self,
        target: GLenum,
        texture: GLuint,
        level: GLint,
        texture_offset: [GLint; 2],
        area: [GLint; 4],
    ) {
        unsafe {
            gl::BindTexture(target, texture);
            gl::CopyTexSubImage2D(
                target,
                level,
                texture_offset[0],
                texture_offset[1],
                area[0],
                area[1],
                area[2],
                area[3],
            );
        }
        self.check("CopyTexSubImage2D");
    }

    fn generate_mipmap(&mut self, target: GLenum, texture: GLuint) {
        unsafe {
            gl::BindTexture(target, texture);
            gl::GenerateMipmap(target);
        }
    }

    fn buffer_sub_data(&mut self, target: GLenum, buffer: GLuint, offset: usize, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        unsafe {
            gl::BindBuffer(target, buffer);
            gl::BufferSubData(
                target,
                offset as GLintptr,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
            );
            gl::BindBuffer(target, 0);
        }
        self.check("BufferSubData");
    }

    fn fence_sync(&mut self) -> FenceHandle {
        let sync = unsafe { gl::FenceSync(gl::SYNC_GPU_COMMANDS_COMPLETE, 0) };
        self.fences.create(sync)
    }

    fn fence_status(&mut self, fence: FenceHandle) -> Result<FenceStatus> {
        let sync = *self
            .fences
            .get(fence)
            .ok_or_else(|| format_err!("{} is invalid.", fence))?;

        let mut status = 0;
        let mut count = 0;
        unsafe { gl::GetSynciv(sync, gl::SYNC_STATUS, 1, &mut count, &mut status) };

        Ok(match status as GLenum {
            gl::SIGNALED => FenceStatus::Success,
            gl::UNSIGNALED => FenceStatus::NotReady,
            _ => FenceStatus::DeviceLost,
        })
    }

    fn delete_fence(&mut self, fence: FenceHandle) -> Result<()> {
        let sync = self
            .fences
            .free(fence)
            .ok_or_else(|| format_err!("{} is invalid.", fence))?;

        unsafe { gl::DeleteSync(sync) };
        Ok(())
    }
}

#[inline]
fn boolean(v: bool) -> GLboolean {
    if v {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

unsafe fn get_integer(name: GLenum) -> GLint {
    let mut v = 0;
    gl::GetIntegerv(name, &mut v);
    v
}

unsafe fn get_string(name: GLenum) -> Result<String> {
    let v = gl::GetString(name);
    if v.is_null() {
        bail!("[GL] Failed to query string {:#x}.", name);
    }

    let v = ::std::ffi::CStr::from_ptr(v as *const _);
    Ok(v.to_string_lossy().into_owned())
}

unsafe fn compile(shader: GLenum, src: &str) -> Result<GLuint> {
    let c_str = CString::new(src.as_bytes())?;

    let id = gl::CreateShader(shader);
    gl::ShaderSource(id, 1, &c_str.as_ptr(), ptr::null());
    gl::CompileShader(id);

    let mut status = GLint::from(gl::FALSE);
    gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);

    if status != GLint::from(gl::TRUE) {
        let mut len = 0;
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        gl::GetShaderInfoLog(id, len, ptr::null_mut(), buf.as_mut_ptr() as *mut GLchar);
        error!(
            "Shader compile error: {}\n{}",
            String::from_utf8_lossy(&buf).trim_end_matches('\0'),
            src
        );
    }

    Ok(id)
}

unsafe fn link(program: GLuint) -> Result<()> {
    gl::LinkProgram(program);

    let mut status = GLint::from(gl::FALSE);
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

    if status != GLint::from(gl::TRUE) {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf.as_mut_ptr() as *mut GLchar);
        bail!("{}", String::from_utf8_lossy(&buf).trim_end_matches('\0'));
    }

    Ok(())
}

fn framebuffer_status(status: GLenum) -> &'static str {
    match status {
        gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => {
            "not all attachment points are framebuffer attachment complete"
        }
        gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => "no images are attached",
        gl::FRAMEBUFFER_UNSUPPORTED => {
            "the combination of internal formats of the attached images is unsupported"
        }
        _ => "unknown reason",
    }
}

unsafe fn check() -> Result<()> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),

        gl::INVALID_ENUM => {
            bail!("[GL] An unacceptable value is specified for an enumerated argument.")
        }

        gl::INVALID_VALUE => bail!("[GL] A numeric argument is out of range."),

        gl::INVALID_OPERATION => {
            bail!("[GL] The specified operation is not allowed in the current state.")
        }

        gl::INVALID_FRAMEBUFFER_OPERATION => bail!(
            "[GL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        ),

        gl::OUT_OF_MEMORY => bail!("[GL] There is not enough memory left to execute the command."),
        _ => bail!("[GL] Oops, Unknown OpenGL error."),
    }
}
