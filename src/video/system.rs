use gl;
use gl::types::*;

use super::assets::prelude::*;
use super::backends::gl::types;
use super::backends::{Device, FramebufferAttachments, Limits, VertexAttributeBinding};
use super::command::CommandBuffer;
use super::errors::*;
use super::fence::{FenceHandle, FenceStatus};
use super::pipeline::{Pipeline, VertexArrayBinding};
use super::renderer::Renderer;
use super::resources::*;
use super::settings::VideoParams;

/// The centralized management of video sub-system.
///
/// It owns the device, every native object created through it, and the
/// renderer that replays submitted command buffers. Everything here must be
/// used from the thread the device belongs to; command buffers themselves
/// can be recorded anywhere.
pub struct VideoSystem<D: Device> {
    device: D,
    params: VideoParams,
    resources: Resources,
    renderer: Renderer,
}

impl<D: Device> VideoSystem<D> {
    pub fn new(device: D, params: VideoParams) -> Self {
        let resources = Resources::new(&params.default_framebuffer_label);
        let renderer = Renderer::new(resources.default_framebuffer());

        info!(
            "VideoSystem created with command buffer capacity {} bytes.",
            params.command_buffer_capacity()
        );

        VideoSystem {
            device,
            params,
            resources,
            renderer,
        }
    }

    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[inline]
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    #[inline]
    pub fn params(&self) -> &VideoParams {
        &self.params
    }

    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    #[inline]
    pub fn limits(&self) -> Limits {
        self.device.limits()
    }

    /// The framebuffer presented on screen. It has a single draw buffer.
    #[inline]
    pub fn default_framebuffer(&self) -> FramebufferHandle {
        self.resources.default_framebuffer()
    }

    /// Creates an empty command buffer sized with the configured hint.
    pub fn create_command_buffer(&self) -> CommandBuffer {
        CommandBuffer::new(self.params.command_buffer_capacity())
    }

    /// Replays every command of `buf`, then resets it for reuse.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is still inside of a render pass.
    pub fn submit(&mut self, buf: &mut CommandBuffer) {
        assert!(
            !buf.is_render_pass(),
            "Command buffer submitted before its render pass was ended."
        );

        self.renderer
            .execute(&mut self.device, &self.resources, buf);
        buf.reset();
    }

    /// Drops all assumptions about the native state, e.g. after someone else
    /// has been issuing GL calls on the same context.
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }
}

impl<D: Device> VideoSystem<D> {
    /// Creates a program from a vertex and fragment shader. Compile and link
    /// errors are logged, and leave a program that renders nothing.
    pub fn create_program(&mut self, params: &ProgramParams) -> Result<ProgramHandle> {
        let id = self.device.create_program(params)?;
        Ok(self.resources.programs.create(ProgramObject {
            id,
            label: params.label.clone(),
        }))
    }

    /// Looks up a uniform of `program`. Returns `None` for unknown programs and
    /// for uniforms the linker dropped.
    pub fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let id = self.resources.programs.get(program)?.id;
        let location = UniformLocation(self.device.uniform_location(id, name));
        if location.is_active() {
            Some(location)
        } else {
            None
        }
    }

    pub fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        let v = self
            .resources
            .programs
            .free(handle)
            .ok_or_else(|| Error::ProgramHandleInvalid(handle))?;

        self.device.delete_program(v.id);
        Ok(())
    }
}

impl<D: Device> VideoSystem<D> {
    /// Creates a buffer of `params.size` bytes, optionally filled with `data`.
    pub fn create_buffer(&mut self, params: &BufferParams, data: Option<&[u8]>) -> Result<BufferHandle> {
        if let Some(bytes) = data {
            if bytes.len() > params.size {
                return Err(Error::BufferDataOutOfBounds(bytes.len(), params.size));
            }
        }

        let target = GLenum::from(params.kind);
        let usage = types::buffer_usage(params.kind, params.dynamic);
        let id = self.device.create_buffer(target, usage, params.size, data)?;

        Ok(self.resources.buffers.create(BufferObject {
            id,
            target,
            size: params.size,
        }))
    }

    pub fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        let v = self
            .resources
            .buffers
            .free(handle)
            .ok_or_else(|| Error::BufferHandleInvalid(handle))?;

        self.device.delete_buffer(v.id);
        Ok(())
    }
}

impl<D: Device> VideoSystem<D> {
    /// Creates a 2D texture. `data` holds the top level image of a color
    /// texture, and the rest of the mipmap chain is generated from it.
    pub fn create_texture(&mut self, params: &TextureParams, data: Option<&[u8]>) -> Result<TextureHandle> {
        let max = self.device.limits().max_texture_size;
        if params.width == 0 || params.height == 0 || params.width > max || params.height > max {
            return Err(Error::Backend(format!(
                "Texture dimensions {}x{} are out of range (1..={}).",
                params.width, params.height, max
            )));
        }

        if let Some(bytes) = data {
            let expected = params.image_size().unwrap_or(0);
            if bytes.len() != expected {
                return Err(Error::TextureDataMismatch(bytes.len(), expected));
            }
        }

        let id = self.device.create_texture(params, data)?;
        Ok(self.resources.textures.create(TextureObject {
            id,
            target: gl::TEXTURE_2D,
            params: *params,
        }))
    }

    #[inline]
    pub fn texture(&self, handle: TextureHandle) -> Option<TextureParams> {
        self.resources.textures.get(handle).map(|v| v.params)
    }

    pub fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        let v = self
            .resources
            .textures
            .free(handle)
            .ok_or_else(|| Error::TextureHandleInvalid(handle))?;

        self.device.delete_texture(v.id);
        Ok(())
    }

    pub fn create_sampler(&mut self, params: &SamplerParams) -> Result<SamplerHandle> {
        let id = self.device.create_sampler(params)?;
        Ok(self.resources.samplers.create(SamplerObject { id }))
    }

    pub fn delete_sampler(&mut self, handle: SamplerHandle) -> Result<()> {
        let v = self
            .resources
            .samplers
            .free(handle)
            .ok_or_else(|| Error::SamplerHandleInvalid(handle))?;

        self.device.delete_sampler(v.id);
        Ok(())
    }
}

impl<D: Device> VideoSystem<D> {
    /// Creates an offscreen framebuffer. All the attachments must have the
    /// same dimensions, and each must be of a kind fitting its slot.
    pub fn create_framebuffer(&mut self, params: &FramebufferParams) -> Result<FramebufferHandle> {
        let count = params.colors.iter().filter(|v| v.is_some()).count();
        if count > self.device.limits().max_color_attachments as usize {
            return Err(Error::TooManyColorAttachments(count));
        }

        let mut attachments = FramebufferAttachments::default();
        let mut dimensions = None;

        for (i, v) in params.colors.iter().enumerate() {
            if let Some(handle) = *v {
                let texture = self.attachment(handle, &mut dimensions)?;
                if !texture.params.kind.is_color() {
                    return Err(Error::IncompatibleAttachment(format!(
                        "{} bound to color slot {} is not a color texture",
                        handle, i
                    )));
                }

                attachments.colors[i] = Some(texture.id);
            }
        }

        if let Some(handle) = params.depth {
            let texture = self.attachment(handle, &mut dimensions)?;
            match texture.params.kind {
                TextureKind::Depth2D { .. } => attachments.depth = Some(texture.id),
                _ => {
                    return Err(Error::IncompatibleAttachment(format!(
                        "{} is not a depth texture",
                        handle
                    )));
                }
            }
        }

        if let Some(handle) = params.stencil {
            let texture = self.attachment(handle, &mut dimensions)?;
            match texture.params.kind {
                TextureKind::Stencil2D => attachments.stencil = Some(texture.id),
                _ => {
                    return Err(Error::IncompatibleAttachment(format!(
                        "{} is not a stencil texture",
                        handle
                    )));
                }
            }
        }

        if let Some(handle) = params.depth_stencil {
            let texture = self.attachment(handle, &mut dimensions)?;
            match texture.params.kind {
                TextureKind::DepthStencil2D => attachments.depth_stencil = Some(texture.id),
                _ => {
                    return Err(Error::IncompatibleAttachment(format!(
                        "{} is not a depth-stencil texture",
                        handle
                    )));
                }
            }
        }

        let id = self.device.create_framebuffer(&params.label, &attachments)?;
        Ok(self.resources.framebuffers.create(FramebufferObject {
            id,
            label: params.label.clone(),
            active_draw_buffers: params.active_draw_buffers(),
        }))
    }

    /// Which of the draw buffers of `handle` are backed by an attachment.
    pub fn active_draw_buffers(&self, handle: FramebufferHandle) -> Option<[bool; MAX_COLOR_ATTACHMENTS]> {
        self.resources
            .framebuffers
            .get(handle)
            .map(|v| v.active_draw_buffers)
    }

    pub fn delete_framebuffer(&mut self, handle: FramebufferHandle) -> Result<()> {
        if handle == self.resources.default_framebuffer() {
            return Err(Error::DeleteDefaultFramebuffer);
        }

        let v = self
            .resources
            .framebuffers
            .free(handle)
            .ok_or_else(|| Error::FramebufferHandleInvalid(handle))?;

        self.device.delete_framebuffer(v.id);
        Ok(())
    }

    fn attachment(&self, handle: TextureHandle, dimensions: &mut Option<(u32, u32)>) -> Result<TextureObject> {
        let texture = *self
            .resources
            .textures
            .get(handle)
            .ok_or_else(|| Error::TextureHandleInvalid(handle))?;

        let size = (texture.params.width, texture.params.height);
        match *dimensions {
            Some(v) if v != size => Err(Error::IncompatibleAttachment(format!(
                "{} is {}x{} while the other attachments are {}x{}",
                handle, size.0, size.1, v.0, v.1
            ))),
            _ => {
                *dimensions = Some(size);
                Ok(texture)
            }
        }
    }
}

impl<D: Device> VideoSystem<D> {
    pub fn create_vertex_array(&mut self, params: &VertexArrayParams) -> Result<VertexArrayHandle> {
        let mut attributes = Vec::with_capacity(params.attributes.len());
        for v in &params.attributes {
            let binding = params
                .bindings
                .get(v.binding)
                .ok_or_else(|| Error::VertexAttributeUnbound(v.location))?;

            let buffer = self
                .resources
                .buffers
                .get(binding.buffer)
                .ok_or_else(|| Error::BufferHandleInvalid(binding.buffer))?;

            attributes.push(VertexAttributeBinding {
                buffer: buffer.id,
                location: v.location,
                format: v.format,
                stride: binding.stride,
                offset: v.offset,
            });
        }

        let index_buffer = match params.index_buffer {
            Some(handle) => Some(
                self.resources
                    .buffers
                    .get(handle)
                    .ok_or_else(|| Error::BufferHandleInvalid(handle))?
                    .id,
            ),
            None => None,
        };

        let id = self.device.create_vertex_array(&attributes, index_buffer)?;
        Ok(self
            .resources
            .vertex_arrays
            .create(VertexArrayObject::new(id, params.index_format)))
    }

    pub fn delete_vertex_array(&mut self, handle: VertexArrayHandle) -> Result<()> {
        let v = self
            .resources
            .vertex_arrays
            .free(handle)
            .ok_or_else(|| Error::VertexArrayHandleInvalid(handle))?;

        self.device.delete_vertex_array(v.id);
        Ok(())
    }
}

impl<D: Device> VideoSystem<D> {
    /// Resolves `info` into a `Pipeline` that can be bound by command buffers.
    pub fn create_pipeline(&mut self, info: &PipelineInfo) -> Result<PipelineHandle> {
        let program = self
            .resources
            .programs
            .get(info.program)
            .ok_or_else(|| Error::ProgramHandleInvalid(info.program))?
            .id;

        let vao = *self
            .resources
            .vertex_arrays
            .get(info.vertex_array)
            .ok_or_else(|| Error::VertexArrayHandleInvalid(info.vertex_array))?;

        let binding = VertexArrayBinding {
            vertex_array: vao.id,
            index_type: vao.index_type,
        };

        let pipeline = Pipeline::new(&info.state, program, binding);
        Ok(self.resources.pipelines.create(pipeline))
    }

    #[inline]
    pub fn pipeline(&self, handle: PipelineHandle) -> Option<&Pipeline> {
        self.resources.pipelines.get(handle)
    }

    /// Pipelines own no native object, so this only forgets the handle.
    pub fn delete_pipeline(&mut self, handle: PipelineHandle) -> Result<()> {
        self.resources
            .pipelines
            .free(handle)
            .map(|_| ())
            .ok_or_else(|| Error::PipelineHandleInvalid(handle))
    }
}

impl<D: Device> VideoSystem<D> {
    /// Inserts a fence behind everything submitted so far.
    pub fn track_submitted_work_done(&mut self) -> FenceHandle {
        self.device.fence_sync()
    }

    /// Polls `fence` without blocking.
    pub fn fence_status(&mut self, fence: FenceHandle) -> Result<FenceStatus> {
        Ok(self.device.fence_status(fence)?)
    }

    pub fn delete_fence(&mut self, fence: FenceHandle) -> Result<()> {
        Ok(self.device.delete_fence(fence)?)
    }
}

impl<D: Device> Drop for VideoSystem<D> {
    fn drop(&mut self) {
        let res = &mut self.resources;
        let device = &mut self.device;

        for v in res.vertex_arrays.drain() {
            device.delete_vertex_array(v.id);
        }

        for v in res.framebuffers.drain() {
            if !v.is_default() {
                device.delete_framebuffer(v.id);
            }
        }

        for v in res.samplers.drain() {
            device.delete_sampler(v.id);
        }

        for v in res.textures.drain() {
            device.delete_texture(v.id);
        }

        for v in res.buffers.drain() {
            device.delete_buffer(v.id);
        }

        for v in res.programs.drain() {
            device.delete_program(v.id);
        }
    }
}
