//! Replays command buffers against a `Device`.
//!
//! Fixed-function state is applied lazily. `BindPipeline` only records the
//! state a pipeline wants, and the difference to what the device currently
//! has is worked out right before the next draw or render pass. Binding the
//! same state twice therefore costs nothing on the native side.

pub mod state;

use gl;
use gl::types::*;
use smallvec::SmallVec;

use super::assets::prelude::*;
use super::backends::{Attachment, Device};
use super::command::*;
use super::pipeline::Pipeline;
use super::resources::Resources;

use self::state::State;

const CLIP_DISTANCES: [GLenum; 4] = [
    gl::CLIP_DISTANCE0,
    gl::CLIP_DISTANCE1,
    gl::CLIP_DISTANCE2,
    gl::CLIP_DISTANCE3,
];

/// The dispatcher of command buffers, and the owner of the state cache.
pub struct Renderer {
    framebuffer: FramebufferHandle,
    invalidate_attachments: SmallVec<[Attachment; MAX_COLOR_ATTACHMENTS + 2]>,
    invalidate_default: bool,
    polygon_offset: bool,
    render_pass: bool,
    // Set when the framebuffer of the active pass could not be resolved.
    skip_pass: bool,
    pipeline_bound: bool,
    program: GLuint,
    topology: GLenum,
    index_type: GLenum,

    dirty: bool,
    invalidated: bool,
    desired: State,
    actual: State,
}

impl Renderer {
    pub fn new(default_framebuffer: FramebufferHandle) -> Self {
        Renderer {
            framebuffer: default_framebuffer,
            invalidate_attachments: SmallVec::new(),
            invalidate_default: false,
            polygon_offset: false,
            render_pass: false,
            skip_pass: false,
            pipeline_bound: false,
            program: 0,
            topology: gl::TRIANGLES,
            index_type: gl::UNSIGNED_SHORT,
            dirty: true,
            invalidated: true,
            desired: State::default(),
            actual: State::default(),
        }
    }

    /// The framebuffer of the active render pass, or the default one between
    /// passes.
    #[inline]
    pub fn framebuffer(&self) -> FramebufferHandle {
        self.framebuffer
    }

    /// The state the next draw is going to be issued with.
    #[inline]
    pub fn desired_state(&self) -> &State {
        &self.desired
    }

    /// The state the device is believed to be in.
    #[inline]
    pub fn actual_state(&self) -> &State {
        &self.actual
    }

    /// Forgets everything known about the device. The next validation
    /// re-emits every aspect of the state.
    pub fn invalidate(&mut self) {
        self.program = 0;
        self.dirty = true;
        self.invalidated = true;
    }

    /// Decodes and dispatches every command left in `buf`, in order.
    ///
    /// # Panics
    ///
    /// Panics on a malformed stream, or when a draw is issued outside of a
    /// render pass or before any pipeline has ever been bound.
    pub fn execute<D: Device>(&mut self, device: &mut D, res: &Resources, buf: &mut CommandBuffer) {
        while buf.has_more_commands() {
            let header: Header = buf.pop_command();
            match header.kind {
                Kind::CopyFramebufferToBuffer => {
                    let cmd: CopyFramebufferToBuffer = buf.pop_command();
                    self.copy_framebuffer_to_buffer(device, res, &cmd);
                }
                Kind::CopyFramebufferToTexture => {
                    let cmd: CopyFramebufferToTexture = buf.pop_command();
                    self.copy_framebuffer_to_texture(device, res, &cmd);
                }
                Kind::BeginRenderPass => {
                    let cmd: BeginRenderPass = buf.pop_command();
                    self.begin_render_pass(device, res, &cmd);
                }
                Kind::EndRenderPass => {
                    let _: EndRenderPass = buf.pop_command();
                    self.end_render_pass(device, res);
                }
                Kind::SetViewport => {
                    let cmd: SetViewport = buf.pop_command();
                    if !self.skip_pass {
                        device.viewport(cmd.x, cmd.y, cmd.width, cmd.height);
                    }
                }
                Kind::BindPipeline => {
                    let cmd: BindPipeline = buf.pop_command();
                    self.bind_pipeline(device, &cmd.pipeline);
                }
                Kind::Uniform1f => {
                    let cmd: Uniform1f = buf.pop_command();
                    if !self.skip_pass {
                        device.uniform1f(cmd.location, cmd.value);
                    }
                }
                Kind::Uniform1i => {
                    let cmd: Uniform1i = buf.pop_command();
                    if !self.skip_pass {
                        device.uniform1i(cmd.location, cmd.value);
                    }
                }
                Kind::Uniform3f => {
                    let cmd: Uniform3f = buf.pop_command();
                    if !self.skip_pass {
                        device.uniform3f(cmd.location, cmd.values);
                    }
                }
                Kind::Uniform4f => {
                    let cmd: Uniform4f = buf.pop_command();
                    if !self.skip_pass {
                        device.uniform4f(cmd.location, cmd.values);
                    }
                }
                Kind::UniformMatrix4f => {
                    let cmd: UniformMatrix4f = buf.pop_command();
                    if !self.skip_pass {
                        device.uniform_matrix4f(cmd.location, &cmd.values);
                    }
                }
                Kind::UniformBufferUnit => {
                    let cmd: UniformBufferUnit = buf.pop_command();
                    if self.skip_pass {
                        continue;
                    }

                    match res.buffers.get(cmd.buffer) {
                        Some(v) => device.bind_buffer_base(gl::UNIFORM_BUFFER, cmd.index, v.id),
                        None => error!("{} is invalid, skipping uniform buffer unit.", cmd.buffer),
                    }
                }
                Kind::UniformBufferUnitRange => {
                    let cmd: UniformBufferUnitRange = buf.pop_command();
                    if self.skip_pass {
                        continue;
                    }

                    match res.buffers.get(cmd.buffer) {
                        Some(v) => device.bind_buffer_range(
                            gl::UNIFORM_BUFFER,
                            cmd.index,
                            v.id,
                            cmd.offset as usize,
                            cmd.size as usize,
                        ),
                        None => error!("{} is invalid, skipping uniform buffer unit.", cmd.buffer),
                    }
                }
                Kind::TextureUnit => {
                    let cmd: TextureUnit = buf.pop_command();
                    if self.skip_pass {
                        continue;
                    }

                    match res.textures.get(cmd.texture) {
                        Some(v) => device.bind_texture_unit(cmd.index, v.target, v.id),
                        None => error!("{} is invalid, skipping texture unit.", cmd.texture),
                    }
                }
                Kind::SamplerUnit => {
                    let cmd: SamplerUnit = buf.pop_command();
                    if self.skip_pass {
                        continue;
                    }

                    if cmd.sampler.is_nil() {
                        device.bind_sampler(cmd.index, 0);
                    } else {
                        match res.samplers.get(cmd.sampler) {
                            Some(v) => device.bind_sampler(cmd.index, v.id),
                            None => error!("{} is invalid, skipping sampler unit.", cmd.sampler),
                        }
                    }
                }
                Kind::Draw => {
                    let cmd: Draw = buf.pop_command();
                    if self.verify_draw() {
                        self.validate_state(device);
                        device.draw_arrays_instanced(
                            self.topology,
                            cmd.vertex_offset,
                            cmd.vertex_count,
                            cmd.instance_count,
                        );
                    }
                }
                Kind::DrawIndexed => {
                    let cmd: DrawIndexed = buf.pop_command();
                    if self.verify_draw() {
                        self.validate_state(device);
                        device.draw_elements_instanced(
                            self.topology,
                            cmd.index_count,
                            self.index_type,
                            cmd.index_byte_offset as usize,
                            cmd.instance_count,
                        );
                    }
                }
                Kind::UpdateBufferData => {
                    let cmd: UpdateBufferData = buf.pop_command();
                    let data = buf.pop_data(cmd.count as usize);
                    match res.buffers.get(cmd.buffer) {
                        Some(v) if cmd.offset as usize + data.len() <= v.size => {
                            // Uploads stay off the element array binding, which
                            // belongs to whichever vertex array is bound.
                            device.buffer_sub_data(
                                gl::COPY_WRITE_BUFFER,
                                v.id,
                                cmd.offset as usize,
                                data,
                            );
                        }
                        Some(v) => error!(
                            "Update of {} bytes at {} overflows {} of {} bytes.",
                            data.len(),
                            cmd.offset,
                            cmd.buffer,
                            v.size
                        ),
                        None => error!("{} is invalid, skipping buffer update.", cmd.buffer),
                    }
                }
            }
        }
    }

    /// Returns false if the draw belongs to a skipped render pass.
    fn verify_draw(&self) -> bool {
        assert!(self.render_pass, "Draw issued outside of a render pass.");
        assert!(self.pipeline_bound, "Draw issued without a bound pipeline.");
        !self.skip_pass
    }

    fn bind_pipeline<D: Device>(&mut self, device: &mut D, pipeline: &Pipeline) {
        // Counts as bound even inside a skipped pass, whose draws are dropped.
        self.pipeline_bound = true;
        if self.skip_pass {
            return;
        }

        if self.program != pipeline.program {
            self.program = pipeline.program;
            device.use_program(pipeline.program);
        }

        self.topology = pipeline.topology;

        let desired = &mut self.desired;
        desired.cull_test = pipeline.cull_test;
        if pipeline.cull_test {
            desired.cull_face = pipeline.cull_face;
        }

        desired.front_face = pipeline.front_face;
        desired.depth_test = pipeline.depth_test;
        desired.depth_mask = pipeline.depth_write;
        if pipeline.depth_test {
            desired.depth_comparison = pipeline.depth_comparison;
        }

        desired.stencil_test = pipeline.stencil_test;
        if pipeline.stencil_test {
            desired.stencil_op_front = pipeline.stencil_op_front;
            desired.stencil_op_back = pipeline.stencil_op_back;
            desired.stencil_func_front = pipeline.stencil_func_front;
            desired.stencil_func_back = pipeline.stencil_func_back;
            desired.stencil_mask_front = pipeline.stencil_mask_front.mask;
            desired.stencil_mask_back = pipeline.stencil_mask_back.mask;
        }

        desired.color_mask = pipeline.color_write;
        desired.blending = pipeline.blend_enabled;
        if pipeline.blend_enabled {
            desired.blend_color = pipeline.blend_color;
            desired.blend_equation = pipeline.blend_equation;
            desired.blend_func = pipeline.blend_func;
        }

        self.dirty = true;

        device.bind_vertex_array(pipeline.vertex_array.vertex_array);
        self.index_type = pipeline.vertex_array.index_type;
    }

    fn begin_render_pass<D: Device>(&mut self, device: &mut D, res: &Resources, cmd: &BeginRenderPass) {
        assert!(!self.render_pass, "Render pass begun inside of another one.");
        self.render_pass = true;
        self.invalidate_attachments.clear();

        let fb = match res.framebuffers.get(cmd.framebuffer) {
            Some(fb) => fb,
            None => {
                error!("{} is invalid, skipping render pass.", cmd.framebuffer);
                self.skip_pass = true;
                return;
            }
        };

        self.validate_state(device);

        device.enable(gl::PRIMITIVE_RESTART_FIXED_INDEX);
        for &v in &CLIP_DISTANCES {
            device.enable(v);
        }

        if cmd.depth_bias != 0.0 || cmd.depth_slope_bias != 0.0 {
            self.polygon_offset = true;
            device.enable(gl::POLYGON_OFFSET_FILL);
            device.polygon_offset(cmd.depth_slope_bias, cmd.depth_bias);
        }

        self.framebuffer = cmd.framebuffer;
        self.invalidate_default = fb.is_default();
        device.bind_framebuffer(fb.id);
        device.viewport(
            cmd.viewport_x,
            cmd.viewport_y,
            cmd.viewport_width,
            cmd.viewport_height,
        );

        self.clear_color_attachments(device, fb.active_draw_buffers, &cmd.colors);
        self.clear_depth_stencil(device, cmd);

        for (i, v) in cmd.colors.iter().enumerate() {
            if fb.active_draw_buffers[i] && v.store_op == StoreOperation::DontCare {
                self.invalidate_attachments.push(Attachment::Color(i as u32));
            }
        }

        let depth = cmd.depth_store_op == StoreOperation::DontCare;
        let stencil = cmd.stencil_store_op == StoreOperation::DontCare;

        if depth && stencil && !fb.is_default() {
            self.invalidate_attachments.push(Attachment::DepthStencil);
        } else {
            if depth {
                self.invalidate_attachments.push(Attachment::Depth);
            }

            if stencil {
                self.invalidate_attachments.push(Attachment::Stencil);
            }
        }
    }

    fn clear_color_attachments<D: Device>(
        &mut self,
        device: &mut D,
        active: [bool; MAX_COLOR_ATTACHMENTS],
        colors: &[ColorAttachment; MAX_COLOR_ATTACHMENTS],
    ) {
        let saved = self.actual.color_mask;
        let mut forced = false;

        for (i, v) in colors.iter().enumerate() {
            if active[i] && v.load_op == LoadOperation::Clear {
                if !forced {
                    self.desired.color_mask = [true; 4];
                    self.validate_color_mask(device, false);
                    forced = true;
                }

                device.clear_color(i as GLint, v.clear_value);
            }
        }

        if forced {
            self.desired.color_mask = saved;
            self.dirty = true;
        }
    }

    fn clear_depth_stencil<D: Device>(&mut self, device: &mut D, cmd: &BeginRenderPass) {
        let saved_depth_mask = self.actual.depth_mask;
        let saved_stencil_mask_front = self.actual.stencil_mask_front;
        let saved_stencil_mask_back = self.actual.stencil_mask_back;

        let depth = cmd.depth_load_op == LoadOperation::Clear;
        let stencil = cmd.stencil_load_op == LoadOperation::Clear;

        if depth {
            self.desired.depth_mask = true;
            self.validate_depth_mask(device, false);
        }

        if stencil {
            self.desired.stencil_mask_front = 0xFF;
            self.desired.stencil_mask_back = 0xFF;
            self.validate_stencil_mask(device, false);
        }

        match (depth, stencil) {
            (true, true) => device.clear_depth_stencil(cmd.depth_clear_value, cmd.stencil_clear_value),
            (true, false) => device.clear_depth(cmd.depth_clear_value),
            (false, true) => device.clear_stencil(cmd.stencil_clear_value),
            (false, false) => {}
        }

        self.desired.depth_mask = saved_depth_mask;
        self.desired.stencil_mask_front = saved_stencil_mask_front;
        self.desired.stencil_mask_back = saved_stencil_mask_back;
        self.dirty = true;
    }

    fn end_render_pass<D: Device>(&mut self, device: &mut D, res: &Resources) {
        assert!(self.render_pass, "Render pass ended without being begun.");
        self.render_pass = false;
        self.framebuffer = res.default_framebuffer();

        if self.skip_pass {
            self.skip_pass = false;
            return;
        }

        if !self.invalidate_attachments.is_empty() {
            device.invalidate_framebuffer(self.invalidate_default, &self.invalidate_attachments);
            self.invalidate_attachments.clear();
        }

        if self.polygon_offset {
            self.polygon_offset = false;
            device.disable(gl::POLYGON_OFFSET_FILL);
        }

        for &v in &CLIP_DISTANCES {
            device.disable(v);
        }

        device.disable(gl::PRIMITIVE_RESTART_FIXED_INDEX);
    }

    fn copy_framebuffer_to_buffer<D: Device>(
        &mut self,
        device: &mut D,
        res: &Resources,
        cmd: &CopyFramebufferToBuffer,
    ) {
        if self.skip_pass {
            return;
        }

        match res.buffers.get(cmd.buffer) {
            Some(v) => device.read_pixels_to_buffer(
                v.id,
                cmd.buffer_offset as usize,
                [cmd.x, cmd.y, cmd.width, cmd.height],
                cmd.format,
                cmd.xtype,
            ),
            None => error!("{} is invalid, skipping framebuffer copy.", cmd.buffer),
        }
    }

    fn copy_framebuffer_to_texture<D: Device>(
        &mut self,
        device: &mut D,
        res: &Resources,
        cmd: &CopyFramebufferToTexture,
    ) {
        if self.skip_pass {
            return;
        }

        match res.textures.get(cmd.texture) {
            Some(v) => {
                device.copy_texture_sub_image(
                    v.target,
                    v.id,
                    cmd.texture_level,
                    [cmd.texture_x, cmd.texture_y],
                    [cmd.framebuffer_x, cmd.framebuffer_y, cmd.width, cmd.height],
                );

                if cmd.generate_mipmaps {
                    device.generate_mipmap(v.target, v.id);
                }
            }
            None => error!("{} is invalid, skipping framebuffer copy.", cmd.texture),
        }
    }
}
