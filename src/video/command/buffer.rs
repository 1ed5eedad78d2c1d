use crate::video::assets::prelude::*;
use crate::video::backends::gl::types;
use crate::video::pipeline::Pipeline;

use super::codec::{Decoder, Encoder, Field};
use super::*;

/// The smallest capacity a `CommandBuffer` starts with.
pub const MIN_CAPACITY: usize = 1024;

/// A growable byte stream of encoded rendering commands.
///
/// Commands are appended at the write cursor by the encoding methods, and
/// consumed from the read cursor by the renderer with `pop_command` and
/// `pop_data`. It's guaranteed that commands are decoded in exactly the
/// order they were encoded.
///
/// The buffer is meant to be reused. `reset` rewinds both cursors but keeps
/// the allocation around for the next frame.
pub struct CommandBuffer {
    bytes: Vec<u8>,
    write: usize,
    read: usize,
    render_pass: bool,
}

impl Default for CommandBuffer {
    fn default() -> Self {
        CommandBuffer::new(MIN_CAPACITY)
    }
}

impl CommandBuffer {
    /// Creates an empty `CommandBuffer` able to hold `capacity` bytes before
    /// growing.
    pub fn new(capacity: usize) -> Self {
        CommandBuffer {
            bytes: vec![0; capacity.max(MIN_CAPACITY)],
            write: 0,
            read: 0,
            render_pass: false,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Number of encoded bytes not consumed yet.
    #[inline]
    pub fn len(&self) -> usize {
        self.write - self.read
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn has_more_commands(&self) -> bool {
        self.write > self.read
    }

    /// Returns true if a render pass has been begun but not ended yet.
    #[inline]
    pub fn is_render_pass(&self) -> bool {
        self.render_pass
    }

    /// Rewinds both cursors. The bytes themselves are left untouched.
    pub fn reset(&mut self) {
        self.write = 0;
        self.read = 0;
        self.render_pass = false;
    }

    /// Appends a typed value at the write cursor.
    pub fn push_command<T: Field>(&mut self, v: &T) {
        self.ensure(T::SIZE);

        let mut e = Encoder::new(&mut self.bytes[self.write..self.write + T::SIZE]);
        v.encode(&mut e);
        self.write += T::SIZE;
    }

    /// Appends raw bytes at the write cursor.
    pub fn push_data(&mut self, data: &[u8]) {
        self.ensure(data.len());
        self.bytes[self.write..self.write + data.len()].copy_from_slice(data);
        self.write += data.len();
    }

    /// Reads a typed value at the read cursor. The caller must know which
    /// type was pushed at this position.
    pub fn pop_command<T: Field>(&mut self) -> T {
        assert!(
            self.read + T::SIZE <= self.write,
            "Read past the end of the command buffer."
        );

        let mut d = Decoder::new(&self.bytes[self.read..self.read + T::SIZE]);
        let v = T::decode(&mut d);
        self.read += T::SIZE;
        v
    }

    /// Reads `count` raw bytes at the read cursor.
    pub fn pop_data(&mut self, count: usize) -> &[u8] {
        assert!(
            self.read + count <= self.write,
            "Read past the end of the command buffer."
        );

        let start = self.read;
        self.read += count;
        &self.bytes[start..self.read]
    }

    fn ensure(&mut self, size: usize) {
        let required = self.write + size;
        let current = self.bytes.len();
        if required > current {
            warn!(
                "Command buffer capacity reached! Will grow to accommodate {} bytes.",
                required
            );

            let mut len = current * 2;
            while len < required {
                len *= 2;
            }

            self.bytes.resize(len, 0);
        }
    }

    fn push<T: Command>(&mut self, command: &T) {
        self.push_command(&Header { kind: T::KIND });
        self.push_command(command);
    }

    #[inline]
    fn verify_is_render_pass(&self) {
        assert!(
            self.render_pass,
            "Needs to be called from inside a render pass."
        );
    }

    #[inline]
    fn verify_not_render_pass(&self) {
        assert!(
            !self.render_pass,
            "Can not be called from inside a render pass."
        );
    }
}

impl CommandBuffer {
    /// Reads back a region of the current framebuffer into a pixel transfer
    /// buffer.
    pub fn copy_framebuffer_to_buffer(&mut self, info: &CopyFramebufferToBufferInfo) {
        self.verify_is_render_pass();

        let (format, xtype) = types::data_format(info.format);
        self.push(&CopyFramebufferToBuffer {
            buffer: info.buffer,
            x: info.x as i32,
            y: info.y as i32,
            width: info.width as i32,
            height: info.height as i32,
            format,
            xtype,
            buffer_offset: info.offset,
        });
    }

    /// Copies a region of the current framebuffer into a texture level.
    pub fn copy_framebuffer_to_texture(&mut self, info: &CopyFramebufferToTextureInfo) {
        self.verify_is_render_pass();

        self.push(&CopyFramebufferToTexture {
            texture: info.texture,
            texture_level: info.texture_level as i32,
            texture_x: info.texture_x as i32,
            texture_y: info.texture_y as i32,
            framebuffer_x: info.framebuffer_x as i32,
            framebuffer_y: info.framebuffer_y as i32,
            width: info.width as i32,
            height: info.height as i32,
            generate_mipmaps: info.generate_mipmaps,
        });
    }

    /// Begins a render pass into `info.framebuffer`.
    ///
    /// # Panics
    ///
    /// Panics if another render pass is still active.
    pub fn begin_render_pass(&mut self, info: &RenderPassInfo) {
        self.verify_not_render_pass();
        self.render_pass = true;

        let mut colors = [ColorAttachment {
            load_op: LoadOperation::Load,
            store_op: StoreOperation::Store,
            clear_value: [0.0; 4],
        }; MAX_COLOR_ATTACHMENTS];

        for (dst, src) in colors.iter_mut().zip(info.colors.iter()) {
            dst.load_op = src.load_op;
            dst.store_op = src.store_op;
            dst.clear_value = src.clear_value;
        }

        self.push(&BeginRenderPass {
            framebuffer: info.framebuffer,
            viewport_x: info.viewport.x as i32,
            viewport_y: info.viewport.y as i32,
            viewport_width: info.viewport.width as i32,
            viewport_height: info.viewport.height as i32,
            colors,
            depth_load_op: info.depth_load_op,
            depth_store_op: info.depth_store_op,
            depth_clear_value: info.depth_clear_value,
            depth_bias: info.depth_bias,
            depth_slope_bias: info.depth_slope_bias,
            stencil_load_op: info.stencil_load_op,
            stencil_store_op: info.stencil_store_op,
            stencil_clear_value: info.stencil_clear_value,
        });
    }

    pub fn end_render_pass(&mut self) {
        self.verify_is_render_pass();
        self.render_pass = false;
        self.push(&EndRenderPass {});
    }

    pub fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.verify_is_render_pass();
        self.push(&SetViewport {
            x: x as i32,
            y: y as i32,
            width: width as i32,
            height: height as i32,
        });
    }

    pub fn bind_pipeline(&mut self, pipeline: &Pipeline) {
        self.verify_is_render_pass();
        self.push(&BindPipeline {
            pipeline: *pipeline,
        });
    }

    pub fn uniform1f(&mut self, location: UniformLocation, value: f32) {
        self.verify_is_render_pass();
        self.push(&Uniform1f {
            location: location.0,
            value,
        });
    }

    pub fn uniform1i(&mut self, location: UniformLocation, value: i32) {
        self.verify_is_render_pass();
        self.push(&Uniform1i {
            location: location.0,
            value,
        });
    }

    pub fn uniform3f(&mut self, location: UniformLocation, values: [f32; 3]) {
        self.verify_is_render_pass();
        self.push(&Uniform3f {
            location: location.0,
            values,
        });
    }

    pub fn uniform4f(&mut self, location: UniformLocation, values: [f32; 4]) {
        self.verify_is_render_pass();
        self.push(&Uniform4f {
            location: location.0,
            values,
        });
    }

    /// Uploads a column-major 4x4 matrix.
    pub fn uniform_matrix4f(&mut self, location: UniformLocation, values: [f32; 16]) {
        self.verify_is_render_pass();
        self.push(&UniformMatrix4f {
            location: location.0,
            values,
        });
    }

    /// Binds the whole of `buffer` to a uniform block binding point.
    pub fn uniform_buffer_unit(&mut self, index: u32, buffer: BufferHandle) {
        self.verify_is_render_pass();
        self.push(&UniformBufferUnit { index, buffer });
    }

    /// Binds `size` bytes of `buffer` starting at `offset` to a uniform block
    /// binding point. `offset` must be a multiple of the uniform buffer offset
    /// alignment reported by the device limits.
    pub fn uniform_buffer_unit_range(
        &mut self,
        index: u32,
        buffer: BufferHandle,
        offset: u32,
        size: u32,
    ) {
        self.verify_is_render_pass();
        self.push(&UniformBufferUnitRange {
            index,
            buffer,
            offset,
            size,
        });
    }

    pub fn texture_unit(&mut self, index: u32, texture: TextureHandle) {
        self.verify_is_render_pass();
        self.push(&TextureUnit { index, texture });
    }

    /// Binds a sampler to a texture unit, or removes it with `None`.
    pub fn sampler_unit(&mut self, index: u32, sampler: Option<SamplerHandle>) {
        self.verify_is_render_pass();
        self.push(&SamplerUnit {
            index,
            sampler: sampler.unwrap_or_else(SamplerHandle::nil),
        });
    }

    pub fn draw(&mut self, vertex_offset: u32, vertex_count: u32, instance_count: u32) {
        self.verify_is_render_pass();
        self.push(&Draw {
            vertex_offset: vertex_offset as i32,
            vertex_count: vertex_count as i32,
            instance_count: instance_count as i32,
        });
    }

    pub fn draw_indexed(&mut self, index_byte_offset: u32, index_count: u32, instance_count: u32) {
        self.verify_is_render_pass();
        self.push(&DrawIndexed {
            index_byte_offset: index_byte_offset as i32,
            index_count: index_count as i32,
            instance_count: instance_count as i32,
        });
    }

    /// Replaces `data.len()` bytes of `buffer` starting at `offset`.
    pub fn update_buffer_data(&mut self, buffer: BufferHandle, offset: u32, data: &[u8]) {
        self.push(&UpdateBufferData {
            buffer,
            offset,
            count: data.len() as u32,
        });
        self.push_data(data);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn capacity_hint() {
        assert_eq!(CommandBuffer::new(0).capacity(), MIN_CAPACITY);
        assert_eq!(CommandBuffer::new(4096).capacity(), 4096);
    }

    #[test]
    fn growth_doubles() {
        let mut buf = CommandBuffer::new(0);
        buf.push_data(&[1; 1000]);
        assert_eq!(buf.capacity(), 1024);
        buf.push_data(&[2; 3000]);
        assert_eq!(buf.capacity(), 4096);
        assert_eq!(buf.len(), 4000);
        assert_eq!(buf.pop_data(1000), &[1; 1000][..]);
        assert_eq!(buf.pop_data(3000), &[2; 3000][..]);
        assert!(!buf.has_more_commands());
    }

    #[test]
    #[should_panic]
    fn draw_outside_render_pass() {
        let mut buf = CommandBuffer::default();
        buf.draw(0, 3, 1);
    }

    #[test]
    #[should_panic]
    fn nested_render_pass() {
        let mut buf = CommandBuffer::default();
        let info = RenderPassInfo::new(FramebufferHandle::nil(), Viewport::default());
        buf.begin_render_pass(&info);
        buf.begin_render_pass(&info);
    }

    #[test]
    #[should_panic]
    fn read_past_end() {
        let mut buf = CommandBuffer::default();
        buf.push_command(&1u8);
        let _: u32 = buf.pop_command();
    }

    #[test]
    fn reset_leaves_render_pass() {
        let mut buf = CommandBuffer::default();
        let info = RenderPassInfo::new(FramebufferHandle::nil(), Viewport::default());
        buf.begin_render_pass(&info);
        assert!(buf.is_render_pass());
        buf.reset();
        assert!(!buf.is_render_pass());
        assert!(!buf.has_more_commands());
        buf.begin_render_pass(&info);
    }
}
