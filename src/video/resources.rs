//! Native objects owned by the video system, named by type-safe handles.

use gl;
use gl::types::*;

use super::assets::prelude::*;
use super::pipeline::Pipeline;
use crate::utils::prelude::*;

#[derive(Debug, Clone)]
pub struct ProgramObject {
    pub id: GLuint,
    pub label: String,
}

#[derive(Debug, Clone, Copy)]
pub struct BufferObject {
    pub id: GLuint,
    /// The bind point used for uploads.
    pub target: GLenum,
    pub size: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct TextureObject {
    pub id: GLuint,
    pub target: GLenum,
    pub params: TextureParams,
}

#[derive(Debug, Clone, Copy)]
pub struct SamplerObject {
    pub id: GLuint,
}

#[derive(Debug, Clone)]
pub struct FramebufferObject {
    /// Zero for the default framebuffer.
    pub id: GLuint,
    pub label: String,
    pub active_draw_buffers: [bool; MAX_COLOR_ATTACHMENTS],
}

impl FramebufferObject {
    #[inline]
    pub fn is_default(&self) -> bool {
        self.id == 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VertexArrayObject {
    pub id: GLuint,
    /// Native type of the indices, meaningful only with an index buffer.
    pub index_type: GLenum,
}

/// Arenas of every kind of native object, one per kind.
pub struct Resources {
    pub programs: ObjectPool<ProgramHandle, ProgramObject>,
    pub buffers: ObjectPool<BufferHandle, BufferObject>,
    pub textures: ObjectPool<TextureHandle, TextureObject>,
    pub samplers: ObjectPool<SamplerHandle, SamplerObject>,
    pub framebuffers: ObjectPool<FramebufferHandle, FramebufferObject>,
    pub vertex_arrays: ObjectPool<VertexArrayHandle, VertexArrayObject>,
    pub pipelines: ObjectPool<PipelineHandle, Pipeline>,
    default_framebuffer: FramebufferHandle,
}

impl Resources {
    /// Creates empty arenas holding nothing but the default framebuffer.
    pub fn new(default_framebuffer_label: &str) -> Self {
        let mut framebuffers = ObjectPool::new();
        let default_framebuffer = framebuffers.create(FramebufferObject {
            id: 0,
            label: default_framebuffer_label.to_owned(),
            active_draw_buffers: [true, false, false, false],
        });

        Resources {
            programs: ObjectPool::new(),
            buffers: ObjectPool::new(),
            textures: ObjectPool::new(),
            samplers: ObjectPool::new(),
            framebuffers,
            vertex_arrays: ObjectPool::new(),
            pipelines: ObjectPool::new(),
            default_framebuffer,
        }
    }

    #[inline]
    pub fn default_framebuffer(&self) -> FramebufferHandle {
        self.default_framebuffer
    }
}

impl VertexArrayObject {
    pub fn new(id: GLuint, index_format: Option<IndexFormat>) -> Self {
        VertexArrayObject {
            id,
            index_type: index_format.map_or(gl::UNSIGNED_SHORT, GLenum::from),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_framebuffer() {
        let resources = Resources::new("screen");
        let fb = resources
            .framebuffers
            .get(resources.default_framebuffer())
            .unwrap();

        assert!(fb.is_default());
        assert_eq!(fb.label, "screen");
        assert_eq!(fb.active_draw_buffers, [true, false, false, false]);
    }

    #[test]
    fn index_type() {
        assert_eq!(VertexArrayObject::new(1, None).index_type, gl::UNSIGNED_SHORT);
        assert_eq!(
            VertexArrayObject::new(1, Some(IndexFormat::U32)).index_type,
            gl::UNSIGNED_INT
        );
    }
}
