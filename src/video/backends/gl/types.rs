//! Resolution of symbolic descriptors into native GL enumerations.

use gl;
use gl::types::*;

use crate::video::assets::prelude::*;

impl From<Comparison> for GLenum {
    fn from(cmp: Comparison) -> Self {
        match cmp {
            Comparison::Never => gl::NEVER,
            Comparison::Less => gl::LESS,
            Comparison::Equal => gl::EQUAL,
            Comparison::LessOrEqual => gl::LEQUAL,
            Comparison::Greater => gl::GREATER,
            Comparison::NotEqual => gl::NOTEQUAL,
            Comparison::GreaterOrEqual => gl::GEQUAL,
            Comparison::Always => gl::ALWAYS,
        }
    }
}

impl From<StencilOperation> for GLenum {
    fn from(op: StencilOperation) -> Self {
        match op {
            StencilOperation::Keep => gl::KEEP,
            StencilOperation::Zero => gl::ZERO,
            StencilOperation::Replace => gl::REPLACE,
            StencilOperation::Increase => gl::INCR,
            StencilOperation::IncreaseWrap => gl::INCR_WRAP,
            StencilOperation::Decrease => gl::DECR,
            StencilOperation::DecreaseWrap => gl::DECR_WRAP,
            StencilOperation::Invert => gl::INVERT,
        }
    }
}

impl From<BlendOperation> for GLenum {
    fn from(op: BlendOperation) -> Self {
        match op {
            BlendOperation::Add => gl::FUNC_ADD,
            BlendOperation::Subtract => gl::FUNC_SUBTRACT,
            BlendOperation::ReverseSubtract => gl::FUNC_REVERSE_SUBTRACT,
            BlendOperation::Min => gl::MIN,
            BlendOperation::Max => gl::MAX,
        }
    }
}

impl From<BlendFactor> for GLenum {
    fn from(factor: BlendFactor) -> Self {
        match factor {
            BlendFactor::Zero => gl::ZERO,
            BlendFactor::One => gl::ONE,
            BlendFactor::SourceColor => gl::SRC_COLOR,
            BlendFactor::OneMinusSourceColor => gl::ONE_MINUS_SRC_COLOR,
            BlendFactor::DestinationColor => gl::DST_COLOR,
            BlendFactor::OneMinusDestinationColor => gl::ONE_MINUS_DST_COLOR,
            BlendFactor::SourceAlpha => gl::SRC_ALPHA,
            BlendFactor::OneMinusSourceAlpha => gl::ONE_MINUS_SRC_ALPHA,
            BlendFactor::DestinationAlpha => gl::DST_ALPHA,
            BlendFactor::OneMinusDestinationAlpha => gl::ONE_MINUS_DST_ALPHA,
            BlendFactor::ConstantColor => gl::CONSTANT_COLOR,
            BlendFactor::OneMinusConstantColor => gl::ONE_MINUS_CONSTANT_COLOR,
            BlendFactor::ConstantAlpha => gl::CONSTANT_ALPHA,
            BlendFactor::OneMinusConstantAlpha => gl::ONE_MINUS_CONSTANT_ALPHA,
            BlendFactor::SourceAlphaSaturate => gl::SRC_ALPHA_SATURATE,
        }
    }
}

impl From<Topology> for GLenum {
    fn from(topology: Topology) -> Self {
        match topology {
            Topology::Points => gl::POINTS,
            Topology::LineStrip => gl::LINE_STRIP,
            Topology::LineList => gl::LINES,
            Topology::TriangleStrip => gl::TRIANGLE_STRIP,
            Topology::TriangleList => gl::TRIANGLES,
            Topology::TriangleFan => gl::TRIANGLE_FAN,
        }
    }
}

impl From<FaceOrientation> for GLenum {
    fn from(orientation: FaceOrientation) -> Self {
        match orientation {
            FaceOrientation::CounterClockwise => gl::CCW,
            FaceOrientation::Clockwise => gl::CW,
        }
    }
}

/// Returns the face to cull, or `None` when culling is disabled.
pub fn cull_face(mode: CullMode) -> Option<GLenum> {
    match mode {
        CullMode::None => None,
        CullMode::Back => Some(gl::BACK),
        CullMode::Front => Some(gl::FRONT),
        CullMode::FrontAndBack => Some(gl::FRONT_AND_BACK),
    }
}

impl From<IndexFormat> for GLenum {
    fn from(format: IndexFormat) -> Self {
        match format {
            IndexFormat::U16 => gl::UNSIGNED_SHORT,
            IndexFormat::U32 => gl::UNSIGNED_INT,
        }
    }
}

impl From<BufferKind> for GLenum {
    fn from(kind: BufferKind) -> Self {
        match kind {
            BufferKind::Vertex => gl::ARRAY_BUFFER,
            BufferKind::Index => gl::ELEMENT_ARRAY_BUFFER,
            BufferKind::Uniform => gl::UNIFORM_BUFFER,
            BufferKind::PixelTransfer => gl::PIXEL_PACK_BUFFER,
        }
    }
}

pub fn buffer_usage(kind: BufferKind, dynamic: bool) -> GLenum {
    match (kind, dynamic) {
        (BufferKind::PixelTransfer, _) => gl::DYNAMIC_READ,
        (_, true) => gl::DYNAMIC_DRAW,
        (_, false) => gl::STATIC_DRAW,
    }
}

/// Returns `(internal_format, format, type)` of a texture kind.
pub fn texture_format(kind: TextureKind) -> (GLenum, GLenum, GLenum) {
    match kind {
        TextureKind::Color2D {
            format,
            gamma_correction,
            ..
        } => match format {
            ColorFormat::RGBA8 if gamma_correction => {
                (gl::SRGB8_ALPHA8, gl::RGBA, gl::UNSIGNED_BYTE)
            }
            ColorFormat::RGBA8 => (gl::RGBA8, gl::RGBA, gl::UNSIGNED_BYTE),
            ColorFormat::RGBA16F => (gl::RGBA16F, gl::RGBA, gl::HALF_FLOAT),
            ColorFormat::RGBA32F => (gl::RGBA32F, gl::RGBA, gl::FLOAT),
        },
        TextureKind::Depth2D { comparable: true } => {
            (gl::DEPTH_COMPONENT32F, gl::DEPTH_COMPONENT, gl::FLOAT)
        }
        TextureKind::Depth2D { comparable: false } => {
            (gl::DEPTH_COMPONENT24, gl::DEPTH_COMPONENT, gl::UNSIGNED_INT)
        }
        TextureKind::Stencil2D | TextureKind::DepthStencil2D => (
            gl::DEPTH24_STENCIL8,
            gl::DEPTH_STENCIL,
            gl::UNSIGNED_INT_24_8,
        ),
    }
}

/// Returns `(format, type)` of a framebuffer read-back.
pub fn data_format(format: DataFormat) -> (GLenum, GLenum) {
    match format {
        DataFormat::RGBA8 => (gl::RGBA, gl::UNSIGNED_BYTE),
        DataFormat::RGBA16F => (gl::RGBA, gl::HALF_FLOAT),
        DataFormat::RGBA32F => (gl::RGBA, gl::FLOAT),
    }
}

impl From<Wrap> for GLenum {
    fn from(wrap: Wrap) -> Self {
        match wrap {
            Wrap::Clamp => gl::CLAMP_TO_EDGE,
            Wrap::Repeat => gl::REPEAT,
            Wrap::Mirror => gl::MIRRORED_REPEAT,
        }
    }
}

/// Returns the `(min, mag)` filters. Magnification never uses mipmaps.
pub fn filter(filter: Filter, mipmapping: bool) -> (GLenum, GLenum) {
    match (filter, mipmapping) {
        (Filter::Nearest, false) => (gl::NEAREST, gl::NEAREST),
        (Filter::Nearest, true) => (gl::NEAREST_MIPMAP_NEAREST, gl::NEAREST),
        (Filter::Linear, false) | (Filter::Anisotropic, false) => (gl::LINEAR, gl::LINEAR),
        (Filter::Linear, true) | (Filter::Anisotropic, true) => {
            (gl::LINEAR_MIPMAP_LINEAR, gl::LINEAR)
        }
    }
}

/// Returns `(size, type, normalized, integer)` of a vertex attribute.
pub fn vertex_attribute(format: VertexAttributeFormat) -> (GLint, GLenum, bool, bool) {
    use crate::video::assets::prelude::VertexAttributeFormat::*;

    let xtype = match format {
        R32F | RG32F | RGB32F | RGBA32F => gl::FLOAT,
        R16F | RG16F | RGB16F | RGBA16F => gl::HALF_FLOAT,
        R16S | RG16S | RGB16S | RGBA16S | R16SN | RG16SN | RGB16SN | RGBA16SN => gl::SHORT,
        R8U | RG8U | RGB8U | RGBA8U | R8UN | RG8UN | RGB8UN | RGBA8UN | RGBA8IU => {
            gl::UNSIGNED_BYTE
        }
    };

    let (size, normalized, integer) = format.components();
    (GLint::from(size), xtype, normalized, integer)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats() {
        let kind = TextureKind::Color2D {
            format: ColorFormat::RGBA8,
            mipmapping: false,
            gamma_correction: true,
        };

        assert_eq!(texture_format(kind).0, gl::SRGB8_ALPHA8);
        assert_eq!(cull_face(CullMode::None), None);
        assert_eq!(GLenum::from(Topology::TriangleFan), gl::TRIANGLE_FAN);
        assert_eq!(
            vertex_attribute(VertexAttributeFormat::RGBA8UN),
            (4, gl::UNSIGNED_BYTE, true, false)
        );
    }
}
