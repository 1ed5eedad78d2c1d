use super::buffer::BufferHandle;

impl_handle!(VertexArrayHandle);

/// Component layout of a single vertex attribute.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum VertexAttributeFormat {
    R32F,
    RG32F,
    RGB32F,
    RGBA32F,
    R16F,
    RG16F,
    RGB16F,
    RGBA16F,
    R16S,
    RG16S,
    RGB16S,
    RGBA16S,
    R16SN,
    RG16SN,
    RGB16SN,
    RGBA16SN,
    R8U,
    RG8U,
    RGB8U,
    RGBA8U,
    R8UN,
    RG8UN,
    RGB8UN,
    RGBA8UN,
    RGBA8IU,
}

impl VertexAttributeFormat {
    /// Returns the number of components and whether the values are
    /// normalized or read as integers by the shader.
    pub fn components(self) -> (u8, bool, bool) {
        use self::VertexAttributeFormat::*;
        match self {
            R32F | R16F | R16S | R8U => (1, false, false),
            RG32F | RG16F | RG16S | RG8U => (2, false, false),
            RGB32F | RGB16F | RGB16S | RGB8U => (3, false, false),
            RGBA32F | RGBA16F | RGBA16S | RGBA8U => (4, false, false),
            R16SN | R8UN => (1, true, false),
            RG16SN | RG8UN => (2, true, false),
            RGB16SN | RGB8UN => (3, true, false),
            RGBA16SN | RGBA8UN => (4, true, false),
            RGBA8IU => (4, false, true),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    pub fn stride(self) -> usize {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }
}

/// A vertex buffer and the distance in bytes between consecutive vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferBinding {
    pub buffer: BufferHandle,
    pub stride: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Index into `VertexArrayParams::bindings`.
    pub binding: usize,
    pub location: u32,
    pub format: VertexAttributeFormat,
    pub offset: u32,
}

#[derive(Debug, Clone, Default)]
pub struct VertexArrayParams {
    pub bindings: Vec<VertexBufferBinding>,
    pub attributes: Vec<VertexAttribute>,
    pub index_buffer: Option<BufferHandle>,
    pub index_format: Option<IndexFormat>,
}
