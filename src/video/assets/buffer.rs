impl_handle!(BufferHandle);

/// What a buffer is going to be bound as.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum BufferKind {
    Vertex,
    Index,
    Uniform,
    /// Destination of framebuffer read-backs.
    PixelTransfer,
}

#[derive(Debug, Clone)]
pub struct BufferParams {
    pub label: String,
    pub kind: BufferKind,
    /// Hints the driver that the content is going to be rewritten often.
    pub dynamic: bool,
    pub size: usize,
}

impl BufferParams {
    pub fn new(kind: BufferKind, size: usize) -> Self {
        BufferParams {
            label: String::new(),
            kind,
            dynamic: false,
            size,
        }
    }
}
