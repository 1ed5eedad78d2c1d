use super::assets::prelude::*;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
    #[fail(display = "{} is invalid.", _0)]
    ProgramHandleInvalid(ProgramHandle),
    #[fail(display = "{} is invalid.", _0)]
    BufferHandleInvalid(BufferHandle),
    #[fail(display = "{} is invalid.", _0)]
    TextureHandleInvalid(TextureHandle),
    #[fail(display = "{} is invalid.", _0)]
    SamplerHandleInvalid(SamplerHandle),
    #[fail(display = "{} is invalid.", _0)]
    FramebufferHandleInvalid(FramebufferHandle),
    #[fail(display = "{} is invalid.", _0)]
    VertexArrayHandleInvalid(VertexArrayHandle),
    #[fail(display = "{} is invalid.", _0)]
    PipelineHandleInvalid(PipelineHandle),
    #[fail(display = "The default framebuffer can not be deleted.")]
    DeleteDefaultFramebuffer,
    #[fail(display = "Too many color attachments, at most {} are supported.", _0)]
    TooManyColorAttachments(usize),
    #[fail(display = "Incompatible framebuffer attachment: {}.", _0)]
    IncompatibleAttachment(String),
    #[fail(display = "Vertex attribute at location {} refers to a missing binding.", _0)]
    VertexAttributeUnbound(u32),
    #[fail(display = "Buffer data of {} bytes exceeds the declared size {}.", _0, _1)]
    BufferDataOutOfBounds(usize, usize),
    #[fail(display = "Texture data of {} bytes does not match the expected {} bytes.", _0, _1)]
    TextureDataMismatch(usize, usize),
    #[fail(display = "Can not parse pipeline description: {}", _0)]
    PipelineParseFailure(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<::failure::Error> for Error {
    fn from(err: ::failure::Error) -> Error {
        Error::Backend(format!("{}", err))
    }
}

impl From<::serde_json::Error> for Error {
    fn from(err: ::serde_json::Error) -> Error {
        Error::PipelineParseFailure(format!("{}", err))
    }
}
