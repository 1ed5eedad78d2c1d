//! Untyped errors raised by native backends.

pub use failure::Error;

pub type Result<T> = ::std::result::Result<T, Error>;
