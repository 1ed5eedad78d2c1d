pub mod device;
pub mod types;

pub use self::device::GLDevice;
