//! Configuration of the video system.

use super::command::buffer::MIN_CAPACITY;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoParams {
    /// Initial capacity in bytes of command buffers created by the system.
    /// Values below the minimum are raised to it.
    pub command_buffer_capacity: usize,
    /// Queries `glGetError` after native calls and logs what it reports.
    /// Costs a driver round trip per call.
    pub check_errors: bool,
    /// Debug name of the default framebuffer.
    pub default_framebuffer_label: String,
}

impl Default for VideoParams {
    fn default() -> Self {
        VideoParams {
            command_buffer_capacity: MIN_CAPACITY,
            check_errors: cfg!(debug_assertions),
            default_framebuffer_label: "default".to_owned(),
        }
    }
}

impl VideoParams {
    pub fn command_buffer_capacity(&self) -> usize {
        self.command_buffer_capacity.max(MIN_CAPACITY)
    }
}
