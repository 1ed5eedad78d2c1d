//! Pollable GPU synchronization points.

impl_handle!(FenceHandle);

/// The state of the work tracked by a fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceStatus {
    /// Every command submitted before the fence has been executed.
    Success,
    NotReady,
    /// The context was lost. Nothing in this crate attempts to recover from it.
    DeviceLost,
}

impl FenceStatus {
    #[inline]
    pub fn is_done(self) -> bool {
        self == FenceStatus::Success
    }
}
