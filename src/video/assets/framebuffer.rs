use super::texture::TextureHandle;

impl_handle!(FramebufferHandle);

/// The maximum number of color attachments of a framebuffer.
pub const MAX_COLOR_ATTACHMENTS: usize = 4;

/// Attachments of an offscreen framebuffer. A `depth_stencil` attachment takes
/// precedence over separate `depth` and `stencil` attachments.
#[derive(Debug, Clone, Default)]
pub struct FramebufferParams {
    pub label: String,
    pub colors: [Option<TextureHandle>; MAX_COLOR_ATTACHMENTS],
    pub depth: Option<TextureHandle>,
    pub stencil: Option<TextureHandle>,
    pub depth_stencil: Option<TextureHandle>,
}

impl FramebufferParams {
    /// Builds params from a list of color attachments, failing when there are
    /// more than `MAX_COLOR_ATTACHMENTS` of them.
    pub fn with_colors(colors: &[TextureHandle]) -> Option<Self> {
        if colors.len() > MAX_COLOR_ATTACHMENTS {
            return None;
        }

        let mut params = FramebufferParams::default();
        for (slot, &texture) in params.colors.iter_mut().zip(colors) {
            *slot = Some(texture);
        }

        Some(params)
    }

    /// Which of the draw buffers are backed by a color attachment.
    pub fn active_draw_buffers(&self) -> [bool; MAX_COLOR_ATTACHMENTS] {
        let mut active = [false; MAX_COLOR_ATTACHMENTS];
        for (i, v) in self.colors.iter().enumerate() {
            active[i] = v.is_some();
        }

        active
    }
}
