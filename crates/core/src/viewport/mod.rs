use crate::config::ViewportConfig;

/// Synchronous view of the host surface's width in logical pixels.
pub trait Viewport {
    fn width(&self) -> u32;

    /// Whether hover previews apply on this surface.
    fn supports_hover(&self, config: &ViewportConfig) -> bool {
        supports_hover(self.width(), config)
    }
}

pub fn supports_hover(width: u32, config: &ViewportConfig) -> bool {
    width >= config.hover_min_width
}

/// Viewport with a known, fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport(pub u32);

impl Viewport for FixedViewport {
    fn width(&self) -> u32 {
        self.0
    }
}
