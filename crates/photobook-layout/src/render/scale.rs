use crate::constants::px_to_pt;
use crate::layout::Rect;

/// Linear mapping from layout pixels to a renderer's unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderScale {
    /// Renderer units per layout pixel
    pub factor: f32,
}

impl RenderScale {
    pub fn new(factor: f32) -> Self {
        let factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            1.0
        };
        Self { factor }
    }

    /// Scale that makes `page_width_px` exactly `display_width` units wide
    pub fn fit_width(page_width_px: f32, display_width: f32) -> Self {
        if page_width_px <= 0.0 {
            return Self::new(1.0);
        }
        Self::new(display_width / page_width_px)
    }

    /// Pixels at the working resolution to PDF points
    pub fn points() -> Self {
        Self::new(px_to_pt(1.0))
    }

    #[inline]
    pub fn length(&self, px: f32) -> f32 {
        px * self.factor
    }

    pub fn rect(&self, rect: &Rect) -> Rect {
        Rect::new(
            self.length(rect.x),
            self.length(rect.y),
            self.length(rect.width),
            self.length(rect.height),
        )
    }
}
