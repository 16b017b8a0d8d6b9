//! Horizontal alignment of a page's photo group
//!
//! Runs on logical pages after pagination and before spreads are combined.

use crate::types::Alignment;

use super::{Page, PageGeometry};

/// Horizontal shift that places the used span `[min_x, max_right]` according
/// to `alignment` inside the content area
pub fn alignment_offset(
    alignment: Alignment,
    min_x: f32,
    max_right: f32,
    geometry: &PageGeometry,
) -> f32 {
    let content_left = geometry.margin;
    let content_width = geometry.content_width();
    match alignment {
        Alignment::Left => 0.0,
        Alignment::Right => content_left + content_width - max_right,
        Alignment::Center => {
            let used = max_right - min_x;
            content_left + (content_width - used) / 2.0 - min_x
        }
    }
}

/// Shift every box of `page` according to `alignment`. Rows keep their
/// vertical geometry, so they stay valid.
pub fn align_page(page: &mut Page, alignment: Alignment, geometry: &PageGeometry) {
    if alignment == Alignment::Left {
        return;
    }
    let Some((min_x, max_right)) = page.used_span() else {
        return;
    };

    let dx = alignment_offset(alignment, min_x, max_right, geometry);
    if dx == 0.0 {
        return;
    }

    log::debug!("Aligning page {} {:?} by {:.1}px", page.number, alignment, dx);
    for photo in &mut page.boxes {
        photo.x += dx;
    }
}

/// Apply the configured alignment to each logical page
pub fn align_pages(
    pages: &mut [Page],
    geometry: &PageGeometry,
    alignment_for: impl Fn(u32) -> Alignment,
) {
    for page in pages {
        let alignment = alignment_for(page.number);
        align_page(page, alignment, geometry);
    }
}
