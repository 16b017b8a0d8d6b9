//! Interactive resize gestures
//!
//! A drag is transient state: it samples pointer deltas and proposes a
//! candidate value, snapping to the natural value or the content edge when
//! close. Nothing reaches the configuration until `release`, which returns
//! an updated config with the override committed (or removed when the drag
//! ended on the natural value). `cancel` discards the drag.

use crate::constants::*;
use crate::layout::{Page, PageGeometry, PhotoBox, natural_aspect_ratio};
use crate::options::LayoutConfig;
use crate::types::Asset;

/// What a candidate value snapped to, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snap {
    None,
    Natural,
    ContentEdge,
}

/// Horizontal resize of one photo, editing its aspect-ratio override
#[derive(Debug, Clone, PartialEq)]
pub struct AspectDrag {
    asset_id: String,
    x: f32,
    start_width: f32,
    height: f32,
    /// Box width at the natural ratio and current height
    natural_width: f32,
    /// Share of the box width the image gets (below 1 with a side caption)
    image_share: f32,
    content_right: f32,
    dx: f32,
}

impl AspectDrag {
    /// Start dragging the right edge of `photo`.
    ///
    /// `geometry` must describe the logical page the box was laid out on.
    pub fn begin(photo: &PhotoBox, asset: &Asset, geometry: &PageGeometry) -> Self {
        let image_share = if photo.caption_side.is_some() {
            1.0 - CAPTION_SLOT_SHARE
        } else {
            1.0
        };
        let natural_width = natural_aspect_ratio(asset) * photo.height / image_share;
        Self {
            asset_id: photo.asset_id.clone(),
            x: photo.x,
            start_width: photo.width,
            height: photo.height.max(1.0),
            natural_width,
            image_share,
            content_right: geometry.margin + geometry.content_width(),
            dx: 0.0,
        }
    }

    /// Record the pointer's horizontal distance from where the drag started
    pub fn update(&mut self, dx: f32) {
        if dx.is_finite() {
            self.dx = dx;
        }
    }

    /// Candidate box width after snapping
    pub fn candidate_width(&self) -> (f32, Snap) {
        let width = (self.start_width + self.dx).max(1.0);
        if (width - self.natural_width).abs() <= SNAP_THRESHOLD_PX {
            return (self.natural_width, Snap::Natural);
        }
        if (self.x + width - self.content_right).abs() <= SNAP_THRESHOLD_PX {
            return ((self.content_right - self.x).max(1.0), Snap::ContentEdge);
        }
        (width, Snap::None)
    }

    /// Candidate image aspect ratio, clamped to the allowed range
    pub fn candidate_aspect(&self) -> f32 {
        let (width, _) = self.candidate_width();
        (width * self.image_share / self.height).clamp(MIN_ASPECT_RATIO, MAX_ASPECT_RATIO)
    }

    /// Finish the drag and commit the result into a copy of `config`
    pub fn release(self, config: &LayoutConfig) -> LayoutConfig {
        let mut next = config.clone();
        match self.candidate_width() {
            (_, Snap::Natural) => {
                next.aspect_overrides.remove(&self.asset_id);
            }
            _ => {
                let aspect = self.candidate_aspect();
                log::debug!("Committing aspect {:.3} for {}", aspect, self.asset_id);
                next.aspect_overrides.insert(self.asset_id, aspect);
            }
        }
        next
    }

    /// Abandon the drag; the configuration is left as it was
    pub fn cancel(self) {
        log::debug!("Aspect drag on {} cancelled", self.asset_id);
    }
}

/// Vertical resize of one row, editing its row-height override
#[derive(Debug, Clone, PartialEq)]
pub struct RowHeightDrag {
    anchor: String,
    row_y: f32,
    start_height: f32,
    natural_height: f32,
    content_bottom: f32,
    dy: f32,
}

impl RowHeightDrag {
    /// Start dragging the bottom edge of row `row_index` on `page`
    pub fn begin(page: &Page, row_index: usize, geometry: &PageGeometry) -> Option<Self> {
        let row = page.rows.get(row_index)?;
        let anchor = row.anchor(&page.boxes)?;
        Some(Self {
            anchor: anchor.to_string(),
            row_y: row.y,
            start_height: row.height,
            natural_height: row.natural_height,
            content_bottom: geometry.margin + geometry.content_height(),
            dy: 0.0,
        })
    }

    /// Record the pointer's vertical distance from where the drag started
    pub fn update(&mut self, dy: f32) {
        if dy.is_finite() {
            self.dy = dy;
        }
    }

    /// Candidate row height after snapping and clamping
    pub fn candidate_height(&self) -> (f32, Snap) {
        let height = (self.start_height + self.dy).clamp(MIN_ROW_HEIGHT_PX, MAX_ROW_HEIGHT_PX);
        if (height - self.natural_height).abs() <= SNAP_THRESHOLD_PX {
            return (self.natural_height, Snap::Natural);
        }
        let edge_height = self.content_bottom - self.row_y;
        if (height - edge_height).abs() <= SNAP_THRESHOLD_PX
            && (MIN_ROW_HEIGHT_PX..=MAX_ROW_HEIGHT_PX).contains(&edge_height)
        {
            return (edge_height, Snap::ContentEdge);
        }
        (height, Snap::None)
    }

    /// Finish the drag and commit the result into a copy of `config`
    pub fn release(self, config: &LayoutConfig) -> LayoutConfig {
        let mut next = config.clone();
        match self.candidate_height() {
            (_, Snap::Natural) => {
                next.row_height_overrides.remove(&self.anchor);
            }
            (height, _) => {
                log::debug!("Committing row height {:.1} for {}", height, self.anchor);
                next.row_height_overrides.insert(self.anchor, height);
            }
        }
        next
    }

    /// Abandon the drag; the configuration is left as it was
    pub fn cancel(self) {
        log::debug!("Row drag on {} cancelled", self.anchor);
    }
}
