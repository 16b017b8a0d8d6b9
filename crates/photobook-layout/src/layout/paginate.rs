//! Pagination of the packed strip
//!
//! This module slices the packer's continuous strip into fixed-height pages:
//! - Boxes are re-based to page-relative coordinates inside the margins
//! - A page breaks before the first box whose bottom would overflow it
//! - Rows are regrouped from box positions as boxes are placed
//! - Manual row heights scale a row and push later rows on the page down
//! - No row is placed taller than the content height

use crate::constants::ROW_EPSILON_PX;
use crate::options::LayoutConfig;
use std::collections::BTreeMap;

use super::{PackedBox, Page, PhotoBox, ResolvedAsset, Row};

/// Page size and margin used for pagination, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub fn from_config(config: &LayoutConfig) -> Self {
        let (width, height) = config.page_dimensions();
        Self {
            width,
            height,
            margin: config.margin_px,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }
}

/// Groups boxes into rows by their top edge
#[derive(Debug, Default)]
pub struct RowGrouper {
    rows: Vec<Row>,
}

impl RowGrouper {
    /// Add the box at `index`. Returns `true` when it opened a new row.
    pub fn push(&mut self, index: usize, y: f32, height: f32, natural_height: f32) -> bool {
        match self.rows.last_mut() {
            Some(row) if (row.y - y).abs() < ROW_EPSILON_PX => {
                row.boxes.end = index + 1;
                row.height = row.height.max(height);
                row.natural_height = row.natural_height.max(natural_height);
                false
            }
            _ => {
                self.rows.push(Row {
                    y,
                    height,
                    natural_height,
                    boxes: index..index + 1,
                    height_override: None,
                });
                true
            }
        }
    }

    fn current_mut(&mut self) -> Option<&mut Row> {
        self.rows.last_mut()
    }

    pub fn finish(self) -> Vec<Row> {
        self.rows
    }
}

/// Rebuild rows from box positions alone.
///
/// The result carries geometry only: `natural_height` equals the placed
/// height and no override is recorded. Pass the boxes of one logical page;
/// the halves of a spread share row positions and would be merged.
pub fn reconstruct_rows(boxes: &[PhotoBox]) -> Vec<Row> {
    let mut grouper = RowGrouper::default();
    for (index, photo) in boxes.iter().enumerate() {
        grouper.push(index, photo.y, photo.height, photo.height);
    }
    grouper.finish()
}

/// Accumulates the boxes and rows of the page being filled
#[derive(Debug, Default)]
struct PageBuilder {
    boxes: Vec<PhotoBox>,
    rows: RowGrouper,
}

impl PageBuilder {
    fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    fn finish(self, number: u32, geometry: &PageGeometry) -> Page {
        Page {
            number,
            boxes: self.boxes,
            rows: self.rows.finish(),
            width: geometry.width,
            height: geometry.height,
            is_spread: false,
            logical_pages: vec![number],
        }
    }
}

/// Scaling state of the row currently being placed
#[derive(Debug, Clone, Copy)]
struct OpenRow {
    packed_top: f32,
    scale: f32,
    /// Below 1 when a packed row taller than the page was shrunk to fit
    width_scale: f32,
    height_override: Option<f32>,
    max_natural_height: f32,
}

impl OpenRow {
    /// How far this row pushes the rows below it
    fn delta(&self) -> f32 {
        (self.scale - 1.0) * self.max_natural_height
    }
}

/// Slice packed boxes into pages.
///
/// `resolved` and `packed` are parallel: box `i` places asset `i`.
/// `row_height_overrides` is keyed by the id of a row's first asset.
pub fn paginate(
    resolved: &[ResolvedAsset<'_>],
    packed: &[PackedBox],
    geometry: &PageGeometry,
    row_height_overrides: &BTreeMap<String, f32>,
) -> Vec<Page> {
    let content_height = geometry.content_height();
    let margin = geometry.margin;

    let mut pages = Vec::new();
    let mut builder = PageBuilder::default();
    let mut page_top = packed.first().map_or(0.0, |b| b.top);
    // Accumulated push-down from overridden rows above, on the current page
    let mut page_delta = 0.0f32;
    let mut open_row: Option<OpenRow> = None;

    for (item, packed_box) in resolved.iter().zip(packed) {
        let starts_row = open_row
            .is_none_or(|row| (packed_box.top - row.packed_top).abs() >= ROW_EPSILON_PX);

        if starts_row {
            if let Some(row) = open_row.take() {
                page_delta += row.delta();
            }
            let height_override = row_height_overrides
                .get(&item.asset.id)
                .copied()
                .filter(|h| h.is_finite() && *h > 0.0)
                .map(|h| h.min(content_height));
            let (scale, width_scale) = match height_override {
                Some(h) => (h / packed_box.height, 1.0),
                None if packed_box.height > content_height => {
                    let fit = content_height / packed_box.height;
                    (fit, fit)
                }
                None => (1.0, 1.0),
            };
            open_row = Some(OpenRow {
                packed_top: packed_box.top,
                scale,
                width_scale,
                height_override,
                max_natural_height: packed_box.height,
            });
        }

        let Some(row) = open_row.as_mut() else {
            continue;
        };
        row.max_natural_height = row.max_natural_height.max(packed_box.height);
        let height = packed_box.height * row.scale;

        // Breaks only happen between rows so an oversized row stays whole
        let bottom = packed_box.top - page_top + page_delta + height;
        if starts_row && bottom > content_height && !builder.is_empty() {
            let number = pages.len() as u32 + 1;
            log::debug!(
                "Closing page {} with {} boxes; next box bottom {:.1} exceeds {:.1}",
                number,
                builder.boxes.len(),
                bottom,
                content_height
            );
            pages.push(std::mem::take(&mut builder).finish(number, geometry));
            page_top = packed_box.top;
            page_delta = 0.0;
        }

        let y = packed_box.top - page_top + page_delta + margin;
        let index = builder.boxes.len();
        builder.boxes.push(PhotoBox {
            asset_id: item.asset.id.clone(),
            x: packed_box.left * row.width_scale + margin,
            y,
            width: packed_box.width * row.width_scale,
            height,
            caption_side: item.caption_side,
        });

        if builder.rows.push(index, y, height, packed_box.height) {
            if let Some(current) = builder.rows.current_mut() {
                current.height_override = row.height_override;
            }
        }
    }

    if !builder.is_empty() {
        let number = pages.len() as u32 + 1;
        pages.push(builder.finish(number, geometry));
    }

    pages
}
