//! Layout data types
//!
//! These types represent the intermediate and final geometry between
//! row packing and rendering. All values are pixels at the working resolution
//! with a top-left origin.

use crate::constants::CAPTION_SLOT_SHARE;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular area in pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// One box produced by the row packer, in the continuous packed strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedBox {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl PackedBox {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Which half of a box holds a side caption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CaptionSide {
    Left,
    Right,
}

/// The positioned placement of one asset on a page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhotoBox {
    pub asset_id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Set when the box reserves a slot beside the image for its caption
    pub caption_side: Option<CaptionSide>,
}

impl PhotoBox {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area the image is drawn into
    pub fn image_rect(&self) -> Rect {
        let slot = self.width * CAPTION_SLOT_SHARE;
        match self.caption_side {
            None => self.rect(),
            Some(CaptionSide::Left) => Rect::new(self.x + slot, self.y, self.width - slot, self.height),
            Some(CaptionSide::Right) => Rect::new(self.x, self.y, self.width - slot, self.height),
        }
    }

    /// Area reserved for a side caption
    pub fn caption_rect(&self) -> Option<Rect> {
        let slot = self.width * CAPTION_SLOT_SHARE;
        self.caption_side.map(|side| match side {
            CaptionSide::Left => Rect::new(self.x, self.y, slot, self.height),
            CaptionSide::Right => Rect::new(self.right() - slot, self.y, slot, self.height),
        })
    }
}

/// A reconstructed horizontal band of boxes
///
/// Rows are a derived view for editing: `boxes` indexes into the owning
/// page's box list, and rows can always be rebuilt from box positions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row {
    /// Top edge (page-relative)
    pub y: f32,
    /// Height of the tallest member
    pub height: f32,
    /// Height before any manual override
    pub natural_height: f32,
    /// Indices into `Page::boxes`
    pub boxes: Range<usize>,
    /// Manual height override applied to this row
    pub height_override: Option<f32>,
}

impl Row {
    /// Id of the first asset in the row; row-height overrides are keyed by it
    pub fn anchor<'a>(&self, boxes: &'a [PhotoBox]) -> Option<&'a str> {
        boxes.get(self.boxes.start).map(|b| b.asset_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// A page (or spread) of placed photos
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Page {
    /// 1-based, sequential; spreads are numbered by spread
    pub number: u32,
    pub boxes: Vec<PhotoBox>,
    pub rows: Vec<Row>,
    pub width: f32,
    pub height: f32,
    /// Set when this page is a combined double-width spread
    pub is_spread: bool,
    /// Logical single-page numbers whose content this page carries
    pub logical_pages: Vec<u32>,
}

impl Page {
    /// Display numbers of the two halves of a spread (`2n - 1`, `2n`),
    /// or just the page number for a single page
    pub fn display_page_numbers(&self) -> (u32, Option<u32>) {
        if self.is_spread {
            (self.number * 2 - 1, Some(self.number * 2))
        } else {
            (self.number, None)
        }
    }

    /// Horizontal span `(min_x, max_right)` covered by the boxes
    pub fn used_span(&self) -> Option<(f32, f32)> {
        let min_x = self.boxes.iter().map(|b| b.x).reduce(f32::min)?;
        let max_right = self.boxes.iter().map(PhotoBox::right).reduce(f32::max)?;
        Some((min_x, max_right))
    }
}
