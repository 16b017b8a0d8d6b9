use crate::constants::*;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid asset: {0}")]
    InvalidAsset(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Named physical paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaperSize {
    /// ISO A4 (210mm × 297mm)
    A4,
    /// ANSI Letter (8.5" × 11")
    Letter,
}

impl PaperSize {
    /// Get pixel dimensions at the working resolution with orientation applied
    pub fn dimensions_px(self, orientation: Orientation) -> (u32, u32) {
        match (self, orientation) {
            (PaperSize::A4, Orientation::Portrait) => A4_PORTRAIT_PX,
            (PaperSize::A4, Orientation::Landscape) => A4_LANDSCAPE_PX,
            (PaperSize::Letter, Orientation::Portrait) => LETTER_PORTRAIT_PX,
            (PaperSize::Letter, Orientation::Landscape) => LETTER_LANDSCAPE_PX,
        }
    }
}

/// What the pages are sized after
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PageTarget {
    /// A named paper size
    Paper {
        size: PaperSize,
        orientation: Orientation,
    },
    /// Explicit pixel dimensions
    Custom { width_px: u32, height_px: u32 },
}

impl Default for PageTarget {
    fn default() -> Self {
        PageTarget::Custom {
            width_px: DEFAULT_PAGE_PX.0,
            height_px: DEFAULT_PAGE_PX.1,
        }
    }
}

impl PageTarget {
    /// Page size in pixels (width, height)
    pub fn dimensions_px(self) -> (u32, u32) {
        match self {
            PageTarget::Paper { size, orientation } => size.dimensions_px(orientation),
            PageTarget::Custom {
                width_px,
                height_px,
            } => (width_px, height_px),
        }
    }
}

/// Horizontal placement of a page's photo group within the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Where an asset's caption is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CaptionPosition {
    /// Drawn on top of the image, takes no layout space
    #[default]
    Overlay,
    /// Caption to the left of the image, sharing the box
    Left,
    /// Caption to the right of the image, sharing the box
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

/// A photographic item supplied by the asset source
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    pub id: String,
    /// Natural pixel width (0 when unknown)
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: u32,
    /// Natural pixel height (0 when unknown)
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: u32,
    /// Metadata says the image is stored rotated by 90°
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotated: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub caption: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub taken_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: MediaKind,
}

impl Asset {
    /// Create an image asset with just the essential layout fields
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            rotated: false,
            caption: None,
            taken_at: None,
            kind: MediaKind::Image,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_rotation(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }

    pub fn with_taken_at(mut self, taken_at: DateTime<Utc>) -> Self {
        self.taken_at = Some(taken_at);
        self
    }

    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// Caption text, if present and not blank
    pub fn caption_text(&self) -> Option<&str> {
        self.caption
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Effective (width, height) after applying the rotation flag
    pub fn oriented_dimensions(&self) -> (u32, u32) {
        if self.rotated {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// Sort assets ascending by capture time; assets without a timestamp go last.
/// The sort is stable so equal timestamps keep their source order.
pub fn sort_by_capture_time(assets: &mut [Asset]) {
    assets.sort_by(|a, b| match (a.taken_at, b.taken_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Summary of a computed layout
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayoutStatistics {
    /// Number of input assets
    pub assets: usize,
    /// Number of logical (single) pages
    pub logical_pages: usize,
    /// Number of emitted pages (spreads count once)
    pub output_pages: usize,
    /// Number of reconstructed rows across all pages
    pub rows: usize,
    /// Mean row height in pixels (0 when there are no rows)
    pub average_row_height_px: f32,
    /// Assets with at least one customization (aspect, caption position or row height)
    pub customized_assets: usize,
    /// Assets whose caption takes a slot beside the image
    pub side_captions: usize,
}
