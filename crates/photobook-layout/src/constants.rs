//! Shared constants for photobook layout
//!
//! This module centralizes the working resolution, paper presets and the
//! bounds that user-entered values are clamped to.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Working resolution of the layout engine
pub const DPI: f32 = 300.0;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Points per inch (export engine unit)
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert millimeters to whole pixels at the working resolution
#[inline]
pub fn mm_to_px(mm: f32) -> u32 {
    (mm * DPI / MM_PER_INCH).round().max(0.0) as u32
}

/// Convert pixels at the working resolution to millimeters
#[inline]
pub fn px_to_mm(px: f32) -> f32 {
    px * MM_PER_INCH / DPI
}

/// Convert pixels at the working resolution to points
#[inline]
pub fn px_to_pt(px: f32) -> f32 {
    px * POINTS_PER_INCH / DPI
}

// =============================================================================
// Paper Presets (pixels at 300 DPI, always `mm_to_px` of the paper size)
// =============================================================================

/// ISO A4 portrait: 210mm × 297mm
pub const A4_PORTRAIT_PX: (u32, u32) = (2480, 3508);

/// ISO A4 landscape: 297mm × 210mm
pub const A4_LANDSCAPE_PX: (u32, u32) = (3508, 2480);

/// ANSI Letter portrait: 8.5" × 11"
pub const LETTER_PORTRAIT_PX: (u32, u32) = (2550, 3300);

/// ANSI Letter landscape: 11" × 8.5"
pub const LETTER_LANDSCAPE_PX: (u32, u32) = (3300, 2550);

// =============================================================================
// Defaults
// =============================================================================

/// Default custom page size (width, height) in pixels
pub const DEFAULT_PAGE_PX: (u32, u32) = (3000, 2000);

pub const DEFAULT_MARGIN_PX: f32 = 100.0;

pub const DEFAULT_ROW_HEIGHT_PX: f32 = 600.0;

pub const DEFAULT_SPACING_PX: f32 = 20.0;

/// Fraction by which a justified row may deviate from the target height
pub const DEFAULT_HEIGHT_TOLERANCE: f32 = 0.25;

// =============================================================================
// Clamping Bounds
// =============================================================================

pub const MIN_MARGIN_PX: f32 = 0.0;
pub const MAX_MARGIN_PX: f32 = 1000.0;

pub const MIN_ROW_HEIGHT_PX: f32 = 50.0;
pub const MAX_ROW_HEIGHT_PX: f32 = 4000.0;

pub const MIN_SPACING_PX: f32 = 0.0;
pub const MAX_SPACING_PX: f32 = 400.0;

pub const MIN_HEIGHT_TOLERANCE: f32 = 0.0;
pub const MAX_HEIGHT_TOLERANCE: f32 = 0.9;

pub const MIN_PAGE_SIDE_PX: u32 = 300;
pub const MAX_PAGE_SIDE_PX: u32 = 20_000;

/// Smallest content area side margins may leave behind
pub const MIN_CONTENT_SIDE_PX: f32 = 100.0;

pub const MIN_ASPECT_RATIO: f32 = 0.1;
pub const MAX_ASPECT_RATIO: f32 = 10.0;

// =============================================================================
// Geometry
// =============================================================================

/// Boxes whose tops differ by less than this share a row
pub const ROW_EPSILON_PX: f32 = 0.5;

/// Used when an asset has no usable dimensions
pub const FALLBACK_ASPECT_RATIO: f32 = 1.0;

/// Applied to videos whose container reports junk dimensions
pub const VIDEO_FALLBACK_ASPECT_RATIO: f32 = 16.0 / 9.0;

/// Video ratios outside this range are treated as junk
pub const VIDEO_SANE_ASPECT_RANGE: std::ops::RangeInclusive<f32> = 0.2..=5.0;

/// Side captions take this share of the box width
pub const CAPTION_SLOT_SHARE: f32 = 0.5;

// =============================================================================
// Gestures
// =============================================================================

/// Distance in pixels within which a drag snaps to its natural value or an edge
pub const SNAP_THRESHOLD_PX: f32 = 24.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_conversion() {
        assert_eq!(A4_PORTRAIT_PX, (mm_to_px(210.0), mm_to_px(297.0)));
        assert_eq!(A4_LANDSCAPE_PX, (mm_to_px(297.0), mm_to_px(210.0)));
        assert_eq!(LETTER_PORTRAIT_PX, (mm_to_px(215.9), mm_to_px(279.4)));
        assert_eq!(LETTER_LANDSCAPE_PX, (mm_to_px(279.4), mm_to_px(215.9)));
    }

    #[test]
    fn test_mm_to_px_rounds() {
        assert_eq!(mm_to_px(25.4), 300);
        assert_eq!(mm_to_px(0.0), 0);
        // 1mm = 11.81px
        assert_eq!(mm_to_px(1.0), 12);
    }

    #[test]
    fn test_px_round_trip() {
        assert!((px_to_mm(300.0) - 25.4).abs() < 0.001);
        assert!((px_to_pt(300.0) - 72.0).abs() < 0.001);
    }
}
