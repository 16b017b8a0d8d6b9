use crate::constants::*;
use crate::types::*;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Asset identifier used as the key of every customization map
pub type AssetId = String;

/// Layout configuration: page/layout settings plus per-album customizations
///
/// Every field has a default, so partial records deserialize cleanly and
/// unknown keys are ignored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    // Page
    pub page: PageTarget,
    pub margin_px: f32,

    // Rows
    pub row_height_px: f32,
    pub spacing_px: f32,
    pub height_tolerance: f32,

    // Presentation
    pub combine_spreads: bool,
    pub caption_position: CaptionPosition,

    // Customizations (per album)
    pub aspect_overrides: BTreeMap<AssetId, f32>,
    pub caption_positions: BTreeMap<AssetId, CaptionPosition>,
    pub manual_order: Vec<AssetId>,
    /// Keyed by the id of the first asset in the row
    pub row_height_overrides: BTreeMap<AssetId, f32>,
    /// Keyed by logical (single) page number, starting at 1
    pub page_alignments: BTreeMap<u32, Alignment>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageTarget::default(),
            margin_px: DEFAULT_MARGIN_PX,
            row_height_px: DEFAULT_ROW_HEIGHT_PX,
            spacing_px: DEFAULT_SPACING_PX,
            height_tolerance: DEFAULT_HEIGHT_TOLERANCE,
            combine_spreads: false,
            caption_position: CaptionPosition::Overlay,
            aspect_overrides: BTreeMap::new(),
            caption_positions: BTreeMap::new(),
            manual_order: Vec::new(),
            row_height_overrides: BTreeMap::new(),
            page_alignments: BTreeMap::new(),
        }
    }
}

/// Keys of `LayoutConfig` that belong to an album and never to the global defaults
pub const CUSTOMIZATION_KEYS: [&str; 5] = [
    "aspect_overrides",
    "caption_positions",
    "manual_order",
    "row_height_overrides",
    "page_alignments",
];

impl LayoutConfig {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: LayoutConfig = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config.clamped())
    }

    /// Load options from a JSON file, starting from the defaults when it does not exist yet
    #[cfg(feature = "serde")]
    pub async fn load_or_default(path: impl AsRef<std::path::Path>) -> Result<Self> {
        match Self::load(path.as_ref()).await {
            Err(LayoutError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.as_ref().display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save options to JSON file (the clamped values are what get written)
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.clamped())
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page size in pixels (width, height)
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.page.dimensions_px();
        (w as f32, h as f32)
    }

    /// Content area size in pixels (width, height)
    pub fn content_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.page_dimensions();
        (w - 2.0 * self.margin_px, h - 2.0 * self.margin_px)
    }

    /// Caption position for an asset, falling back to the album default
    pub fn caption_position_for(&self, asset_id: &str) -> CaptionPosition {
        self.caption_positions
            .get(asset_id)
            .copied()
            .unwrap_or(self.caption_position)
    }

    /// Alignment of a logical page
    pub fn alignment_for(&self, page_number: u32) -> Alignment {
        self.page_alignments
            .get(&page_number)
            .copied()
            .unwrap_or_default()
    }

    /// The same settings with every customization map emptied
    pub fn without_customizations(&self) -> Self {
        Self {
            aspect_overrides: BTreeMap::new(),
            caption_positions: BTreeMap::new(),
            manual_order: Vec::new(),
            row_height_overrides: BTreeMap::new(),
            page_alignments: BTreeMap::new(),
            ..self.clone()
        }
    }

    /// Return a copy with every numeric value clamped into its allowed range.
    ///
    /// Non-finite values fall back to the defaults. Margins are additionally
    /// limited so the content area keeps at least `MIN_CONTENT_SIDE_PX` per side,
    /// and row heights (overrides included) never exceed the content height.
    pub fn clamped(&self) -> Self {
        let page = match self.page {
            PageTarget::Custom {
                width_px,
                height_px,
            } => PageTarget::Custom {
                width_px: width_px.clamp(MIN_PAGE_SIDE_PX, MAX_PAGE_SIDE_PX),
                height_px: height_px.clamp(MIN_PAGE_SIDE_PX, MAX_PAGE_SIDE_PX),
            },
            paper => paper,
        };

        let (page_w, page_h) = page.dimensions_px();
        let max_margin = ((page_w.min(page_h) as f32 - MIN_CONTENT_SIDE_PX) / 2.0)
            .floor()
            .min(MAX_MARGIN_PX)
            .max(MIN_MARGIN_PX);

        let margin_px = clamp_finite(self.margin_px, MIN_MARGIN_PX, max_margin, DEFAULT_MARGIN_PX);
        // A row never outgrows the content area
        let max_row_height = (page_h as f32 - 2.0 * margin_px)
            .min(MAX_ROW_HEIGHT_PX)
            .max(MIN_ROW_HEIGHT_PX);
        let row_height_px = clamp_finite(
            self.row_height_px,
            MIN_ROW_HEIGHT_PX,
            max_row_height,
            DEFAULT_ROW_HEIGHT_PX,
        );
        let spacing_px = clamp_finite(
            self.spacing_px,
            MIN_SPACING_PX,
            MAX_SPACING_PX,
            DEFAULT_SPACING_PX,
        );
        let height_tolerance = clamp_finite(
            self.height_tolerance,
            MIN_HEIGHT_TOLERANCE,
            MAX_HEIGHT_TOLERANCE,
            DEFAULT_HEIGHT_TOLERANCE,
        );

        if margin_px != self.margin_px || row_height_px != self.row_height_px {
            log::warn!(
                "Clamped layout values: margin {} -> {}, row height {} -> {}",
                self.margin_px,
                margin_px,
                self.row_height_px,
                row_height_px
            );
        }

        let aspect_overrides = self
            .aspect_overrides
            .iter()
            .filter(|(_, ratio)| ratio.is_finite() && **ratio > 0.0)
            .map(|(id, ratio)| (id.clone(), ratio.clamp(MIN_ASPECT_RATIO, MAX_ASPECT_RATIO)))
            .collect();

        let row_height_overrides = self
            .row_height_overrides
            .iter()
            .filter(|(_, height)| height.is_finite())
            .map(|(id, height)| {
                (
                    id.clone(),
                    height.clamp(MIN_ROW_HEIGHT_PX, max_row_height),
                )
            })
            .collect();

        let page_alignments = self
            .page_alignments
            .iter()
            .filter(|(page_number, _)| **page_number > 0)
            .map(|(page_number, alignment)| (*page_number, *alignment))
            .collect();

        Self {
            page,
            margin_px,
            row_height_px,
            spacing_px,
            height_tolerance,
            aspect_overrides,
            row_height_overrides,
            page_alignments,
            ..self.clone()
        }
    }

    /// Validate the options
    ///
    /// Rejects a content area without positive size and a row height the
    /// content area cannot hold. A `clamped()` config always passes.
    pub fn validate(&self) -> Result<()> {
        let (content_w, content_h) = self.content_dimensions();
        if !(content_w > 0.0 && content_h > 0.0) {
            return Err(LayoutError::Config(format!(
                "Margin {}px leaves no content area on a {:?} page",
                self.margin_px,
                self.page.dimensions_px()
            )));
        }

        if !(self.row_height_px > 0.0) {
            return Err(LayoutError::Config(
                "Row height must be positive".to_string(),
            ));
        }

        if self.row_height_px > content_h {
            return Err(LayoutError::Config(format!(
                "Row height {}px exceeds the {}px content height",
                self.row_height_px, content_h
            )));
        }

        if self.spacing_px < 0.0 {
            return Err(LayoutError::Config(
                "Spacing must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.clamped(), config);
    }

    #[test]
    fn test_margin_clamped_to_leave_content() {
        let config = LayoutConfig {
            page: PageTarget::Custom {
                width_px: 1000,
                height_px: 600,
            },
            margin_px: 400.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let clamped = config.clamped();
        assert_eq!(clamped.margin_px, 250.0);
        let (w, h) = clamped.content_dimensions();
        assert!(w >= MIN_CONTENT_SIDE_PX && h >= MIN_CONTENT_SIDE_PX);
        assert!(clamped.validate().is_ok());
    }

    #[test]
    fn test_non_finite_values_fall_back() {
        let config = LayoutConfig {
            row_height_px: f32::NAN,
            spacing_px: -5.0,
            ..Default::default()
        };
        let clamped = config.clamped();
        assert_eq!(clamped.row_height_px, DEFAULT_ROW_HEIGHT_PX);
        assert_eq!(clamped.spacing_px, 0.0);
    }

    #[test]
    fn test_invalid_overrides_are_dropped_or_clamped() {
        let mut config = LayoutConfig::default();
        config.aspect_overrides.insert("zero".into(), 0.0);
        config.aspect_overrides.insert("huge".into(), 50.0);
        config.page_alignments.insert(0, Alignment::Right);

        let clamped = config.clamped();
        assert!(!clamped.aspect_overrides.contains_key("zero"));
        assert_eq!(clamped.aspect_overrides["huge"], MAX_ASPECT_RATIO);
        assert!(clamped.page_alignments.is_empty());
    }

    #[test]
    fn test_row_heights_capped_at_content_height() {
        let mut config = LayoutConfig {
            row_height_px: 2500.0,
            ..Default::default()
        };
        config.row_height_overrides.insert("a".into(), 3000.0);
        config.row_height_overrides.insert("b".into(), 400.0);

        // Default page is 2000px tall with 100px margins
        let clamped = config.clamped();
        assert_eq!(clamped.row_height_px, 1800.0);
        assert_eq!(clamped.row_height_overrides["a"], 1800.0);
        assert_eq!(clamped.row_height_overrides["b"], 400.0);
    }

    #[test]
    fn test_caption_position_fallback() {
        let mut config = LayoutConfig::default();
        config
            .caption_positions
            .insert("a".into(), CaptionPosition::Left);
        assert_eq!(config.caption_position_for("a"), CaptionPosition::Left);
        assert_eq!(config.caption_position_for("b"), CaptionPosition::Overlay);
    }
}
