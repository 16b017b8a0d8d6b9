//! Aspect-ratio resolution and ordering
//!
//! This is where customizations enter the pipeline: manual ordering,
//! per-asset aspect-ratio overrides and side captions all change the
//! sequence of ratios handed to the row packer.

use crate::constants::*;
use crate::options::LayoutConfig;
use crate::types::{Asset, CaptionPosition};
use std::collections::{HashMap, HashSet};

use super::CaptionSide;

/// An asset with everything the packer and paginator need to know about it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAsset<'a> {
    pub asset: &'a Asset,
    /// Ratio handed to the packer (doubled for side captions)
    pub packing_aspect: f32,
    pub caption_side: Option<CaptionSide>,
}

/// Width/height ratio from the asset's own dimensions.
///
/// Honors the 90° rotation flag and falls back to 1.0 when a dimension
/// is unknown.
pub fn natural_aspect_ratio(asset: &Asset) -> f32 {
    let (width, height) = asset.oriented_dimensions();
    if width == 0 || height == 0 {
        return FALLBACK_ASPECT_RATIO;
    }

    let ratio = width as f32 / height as f32;
    if asset.is_video() && !VIDEO_SANE_ASPECT_RANGE.contains(&ratio) {
        return VIDEO_FALLBACK_ASPECT_RATIO;
    }
    ratio
}

/// Image aspect ratio: an explicit override wins over the natural ratio
pub fn resolve_aspect_ratio(asset: &Asset, config: &LayoutConfig) -> f32 {
    match config.aspect_overrides.get(&asset.id) {
        Some(&ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
        _ => natural_aspect_ratio(asset),
    }
}

/// Side of the box reserved for the caption, if the caption sits beside the image.
///
/// Assets without caption text never reserve a slot.
pub fn caption_side(asset: &Asset, config: &LayoutConfig) -> Option<CaptionSide> {
    asset.caption_text()?;
    match config.caption_position_for(&asset.id) {
        CaptionPosition::Overlay => None,
        CaptionPosition::Left => Some(CaptionSide::Left),
        CaptionPosition::Right => Some(CaptionSide::Right),
    }
}

/// Ratio used for packing: the image ratio, doubled when half of the box
/// goes to a side caption
pub fn packing_aspect_ratio(asset: &Asset, config: &LayoutConfig) -> f32 {
    let ratio = resolve_aspect_ratio(asset, config);
    match caption_side(asset, config) {
        Some(_) => ratio / (1.0 - CAPTION_SLOT_SHARE),
        None => ratio,
    }
}

/// Apply the manual order: listed ids first in list order, then every other
/// asset in its input order. Unknown and repeated ids are skipped.
pub fn order_assets<'a>(assets: &'a [Asset], manual_order: &[String]) -> Vec<&'a Asset> {
    if manual_order.is_empty() {
        return assets.iter().collect();
    }

    let by_id: HashMap<&str, &Asset> = assets.iter().map(|a| (a.id.as_str(), a)).collect();
    let mut placed: HashSet<&str> = HashSet::with_capacity(manual_order.len());
    let mut ordered = Vec::with_capacity(assets.len());

    for id in manual_order {
        if let Some(asset) = by_id.get(id.as_str()) {
            if placed.insert(asset.id.as_str()) {
                ordered.push(*asset);
            }
        }
    }

    ordered.extend(assets.iter().filter(|a| !placed.contains(a.id.as_str())));
    ordered
}

/// Order the assets and resolve every ratio the packer will see
pub fn resolve_assets<'a>(assets: &'a [Asset], config: &LayoutConfig) -> Vec<ResolvedAsset<'a>> {
    order_assets(assets, &config.manual_order)
        .into_iter()
        .map(|asset| ResolvedAsset {
            asset,
            packing_aspect: packing_aspect_ratio(asset, config),
            caption_side: caption_side(asset, config),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaKind;

    #[test]
    fn test_natural_ratio_and_rotation() {
        let asset = Asset::new("a", 4000, 2000);
        assert_eq!(natural_aspect_ratio(&asset), 2.0);
        let rotated = asset.with_rotation(true);
        assert_eq!(natural_aspect_ratio(&rotated), 0.5);
    }

    #[test]
    fn test_unknown_dimensions_fall_back_to_square() {
        assert_eq!(natural_aspect_ratio(&Asset::new("a", 0, 1200)), 1.0);
        assert_eq!(natural_aspect_ratio(&Asset::new("b", 1200, 0)), 1.0);
    }

    #[test]
    fn test_junk_video_dimensions() {
        let video = Asset::new("v", 10000, 100).with_kind(MediaKind::Video);
        assert_eq!(natural_aspect_ratio(&video), VIDEO_FALLBACK_ASPECT_RATIO);
        let image = Asset::new("i", 10000, 100);
        assert_eq!(natural_aspect_ratio(&image), 100.0);
    }

    #[test]
    fn test_override_wins() {
        let mut config = LayoutConfig::default();
        config.aspect_overrides.insert("a".into(), 1.5);
        assert_eq!(resolve_aspect_ratio(&Asset::new("a", 100, 100), &config), 1.5);
        assert_eq!(resolve_aspect_ratio(&Asset::new("b", 100, 100), &config), 1.0);
    }

    #[test]
    fn test_side_caption_doubles_ratio() {
        let mut config = LayoutConfig::default();
        config
            .caption_positions
            .insert("a".into(), CaptionPosition::Right);
        config
            .caption_positions
            .insert("b".into(), CaptionPosition::Left);

        let captioned = Asset::new("a", 300, 200).with_caption("Harbor");
        assert_eq!(packing_aspect_ratio(&captioned, &config), 3.0);
        assert_eq!(caption_side(&captioned, &config), Some(CaptionSide::Right));

        // No caption text: no slot is reserved
        let silent = Asset::new("b", 300, 200);
        assert_eq!(packing_aspect_ratio(&silent, &config), 1.5);
        assert_eq!(caption_side(&silent, &config), None);
    }

    #[test]
    fn test_overlay_caption_keeps_ratio() {
        let config = LayoutConfig::default();
        let asset = Asset::new("a", 300, 200).with_caption("Harbor");
        assert_eq!(packing_aspect_ratio(&asset, &config), 1.5);
    }

    #[test]
    fn test_manual_order() {
        let assets: Vec<Asset> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| Asset::new(*id, 1, 1))
            .collect();
        let order = vec!["c".to_string(), "missing".into(), "a".into(), "c".into()];

        let ids: Vec<&str> = order_assets(&assets, &order)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, ["c", "a", "b", "d"]);
    }
}
