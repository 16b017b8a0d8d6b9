use crate::layout::{Page, caption_side};
use crate::options::LayoutConfig;
use crate::types::*;
use std::collections::HashSet;

/// Calculate statistics for a computed layout
pub fn calculate_statistics(
    assets: &[Asset],
    pages: &[Page],
    config: &LayoutConfig,
) -> LayoutStatistics {
    let logical_pages = pages.iter().map(|p| p.logical_pages.len()).sum();

    let rows: Vec<f32> = pages
        .iter()
        .flat_map(|p| p.rows.iter().map(|r| r.height))
        .collect();
    let average_row_height_px = if rows.is_empty() {
        0.0
    } else {
        rows.iter().sum::<f32>() / rows.len() as f32
    };

    let known: HashSet<&str> = assets.iter().map(|a| a.id.as_str()).collect();
    let customized: HashSet<&str> = config
        .aspect_overrides
        .keys()
        .chain(config.caption_positions.keys())
        .chain(config.row_height_overrides.keys())
        .map(String::as_str)
        .filter(|id| known.contains(id))
        .collect();

    let side_captions = assets
        .iter()
        .filter(|a| caption_side(a, config).is_some())
        .count();

    LayoutStatistics {
        assets: assets.len(),
        logical_pages,
        output_pages: pages.len(),
        rows: rows.len(),
        average_row_height_px,
        customized_assets: customized.len(),
        side_captions,
    }
}
