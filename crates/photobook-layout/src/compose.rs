//! Photobook composition - turning assets into pages
//!
//! This module orchestrates the layout pipeline:
//! 1. Clamp the configuration so a result is always possible
//! 2. Order assets and resolve packing aspect ratios
//! 3. Pack ratios into justified rows
//! 4. Paginate, regroup rows and apply row-height overrides
//! 5. Align each logical page
//! 6. Optionally combine pages into spreads
//!
//! The whole pipeline is a pure function of (assets, config).

use crate::layout::{
    JustifiedPacker, Page, PackingParams, PageGeometry, RowPacker, align_pages, combine_spreads,
    paginate, resolve_assets,
};
use crate::options::LayoutConfig;
use crate::types::Asset;

/// Compute pages with the built-in justified packer
pub fn compute_layout(assets: &[Asset], config: &LayoutConfig) -> Vec<Page> {
    compute_layout_with(&JustifiedPacker, assets, config)
}

/// Compute pages with a caller-supplied row packer
pub fn compute_layout_with<P: RowPacker + ?Sized>(
    packer: &P,
    assets: &[Asset],
    config: &LayoutConfig,
) -> Vec<Page> {
    if assets.is_empty() {
        return Vec::new();
    }

    let config = config.clamped();
    let geometry = PageGeometry::from_config(&config);

    let resolved = resolve_assets(assets, &config);
    let ratios: Vec<f32> = resolved.iter().map(|r| r.packing_aspect).collect();

    let params = PackingParams {
        row_width: geometry.content_width(),
        target_height: config.row_height_px,
        spacing: config.spacing_px,
        tolerance: config.height_tolerance,
        max_height: geometry.content_height(),
    };
    let packed = packer.pack(&ratios, &params);
    if packed.len() != resolved.len() {
        log::warn!(
            "Row packer returned {} boxes for {} assets; extra items are not placed",
            packed.len(),
            resolved.len()
        );
    }

    let mut pages = paginate(&resolved, &packed, &geometry, &config.row_height_overrides);
    align_pages(&mut pages, &geometry, |number| config.alignment_for(number));

    let pages = if config.combine_spreads {
        combine_spreads(pages)
    } else {
        pages
    };

    log::info!(
        "Laid out {} assets on {} {}",
        assets.len(),
        pages.len(),
        if config.combine_spreads { "spreads" } else { "pages" }
    );

    pages
}
