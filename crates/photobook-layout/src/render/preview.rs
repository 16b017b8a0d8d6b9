use super::RenderScale;
use crate::layout::{Page, Rect};
use crate::types::Asset;
use std::collections::HashMap;

/// One photo as drawn in the preview, in display units
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub asset_id: String,
    /// Whole box including any caption slot
    pub frame: Rect,
    pub image: Rect,
    /// Side-caption slot; overlay captions have none
    pub caption: Option<Rect>,
    pub caption_text: Option<String>,
    pub is_video: bool,
}

/// Drag handle along the bottom edge of a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowHandle {
    /// Index into `Page::rows`
    pub row: usize,
    pub y: f32,
    pub left: f32,
    pub right: f32,
    pub overridden: bool,
}

/// A page (or spread) ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPage {
    pub number: u32,
    pub label: String,
    pub width: f32,
    pub height: f32,
    pub frames: Vec<PreviewFrame>,
    pub row_handles: Vec<RowHandle>,
}

/// Convert computed pages to display units.
///
/// Boxes whose asset is missing from `assets` are still drawn, without
/// caption text.
pub fn preview_pages(pages: &[Page], assets: &[Asset], scale: RenderScale) -> Vec<PreviewPage> {
    let by_id: HashMap<&str, &Asset> = assets.iter().map(|a| (a.id.as_str(), a)).collect();
    pages
        .iter()
        .map(|page| preview_page(page, &by_id, scale))
        .collect()
}

fn preview_page(page: &Page, assets: &HashMap<&str, &Asset>, scale: RenderScale) -> PreviewPage {
    let frames = page
        .boxes
        .iter()
        .map(|photo| {
            let asset = assets.get(photo.asset_id.as_str());
            PreviewFrame {
                asset_id: photo.asset_id.clone(),
                frame: scale.rect(&photo.rect()),
                image: scale.rect(&photo.image_rect()),
                caption: photo.caption_rect().map(|r| scale.rect(&r)),
                caption_text: asset.and_then(|a| a.caption_text()).map(str::to_string),
                is_video: asset.is_some_and(|a| a.is_video()),
            }
        })
        .collect();

    let row_handles = page
        .rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let members = page.boxes.get(row.boxes.clone())?;
            let left = members.iter().map(|b| b.x).reduce(f32::min)?;
            let right = members.iter().map(|b| b.right()).reduce(f32::max)?;
            Some(RowHandle {
                row: index,
                y: scale.length(row.y + row.height),
                left: scale.length(left),
                right: scale.length(right),
                overridden: row.height_override.is_some(),
            })
        })
        .collect();

    PreviewPage {
        number: page.number,
        label: page_label(page),
        width: scale.length(page.width),
        height: scale.length(page.height),
        frames,
        row_handles,
    }
}

/// "Page 3" for a single page, "Pages 3-4" for a full spread
pub fn page_label(page: &Page) -> String {
    match page.logical_pages.as_slice() {
        [first, .., last] => format!("Pages {}-{}", first, last),
        [only] => format!("Page {}", only),
        [] => format!("Page {}", page.number),
    }
}
