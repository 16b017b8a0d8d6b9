//! PDF proof export
//!
//! Each page becomes one PDF page of the same physical size. Photos are drawn
//! as outlined frames (videos get a diagonal) with their captions set in a
//! builtin font. Image pixels are not embedded.

use super::RenderScale;
use crate::constants::px_to_mm;
use crate::layout::{Page, Rect};
use crate::types::*;
use printpdf::{
    BuiltinFont, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt,
    TextItem,
};
use std::collections::HashMap;
use std::path::Path;

const FRAME_STROKE_PT: f32 = 0.5;
const CAPTION_FONT_PT: f32 = 9.0;
const CAPTION_PADDING_PT: f32 = 4.0;
/// Rough Helvetica advance as a share of the font size
const AVERAGE_GLYPH_WIDTH: f32 = 0.5;

/// Write a PDF proof of `pages` to `output_path`
pub async fn export_pdf(
    pages: &[Page],
    assets: &[Asset],
    title: &str,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let pages = pages.to_vec();
    let assets = assets.to_vec();
    let title = title.to_string();
    let output_path = output_path.as_ref().to_owned();

    let bytes =
        tokio::task::spawn_blocking(move || export_pdf_bytes(&pages, &assets, &title)).await??;

    tokio::fs::write(&output_path, bytes).await?;
    log::info!("Exported proof to {}", output_path.display());

    Ok(())
}

/// Build the PDF proof in memory
pub fn export_pdf_bytes(pages: &[Page], assets: &[Asset], title: &str) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(LayoutError::Pdf("nothing to export".to_string()));
    }

    let by_id: HashMap<&str, &Asset> = assets.iter().map(|a| (a.id.as_str(), a)).collect();
    let scale = RenderScale::points();
    let mut doc = PdfDocument::new(title);

    for page in pages {
        let page_height_pt = scale.length(page.height);
        let mut ops = vec![Op::SetOutlineThickness {
            pt: Pt(FRAME_STROKE_PT),
        }];

        for photo in &page.boxes {
            let asset = by_id.get(photo.asset_id.as_str());
            let image = scale.rect(&photo.image_rect());
            ops.push(outline(&image, page_height_pt));
            if asset.is_some_and(|a| a.is_video()) {
                ops.push(diagonal(&image, page_height_pt));
            }

            let Some(text) = asset.and_then(|a| a.caption_text()) else {
                continue;
            };
            // Side captions fill their slot; overlay captions sit inside the image
            let text_area = match photo.caption_rect() {
                Some(slot) => scale.rect(&slot),
                None => image,
            };
            ops.extend(caption_ops(text, &text_area, page_height_pt));
        }

        log::debug!("Exporting page {} with {} frames", page.number, page.boxes.len());
        doc.pages.push(PdfPage::new(
            Mm(px_to_mm(page.width)),
            Mm(px_to_mm(page.height)),
            ops,
        ));
    }

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::debug!("PDF writer reported {} warnings", warnings.len());
    }

    Ok(bytes)
}

/// PDF space has a bottom-left origin
fn pdf_point(x: f32, y: f32, page_height_pt: f32) -> LinePoint {
    LinePoint {
        p: Point {
            x: Pt(x),
            y: Pt(page_height_pt - y),
        },
        bezier: false,
    }
}

fn outline(rect: &Rect, page_height_pt: f32) -> Op {
    Op::DrawLine {
        line: Line {
            points: vec![
                pdf_point(rect.x, rect.y, page_height_pt),
                pdf_point(rect.right(), rect.y, page_height_pt),
                pdf_point(rect.right(), rect.bottom(), page_height_pt),
                pdf_point(rect.x, rect.bottom(), page_height_pt),
            ],
            is_closed: true,
        },
    }
}

fn diagonal(rect: &Rect, page_height_pt: f32) -> Op {
    Op::DrawLine {
        line: Line {
            points: vec![
                pdf_point(rect.x, rect.bottom(), page_height_pt),
                pdf_point(rect.right(), rect.y, page_height_pt),
            ],
            is_closed: false,
        },
    }
}

fn caption_ops(text: &str, area: &Rect, page_height_pt: f32) -> Vec<Op> {
    let line_height = CAPTION_FONT_PT * 1.2;
    let usable_width = (area.width - 2.0 * CAPTION_PADDING_PT).max(0.0);
    let max_chars = (usable_width / (CAPTION_FONT_PT * AVERAGE_GLYPH_WIDTH)).floor() as usize;
    let max_lines = ((area.height - 2.0 * CAPTION_PADDING_PT) / line_height).floor() as usize;

    let lines = wrap_caption(text, max_chars);
    if lines.is_empty() || max_lines == 0 {
        return Vec::new();
    }

    let mut ops = vec![Op::StartTextSection];
    for (i, line) in lines.into_iter().take(max_lines).enumerate() {
        let baseline = area.y + CAPTION_PADDING_PT + CAPTION_FONT_PT + i as f32 * line_height;
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(area.x + CAPTION_PADDING_PT),
                y: Pt(page_height_pt - baseline),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(CAPTION_FONT_PT),
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(line)],
            font: BuiltinFont::Helvetica,
        });
    }
    ops.push(Op::EndTextSection);
    ops
}

/// Greedy word wrap to at most `max_chars` per line.
///
/// Words longer than a line are hard-split.
pub fn wrap_caption(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current.chars().count() + 1 + word.len()
        };
        if needed > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
