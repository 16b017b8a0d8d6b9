//! Justified row packing
//!
//! The packer turns a sequence of aspect ratios into boxes arranged in rows
//! that fill a fixed width, stacked in one continuous vertical strip. It
//! knows nothing about pages; the paginator slices the strip afterwards.

use super::PackedBox;

/// Parameters for one packing run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackingParams {
    /// Width every full row is justified to
    pub row_width: f32,
    /// Preferred row height
    pub target_height: f32,
    /// Gap between items in a row and between rows
    pub spacing: f32,
    /// Allowed relative deviation from `target_height` before a shorter row is preferred
    pub tolerance: f32,
    /// Tallest row allowed, usually the content height of a page
    pub max_height: f32,
}

/// Anything that can pack aspect ratios into a continuous strip.
///
/// Implementations must be deterministic: identical inputs always produce
/// identical boxes, one per input ratio, in input order.
pub trait RowPacker {
    fn pack(&self, aspect_ratios: &[f32], params: &PackingParams) -> Vec<PackedBox>;
}

/// Greedy justified packer.
///
/// # Algorithm
/// 1. Add items to the open row at the target height until the row would
///    reach the full width.
/// 2. Justify the row by solving for the height that makes it exactly fill
///    the width. If that height is outside the tolerance band and dropping the
///    last item gives a height closer to the target, close the row without it.
/// 3. The final incomplete row keeps the target height and is not stretched.
/// 4. No row is taller than `max_height`. A row capped there keeps its
///    aspect ratios and stays narrower than the full width.
#[derive(Debug, Clone, Copy, Default)]
pub struct JustifiedPacker;

impl RowPacker for JustifiedPacker {
    fn pack(&self, aspect_ratios: &[f32], params: &PackingParams) -> Vec<PackedBox> {
        let mut boxes = Vec::with_capacity(aspect_ratios.len());
        if aspect_ratios.is_empty() || params.row_width <= 0.0 || params.target_height <= 0.0 {
            return boxes;
        }

        let mut top = 0.0f32;
        let mut row: Vec<f32> = Vec::new();
        let mut ratio_sum = 0.0f32;

        for &ratio in aspect_ratios {
            let ratio = if ratio.is_finite() && ratio > 0.0 {
                ratio
            } else {
                1.0
            };
            row.push(ratio);
            ratio_sum += ratio;

            let gaps = params.spacing * (row.len() - 1) as f32;
            if ratio_sum * params.target_height + gaps < params.row_width {
                continue;
            }

            let fit_height = justified_height(params.row_width, gaps, ratio_sum);
            let min_height = params.target_height * (1.0 - params.tolerance);

            if fit_height < min_height && row.len() > 1 {
                let prev_sum = ratio_sum - ratio;
                let prev_gaps = params.spacing * (row.len() - 2) as f32;
                let prev_height = justified_height(params.row_width, prev_gaps, prev_sum);

                if (prev_height - params.target_height).abs()
                    < (fit_height - params.target_height).abs()
                {
                    row.pop();
                    top = emit_capped(&mut boxes, &row, top, prev_height, params, true);
                    row.clear();
                    row.push(ratio);
                    ratio_sum = ratio;
                    continue;
                }
            }

            top = emit_capped(&mut boxes, &row, top, fit_height, params, true);
            row.clear();
            ratio_sum = 0.0;
        }

        if !row.is_empty() {
            // The trailing row may still be wider than the strip if a single
            // item was pushed back from the previous row; fall back to justifying it.
            let gaps = params.spacing * (row.len() - 1) as f32;
            let natural_width = ratio_sum * params.target_height + gaps;
            if natural_width > params.row_width {
                let height = justified_height(params.row_width, gaps, ratio_sum);
                emit_capped(&mut boxes, &row, top, height, params, true);
            } else {
                emit_capped(&mut boxes, &row, top, params.target_height, params, false);
            }
        }

        boxes
    }
}

fn justified_height(row_width: f32, gaps: f32, ratio_sum: f32) -> f32 {
    ((row_width - gaps) / ratio_sum).max(1.0)
}

/// Emit a row, lowering it to `max_height` and dropping justification if needed
fn emit_capped(
    boxes: &mut Vec<PackedBox>,
    ratios: &[f32],
    top: f32,
    height: f32,
    params: &PackingParams,
    justify: bool,
) -> f32 {
    let max_height = params.max_height.max(1.0);
    if height > max_height {
        emit_row(boxes, ratios, top, max_height, params, false)
    } else {
        emit_row(boxes, ratios, top, height, params, justify)
    }
}

/// Lay out one row at `height`, returning the top of the next row.
///
/// Justified rows pin the last item's right edge to the strip width so
/// float error never pushes a box past it.
fn emit_row(
    boxes: &mut Vec<PackedBox>,
    ratios: &[f32],
    top: f32,
    height: f32,
    params: &PackingParams,
    justify: bool,
) -> f32 {
    let mut left = 0.0f32;
    let last = ratios.len().saturating_sub(1);

    for (i, ratio) in ratios.iter().enumerate() {
        let mut width = ratio * height;
        if i == last && justify {
            width = (params.row_width - left).max(1.0);
        } else if left + width > params.row_width {
            width = (params.row_width - left).max(1.0);
        }

        boxes.push(PackedBox {
            top,
            left,
            width,
            height,
        });
        left += width + params.spacing;
    }

    top + height + params.spacing
}
