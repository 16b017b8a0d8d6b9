//! Spread combination
//!
//! Joins consecutive logical pages into double-width spreads for dual-page
//! print layouts. A trailing odd page becomes a spread of its own.

use super::Page;

/// Merge pages pairwise into spreads.
///
/// Pages `(2k+1, 2k+2)` become spread `k+1`. The right page's boxes are
/// shifted by one page width and its rows re-indexed after the left page's
/// boxes. A trailing odd page keeps its boxes unshifted but still reports
/// double width.
///
/// The two halves can hold rows at the same `y`, so a spread's stored rows
/// are authoritative. Rebuilding rows from positions only works per half.
pub fn combine_spreads(pages: Vec<Page>) -> Vec<Page> {
    let mut spreads = Vec::with_capacity(pages.len().div_ceil(2));
    let mut pages = pages.into_iter();

    while let Some(mut left) = pages.next() {
        let page_width = left.width;
        let number = spreads.len() as u32 + 1;

        if let Some(right) = pages.next() {
            let offset = left.boxes.len();
            left.boxes.extend(right.boxes.into_iter().map(|mut photo| {
                photo.x += page_width;
                photo
            }));
            left.rows.extend(right.rows.into_iter().map(|mut row| {
                row.boxes = row.boxes.start + offset..row.boxes.end + offset;
                row
            }));
            left.logical_pages.extend(right.logical_pages);
        }

        left.number = number;
        left.width = page_width * 2.0;
        left.is_spread = true;
        spreads.push(left);
    }

    spreads
}
