//! Rendering of computed pages
//!
//! Both consumers read the same `Page` geometry and convert it through one
//! `RenderScale`:
//! - `preview` maps pixels to display units for an on-screen view
//! - `export` maps pixels to points and writes a PDF proof

mod export;
mod preview;
mod scale;

pub use export::{export_pdf, export_pdf_bytes, wrap_caption};
pub use preview::*;
pub use scale::RenderScale;
