pub mod assets;
mod compose;
pub mod constants;
pub mod gesture;
pub mod layout;
mod options;
pub mod render;
mod stats;
#[cfg(feature = "serde")]
pub mod store;
mod types;

pub use assets::load_assets;
pub use compose::{compute_layout, compute_layout_with};
pub use layout::{Page, PhotoBox, Row, RowPacker};
pub use options::*;
pub use render::{RenderScale, export_pdf, preview_pages};
pub use stats::calculate_statistics;
pub use types::*;
