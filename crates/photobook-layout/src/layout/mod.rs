//! Layout calculation modules
//!
//! This module handles all the geometric calculations for a photobook:
//! - Aspect-ratio resolution and customizations (which ratio goes to the packer)
//! - Justified row packing into one continuous strip
//! - Pagination, row reconstruction and row-height overrides
//! - Per-page alignment and spread combination

mod align;
mod aspect;
mod packer;
mod paginate;
mod spread;
mod types;

pub use align::*;
pub use aspect::*;
pub use packer::*;
pub use paginate::*;
pub use spread::*;
pub use types::*;
