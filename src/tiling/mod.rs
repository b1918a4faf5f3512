//! Source image reduction into per-tile average colors

/// Grid cell color averaging
pub mod average;

pub use average::{TileColor, TileGrid, average_tiles};
