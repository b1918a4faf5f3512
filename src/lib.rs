//! Emoji mosaic generation via k-d tree color matching
//!
//! The system reduces a source image to one average color per fixed-size
//! tile, matches each tile against a candidate palette through a
//! pointer-free k-d tree engine, and maps the results back to glyph
//! identifiers for rendering.

#![forbid(unsafe_code)]

/// Nearest-neighbor query engine over flattened node arrays
pub mod engine;
/// Input/output operations and error handling
pub mod io;
/// Pipeline orchestration and result mapping
pub mod mosaic;
/// Candidate palette and spatial index construction
pub mod palette;
/// Source image tile averaging
pub mod tiling;

pub use io::error::{MosaicError, Result};
