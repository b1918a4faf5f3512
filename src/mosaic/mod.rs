//! Pipeline orchestration and result mapping

/// Identifier to glyph character conversion
pub mod glyph;
/// Payload id to identifier mapping
pub mod mapper;
/// Process-wide matching pipeline
pub mod pipeline;

pub use glyph::{glyph_or_placeholder, identifier_to_glyph};
pub use mapper::{format_rows, map_results};
pub use pipeline::MosaicPipeline;
