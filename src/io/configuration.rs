//! Matching constants and runtime configuration defaults

/// Sentinel index denoting an absent child or an unmatched result
pub const ABSENT: i32 = -1;

/// Glyph substituted for empty tiles and unmatched queries
pub const PLACEHOLDER_GLYPH: &str = "⬜";

/// Number of coordinate axes in the color space (R, G, B)
pub const COLOR_AXES: usize = 3;

// Default values for configurable parameters
/// Edge length in pixels of one mosaic tile
pub const DEFAULT_TILE_SIZE: u32 = 8;

/// Default location of the persisted tree
pub const DEFAULT_TREE_PATH: &str = "kd_tree.json";

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;
