//! Tile color averaging over a fixed-size grid
//!
//! Reduces an RGBA pixel buffer to one average color per grid cell. Only
//! pixels with nonzero alpha contribute; a cell with no contributing pixels
//! is flagged empty so the result mapper can substitute the placeholder.

use crate::io::error::{Result, invalid_parameter};
use image::RgbaImage;
use ndarray::Array2;

/// Average color of one grid cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileColor {
    /// Mean R, G, B over contributing pixels, each in [0, 255]
    pub avg: [f32; 3],
    /// True when no pixel in the cell had nonzero alpha
    pub empty: bool,
}

impl TileColor {
    const BLANK: Self = Self {
        avg: [0.0; 3],
        empty: true,
    };
}

/// Row-major grid of per-cell average colors for one source image
///
/// Recomputed per image and discarded after matching; the matching engine
/// never retains it.
#[derive(Clone, Debug)]
pub struct TileGrid {
    cells: Array2<TileColor>,
}

impl TileGrid {
    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of grid columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Total cell count (`cols * rows`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the source image was smaller than one tile
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at the given grid position
    pub fn get(&self, row: usize, col: usize) -> Option<&TileColor> {
        self.cells.get((row, col))
    }

    /// Iterate cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &TileColor> {
        self.cells.iter()
    }
}

/// Reduce an image to per-cell average colors
///
/// Grid dimensions are `floor(width / tile_size)` by
/// `floor(height / tile_size)`; trailing partial rows and columns are
/// dropped. An image smaller than one tile yields an empty grid, which the
/// caller must treat as a valid (empty) result.
///
/// # Errors
///
/// Returns an error if `tile_size` is zero.
pub fn average_tiles(image: &RgbaImage, tile_size: u32) -> Result<TileGrid> {
    if tile_size == 0 {
        return Err(invalid_parameter(
            "tile_size",
            &tile_size,
            &"tile size must be positive",
        ));
    }

    let cols = (image.width() / tile_size) as usize;
    let rows = (image.height() / tile_size) as usize;

    let mut sums = Array2::<[f64; 3]>::from_elem((rows, cols), [0.0; 3]);
    let mut counts = Array2::<u32>::zeros((rows, cols));

    for (x, y, pixel) in image.enumerate_pixels() {
        let row = (y / tile_size) as usize;
        let col = (x / tile_size) as usize;
        if row >= rows || col >= cols {
            continue;
        }

        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }

        if let Some(sum) = sums.get_mut((row, col)) {
            sum[0] += f64::from(r);
            sum[1] += f64::from(g);
            sum[2] += f64::from(b);
        }
        if let Some(count) = counts.get_mut((row, col)) {
            *count += 1;
        }
    }

    let cells = Array2::from_shape_fn((rows, cols), |position| {
        let count = counts.get(position).copied().unwrap_or(0);
        if count == 0 {
            return TileColor::BLANK;
        }

        let sum = sums.get(position).copied().unwrap_or([0.0; 3]);
        TileColor {
            avg: [
                (sum[0] / f64::from(count)) as f32,
                (sum[1] / f64::from(count)) as f32,
                (sum[2] / f64::from(count)) as f32,
            ],
            empty: false,
        }
    });

    Ok(TileGrid { cells })
}
