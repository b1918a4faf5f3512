//! Result mapping from payload ids back to candidate identifiers

use crate::io::configuration::PLACEHOLDER_GLYPH;
use crate::tiling::TileGrid;

/// Translate engine results into identifier strings
///
/// Preserves tile row-major order and length. A tile that was flagged
/// empty, a sentinel result, and a payload id outside the identifier table
/// all map to the placeholder glyph.
pub fn map_results(grid: &TileGrid, results: &[i32], identifiers: &[String]) -> Vec<String> {
    grid.iter()
        .zip(results)
        .map(|(tile, &payload_id)| {
            if tile.empty {
                return PLACEHOLDER_GLYPH.to_string();
            }
            usize::try_from(payload_id)
                .ok()
                .and_then(|id| identifiers.get(id))
                .map_or_else(|| PLACEHOLDER_GLYPH.to_string(), Clone::clone)
        })
        .collect()
}

/// Group a row-major glyph sequence into per-row strings
///
/// `separator` goes between cells within a row; rows shorter than `cols`
/// cannot occur for well-formed input, and a zero `cols` yields no rows.
pub fn format_rows(glyphs: &[String], cols: usize, separator: &str) -> Vec<String> {
    if cols == 0 {
        return Vec::new();
    }
    glyphs.chunks(cols).map(|row| row.join(separator)).collect()
}
