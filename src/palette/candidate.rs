//! Candidate catalog entries

use serde::Deserialize;

/// One catalog entry eligible to represent a tile
///
/// Immutable once loaded. Duplicate colors are legitimate: a catalog may
/// carry several sprites with the same average, and each becomes its own
/// tree node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CandidateColor {
    /// Sprite identifier, e.g. `emoji_u1f602.svg`
    pub identifier: String,
    /// Mean R, G, B of the sprite, each in [0, 255]
    pub avg: [f32; 3],
}
