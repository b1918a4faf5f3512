//! Balanced k-d tree construction over the candidate palette
//!
//! Runs once per catalog, offline or at startup. The split axis cycles
//! R → G → B with depth; each level partitions the remaining points around
//! the median along that axis and emits the median as the node's own point.
//! Coordinate ties break by input order, so construction is deterministic
//! for a given catalog.

use crate::io::configuration::COLOR_AXES;
use crate::palette::candidate::CandidateColor;

/// Node of the hierarchical color tree
///
/// Strict binary tree; every node carries exactly one point. Trees built
/// from a catalog always carry an identifier, while trees read from the
/// persisted format may omit it.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorNode {
    /// The node's own point in color space
    pub avg: [f32; 3],
    /// Candidate identifier payload, if any
    pub identifier: Option<String>,
    /// Split axis (0 = R, 1 = G, 2 = B)
    pub axis: usize,
    /// Subtree of points below the split plane
    pub left: Option<Box<ColorNode>>,
    /// Subtree of points above the split plane
    pub right: Option<Box<ColorNode>>,
}

/// Build a balanced tree over the candidate set
///
/// Returns `None` for an empty catalog; the query engine treats the absent
/// tree as "every query resolves to the sentinel".
pub fn build_tree(candidates: impl IntoIterator<Item = CandidateColor>) -> Option<ColorNode> {
    let points: Vec<(usize, CandidateColor)> = candidates.into_iter().enumerate().collect();
    build_level(points, 0).map(|node| *node)
}

fn build_level(mut points: Vec<(usize, CandidateColor)>, depth: usize) -> Option<Box<ColorNode>> {
    if points.is_empty() {
        return None;
    }

    let axis = depth % COLOR_AXES;
    points.sort_unstable_by(|a, b| {
        let coord_a = a.1.avg.get(axis).copied().unwrap_or(0.0);
        let coord_b = b.1.avg.get(axis).copied().unwrap_or(0.0);
        coord_a.total_cmp(&coord_b).then(a.0.cmp(&b.0))
    });

    let median = points.len() / 2;
    let upper = points.split_off(median + 1);
    let (_, point) = points.pop()?;

    Some(Box::new(ColorNode {
        avg: point.avg,
        identifier: Some(point.identifier),
        axis,
        left: build_level(points, depth + 1),
        right: build_level(upper, depth + 1),
    }))
}
