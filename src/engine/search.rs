//! Branch-and-bound nearest-neighbor descent over the flat node arrays
//!
//! Distances stay squared end to end; the square root is never needed
//! because only comparisons matter, for the running best and for the
//! plane-distance pruning test alike.

use crate::io::configuration::ABSENT;

/// Borrowed view over the engine's node storage
///
/// Keeps the recursive search free of `self` so the caller can hold a
/// mutable borrow of the result array at the same time.
pub(crate) struct NodeArrays<'a> {
    pub r: &'a [f32],
    pub g: &'a [f32],
    pub b: &'a [f32],
    pub left: &'a [i32],
    pub right: &'a [i32],
    pub axis: &'a [i32],
    pub payload: &'a [i32],
}

/// Running best match for one query
pub(crate) struct Nearest {
    pub payload: i32,
    pub distance_sq: f32,
}

impl Nearest {
    pub(crate) const fn unmatched() -> Self {
        Self {
            payload: ABSENT,
            distance_sq: f32::INFINITY,
        }
    }
}

/// Descend the subtree rooted at `index`, updating `best` in place
///
/// The child on the query's side of the split plane is visited first; the
/// far child is visited only when the squared plane distance undercuts the
/// current best. Updates require strict improvement, so on an exact
/// distance tie the first-visited node wins. An absent child (`-1`) is an
/// empty subtree; the same applies to any reference outside the arrays.
pub(crate) fn descend(nodes: &NodeArrays<'_>, index: i32, query: [f32; 3], best: &mut Nearest) {
    let Ok(slot) = usize::try_from(index) else {
        return;
    };
    let (Some(&r), Some(&g), Some(&b)) = (
        nodes.r.get(slot),
        nodes.g.get(slot),
        nodes.b.get(slot),
    ) else {
        return;
    };

    let dr = query[0] - r;
    let dg = query[1] - g;
    let db = query[2] - b;
    let distance_sq = dr * dr + dg * dg + db * db;
    if distance_sq < best.distance_sq {
        best.distance_sq = distance_sq;
        best.payload = nodes.payload.get(slot).copied().unwrap_or(ABSENT);
    }

    let axis = nodes.axis.get(slot).copied().unwrap_or(0);
    let plane = match axis {
        1 => query[1] - g,
        2 => query[2] - b,
        _ => query[0] - r,
    };

    let left = nodes.left.get(slot).copied().unwrap_or(ABSENT);
    let right = nodes.right.get(slot).copied().unwrap_or(ABSENT);
    let (near, far) = if plane < 0.0 { (left, right) } else { (right, left) };

    descend(nodes, near, query, best);
    if plane * plane < best.distance_sq {
        descend(nodes, far, query, best);
    }
}
