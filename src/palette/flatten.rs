//! Tree flattening into pointer-free record arrays
//!
//! Converts the hierarchical color tree into the array-of-records form the
//! numeric engine consumes: child references become dense integer indices
//! with `-1` for absent subtrees, and identifier strings are replaced by
//! integer ids into a de-duplicated table. A node receives its index after
//! both child walks return, so children always sit below their parent and
//! the root holds the highest index.

use crate::io::configuration::ABSENT;
use crate::io::error::{Result, invalid_parameter};
use crate::palette::builder::ColorNode;
use std::collections::HashMap;

/// One flattened tree node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeRecord {
    /// The node's point in color space
    pub avg: [f32; 3],
    /// Index of the left child, `-1` when absent
    pub left: i32,
    /// Index of the right child, `-1` when absent
    pub right: i32,
    /// Split axis (0 = R, 1 = G, 2 = B)
    pub axis: i32,
    /// Index into the identifier table, `-1` when the node has no payload
    pub payload_id: i32,
}

/// Flattened tree plus its identifier table
///
/// `identifiers` is ordered by `payload_id`; identical identifier strings
/// across nodes share one entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatTree {
    /// Records addressed by dense index `0..n-1`
    pub nodes: Vec<NodeRecord>,
    /// Index of the entry node, `-1` for an empty tree
    pub root_index: i32,
    /// De-duplicated identifier strings indexed by `payload_id`
    pub identifiers: Vec<String>,
}

impl FlatTree {
    /// Number of flattened nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds no candidates
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Flatten a hierarchical tree into record arrays
///
/// An absent root produces an empty `FlatTree` with `root_index == -1`.
pub fn flatten_tree(root: Option<&ColorNode>) -> FlatTree {
    let mut tree = FlatTree::default();
    let mut seen = HashMap::new();

    tree.root_index = root.map_or(ABSENT, |node| flatten_node(node, &mut tree, &mut seen));
    tree
}

fn flatten_node(node: &ColorNode, tree: &mut FlatTree, seen: &mut HashMap<String, i32>) -> i32 {
    let left = node
        .left
        .as_deref()
        .map_or(ABSENT, |child| flatten_node(child, tree, seen));
    let right = node
        .right
        .as_deref()
        .map_or(ABSENT, |child| flatten_node(child, tree, seen));

    let payload_id = node.identifier.as_ref().map_or(ABSENT, |identifier| {
        if let Some(&id) = seen.get(identifier) {
            id
        } else {
            let id = tree.identifiers.len() as i32;
            tree.identifiers.push(identifier.clone());
            seen.insert(identifier.clone(), id);
            id
        }
    });

    let index = tree.nodes.len() as i32;
    tree.nodes.push(NodeRecord {
        avg: node.avg,
        left,
        right,
        axis: node.axis as i32,
        payload_id,
    });
    index
}

/// Rebuild the hierarchical tree from its flattened form
///
/// Used to validate that flattening preserves every node's color,
/// identifier, and parent/child relationship.
///
/// # Errors
///
/// Returns an error if a child or root reference points outside the node
/// array, if a payload id points outside the identifier table, or if the
/// reference structure is not a tree (a record reachable twice).
pub fn reconstruct_tree(tree: &FlatTree) -> Result<Option<ColorNode>> {
    if tree.root_index == ABSENT {
        return Ok(None);
    }

    let mut budget = tree.nodes.len();
    reconstruct_node(tree, tree.root_index, &mut budget).map(Some)
}

fn reconstruct_node(tree: &FlatTree, index: i32, budget: &mut usize) -> Result<ColorNode> {
    // A budget underrun means more visits than records exist: a cycle or
    // shared subtree, either way not a tree.
    *budget = budget.checked_sub(1).ok_or_else(|| {
        invalid_parameter("nodes", &index, &"reference structure is not a tree")
    })?;

    let record = usize::try_from(index)
        .ok()
        .and_then(|i| tree.nodes.get(i))
        .ok_or_else(|| invalid_parameter("node index", &index, &"outside the node array"))?;

    let identifier = if record.payload_id == ABSENT {
        None
    } else {
        let found = usize::try_from(record.payload_id)
            .ok()
            .and_then(|id| tree.identifiers.get(id))
            .cloned();
        Some(found.ok_or_else(|| {
            invalid_parameter(
                "payload id",
                &record.payload_id,
                &"outside the identifier table",
            )
        })?)
    };

    let left = if record.left == ABSENT {
        None
    } else {
        Some(Box::new(reconstruct_node(tree, record.left, budget)?))
    };
    let right = if record.right == ABSENT {
        None
    } else {
        Some(Box::new(reconstruct_node(tree, record.right, budget)?))
    };

    Ok(ColorNode {
        avg: record.avg,
        identifier,
        axis: record.axis as usize,
        left,
        right,
    })
}
