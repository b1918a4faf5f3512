//! Persisted tree and candidate catalog loading
//!
//! The persisted tree is nested JSON records with optional `left`,
//! `right`, `point {avg, src}`, and `axis` fields. Any subset of fields
//! may be absent; absence means leaf, no payload, `avg = [0,0,0]`, and
//! `axis = 0` respectively. The loader applies those defaults rather than
//! failing, so trees written by older catalog generators keep loading.

use crate::io::error::{MosaicError, Result};
use crate::palette::builder::ColorNode;
use crate::palette::candidate::CandidateColor;
use serde::Deserialize;
use std::path::Path;

/// One node of the persisted tree format
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PersistedNode {
    /// Subtree below the split plane
    pub left: Option<Box<PersistedNode>>,
    /// Subtree above the split plane
    pub right: Option<Box<PersistedNode>>,
    /// The node's point, absent when the node carries no payload
    pub point: Option<PersistedPoint>,
    /// Split axis, defaulting to 0
    pub axis: Option<u32>,
}

/// Point payload of a persisted node
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PersistedPoint {
    /// Average color, defaulting to `[0, 0, 0]`
    pub avg: Option<[f32; 3]>,
    /// Candidate identifier, absent for payload-less points
    pub src: Option<String>,
}

impl PersistedNode {
    /// Convert into the hierarchical tree form, applying defaults
    pub fn into_color_node(self) -> ColorNode {
        let avg = self
            .point
            .as_ref()
            .and_then(|point| point.avg)
            .unwrap_or([0.0; 3]);
        let identifier = self.point.and_then(|point| point.src);

        ColorNode {
            avg,
            identifier,
            axis: self.axis.unwrap_or(0) as usize,
            left: self.left.map(|node| Box::new(node.into_color_node())),
            right: self.right.map(|node| Box::new(node.into_color_node())),
        }
    }
}

/// Load a persisted tree from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON for
/// the persisted format.
pub fn load_tree_file<P: AsRef<Path>>(path: P) -> Result<ColorNode> {
    let path_buf = path.as_ref().to_path_buf();
    let contents = std::fs::read_to_string(&path_buf).map_err(|e| MosaicError::FileSystem {
        path: path_buf.clone(),
        operation: "read tree",
        source: e,
    })?;

    let persisted: PersistedNode =
        serde_json::from_str(&contents).map_err(|e| MosaicError::CatalogLoad {
            path: path_buf,
            source: e,
        })?;

    Ok(persisted.into_color_node())
}

/// Load a flat candidate list from a JSON file
///
/// The list feeds the palette builder when no prebuilt tree is available.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid JSON
/// array of `{identifier, avg}` entries.
pub fn load_candidates_file<P: AsRef<Path>>(path: P) -> Result<Vec<CandidateColor>> {
    let path_buf = path.as_ref().to_path_buf();
    let contents = std::fs::read_to_string(&path_buf).map_err(|e| MosaicError::FileSystem {
        path: path_buf.clone(),
        operation: "read candidates",
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| MosaicError::CatalogLoad {
        path: path_buf,
        source: e,
    })
}
