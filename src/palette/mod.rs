//! Candidate palette and spatial index construction
//!
//! This module contains the offline half of the matcher:
//! - Candidate catalog entries
//! - Balanced k-d tree construction
//! - Flattening into the pointer-free form the engine loads

/// Balanced k-d tree construction
pub mod builder;
/// Candidate catalog entries
pub mod candidate;
/// Pointer-free serialization of the tree
pub mod flatten;

pub use builder::{ColorNode, build_tree};
pub use candidate::CandidateColor;
pub use flatten::{FlatTree, NodeRecord, flatten_tree, reconstruct_tree};
