//! Flat-array query engine with a declare/populate/process protocol
//!
//! Mirrors a numeric-only execution environment: all state is fixed-size
//! arrays of floats and integers, declared up front and written by index.
//! The protocol is declare → populate → process, enforced here rather than
//! trusted to the caller: every write is validated against its declared
//! capacity, the root cannot be set while node slots remain unwritten, and
//! a batch cannot run until every declared slot has been populated.

use crate::engine::search::{Nearest, NodeArrays, descend};
use crate::io::configuration::ABSENT;
use crate::io::error::{MosaicError, Result, engine_state};
use bitvec::prelude::*;

/// Pre-allocated nearest-neighbor engine
///
/// Node storage is process-wide, single-writer state: only the load path
/// mutates it, and a reload fully replaces it. Tile storage is per-batch
/// and redeclared for every image. Queries allocate nothing; the search
/// recursion uses the call stack only.
#[derive(Clone, Debug, Default)]
pub struct MatchEngine {
    node_r: Vec<f32>,
    node_g: Vec<f32>,
    node_b: Vec<f32>,
    node_left: Vec<i32>,
    node_right: Vec<i32>,
    node_axis: Vec<i32>,
    node_payload: Vec<i32>,
    node_written: BitVec,
    root_index: i32,
    root_set: bool,

    tile_r: Vec<f32>,
    tile_g: Vec<f32>,
    tile_b: Vec<f32>,
    tile_written: BitVec,

    results: Vec<i32>,
    processed: bool,
}

impl MatchEngine {
    /// Create an engine with no declared capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare node storage for `count` records
    ///
    /// Replaces any previously loaded tree: all node slots become
    /// unwritten, the root is cleared, and pending results are invalidated.
    pub fn declare_node_capacity(&mut self, count: usize) {
        self.node_r = vec![0.0; count];
        self.node_g = vec![0.0; count];
        self.node_b = vec![0.0; count];
        self.node_left = vec![ABSENT; count];
        self.node_right = vec![ABSENT; count];
        self.node_axis = vec![0; count];
        self.node_payload = vec![ABSENT; count];
        self.node_written = bitvec![0; count];
        self.root_index = ABSENT;
        self.root_set = false;
        self.processed = false;
    }

    /// Number of declared node slots
    pub fn node_capacity(&self) -> usize {
        self.node_written.len()
    }

    /// Write one node record at its index
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::Capacity`] if `index` is beyond the declared
    /// node capacity.
    pub fn write_node(
        &mut self,
        index: usize,
        r: f32,
        g: f32,
        b: f32,
        left: i32,
        right: i32,
        axis: i32,
        payload_id: i32,
    ) -> Result<()> {
        if index >= self.node_capacity() {
            return Err(MosaicError::Capacity {
                what: "node",
                index,
                capacity: self.node_capacity(),
            });
        }

        if let Some(slot) = self.node_r.get_mut(index) {
            *slot = r;
        }
        if let Some(slot) = self.node_g.get_mut(index) {
            *slot = g;
        }
        if let Some(slot) = self.node_b.get_mut(index) {
            *slot = b;
        }
        if let Some(slot) = self.node_left.get_mut(index) {
            *slot = left;
        }
        if let Some(slot) = self.node_right.get_mut(index) {
            *slot = right;
        }
        if let Some(slot) = self.node_axis.get_mut(index) {
            *slot = axis;
        }
        if let Some(slot) = self.node_payload.get_mut(index) {
            *slot = payload_id;
        }
        self.node_written.set(index, true);
        self.processed = false;
        Ok(())
    }

    /// Set the entry node index
    ///
    /// For a zero-node tree the only accepted root is the sentinel `-1`.
    ///
    /// # Errors
    ///
    /// Returns an error if node slots remain unwritten, or if the index is
    /// outside the declared node array.
    pub fn set_root(&mut self, index: i32) -> Result<()> {
        let unwritten = self.node_capacity() - self.node_written.count_ones();
        if unwritten > 0 {
            return Err(engine_state(
                "set_root",
                &format!("{unwritten} node slots are still unwritten"),
            ));
        }

        if self.node_capacity() == 0 {
            if index != ABSENT {
                return Err(engine_state("set_root", &"no nodes declared"));
            }
        } else {
            let slot = usize::try_from(index)
                .ok()
                .filter(|&i| i < self.node_capacity());
            if slot.is_none() {
                return Err(engine_state(
                    "set_root",
                    &format!("root {index} does not reference a declared node"),
                ));
            }
        }

        self.root_index = index;
        self.root_set = true;
        Ok(())
    }

    /// True once the tree is fully written and the root is set
    pub fn is_ready(&self) -> bool {
        self.root_set && self.node_written.count_ones() == self.node_capacity()
    }

    /// Declare tile storage for `count` queries
    ///
    /// Discards the previous batch entirely; results from it must not be
    /// read afterwards.
    pub fn declare_tile_capacity(&mut self, count: usize) {
        self.tile_r = vec![0.0; count];
        self.tile_g = vec![0.0; count];
        self.tile_b = vec![0.0; count];
        self.tile_written = bitvec![0; count];
        self.results = vec![ABSENT; count];
        self.processed = false;
    }

    /// Number of declared tile slots
    pub fn tile_capacity(&self) -> usize {
        self.tile_written.len()
    }

    /// Write one query color at its index
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::Capacity`] if `index` is beyond the declared
    /// tile capacity.
    pub fn write_tile_color(&mut self, index: usize, r: f32, g: f32, b: f32) -> Result<()> {
        if index >= self.tile_capacity() {
            return Err(MosaicError::Capacity {
                what: "tile",
                index,
                capacity: self.tile_capacity(),
            });
        }

        if let Some(slot) = self.tile_r.get_mut(index) {
            *slot = r;
        }
        if let Some(slot) = self.tile_g.get_mut(index) {
            *slot = g;
        }
        if let Some(slot) = self.tile_b.get_mut(index) {
            *slot = b;
        }
        self.tile_written.set(index, true);
        self.processed = false;
        Ok(())
    }

    /// Run the declared batch, one query per tile in input order
    ///
    /// A zero-node tree is not an error: every result becomes the sentinel
    /// `-1`. On exact distance ties the first-visited side of the tree
    /// wins; this is deterministic but arbitrary, and downstream code must
    /// not rely on which of the tied candidates is returned.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EngineState`] if the root has not been set or
    /// if any declared node or tile slot remains unwritten. A rejected
    /// batch leaves no readable results.
    pub fn run_queries(&mut self) -> Result<()> {
        self.processed = false;

        if !self.root_set {
            return Err(engine_state("run_queries", &"root index not set"));
        }
        let unwritten_nodes = self.node_capacity() - self.node_written.count_ones();
        if unwritten_nodes > 0 {
            return Err(engine_state(
                "run_queries",
                &format!("{unwritten_nodes} node slots are still unwritten"),
            ));
        }
        let unwritten_tiles = self.tile_capacity() - self.tile_written.count_ones();
        if unwritten_tiles > 0 {
            return Err(engine_state(
                "run_queries",
                &format!("{unwritten_tiles} tile slots are still unwritten"),
            ));
        }

        let nodes = NodeArrays {
            r: &self.node_r,
            g: &self.node_g,
            b: &self.node_b,
            left: &self.node_left,
            right: &self.node_right,
            axis: &self.node_axis,
            payload: &self.node_payload,
        };
        let root = self.root_index;

        for (index, result) in self.results.iter_mut().enumerate() {
            let query = [
                self.tile_r.get(index).copied().unwrap_or(0.0),
                self.tile_g.get(index).copied().unwrap_or(0.0),
                self.tile_b.get(index).copied().unwrap_or(0.0),
            ];

            let mut best = Nearest::unmatched();
            descend(&nodes, root, query, &mut best);
            *result = best.payload;
        }

        self.processed = true;
        Ok(())
    }

    /// Read the payload id matched for one tile
    ///
    /// # Errors
    ///
    /// Returns an error if no batch has run since the last declare or
    /// write, or if `index` is beyond the declared tile capacity.
    pub fn read_result(&self, index: usize) -> Result<i32> {
        if !self.processed {
            return Err(engine_state("read_result", &"no processed batch"));
        }
        self.results
            .get(index)
            .copied()
            .ok_or(MosaicError::Capacity {
                what: "tile",
                index,
                capacity: self.tile_capacity(),
            })
    }

    /// All results of the processed batch, in tile input order
    ///
    /// # Errors
    ///
    /// Returns an error if no batch has run since the last declare or
    /// write.
    pub fn results(&self) -> Result<&[i32]> {
        if !self.processed {
            return Err(engine_state("results", &"no processed batch"));
        }
        Ok(&self.results)
    }

    /// Drop all declared state, returning to the unloaded condition
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
