//! Matching pipeline owning the engine and identifier table
//!
//! The pipeline is the process-wide context for matching: the engine's
//! node arrays and the identifier table are loaded once and reused across
//! many images. Loading fully replaces prior state; a failed load leaves
//! the pipeline unloaded rather than half-populated. Initialization and
//! query streams must be serialized by the caller into a single active
//! sequence at a time.

use crate::engine::MatchEngine;
use crate::io::error::{Result, engine_state};
use crate::palette::FlatTree;
use crate::tiling::TileGrid;

/// Process-wide matcher state with an explicit load/reset lifecycle
#[derive(Clone, Debug, Default)]
pub struct MosaicPipeline {
    engine: MatchEngine,
    identifiers: Vec<String>,
    loaded: bool,
}

impl MosaicPipeline {
    /// Create an unloaded pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a tree has been loaded and the engine is queryable
    pub fn is_loaded(&self) -> bool {
        self.loaded && self.engine.is_ready()
    }

    /// Identifier table of the loaded tree, indexed by payload id
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Load a flattened tree, replacing any previously loaded state
    ///
    /// Nodes are written in index order before the root is set, per the
    /// engine contract. A zero-node tree is valid and leaves the pipeline
    /// loaded; every subsequent query resolves to the sentinel.
    ///
    /// # Errors
    ///
    /// Returns an error if the flat tree violates the engine contract
    /// (out-of-range root). On error the pipeline is unloaded; no partial
    /// tree is left queryable.
    pub fn load_tree(&mut self, tree: &FlatTree) -> Result<()> {
        self.loaded = false;
        self.identifiers.clear();

        self.engine.declare_node_capacity(tree.nodes.len());
        for (index, record) in tree.nodes.iter().enumerate() {
            self.engine.write_node(
                index,
                record.avg[0],
                record.avg[1],
                record.avg[2],
                record.left,
                record.right,
                record.axis,
                record.payload_id,
            )?;
        }
        self.engine.set_root(tree.root_index)?;

        self.identifiers = tree.identifiers.clone();
        self.loaded = true;
        Ok(())
    }

    /// Match every tile of a grid, returning payload ids in row-major order
    ///
    /// An empty grid yields an empty result without touching the engine.
    /// Empty tiles are still queried; the mapper substitutes the
    /// placeholder for them based on the grid's empty flags.
    ///
    /// # Errors
    ///
    /// Returns an error if no tree is loaded.
    pub fn match_grid(&mut self, grid: &TileGrid) -> Result<Vec<i32>> {
        if !self.is_loaded() {
            return Err(engine_state("match_grid", &"no tree loaded"));
        }
        if grid.is_empty() {
            return Ok(Vec::new());
        }

        self.engine.declare_tile_capacity(grid.len());
        for (index, tile) in grid.iter().enumerate() {
            self.engine
                .write_tile_color(index, tile.avg[0], tile.avg[1], tile.avg[2])?;
        }
        self.engine.run_queries()?;

        Ok(self.engine.results()?.to_vec())
    }

    /// Drop all loaded state, returning to the unloaded condition
    pub fn reset(&mut self) {
        self.engine.reset();
        self.identifiers.clear();
        self.loaded = false;
    }
}
