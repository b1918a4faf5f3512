//! Command-line interface for batch mosaic generation from PNG files

use crate::io::catalog::{load_candidates_file, load_tree_file};
use crate::io::configuration::{DEFAULT_TILE_SIZE, DEFAULT_TREE_PATH, OUTPUT_SUFFIX};
use crate::io::error::{MosaicError, Result};
use crate::io::progress::ProgressManager;
use crate::mosaic::glyph::glyph_or_placeholder;
use crate::mosaic::mapper::{format_rows, map_results};
use crate::mosaic::pipeline::MosaicPipeline;
use crate::palette::builder::build_tree;
use crate::palette::flatten::flatten_tree;
use crate::tiling::average::average_tiles;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "emojitile")]
#[command(
    author,
    version,
    about = "Generate emoji mosaics via k-d tree color matching"
)]
/// Command-line arguments for the mosaic generation tool
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Persisted tree to load
    #[arg(short, long, default_value = DEFAULT_TREE_PATH)]
    pub tree: PathBuf,

    /// Build the tree at startup from a flat candidate catalog instead
    #[arg(short, long)]
    pub candidates: Option<PathBuf>,

    /// Edge length in pixels of one mosaic tile
    #[arg(short = 's', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Emit raw candidate identifiers instead of glyph characters
    #[arg(short, long)]
    pub identifiers: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch processing of PNG files against one loaded tree
pub struct FileProcessor {
    cli: Cli,
    pipeline: MosaicPipeline,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            pipeline: MosaicPipeline::new(),
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// The tree is loaded once before any image is touched; a load failure
    /// aborts the whole run with no file processed. A failure on one image
    /// aborts that image only, and the batch continues with the next file.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree or catalog cannot be loaded, or if
    /// target validation fails.
    // Allow print for user feedback for per-file failures
    #[allow(clippy::print_stderr)]
    pub fn process(&mut self) -> Result<()> {
        self.load_palette()?;

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            if let Err(error) = self.process_file(file) {
                eprintln!("Failed: {} ({error})", file.display());
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn load_palette(&mut self) -> Result<()> {
        let root = if let Some(ref candidates_path) = self.cli.candidates {
            build_tree(load_candidates_file(candidates_path)?)
        } else {
            Some(load_tree_file(&self.cli.tree)?)
        };

        let flat = flatten_tree(root.as_ref());
        self.pipeline.load_tree(&flat)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::io_error(
                    "Target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::io_error(
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let image = image::open(input_path)
            .map_err(|e| MosaicError::ImageLoad {
                path: input_path.to_path_buf(),
                source: e,
            })?
            .to_rgba8();

        let grid = average_tiles(&image, self.cli.tile_size)?;
        let results = self.pipeline.match_grid(&grid)?;
        let mapped = map_results(&grid, &results, self.pipeline.identifiers());

        let (cells, separator) = if self.cli.identifiers {
            (mapped, " ")
        } else {
            let glyphs: Vec<String> = mapped.iter().map(|id| glyph_or_placeholder(id)).collect();
            (glyphs, "")
        };
        let rows = format_rows(&cells, grid.cols(), separator);

        let output_path = Self::get_output_path(input_path);
        let contents = if rows.is_empty() {
            String::new()
        } else {
            rows.join("\n") + "\n"
        };
        std::fs::write(&output_path, contents).map_err(|e| MosaicError::FileSystem {
            path: output_path.clone(),
            operation: "write mosaic",
            source: e,
        })?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(())
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.txt", stem.to_string_lossy(), OUTPUT_SUFFIX);

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
