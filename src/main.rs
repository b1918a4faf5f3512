//! CLI entry point for the emoji mosaic generator

use clap::Parser;
use emojitile::io::cli::{Cli, FileProcessor};

fn main() -> emojitile::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
