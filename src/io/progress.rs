//! Batch progress tracking for mosaic generation runs
//!
//! Switches between individual per-file bars (small batches) and a single
//! batch bar (large batches) to avoid terminal spam.

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Files: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for batch operations
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    current_file: Option<ProgressBar>,
    individual_bars: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            current_file: None,
            individual_bars: true,
        }
    }

    /// Initialize progress display based on file count
    pub fn initialize(&mut self, file_count: usize) {
        // Switch to batch mode for large file sets to avoid terminal spam
        self.individual_bars = file_count <= MAX_INDIVIDUAL_PROGRESS_BARS;
        if !self.individual_bars {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Begin display for a new file
    pub fn start_file(&mut self, path: &Path) {
        if !self.individual_bars {
            return;
        }

        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let bar = ProgressBar::new_spinner();
        bar.set_style(FILE_STYLE.clone());
        bar.set_message(display_name);
        self.current_file = Some(self.multi_progress.add(bar));
    }

    /// Mark the current file as completed
    pub fn complete_file(&mut self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(bar) = self.current_file.take() {
            let name = bar.message();
            bar.finish_with_message(format!("✓ {name}"));
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}
