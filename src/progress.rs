//! Progress tracking for pairing runs.
//!
//! Provides the run state machine, structured progress display, and the
//! callback trait the pipeline reports through.

use std::fmt;
use std::io::{self, Write};
use std::time::Instant;

use crate::pair::PairReport;

/// Stages of a pairing run.
///
/// A run moves strictly forward: Idle → Cataloging → Matching →
/// Materializing → CleaningUp → Done. A failure while materializing halts
/// the run without reaching CleaningUp or Done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingStage {
    /// Not started
    #[default]
    Idle,
    /// Indexing clean images by identifier
    Cataloging,
    /// Joining noisy images against the catalog
    Matching,
    /// Copying pairs and consuming sources
    Materializing,
    /// Removing drained source directories
    CleaningUp,
    /// Completed
    Done,
}

impl PairingStage {
    /// Get the name of the stage
    pub fn name(&self) -> &'static str {
        match self {
            PairingStage::Idle => "Idle",
            PairingStage::Cataloging => "Cataloging",
            PairingStage::Matching => "Matching",
            PairingStage::Materializing => "Materializing",
            PairingStage::CleaningUp => "CleaningUp",
            PairingStage::Done => "Done",
        }
    }
}

impl fmt::Display for PairingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// No output
    Quiet,
    /// Normal output (stage display only)
    #[default]
    Normal,
    /// Verbose output (per-pair progress)
    Verbose,
    /// Very verbose (all items displayed)
    VeryVerbose,
}

impl OutputMode {
    /// Create OutputMode from verbosity level
    pub fn from_verbosity(level: u8) -> Self {
        match level {
            0 => OutputMode::Normal,
            1 => OutputMode::Verbose,
            _ => OutputMode::VeryVerbose,
        }
    }

    /// Check if output should be shown at this mode
    pub fn should_show(&self, required: OutputMode) -> bool {
        use OutputMode::*;
        match (self, required) {
            (Quiet, _) => false,
            (Normal, Quiet | Normal) => true,
            (Verbose, Quiet | Normal | Verbose) => true,
            (VeryVerbose, _) => true,
            _ => false,
        }
    }
}

/// Progress bar width in characters
const PROGRESS_BAR_WIDTH: usize = 40;

/// Build a progress bar string
pub fn build_progress_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = (percent as usize * PROGRESS_BAR_WIDTH) / 100;
    let empty = PROGRESS_BAR_WIDTH - filled;
    format!("[{}{}]", "=".repeat(filled), "-".repeat(empty))
}

// ============================================================
// Progress Callback
// ============================================================

/// Callback the pipeline reports progress through.
///
/// All methods default to no-ops so implementors pick what they need.
pub trait ProgressCallback {
    /// A stage has started
    fn on_stage_start(&self, _stage: PairingStage) {}

    /// A stage has finished, with a short result message
    fn on_stage_complete(&self, _stage: PairingStage, _message: &str) {}

    /// Per-pair progress inside the materializing stage
    fn on_step_progress(&self, _current: usize, _total: usize) {}

    /// Diagnostic detail
    fn on_debug(&self, _message: &str) {}
}

/// Callback that swallows all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {}

// ============================================================
// Progress Tracker
// ============================================================

/// Progress tracker for a pairing run
#[derive(Debug)]
pub struct ProgressTracker {
    /// Current stage
    pub current_stage: PairingStage,
    /// Pairs materialized so far
    pub pairs_done: usize,
    /// Total pairs to materialize
    pub total_pairs: usize,
    /// Start time
    start_time: Instant,
    /// Output mode
    output_mode: OutputMode,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(OutputMode::Normal)
    }
}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new(output_mode: OutputMode) -> Self {
        Self {
            current_stage: PairingStage::Idle,
            pairs_done: 0,
            total_pairs: 0,
            start_time: Instant::now(),
            output_mode,
        }
    }

    /// Enter a new stage
    pub fn set_stage(&mut self, stage: PairingStage) {
        self.current_stage = stage;
        self.pairs_done = 0;

        if self.output_mode.should_show(OutputMode::Normal) {
            println!("  Stage: {}", self.current_stage);
        }
    }

    /// Update per-pair progress
    pub fn update_pair(&mut self, done: usize, total: usize) {
        self.pairs_done = done;
        self.total_pairs = total;

        if self.output_mode.should_show(OutputMode::Verbose) {
            self.print_progress();
        }
    }

    /// Mark the run as complete
    pub fn complete(&mut self) {
        self.current_stage = PairingStage::Done;

        if self.output_mode.should_show(OutputMode::Normal) {
            let elapsed = self.start_time.elapsed();
            println!("  Completed in {:.2}s", elapsed.as_secs_f64());
        }
    }

    /// Get elapsed time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Print per-pair progress
    fn print_progress(&self) {
        if self.total_pairs > 0 && self.current_stage == PairingStage::Materializing {
            let percent = ((self.pairs_done as f64 / self.total_pairs as f64) * 100.0) as u8;
            let bar = build_progress_bar(percent);
            print!(
                "\r    {} {:3}% ({}/{})",
                bar, percent, self.pairs_done, self.total_pairs
            );
            let _ = io::stdout().flush();
            if self.pairs_done == self.total_pairs {
                println!();
            }
        }
    }

    /// Print final summary
    pub fn print_summary(report: &PairReport) {
        println!();
        println!("{}", "=".repeat(80));
        println!("Pairing Summary");
        println!("{}", "=".repeat(80));
        println!("  Pairs created:   {}", report.pairs);
        println!("  Unmatched noisy: {}", report.unmatched);
        println!("  Clean indexed:   {}", report.catalog_size);
        if report.start_index > 1 {
            println!("  Resumed at:      {}", report.start_index);
        }
        println!(
            "  Clean source:    {}",
            if report.clean_dir_removed {
                "removed"
            } else {
                "left in place"
            }
        );
        println!(
            "  Noisy source:    {}",
            if report.noisy_dir_removed {
                "removed"
            } else {
                "left in place"
            }
        );
        println!("{}", "=".repeat(80));
        println!();
    }
}
