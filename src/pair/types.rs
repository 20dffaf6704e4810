//! Core types for the pairing module

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// File extensions considered image files (matched case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Extension given to every materialized output file, regardless of the
/// source extension. The bytes are copied unchanged; this is a rename,
/// not a format conversion.
pub const OUTPUT_EXTENSION: &str = "jpg";

// ============================================================
// Error Types
// ============================================================

/// Pairing error types
#[derive(Debug, Error)]
pub enum PairError {
    #[error("Source directory not found: {0}")]
    SourceDirMissing(PathBuf),

    #[error("Duplicate identifier \"{key}\": {existing} and {incoming}")]
    DuplicateKey {
        key: String,
        existing: PathBuf,
        incoming: PathBuf,
    },

    #[error("Copy failed ({from} -> {to}): {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Delete failed ({path}): {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Journal error: {0}")]
    Journal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PairError>;

// ============================================================
// Core Data Structures
// ============================================================

/// What to do when two clean files share an identifier.
///
/// `Overwrite` keeps the last file encountered during catalog
/// construction, matching the historical behavior; `Reject` treats a
/// duplicate as an input error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Last entry wins
    #[default]
    Overwrite,
    /// Fail on duplicate identifiers
    Reject,
}

/// The four directories a pairing run operates on.
///
/// Sources must exist; outputs are created on demand.
#[derive(Debug, Clone)]
pub struct PairDirs {
    /// Clean (ground-truth) image source
    pub clean_src: PathBuf,
    /// Noisy (degraded) image source
    pub noisy_src: PathBuf,
    /// Destination for indexed clean images
    pub clean_out: PathBuf,
    /// Destination for indexed noisy images
    pub noisy_out: PathBuf,
}

/// One matched (noisy, clean) pair, in match order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub noisy: PathBuf,
    pub clean: PathBuf,
}

/// Ordered pair list plus per-clean-path reference counts.
///
/// The sum of all reference counts equals `pairs.len()`.
#[derive(Debug, Default)]
pub struct MatchSet {
    /// Matched pairs, in match order
    pub pairs: Vec<ImagePair>,
    /// Pairs still depending on each clean path
    pub ref_counts: HashMap<PathBuf, usize>,
    /// Noisy files without a clean counterpart
    pub unmatched: usize,
}

/// Result of a completed pairing run
#[derive(Debug, Clone)]
pub struct PairReport {
    /// Pairs materialized by this run
    pub pairs: usize,
    /// Noisy files skipped for lack of a catalog match
    pub unmatched: usize,
    /// Clean images indexed by the catalog
    pub catalog_size: usize,
    /// Index assigned to the first pair (above 1 when resuming)
    pub start_index: usize,
    /// Whether the drained clean source directory could be removed
    pub clean_dir_removed: bool,
    /// Whether the drained noisy source directory could be removed
    pub noisy_dir_removed: bool,
    /// Wall-clock run time
    pub elapsed_seconds: f64,
}

// ============================================================
// Options
// ============================================================

/// Options for a pairing run
#[derive(Debug, Clone, Serialize)]
pub struct PairOptions {
    /// Catalog collision policy
    pub collision: CollisionPolicy,
    /// Sort directory entries by filename before processing
    pub sort_entries: bool,
    /// Maintain a resume journal in the noisy output directory
    pub journal: bool,
}

impl Default for PairOptions {
    fn default() -> Self {
        Self {
            collision: CollisionPolicy::Overwrite,
            sort_entries: true,
            journal: false,
        }
    }
}

impl PairOptions {
    /// Create a builder
    pub fn builder() -> PairOptionsBuilder {
        PairOptionsBuilder::default()
    }

    /// Options matching the historical script: last-write-wins catalog,
    /// raw enumeration order, no journal.
    pub fn compat() -> Self {
        Self {
            collision: CollisionPolicy::Overwrite,
            sort_entries: false,
            journal: false,
        }
    }

    /// Canonical JSON form, used for the journal digest
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Builder for PairOptions
#[derive(Debug, Default)]
pub struct PairOptionsBuilder {
    options: PairOptions,
}

impl PairOptionsBuilder {
    /// Set the catalog collision policy
    #[must_use]
    pub fn collision(mut self, policy: CollisionPolicy) -> Self {
        self.options.collision = policy;
        self
    }

    /// Enable or disable filename sorting
    #[must_use]
    pub fn sort_entries(mut self, sort: bool) -> Self {
        self.options.sort_entries = sort;
        self
    }

    /// Enable or disable the resume journal
    #[must_use]
    pub fn journal(mut self, journal: bool) -> Self {
        self.options.journal = journal;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> PairOptions {
        self.options
    }
}
