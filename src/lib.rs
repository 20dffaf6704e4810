//! pairset - dataset pairing utility
//!
//! Couples clean and noisy image files by a shared identifier,
//! deduplicates shared references, renames matched pairs into a dense
//! sequential index, and deletes the originals once no longer referenced.
//!
//! # Modules
//!
//! - [`pair`] - catalog, matcher, materializer and the run pipeline
//! - [`journal`] - opt-in resume journal for interrupted runs
//! - [`rename`] - numeric-name prefixing pass for downstream loaders
//! - [`config`] - TOML config with CLI override merging
//! - [`progress`] - run state machine and progress display
//! - [`cli`] - clap command definitions

pub mod cli;
pub mod config;
pub mod journal;
pub mod pair;
pub mod progress;
pub mod rename;

// Re-export public API
pub use cli::{Cli, Commands, PairArgs, RenameArgs};
pub use config::{CliOverrides, Config, ConfigError, PairingConfig};
pub use journal::PairJournal;
pub use pair::{
    is_image_file, list_image_files, match_pairs, pair_key, Catalog, CollisionPolicy, ImagePair,
    MatchSet, Materializer, PairDirs, PairError, PairOptions, PairOptionsBuilder, PairPipeline,
    PairReport, IMAGE_EXTENSIONS, OUTPUT_EXTENSION,
};
pub use progress::{
    build_progress_bar, NoopProgress, OutputMode, PairingStage, ProgressCallback, ProgressTracker,
};
pub use rename::{prefix_numbered_files, Rename, RenameReport};

/// Process exit codes
pub mod exit_codes {
    /// Successful completion
    pub const SUCCESS: i32 = 0;
    /// Unspecified failure
    pub const GENERAL_ERROR: i32 = 1;
    /// A source directory does not exist
    pub const INPUT_NOT_FOUND: i32 = 2;
}
