//! Pairing module
//!
//! Couples clean and noisy image files by identifier and materializes
//! them as a densely indexed dataset, consuming the originals.
//!
//! # Stages
//!
//! - **Catalog** ([`Catalog`]) - index the clean directory by pairing key
//! - **Match** ([`match_pairs`]) - join the noisy directory against the catalog
//! - **Materialize** ([`Materializer`]) - copy each pair as `{index}.jpg` and
//!   delete the sources as their reference counts drain
//! - **Cleanup** - remove the drained source directories, tolerating failure
//!
//! # Example
//!
//! ```rust,no_run
//! use pairset::{PairDirs, PairOptions, PairPipeline};
//! use std::path::PathBuf;
//!
//! let pipeline = PairPipeline::new(PairOptions::default());
//! let report = pipeline.run(&PairDirs {
//!     clean_src: PathBuf::from("clean"),
//!     noisy_src: PathBuf::from("noisy"),
//!     clean_out: PathBuf::from("clean_output"),
//!     noisy_out: PathBuf::from("noisy_output"),
//! }).unwrap();
//!
//! println!("{} pairs created", report.pairs);
//! ```

mod catalog;
mod key;
mod matcher;
mod materialize;
mod types;

// Re-export public API
pub use catalog::{is_image_file, list_image_files, Catalog};
pub use key::pair_key;
pub use matcher::match_pairs;
pub use materialize::Materializer;
pub use types::{
    CollisionPolicy, ImagePair, MatchSet, PairDirs, PairError, PairOptions, PairOptionsBuilder,
    PairReport, Result, IMAGE_EXTENSIONS, OUTPUT_EXTENSION,
};

use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::journal::PairJournal;
use crate::progress::{NoopProgress, PairingStage, ProgressCallback};

/// Orchestrates a full pairing run: validate → catalog → match →
/// materialize → cleanup.
///
/// The run is synchronous and single-threaded; one pair is fully
/// processed before the next begins. The catalog and reference counts
/// live only for the duration of the run.
#[derive(Debug)]
pub struct PairPipeline {
    options: PairOptions,
}

impl PairPipeline {
    /// Create a pipeline with the given options
    pub fn new(options: PairOptions) -> Self {
        Self { options }
    }

    /// Access the effective options
    pub fn options(&self) -> &PairOptions {
        &self.options
    }

    /// Run the full pipeline without progress reporting.
    pub fn run(&self, dirs: &PairDirs) -> Result<PairReport> {
        self.run_with_progress(dirs, &NoopProgress)
    }

    /// Run the full pipeline, reporting through `progress`.
    ///
    /// Fatal errors (missing source directory, copy/delete failures,
    /// journal conflicts) abort the run; pairs materialized before the
    /// failure point stay in place. Cleanup failures are logged and never
    /// escalated.
    pub fn run_with_progress(
        &self,
        dirs: &PairDirs,
        progress: &dyn ProgressCallback,
    ) -> Result<PairReport> {
        let started = Instant::now();

        for dir in [&dirs.clean_src, &dirs.noisy_src] {
            if !dir.is_dir() {
                return Err(PairError::SourceDirMissing(dir.clone()));
            }
        }
        fs::create_dir_all(&dirs.clean_out)?;
        fs::create_dir_all(&dirs.noisy_out)?;

        progress.on_stage_start(PairingStage::Cataloging);
        info!(dir = %dirs.clean_src.display(), "cataloging clean images");
        let catalog = Catalog::build(
            &dirs.clean_src,
            self.options.collision,
            self.options.sort_entries,
        )?;
        progress.on_stage_complete(
            PairingStage::Cataloging,
            &format!("{} clean images indexed", catalog.len()),
        );

        progress.on_stage_start(PairingStage::Matching);
        info!(dir = %dirs.noisy_src.display(), "matching noisy images");
        let mut matches = match_pairs(&dirs.noisy_src, &catalog, self.options.sort_entries)?;
        progress.on_stage_complete(
            PairingStage::Matching,
            &format!("{} pairs, {} unmatched", matches.pairs.len(), matches.unmatched),
        );

        let mut journal = if self.options.journal {
            Some(PairJournal::open_or_create(dirs, &self.options.to_json())?)
        } else {
            None
        };
        let start_index = journal.as_ref().map_or(1, PairJournal::next_index);
        if start_index > 1 {
            info!(start_index, "resuming from journal");
            progress.on_debug(&format!("journal present, resuming at index {start_index}"));
        }

        progress.on_stage_start(PairingStage::Materializing);
        let materializer =
            Materializer::new(&dirs.clean_out, &dirs.noisy_out).with_start_index(start_index);
        let pairs_done = materializer.run(
            &matches.pairs,
            &mut matches.ref_counts,
            |done, total_pairs| {
                progress.on_step_progress(done, total_pairs);
                if let Some(journal) = journal.as_mut() {
                    journal.record_pair()?;
                }
                Ok(())
            },
        )?;
        progress.on_stage_complete(
            PairingStage::Materializing,
            &format!("{pairs_done} pairs materialized"),
        );

        progress.on_stage_start(PairingStage::CleaningUp);
        let clean_dir_removed = remove_source_dir(&dirs.clean_src);
        let noisy_dir_removed = remove_source_dir(&dirs.noisy_src);
        if let Some(journal) = journal.take() {
            journal.finish()?;
        }
        progress.on_stage_complete(
            PairingStage::CleaningUp,
            &format!(
                "{} of 2 source directories removed",
                usize::from(clean_dir_removed) + usize::from(noisy_dir_removed)
            ),
        );

        Ok(PairReport {
            pairs: pairs_done,
            unmatched: matches.unmatched,
            catalog_size: catalog.len(),
            start_index,
            clean_dir_removed,
            noisy_dir_removed,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        })
    }
}

/// Non-recursive removal of a drained source directory. Leftover files
/// (unmatched noisy images, non-image entries) make this fail; that is
/// tolerated and logged, never escalated.
fn remove_source_dir(dir: &Path) -> bool {
    match fs::remove_dir(dir) {
        Ok(()) => true,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "could not remove source directory");
            false
        }
    }
}
