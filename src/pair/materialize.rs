//! Pair materialization
//!
//! Copies each matched pair under its sequential index name and consumes
//! the source files. Copy-then-delete across two directories is not
//! atomic: a failure aborts the run and already-materialized pairs stay
//! where they are. External termination mid-run leaves the sources
//! partially drained; the journal (when enabled) keeps index assignment
//! continuous across such runs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

use super::types::{ImagePair, PairError, Result, OUTPUT_EXTENSION};

/// Materializes matched pairs into the output directories.
///
/// Per pair at index i: copy noisy → `{i}.jpg`, delete the noisy source,
/// copy clean → `{i}.jpg`, then decrement the clean path's reference
/// count and delete the clean source exactly when it reaches zero.
#[derive(Debug)]
pub struct Materializer<'a> {
    clean_out: &'a Path,
    noisy_out: &'a Path,
    start_index: usize,
}

impl<'a> Materializer<'a> {
    pub fn new(clean_out: &'a Path, noisy_out: &'a Path) -> Self {
        Self {
            clean_out,
            noisy_out,
            start_index: 1,
        }
    }

    /// Assign indices starting at `index` instead of 1 (journal resume).
    #[must_use]
    pub fn with_start_index(mut self, index: usize) -> Self {
        self.start_index = index.max(1);
        self
    }

    /// Materialize every pair in order.
    ///
    /// `after_pair(done, total)` runs once per completed pair, in order;
    /// an error from it aborts the run like any I/O failure. Returns the
    /// number of pairs materialized.
    pub fn run<F>(
        &self,
        pairs: &[ImagePair],
        ref_counts: &mut HashMap<PathBuf, usize>,
        mut after_pair: F,
    ) -> Result<usize>
    where
        F: FnMut(usize, usize) -> Result<()>,
    {
        let total = pairs.len();

        for (offset, pair) in pairs.iter().enumerate() {
            let index = self.start_index + offset;
            let file_name = format!("{index}.{OUTPUT_EXTENSION}");

            copy_file(&pair.noisy, &self.noisy_out.join(&file_name))?;
            remove_file(&pair.noisy)?;

            copy_file(&pair.clean, &self.clean_out.join(&file_name))?;

            // The clean source goes away with its last referencing pair.
            if let Some(count) = ref_counts.get_mut(&pair.clean) {
                *count -= 1;
                if *count == 0 {
                    remove_file(&pair.clean)?;
                    ref_counts.remove(&pair.clean);
                }
            }

            trace!(index, noisy = %pair.noisy.display(), "pair materialized");
            after_pair(offset + 1, total)?;
        }

        Ok(total)
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    fs::copy(from, to).map_err(|source| PairError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|source| PairError::Remove {
        path: path.to_path_buf(),
        source,
    })
}
