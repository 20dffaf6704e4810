//! Resume journal
//!
//! Materialization copies then deletes across two directories with no
//! transaction log, so an externally terminated run leaves the sources
//! partially drained. Re-running would restart index assignment at 1 and
//! clobber output that already exists. The opt-in journal records how
//! many pairs were completed, letting the next run continue numbering
//! where the interrupted one stopped. It does not make individual pairs
//! atomic.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::pair::{PairDirs, PairError, Result};

/// Journal format version
const JOURNAL_VERSION: u32 = 1;

/// Sidecar filename, placed in the noisy output directory
pub const JOURNAL_FILE: &str = ".pairset-journal.json";

/// Completed-pairs journal sidecar
#[derive(Debug, Serialize, Deserialize)]
pub struct PairJournal {
    /// Format version
    pub version: u32,
    /// Digest of the run's directories and options
    pub digest: String,
    /// Pairs materialized so far
    pub pairs_done: usize,
    /// Unix timestamp of the first run
    pub started_at: i64,
    /// Unix timestamp of the last checkpoint
    pub updated_at: i64,
    #[serde(skip)]
    path: PathBuf,
}

impl PairJournal {
    /// Sidecar path for a given noisy output directory
    pub fn path_for(noisy_out: &Path) -> PathBuf {
        noisy_out.join(JOURNAL_FILE)
    }

    /// Digest over the four directory paths and the options JSON. A
    /// resumed run must target the same directories with the same
    /// options; anything else invalidates the recorded pair count.
    pub fn run_digest(dirs: &PairDirs, options_json: &str) -> String {
        let mut hasher = Sha256::new();
        for dir in [
            &dirs.clean_src,
            &dirs.noisy_src,
            &dirs.clean_out,
            &dirs.noisy_out,
        ] {
            hasher.update(dir.to_string_lossy().as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(options_json.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Load the journal for this run, or start a fresh one.
    ///
    /// An existing sidecar whose digest does not match the current
    /// directories and options is an error rather than a silent restart.
    pub fn open_or_create(dirs: &PairDirs, options_json: &str) -> Result<Self> {
        let path = Self::path_for(&dirs.noisy_out);
        let digest = Self::run_digest(dirs, options_json);

        if path.exists() {
            let text = fs::read_to_string(&path)?;
            let mut journal: PairJournal = serde_json::from_str(&text).map_err(|e| {
                PairError::Journal(format!("unreadable journal {}: {e}", path.display()))
            })?;
            if journal.version != JOURNAL_VERSION {
                return Err(PairError::Journal(format!(
                    "unsupported journal version {}",
                    journal.version
                )));
            }
            if journal.digest != digest {
                return Err(PairError::Journal(
                    "journal belongs to a different run (directories or options changed)"
                        .to_string(),
                ));
            }
            journal.path = path;
            return Ok(journal);
        }

        let now = Utc::now().timestamp();
        Ok(Self {
            version: JOURNAL_VERSION,
            digest,
            pairs_done: 0,
            started_at: now,
            updated_at: now,
            path,
        })
    }

    /// Index the next materialized pair should receive
    pub fn next_index(&self) -> usize {
        self.pairs_done + 1
    }

    /// Record one completed pair and persist the sidecar.
    pub fn record_pair(&mut self) -> Result<()> {
        self.pairs_done += 1;
        self.updated_at = Utc::now().timestamp();
        self.persist()
    }

    /// Write the sidecar atomically (temp file then rename).
    fn persist(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| PairError::Journal("journal path has no parent".to_string()))?;
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| PairError::Journal(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| PairError::Journal(format!("could not persist journal: {e}")))?;
        Ok(())
    }

    /// Remove the sidecar after a fully successful run.
    pub fn finish(self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
