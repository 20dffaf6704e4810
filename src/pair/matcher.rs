//! Pair matching
//!
//! Joins the noisy directory's image files against the clean catalog by
//! identifier, producing an ordered pair list and a reference count per
//! matched clean path.

use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;

use super::catalog::{list_image_files, Catalog};
use super::key::pair_key;
use super::types::{ImagePair, MatchSet, Result};

/// Match every image file in `noisy_dir` against `catalog`.
///
/// Pairs keep the listing order of the noisy directory. A noisy file
/// whose identifier is absent from the catalog is skipped; it is neither
/// an error nor part of the result beyond the `unmatched` count.
pub fn match_pairs(noisy_dir: &Path, catalog: &Catalog, sort: bool) -> Result<MatchSet> {
    let mut set = MatchSet::default();

    for path in list_image_files(noisy_dir, sort)? {
        let Some(name) = path.file_name().and_then(OsStr::to_str) else {
            continue;
        };
        let key = pair_key(name);

        match catalog.get(&key) {
            Some(clean) => {
                *set.ref_counts.entry(clean.to_path_buf()).or_insert(0) += 1;
                set.pairs.push(ImagePair {
                    noisy: path,
                    clean: clean.to_path_buf(),
                });
            }
            None => {
                set.unmatched += 1;
                debug!(
                    file = %path.display(),
                    key = %key,
                    "no clean counterpart, skipping"
                );
            }
        }
    }

    Ok(set)
}
