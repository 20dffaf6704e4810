//! Catalog construction
//!
//! Indexes the clean directory's image files by pairing key. The catalog
//! is built once per run and holds exactly one path per identifier.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::key::pair_key;
use super::types::{CollisionPolicy, PairError, Result, IMAGE_EXTENSIONS};

/// Check whether a path carries one of the allowed image extensions.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// List the image files directly inside `dir`.
///
/// Subdirectories and entries with other extensions are ignored, not
/// errors. With `sort` the listing is ordered lexicographically by path;
/// otherwise raw `read_dir` order is kept.
pub fn list_image_files(dir: &Path, sort: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_image_file(&path) {
            files.push(path);
        }
    }
    if sort {
        files.sort();
    }
    Ok(files)
}

/// Identifier → clean file path mapping, built once per run
#[derive(Debug, Default)]
pub struct Catalog {
    entries: HashMap<String, PathBuf>,
}

impl Catalog {
    /// Build a catalog from every image file in `clean_dir`.
    ///
    /// Under `CollisionPolicy::Overwrite` a duplicate identifier silently
    /// replaces the earlier entry (the historical last-write-wins rule);
    /// under `Reject` it is an error.
    pub fn build(clean_dir: &Path, policy: CollisionPolicy, sort: bool) -> Result<Self> {
        let mut entries: HashMap<String, PathBuf> = HashMap::new();

        for path in list_image_files(clean_dir, sort)? {
            let Some(name) = path.file_name().and_then(OsStr::to_str) else {
                continue;
            };
            let key = pair_key(name);

            if let Some(existing) = entries.get(&key) {
                match policy {
                    CollisionPolicy::Reject => {
                        return Err(PairError::DuplicateKey {
                            key,
                            existing: existing.clone(),
                            incoming: path,
                        });
                    }
                    CollisionPolicy::Overwrite => {
                        debug!(
                            key = %key,
                            dropped = %existing.display(),
                            kept = %path.display(),
                            "catalog collision, keeping last entry"
                        );
                    }
                }
            }
            entries.insert(key, path);
        }

        Ok(Self { entries })
    }

    /// Look up the clean path for an identifier.
    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    /// Number of distinct identifiers indexed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
