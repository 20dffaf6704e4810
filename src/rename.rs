//! Sequential-file renamer
//!
//! Materialized outputs are numbered `1.jpg`, `2.jpg`, ... Some dataset
//! loaders expect a name prefix instead (`image1.jpg`); this pass adds
//! one to every purely numeric filename in a directory. Files with any
//! other name shape are left alone.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// One planned or performed rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Result of a rename pass
#[derive(Debug, Default)]
pub struct RenameReport {
    /// Renames performed (or planned, under dry-run), in numeric order
    pub renamed: Vec<Rename>,
    /// Entries that did not match the `<digits>.jpg` shape
    pub skipped: usize,
}

/// Check for names shaped like `<digits>.jpg`
fn is_numbered_jpg(name: &str) -> bool {
    match name.strip_suffix(".jpg") {
        Some(stem) => !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Prefix every `<digits>.jpg` file in `dir` with `prefix`.
///
/// Renames run in numeric order. An already-existing destination name
/// aborts the pass; renames performed before the abort stay in place.
pub fn prefix_numbered_files(dir: &Path, prefix: &str, dry_run: bool) -> Result<RenameReport> {
    let mut report = RenameReport::default();
    let mut numbered: Vec<(u64, String)> = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("cannot list directory {}", dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            report.skipped += 1;
            continue;
        };
        if entry.path().is_file() && is_numbered_jpg(name) {
            // The digit check above makes the parse infallible in practice;
            // absurdly long numbers are skipped rather than renamed.
            match name.trim_end_matches(".jpg").parse::<u64>() {
                Ok(number) => numbered.push((number, name.to_string())),
                Err(_) => report.skipped += 1,
            }
        } else {
            report.skipped += 1;
        }
    }
    numbered.sort();

    for (_, name) in numbered {
        let new_name = format!("{prefix}{name}");
        let from = dir.join(&name);
        let to = dir.join(&new_name);
        if to.exists() {
            bail!("destination already exists: {}", to.display());
        }
        if !dry_run {
            fs::rename(&from, &to)
                .with_context(|| format!("cannot rename {name} to {new_name}"))?;
        }
        info!(from = %name, to = %new_name, dry_run, "renamed");
        report.renamed.push(Rename { from, to });
    }

    Ok(report)
}
