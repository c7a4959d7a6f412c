//! Load-order prefixes for installed sublet files.
//!
//! The host loads sublet files alphabetically. Reordering renames each file
//! to `{slot:03}_{name}` with slots 10, 20, 30 and so on.

use std::path::{Path, PathBuf};
use sur_core::{Error, Result, Specification, base_name};
use tracing::{debug, warn};

/// Distance between two load-order slots.
pub const SLOT_STEP: usize = 10;

/// An installed file that can be reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderEntry {
    /// Owning package name.
    pub name: String,
    /// Owning package version.
    pub version: String,
    /// Current file name in the sublet directory.
    pub file: String,
}

/// A performed rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    /// Old path.
    pub from: PathBuf,
    /// New path.
    pub to: PathBuf,
}

/// Strip a load-order prefix such as `10_` or `020_`.
#[must_use]
pub fn strip_order_prefix(file: &str) -> &str {
    let rest = file.trim_start_matches(|c: char| c.is_ascii_digit() || c == '_');
    let prefix = &file[..file.len() - rest.len()];
    if prefix.ends_with('_') && !rest.is_empty() {
        rest
    } else {
        file
    }
}

/// Whether `candidate` in the sublet directory is the installed copy of
/// the package file `file`, with or without a load-order prefix.
#[must_use]
pub fn is_installed_copy(file: &str, candidate: &str) -> bool {
    let wanted = base_name(file);
    candidate == wanted || strip_order_prefix(candidate) == wanted
}

/// File names in `dir`, sorted. A missing directory has no files.
///
/// # Errors
/// Returns an IO error if the directory exists but cannot be read.
pub fn installed_files(dir: &Path) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(dir, e)),
    };

    let mut files: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    Ok(files)
}

/// Every installed file of every package in `local`, in catalog order.
///
/// # Errors
/// Same as [`installed_files`].
pub fn candidates(local: &[Specification], sublet_dir: &Path) -> Result<Vec<ReorderEntry>> {
    let files = installed_files(sublet_dir)?;
    let mut entries = Vec::new();

    for spec in local {
        for file in &files {
            if spec.files.iter().any(|f| is_installed_copy(f, file)) {
                entries.push(ReorderEntry {
                    name: spec.name.clone(),
                    version: spec.version.clone(),
                    file: file.clone(),
                });
            }
        }
    }

    Ok(entries)
}

/// Rename entries into load-order slots.
///
/// `order` holds 1-based positions into `entries`. Invalid positions are
/// skipped without consuming a slot; an existing destination is never
/// overwritten.
///
/// # Errors
/// Returns an IO error if a rename fails.
pub fn apply(sublet_dir: &Path, entries: &[ReorderEntry], order: &[usize]) -> Result<Vec<Renamed>> {
    let mut renamed = Vec::new();
    let mut slot = 0;

    for &pos in order {
        let Some(entry) = pos.checked_sub(1).and_then(|i| entries.get(i)) else {
            warn!(position = pos, "ignoring invalid position");
            continue;
        };

        slot += SLOT_STEP;
        let from = sublet_dir.join(&entry.file);
        let to = sublet_dir.join(format!("{slot:03}_{}", strip_order_prefix(&entry.file)));

        if to.exists() {
            warn!(path = ?to, "not overwriting existing file");
            continue;
        }

        std::fs::rename(&from, &to).map_err(|e| Error::io(&from, e))?;
        debug!(from = ?from, to = ?to, "reordered file");
        renamed.push(Renamed { from, to });
    }

    Ok(renamed)
}
