//! Per-name results of batch operations.

use std::path::PathBuf;
use sur_core::{Error, Specification};

/// What happened to one name of a batch.
#[derive(Debug)]
pub enum Outcome {
    /// Installed; some entries may have failed to write.
    Installed {
        /// Installed package.
        spec: Specification,
        /// Entries that could not be written.
        failures: Vec<(String, Error)>,
    },
    /// Removed from the install tree.
    Uninstalled {
        /// Removed package.
        spec: Specification,
        /// Files that could not be removed.
        failures: Vec<(PathBuf, Error)>,
    },
    /// Archive copied to the given path.
    Fetched {
        /// Fetched package.
        spec: Specification,
        /// Written archive.
        path: PathBuf,
    },
    /// Archive unpacked into the given folder.
    Unpacked {
        /// Unpacked package.
        spec: Specification,
        /// Target folder.
        path: PathBuf,
        /// Entries that could not be written.
        failures: Vec<(String, Error)>,
    },
    /// Skipped: a matching package is already installed.
    AlreadyInstalled,
    /// Skipped: no matching package in the consulted catalog.
    NotFound,
    /// Skipped: the host or a dependency does not satisfy the package.
    Unsatisfied {
        /// Skipped package.
        spec: Specification,
        /// One line per unmet condition.
        diagnostics: Vec<String>,
    },
    /// Failed with an error that only affects this name.
    Failed(Error),
}

impl Outcome {
    /// Whether the operation was carried out completely.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Installed { failures, .. } | Self::Unpacked { failures, .. } => {
                failures.is_empty()
            }
            Self::Uninstalled { failures, .. } => failures.is_empty(),
            Self::Fetched { .. } => true,
            Self::AlreadyInstalled | Self::NotFound | Self::Unsatisfied { .. } | Self::Failed(_) => {
                false
            }
        }
    }
}

/// Outcomes of a batch, in request order.
#[derive(Debug, Default)]
pub struct BatchReport {
    entries: Vec<(String, Outcome)>,
}

impl BatchReport {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for `name`.
    pub fn push(&mut self, name: impl Into<String>, outcome: Outcome) {
        self.entries.push((name.into(), outcome));
    }

    /// All recorded outcomes.
    #[must_use]
    pub fn entries(&self) -> &[(String, Outcome)] {
        &self.entries
    }

    /// Outcome recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, o)| o)
    }

    /// Number of names processed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no names were processed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every name succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.entries.iter().all(|(_, o)| o.is_success())
    }
}

impl IntoIterator for BatchReport {
    type Item = (String, Outcome);
    type IntoIter = std::vec::IntoIter<(String, Outcome)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
