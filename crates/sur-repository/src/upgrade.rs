//! Cross-catalog upgrade detection.

use std::collections::HashSet;
use sur_core::Specification;

/// A local package with a newer remote version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeCandidate {
    /// Package name.
    pub name: String,
    /// Installed version.
    pub from: String,
    /// Remote version to install.
    pub to: String,
}

/// For each local package, the first remote entry with the same name and a
/// strictly greater version. A name installed in several versions yields a
/// single candidate.
#[must_use]
pub fn candidates(local: &[Specification], remote: &[Specification]) -> Vec<UpgradeCandidate> {
    let mut seen = HashSet::new();
    local
        .iter()
        .filter(|installed| seen.insert(installed.name.as_str()))
        .filter_map(|installed| {
            let current = installed.dotted_version();
            remote
                .iter()
                .find(|r| r.name == installed.name && r.dotted_version() > current)
                .map(|newer| UpgradeCandidate {
                    name: newer.name.clone(),
                    from: installed.version.clone(),
                    to: newer.version.clone(),
                })
        })
        .collect()
}
