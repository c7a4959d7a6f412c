//! Display-oriented views of catalog entries.

use serde_json::Value;
use sur_core::{ConfigOption, Specification, catalog};

/// One row of a listing: a package name with every known version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// Package name as published.
    pub name: String,
    /// Description of the newest version.
    pub description: String,
    /// Tags of the newest version.
    pub tags: Vec<String>,
    /// Known versions, newest first.
    pub versions: Vec<String>,
    /// Installed version, if any.
    pub installed: Option<String>,
}

impl ListingRow {
    fn from_spec(spec: &Specification) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            tags: spec.tags.clone(),
            versions: vec![spec.version.clone()],
            installed: None,
        }
    }
}

/// Fold entries into one row per package name.
///
/// Entries are sorted descending by `(name, version)`; consecutive entries
/// with the same name are merged into the first one's version list. Only
/// for display: the folded rows must not be used to resolve queries.
#[must_use]
pub fn compact_list(specs: &[&Specification]) -> Vec<ListingRow> {
    let mut sorted = specs.to_vec();
    sorted.sort_by(|a, b| catalog::compare(b, a));

    let mut rows: Vec<ListingRow> = Vec::new();
    for spec in sorted {
        match rows.last_mut() {
            Some(prev) if prev.name == spec.name => prev.versions.push(spec.version.clone()),
            _ => rows.push(ListingRow::from_spec(spec)),
        }
    }
    rows
}

/// Mark rows whose package is installed in `local`.
///
/// The first local entry with the same name determines the version shown.
pub fn mark_installed(rows: &mut [ListingRow], local: &[Specification]) {
    for row in rows {
        row.installed = local
            .iter()
            .find(|s| s.name == row.name)
            .map(|s| s.version.clone());
    }
}

/// Options every sublet understands.
#[must_use]
pub fn default_config() -> Vec<ConfigOption> {
    vec![
        ConfigOption::new(
            "interval",
            "integer",
            "Update interval in seconds",
            Some(Value::from(60)),
        ),
        ConfigOption::new(
            "style",
            "string",
            "Default sublet style (sub-style of sublets)",
            Some(Value::from("Sublet name")),
        ),
    ]
}

/// Built-in options merged with the sublet's own.
///
/// A sublet option replaces the built-in option of the same name.
#[must_use]
pub fn effective_config(spec: &Specification) -> Vec<ConfigOption> {
    let mut options: Vec<_> = default_config()
        .into_iter()
        .filter(|d| !spec.config.iter().any(|c| c.name == d.name))
        .collect();
    options.extend(spec.config.iter().cloned());
    options
}

/// Detail views available for `spec`.
#[must_use]
pub fn see_also(spec: &Specification) -> Vec<&'static str> {
    let mut also = vec!["info", "config"];
    if spec.notes.as_deref().is_some_and(|n| !n.trim().is_empty()) {
        also.push("notes");
    }
    if !spec.grabs.is_empty() {
        also.push("grabs");
    }
    also
}
