//! Host runtime seam: version lookup, dependency probing and reload.

use crate::Result;

/// Result of probing a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyStatus {
    /// Present in a version satisfying the constraint.
    Satisfied,
    /// Loadable by name but its version could not be verified.
    Unverified,
    /// Not available.
    Missing,
}

/// The runtime that executes installed sublets.
pub trait Environment {
    /// Version of the installed host, if it can be determined.
    fn host_version(&self) -> Option<String>;

    /// Probe an external library dependency.
    fn dependency(&self, name: &str, constraint: &str) -> DependencyStatus;

    /// Ask the host to reload its sublets.
    fn reload(&self) -> Result<()>;
}

/// Outcome of checking a specification against an [`Environment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementCheck {
    /// Required host version, if one is unmet.
    pub host_required: Option<String>,
    /// Host version found (if any) when the requirement is unmet.
    pub host_found: Option<String>,
    /// Missing dependencies as `name (constraint)`.
    pub missing: Vec<String>,
    /// Dependencies whose version could not be verified.
    pub unverified: Vec<String>,
}

impl RequirementCheck {
    /// Whether every requirement is met. Unverified dependencies do not fail.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.host_required.is_none() && self.missing.is_empty()
    }

    /// Human-readable diagnostics, one per unmet or unverified condition.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(required) = &self.host_required {
            lines.push(format!(
                "subtle >={required} (found: {}) is required",
                self.host_found.as_deref().unwrap_or("none")
            ));
        }

        if !self.missing.is_empty() {
            lines.push(format!(
                "following gems are missing: {}",
                self.missing.join(", ")
            ));
        }

        for name in &self.unverified {
            lines.push(format!("couldn't verify version of `{name}'"));
        }

        lines
    }
}
