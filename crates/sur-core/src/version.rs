//! Version handling for sublets and the host runtime.

use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Dependency versions that pin an exact release (`1.2` or `1.2.3`).
static EXACT_PIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d*\.){1,2}\d*$").expect("valid exact pin pattern"));

/// A dot-separated numeric version such as `0.3` or `0.11.3224`.
///
/// Components are compared numerically from left to right; a missing
/// component compares as zero, so `1.0` and `1.0.0` are equal. Components
/// that are not plain numbers contribute their leading digits (or zero).
#[derive(Debug, Clone, Eq)]
pub struct DottedVersion {
    raw: String,
    parts: Vec<u64>,
}

impl DottedVersion {
    /// Parse a version string. Never fails.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parts = raw
            .trim()
            .trim_start_matches('v')
            .split('.')
            .map(leading_number)
            .collect();
        Self { raw, parts }
    }

    /// Raw version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric components.
    #[must_use]
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    fn part(&self, idx: usize) -> u64 {
        self.parts.get(idx).copied().unwrap_or(0)
    }
}

fn leading_number(part: &str) -> u64 {
    let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.part(i).cmp(&other.part(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for DottedVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Check a required host version against the installed one.
///
/// Both sides must be full `major.minor.patch` triples; a missing patch
/// component on either side means the requirement cannot be verified and
/// is treated as unsatisfied.
#[must_use]
pub fn host_satisfies(required: &str, installed: &str) -> bool {
    match (parse_triple(required), parse_triple(installed)) {
        (Some(need), Some(have)) => need <= have,
        _ => false,
    }
}

fn parse_triple(s: &str) -> Option<Version> {
    let s = s.trim();
    if s.split('.').count() < 3 {
        return None;
    }
    Version::parse(s).ok().map(|mut v| {
        v.pre = semver::Prerelease::EMPTY;
        v.build = semver::BuildMetadata::EMPTY;
        v
    })
}

/// Whether a dependency constraint pins an exact version rather than a range.
#[must_use]
pub fn is_exact_pin(constraint: &str) -> bool {
    EXACT_PIN.is_match(constraint.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_not_lexical() {
        assert!(DottedVersion::new("0.10") > DottedVersion::new("0.9"));
        assert!(DottedVersion::new("0.3") > DottedVersion::new("0.1"));
        assert!(DottedVersion::new("1.0") < DottedVersion::new("1.0.1"));
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(DottedVersion::new("1.0"), DottedVersion::new("1.0.0"));
        assert_eq!(DottedVersion::new("2").parts(), &[2]);
    }

    #[test]
    fn junk_components() {
        assert_eq!(DottedVersion::new("1.2rc1").parts(), &[1, 2]);
        assert_eq!(DottedVersion::new("x.3").parts(), &[0, 3]);
    }

    #[test]
    fn host_requirement() {
        assert!(host_satisfies("0.9.2127", "0.11.3224"));
        assert!(host_satisfies("0.11.3224", "0.11.3224"));
        assert!(!host_satisfies("0.12.0", "0.11.3224"));
        assert!(!host_satisfies("0.9", "0.11.3224"));
        assert!(!host_satisfies("0.9.1", "0.11"));
    }

    #[test]
    fn exact_pins() {
        assert!(is_exact_pin("1.2"));
        assert!(is_exact_pin("1.2.3"));
        assert!(!is_exact_pin("~> 1.2"));
        assert!(!is_exact_pin(">= 0.4"));
        assert!(!is_exact_pin("3"));
    }
}
