//! Catalog documents: ordered lists of specifications.
//!
//! Catalogs travel double-encoded: the outer document is a JSON string whose
//! content is the JSON array of specification records. The remote `/list`
//! endpoint and both cache files use the same format.

use crate::{Result, Specification};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Order by name, then by dotted version.
#[must_use]
pub fn compare(a: &Specification, b: &Specification) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.dotted_version().cmp(&b.dotted_version()))
}

/// Sort ascending by `(name, version)` and drop duplicate entries.
///
/// The first occurrence of a `(name, version)` pair wins.
#[must_use]
pub fn normalize(mut specs: Vec<Specification>) -> Vec<Specification> {
    let mut seen = HashSet::new();
    specs.retain(|s| seen.insert((s.name.clone(), s.version.clone())));
    specs.sort_by(compare);
    specs
}

/// Encode a catalog.
///
/// # Errors
/// Returns error if serialization fails.
pub fn encode(specs: &[Specification]) -> Result<String> {
    let inner = sonic_rs::to_string(specs)?;
    Ok(sonic_rs::to_string(&inner)?)
}

/// Decode a catalog.
///
/// # Errors
/// Returns error if either layer is not valid JSON of the expected shape.
pub fn decode(data: &[u8]) -> Result<Vec<Specification>> {
    let inner: String = sonic_rs::from_slice(data)?;
    Ok(sonic_rs::from_str(&inner)?)
}
