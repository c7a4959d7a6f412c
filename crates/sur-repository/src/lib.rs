//! Sublet repository for sur.
//!
//! A [`Repository`] owns two catalogs: the local one, built from the
//! definitions in the install tree, and the remote one, fetched from the
//! repository service. Both are cached on disk. On top of them it resolves
//! queries and runs the package lifecycle: install, uninstall, upgrade,
//! reorder, fetch, unpack, submit and annotate.
//!
//! Resolution always takes the first match in catalog order, so with the
//! catalogs sorted ascending by `(name, version)` an unpinned name resolves
//! to its oldest known version.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod lifecycle;
pub mod listing;
pub mod outcome;
pub mod prompt;
pub mod reorder;
mod repository;
pub mod search;
pub mod upgrade;

#[cfg(test)]
pub(crate) mod testing;

pub use lifecycle::UpgradeReport;
pub use listing::{ListingRow, default_config, effective_config, see_also};
pub use outcome::{BatchReport, Outcome};
pub use prompt::{NoPrompt, Prompt};
pub use reorder::Renamed;
pub use repository::{Repository, Source};
pub use search::{Matcher, SearchOptions, search};
pub use upgrade::UpgradeCandidate;
