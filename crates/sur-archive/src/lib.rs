//! Package archives for sur.
//!
//! A package is an uncompressed tar container holding one metadata entry,
//! the sublet files and its icons. Entry names are flattened to their base
//! name both when building and when extracting, so an archive can never
//! place files outside the chosen destination directories.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod reader;

pub use builder::{BuildOutput, ENTRY_MODE, build};
pub use reader::{Destinations, EntryKind, InstallReport, entry_names, extract_spec, install_from};
