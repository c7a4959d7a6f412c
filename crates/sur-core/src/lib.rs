//! Core types and utilities for the sur sublet repository client.
//!
//! Sublets are small add-on scripts for the subtle window manager. This crate
//! holds the [`Specification`] metadata record, dotted version handling, the
//! catalog codec shared by the remote service and the on-disk caches, and the
//! [`Environment`] seam through which the host runtime is queried.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod environment;
pub mod error;
pub mod spec;
pub mod template;
pub mod version;

pub use environment::{DependencyStatus, Environment, RequirementCheck};
pub use error::{Error, Result};
pub use spec::{ConfigOption, Specification};
pub use version::{DottedVersion, host_satisfies, is_exact_pin};

/// File extension of sublet definition (metadata) files.
pub const METADATA_EXTENSION: &str = "spec";

/// File extension of package archives.
pub const PACKAGE_EXTENSION: &str = "package";

/// File extensions routed to the icon directory.
pub const ICON_EXTENSIONS: &[&str] = &["xbm", "xpm"];

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extension of a file name, without the dot.
#[must_use]
pub fn extension_of(name: &str) -> Option<&str> {
    std::path::Path::new(name)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
}

/// Final path component of a possibly nested relative path.
#[must_use]
pub fn base_name(path: &str) -> &str {
    std::path::Path::new(path)
        .file_name()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or(path)
}
