//! Error types for sur operations.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sur.
#[derive(Error, Debug)]
pub enum Error {
    /// Required metadata fields are missing.
    #[error("couldn't find `{}' in specification", missing.join(", "))]
    Validation {
        /// Names of the missing fields, in declaration order.
        missing: Vec<String>,
    },

    /// Name or version would escape its target directory.
    #[error("unsafe {field} `{value}' in specification")]
    UnsafeName {
        /// Offending field.
        field: &'static str,
        /// Value as given.
        value: String,
    },

    /// Definition file could not be read into a specification.
    #[error("cannot read specification `{}': {message}", path.display())]
    Parse {
        /// Definition or archive path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Archive error.
    #[error("archive error: {0}")]
    Archive(String),

    /// Package or digest not found.
    #[error("sublet `{name}' not found")]
    NotFound {
        /// Package name or digest.
        name: String,
    },

    /// Remote repository failure.
    #[error("repository error: {message}")]
    Repository {
        /// HTTP status code if available.
        status: Option<u16>,
        /// Error message.
        message: String,
    },

    /// File referenced by a specification is missing.
    #[error("cannot find file `{}'", path.display())]
    FileMissing {
        /// Missing file path.
        path: PathBuf,
    },

    /// JSON error.
    #[error("json error: {0}")]
    Json(#[from] sonic_rs::Error),

    /// IO error.
    #[error("io error at {path}: {message}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid search pattern.
    #[error("invalid pattern `{pattern}': {message}")]
    Pattern {
        /// The pattern as given.
        pattern: String,
        /// Error message.
        message: String,
    },

    /// Host runtime could not be notified.
    #[error("host error: {0}")]
    Host(String),

    /// The user declined an interactive prompt.
    #[error("aborted by user")]
    Aborted,
}

impl Error {
    /// Create an IO error with context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a parse error with context.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a repository error without a status code.
    #[must_use]
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository {
            status: None,
            message: message.into(),
        }
    }

    /// Whether this error only concerns a single name in a batch.
    ///
    /// Catalog-level failures abort the whole batch; everything else is
    /// reported and the batch continues.
    #[must_use]
    pub const fn is_per_name(&self) -> bool {
        !matches!(self, Self::Repository { .. } | Self::Config(_))
    }
}

/// Result type for sur operations.
pub type Result<T> = std::result::Result<T, Error>;
