//! Persisted catalog caches for sur.
//!
//! A [`CatalogStore`] owns one cache file holding a double-encoded catalog
//! (see [`sur_core::catalog`]). Freshness is judged from the file's
//! modification time; staleness is only detected when the store is asked.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use sur_core::{Error, Result, Specification, catalog};
use tracing::{debug, info};

/// One persisted catalog file.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Create a store backed by `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the cache file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the persisted catalog.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read and a JSON error if it
    /// is not a catalog document.
    pub fn load(&self) -> Result<Vec<Specification>> {
        let data = std::fs::read(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let specs = catalog::decode(&data)?;
        debug!(path = ?self.path, entries = specs.len(), "loaded catalog cache");
        Ok(specs)
    }

    /// Persist a catalog, replacing the file atomically.
    ///
    /// # Errors
    /// Returns error if the catalog cannot be encoded or written.
    pub fn store(&self, specs: &[Specification]) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

        let data = catalog::encode(specs)?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
        tmp.write_all(data.as_bytes())
            .map_err(|e| Error::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;

        info!(path = ?self.path, entries = specs.len(), "stored catalog cache");
        Ok(())
    }

    /// Delete the cache file if present.
    ///
    /// # Errors
    /// Returns an IO error if an existing file cannot be removed.
    pub fn invalidate(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = ?self.path, "invalidated catalog cache");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.path, e)),
        }
    }

    /// Last modification time, if the file exists.
    #[must_use]
    pub fn modified(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
    }

    /// Last modification time as a UTC timestamp.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.modified().map(DateTime::<Utc>::from)
    }

    /// Age of the cache file relative to `now`.
    ///
    /// A modification time in the future counts as zero age.
    #[must_use]
    pub fn age_at(&self, now: SystemTime) -> Option<Duration> {
        self.modified()
            .map(|modified| now.duration_since(modified).unwrap_or_default())
    }

    /// Whether the cache file exists and is younger than `ttl` at `now`.
    #[must_use]
    pub fn is_fresh_at(&self, ttl: Duration, now: SystemTime) -> bool {
        self.age_at(now).is_some_and(|age| age < ttl)
    }

    /// Whether the cache file exists and is younger than `ttl`.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.is_fresh_at(ttl, SystemTime::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, version: &str) -> Specification {
        Specification {
            authors: vec!["unexist".into()],
            contact: "unexist@subforge.org".into(),
            description: format!("{name} sublet"),
            files: vec![format!("{}.rb", name.to_lowercase())],
            ..Specification::new(name, version)
        }
    }

    #[test]
    fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("sur").join("remote.json"));
        assert!(!store.exists());

        let specs = vec![spec("Clock", "0.1"), spec("Clock", "0.3")];
        store.store(&specs).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), specs);
        assert!(store.last_updated().is_some());
    }

    #[test]
    fn freshness_follows_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("remote.json"));
        let day = Duration::from_secs(24 * 60 * 60);

        assert!(!store.is_fresh(day));

        store.store(&[]).unwrap();
        assert!(store.is_fresh(day));
        assert!(!store.is_fresh(Duration::ZERO));

        let tomorrow = SystemTime::now() + day + Duration::from_secs(1);
        assert!(!store.is_fresh_at(day, tomorrow));
    }

    #[test]
    fn corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("local.json"));
        std::fs::write(store.path(), "--- !ruby/object").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn invalidate_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("local.json"));
        store.invalidate().unwrap();

        store.store(&[spec("Clock", "0.1")]).unwrap();
        store.invalidate().unwrap();
        assert!(!store.exists());
    }
}
