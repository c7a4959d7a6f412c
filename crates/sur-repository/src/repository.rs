//! The local and remote catalogs.

use crate::listing::{ListingRow, compact_list, mark_installed};
use crate::prompt::{NoPrompt, Prompt};
use crate::search::{SearchOptions, search};
use std::fmt;
use std::path::PathBuf;
use sur_cache::CatalogStore;
use sur_config::SurConfig;
use sur_core::{Environment, Error, Result, Specification, catalog};
use sur_downloader::{NoProgress, ProgressSink, RemoteClient};
use tracing::{debug, info, warn};

/// Which catalog an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Installed packages.
    Local,
    /// Published packages.
    Remote,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Local and remote catalogs plus everything needed to change the install
/// tree.
///
/// Catalogs are built lazily on first use and kept in memory; the persisted
/// copies are only consulted when the in-memory one is missing.
pub struct Repository {
    pub(crate) config: SurConfig,
    local_store: CatalogStore,
    remote_store: CatalogStore,
    pub(crate) client: RemoteClient,
    pub(crate) env: Box<dyn Environment>,
    pub(crate) progress: Box<dyn ProgressSink>,
    pub(crate) prompt: Box<dyn Prompt>,
    local: Option<Vec<Specification>>,
    remote: Option<Vec<Specification>>,
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("config", &self.config)
            .field("client", &self.client)
            .field("local", &self.local.as_ref().map(Vec::len))
            .field("remote", &self.remote.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Create a repository for `config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the remote client cannot be built.
    pub fn new(config: SurConfig, env: Box<dyn Environment>) -> Result<Self> {
        let client = RemoteClient::new(&config)?;
        Ok(Self {
            local_store: CatalogStore::new(&config.local_cache),
            remote_store: CatalogStore::new(&config.remote_cache),
            config,
            client,
            env,
            progress: Box::new(NoProgress),
            prompt: Box::new(NoPrompt),
            local: None,
            remote: None,
        })
    }

    /// Report transfers to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Ask interactive questions through `prompt`.
    #[must_use]
    pub fn with_prompt(mut self, prompt: Box<dyn Prompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SurConfig {
        &self.config
    }

    /// Build the local catalog.
    ///
    /// Unless `force` is set, the in-memory catalog or the persisted cache
    /// is used. Otherwise every installed definition is loaded; broken ones
    /// are skipped with a warning. The rebuilt catalog is persisted.
    ///
    /// # Errors
    /// Returns an IO error if the definition directory or the cache file
    /// cannot be accessed.
    pub fn build_local(&mut self, force: bool) -> Result<&[Specification]> {
        if force || self.local.is_none() {
            let specs = self.load_local(force)?;
            self.local = Some(specs);
        }
        Ok(self.local.as_deref().unwrap_or_default())
    }

    fn load_local(&self, force: bool) -> Result<Vec<Specification>> {
        if !force && self.local_store.exists() {
            match self.local_store.load() {
                Ok(specs) => return Ok(specs),
                Err(e) => {
                    warn!(error = %e, "local cache is unreadable, rebuilding");
                    self.local_store.invalidate()?;
                }
            }
        }

        let specs = catalog::normalize(self.scan_installed()?);
        self.local_store.store(&specs)?;
        info!(entries = specs.len(), "updated local cache");
        Ok(specs)
    }

    fn scan_installed(&self) -> Result<Vec<Specification>> {
        let dir = &self.config.spec_dir;
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(dir, e)),
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut specs = Vec::with_capacity(paths.len());
        for path in paths {
            match Specification::load(&path) {
                Ok(spec) => specs.push(spec),
                Err(e) => warn!(path = ?path, error = %e, "cannot parse specification"),
            }
        }
        Ok(specs)
    }

    /// Build the remote catalog.
    ///
    /// Unless `force` is set, the in-memory catalog or a persisted cache
    /// younger than the configured lifetime is used. Otherwise the full
    /// catalog is fetched and persisted.
    ///
    /// # Errors
    /// Returns [`Error::Repository`] if the catalog cannot be fetched.
    pub async fn build_remote(&mut self, force: bool) -> Result<&[Specification]> {
        if force || self.remote.is_none() {
            let specs = self.load_remote(force).await?;
            self.remote = Some(specs);
        }
        Ok(self.remote.as_deref().unwrap_or_default())
    }

    async fn load_remote(&self, force: bool) -> Result<Vec<Specification>> {
        if !force && self.remote_store.is_fresh(self.config.cache_ttl) {
            match self.remote_store.load() {
                Ok(specs) => {
                    debug!(
                        entries = specs.len(),
                        updated = ?self.remote_store.last_updated(),
                        "using cached remote catalog"
                    );
                    return Ok(specs);
                }
                Err(e) => {
                    warn!(error = %e, "remote cache is unreadable, refetching");
                    self.remote_store.invalidate()?;
                }
            }
        }

        let specs = catalog::normalize(self.client.fetch_catalog(self.progress.as_ref()).await?);
        self.remote_store.store(&specs)?;
        info!(entries = specs.len(), "updated remote cache");
        Ok(specs)
    }

    /// Force a rebuild of one catalog and return its size.
    ///
    /// # Errors
    /// Same as [`Repository::build_local`] and [`Repository::build_remote`].
    pub async fn update(&mut self, source: Source) -> Result<usize> {
        match source {
            Source::Local => Ok(self.build_local(true)?.len()),
            Source::Remote => Ok(self.build_remote(true).await?.len()),
        }
    }

    pub(crate) async fn catalog(&mut self, source: Source) -> Result<&[Specification]> {
        match source {
            Source::Local => self.build_local(false),
            Source::Remote => self.build_remote(false).await,
        }
    }

    /// First entry of `source` matching `name`.
    ///
    /// # Errors
    /// Returns catalog build errors and [`Error::Pattern`] for bad patterns.
    pub async fn resolve(
        &mut self,
        name: &str,
        source: Source,
        options: &SearchOptions,
    ) -> Result<Option<Specification>> {
        let catalog = self.catalog(source).await?;
        Ok(search(Some(name), catalog, options)?
            .first()
            .map(|s| (*s).clone()))
    }

    /// First installed package named `name`.
    ///
    /// # Errors
    /// Same as [`Repository::build_local`].
    pub fn installed(&mut self, name: &str) -> Result<Option<Specification>> {
        let local = self.build_local(false)?;
        Ok(search(Some(name), local, &SearchOptions::new())?
            .first()
            .map(|s| (*s).clone()))
    }

    async fn rows(
        &mut self,
        source: Source,
        query: Option<&str>,
        options: &SearchOptions,
    ) -> Result<Vec<ListingRow>> {
        self.build_local(false)?;
        let mut rows = {
            let catalog = self.catalog(source).await?;
            let selected: Vec<&Specification> = match query {
                Some(_) => search(query, catalog, options)?,
                None => catalog.iter().collect(),
            };
            compact_list(&selected)
        };
        mark_installed(&mut rows, self.local.as_deref().unwrap_or_default());
        Ok(rows)
    }

    /// Every package of `source`, one row per name.
    ///
    /// # Errors
    /// Returns catalog build errors.
    pub async fn list(&mut self, source: Source) -> Result<Vec<ListingRow>> {
        self.rows(source, None, &SearchOptions::new()).await
    }

    /// Packages of `source` matching `query`, one row per name.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if nothing matches, besides catalog build
    /// and pattern errors.
    pub async fn query(
        &mut self,
        query: &str,
        source: Source,
        options: &SearchOptions,
    ) -> Result<Vec<ListingRow>> {
        let rows = self.rows(source, Some(query), options).await?;
        if rows.is_empty() {
            return Err(Error::NotFound {
                name: query.to_string(),
            });
        }
        Ok(rows)
    }
}
