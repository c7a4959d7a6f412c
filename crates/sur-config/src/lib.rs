//! Paths and environment configuration for the sur client.
//!
//! Sources are merged in priority order:
//!   1. Built-in defaults (XDG base directories, `http://sur.subforge.org`)
//!   2. Environment variables
//!   3. Explicit overrides via the `with_*` builders (CLI arguments)
//!
//! # Environment Variables
//!
//! - `XDG_CACHE_HOME` - Base of the catalog caches (`$XDG_CACHE_HOME/sur/`)
//! - `XDG_DATA_HOME` - Base of the install tree (`$XDG_DATA_HOME/subtle/`)
//! - `SUR_HOST` - Remote repository base URL
//! - `SUR_CACHE_TTL` - Remote catalog lifetime in seconds
//! - `HTTP_PROXY`, `HTTPS_PROXY` - Proxy configuration
//! - `USER` - Name sent with submissions and annotations

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

use std::path::{Path, PathBuf};
use std::time::Duration;
use sur_core::{Error, Result};
use tracing::debug;
use url::Url;

/// Default remote repository.
pub const DEFAULT_HOST: &str = "http://sur.subforge.org";

/// Default remote catalog lifetime (24 hours).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Environment variables read by [`SurConfig::from_env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurEnvVar {
    /// `XDG_CACHE_HOME`.
    CacheHome,
    /// `XDG_DATA_HOME`.
    DataHome,
    /// `SUR_HOST`.
    Host,
    /// `SUR_CACHE_TTL`.
    CacheTtl,
    /// `HTTP_PROXY`.
    HttpProxy,
    /// `HTTPS_PROXY`.
    HttpsProxy,
    /// `USER`.
    User,
}

impl SurEnvVar {
    /// Variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CacheHome => "XDG_CACHE_HOME",
            Self::DataHome => "XDG_DATA_HOME",
            Self::Host => "SUR_HOST",
            Self::CacheTtl => "SUR_CACHE_TTL",
            Self::HttpProxy => "HTTP_PROXY",
            Self::HttpsProxy => "HTTPS_PROXY",
            Self::User => "USER",
        }
    }

    /// Read from the process environment; empty values count as unset.
    #[must_use]
    pub fn get(self) -> Option<String> {
        std::env::var(self.as_str())
            .ok()
            .or_else(|| std::env::var(self.as_str().to_lowercase()).ok())
            .filter(|v| !v.is_empty())
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurConfig {
    /// Directory holding both catalog caches.
    pub cache_dir: PathBuf,
    /// Local catalog cache file.
    pub local_cache: PathBuf,
    /// Remote catalog cache file.
    pub remote_cache: PathBuf,
    /// Root of the install tree.
    pub data_dir: PathBuf,
    /// Installed definition files.
    pub spec_dir: PathBuf,
    /// Installed sublet files.
    pub sublet_dir: PathBuf,
    /// Installed icons.
    pub icon_dir: PathBuf,
    /// Remote repository base URL.
    pub host: Url,
    /// HTTP proxy URL.
    pub proxy: Option<String>,
    /// Name sent to the remote service.
    pub user: Option<String>,
    /// Remote catalog lifetime.
    pub cache_ttl: Duration,
}

impl SurConfig {
    /// Configuration rooted at explicit cache and data base directories.
    #[must_use]
    pub fn with_bases(cache_home: &Path, data_home: &Path) -> Self {
        let cache_dir = cache_home.join("sur");
        let data_dir = data_home.join("subtle");
        Self {
            local_cache: cache_dir.join("local.json"),
            remote_cache: cache_dir.join("remote.json"),
            cache_dir,
            spec_dir: data_dir.join("specifications"),
            sublet_dir: data_dir.join("sublets"),
            icon_dir: data_dir.join("icons"),
            data_dir,
            host: Url::parse(DEFAULT_HOST).expect("default host is a valid URL"),
            proxy: None,
            user: None,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Resolve from the process environment.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if no home directory can be found or a
    /// variable holds an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(SurEnvVar::get)
    }

    /// Resolve using `lookup` for environment variables.
    ///
    /// # Errors
    /// Same as [`SurConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(SurEnvVar) -> Option<String>) -> Result<Self> {
        let dirs = directories::BaseDirs::new();

        let cache_home = match lookup(SurEnvVar::CacheHome) {
            Some(dir) => PathBuf::from(dir),
            None => dirs
                .as_ref()
                .map(|d| d.cache_dir().to_path_buf())
                .ok_or_else(|| Error::Config("cannot determine cache directory".into()))?,
        };

        let data_home = match lookup(SurEnvVar::DataHome) {
            Some(dir) => PathBuf::from(dir),
            None => dirs
                .as_ref()
                .map(|d| d.data_dir().to_path_buf())
                .ok_or_else(|| Error::Config("cannot determine data directory".into()))?,
        };

        let mut config = Self::with_bases(&cache_home, &data_home);

        if let Some(host) = lookup(SurEnvVar::Host) {
            config = config.with_host(&host)?;
        }

        if let Some(ttl) = lookup(SurEnvVar::CacheTtl) {
            let secs: u64 = ttl.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{} must be seconds, got `{ttl}'",
                    SurEnvVar::CacheTtl.as_str()
                ))
            })?;
            config.cache_ttl = Duration::from_secs(secs);
        }

        config.proxy = lookup(SurEnvVar::HttpProxy).or_else(|| lookup(SurEnvVar::HttpsProxy));
        config.user = lookup(SurEnvVar::User);

        debug!(
            cache = ?config.cache_dir,
            data = ?config.data_dir,
            host = %config.host,
            "resolved configuration"
        );
        Ok(config)
    }

    /// Override the remote host. A path prefix is kept for every endpoint.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `host` is not an absolute URL.
    pub fn with_host(mut self, host: &str) -> Result<Self> {
        let mut url =
            Url::parse(host).map_err(|e| Error::Config(format!("invalid host `{host}': {e}")))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.host = url;
        Ok(self)
    }

    /// Override the remote catalog lifetime.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Override the proxy.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Override the user name.
    #[must_use]
    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    /// User name for the remote service, falling back to `anonymous`.
    #[must_use]
    pub fn user_name(&self) -> &str {
        self.user.as_deref().unwrap_or("anonymous")
    }

    /// Absolute URL for a path on the remote host.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.host
            .join(path)
            .map_err(|e| Error::Config(format!("invalid endpoint `{path}': {e}")))
    }

    /// Create every directory the client writes to.
    ///
    /// # Errors
    /// Returns an IO error if a directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            &self.cache_dir,
            &self.spec_dir,
            &self.sublet_dir,
            &self.icon_dir,
        ] {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        Ok(())
    }
}
