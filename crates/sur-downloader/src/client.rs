//! HTTP client for the remote repository.

use crate::progress::ProgressSink;
use futures::StreamExt;
use reqwest::{Client, Response, StatusCode, multipart};
use std::path::Path;
use std::time::Duration;
use sur_config::SurConfig;
use sur_core::{Error, Result, Specification, catalog};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Client for one remote repository.
#[derive(Clone)]
pub struct RemoteClient {
    client: Client,
    config: SurConfig,
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("client", &"reqwest::Client")
            .field("host", &self.config.host.as_str())
            .field("user", &self.config.user_name())
            .finish()
    }
}

fn transport(err: &reqwest::Error) -> Error {
    Error::Repository {
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}

fn unexpected(status: StatusCode, what: &str) -> Error {
    Error::Repository {
        status: Some(status.as_u16()),
        message: format!("{what} failed with HTTP {status}"),
    }
}

impl RemoteClient {
    /// Create a client for the host, proxy and user in `config`.
    ///
    /// Without a configured proxy the client connects directly.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the proxy URL is invalid or the client
    /// cannot be built.
    pub fn new(config: &SurConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(300))
            .user_agent(concat!("sur/", env!("CARGO_PKG_VERSION")))
            .no_proxy();

        if let Some(ref proxy_url) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| Error::Config(format!("invalid proxy `{proxy_url}': {e}")))?;
            builder = builder.proxy(proxy);
            debug!(proxy = %proxy_url, "using proxy");
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn get(&self, path: &str) -> Result<Response> {
        let url = self.config.endpoint(path)?;
        debug!(url = %url, "GET request");
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(&e))
    }

    /// Fetch the full remote catalog.
    ///
    /// The body is streamed and reported to `progress`.
    ///
    /// # Errors
    /// Returns [`Error::Repository`] on transport failure or any non-200
    /// response, and a JSON error if the body is not a catalog.
    pub async fn fetch_catalog(&self, progress: &dyn ProgressSink) -> Result<Vec<Specification>> {
        let response = self.get("list").await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(unexpected(status, "fetching the catalog"));
        }

        let label = "catalog";
        let total = response.content_length();
        let mut body = Vec::with_capacity(usize::try_from(total.unwrap_or(0)).unwrap_or(0));
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| transport(&e))?;
            body.extend_from_slice(&chunk);
            progress.update(label, total, body.len() as u64);
        }
        progress.finish(label);

        let specs = catalog::decode(&body)?;
        info!(entries = specs.len(), size = body.len(), "fetched remote catalog");
        Ok(specs)
    }

    /// Download the package archive of `spec` into a temporary file.
    ///
    /// The file is deleted when the returned handle is dropped.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if `spec` has no digest or the server
    /// answers 404, and [`Error::Repository`] for any other failure.
    pub async fn download(
        &self,
        spec: &Specification,
        progress: &dyn ProgressSink,
    ) -> Result<NamedTempFile> {
        let Some(digest) = spec.digest.as_deref() else {
            return Err(Error::NotFound {
                name: spec.to_string(),
            });
        };

        let response = self.get(&format!("get/{digest}")).await?;
        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(Error::NotFound {
                    name: spec.to_string(),
                });
            }
            status => return Err(unexpected(status, "downloading")),
        }

        let label = spec.package_file_name();
        let total = response.content_length();

        let temp = tempfile::Builder::new()
            .prefix("sur-")
            .suffix(&format!(".{}", sur_core::PACKAGE_EXTENSION))
            .tempfile()
            .map_err(|e| Error::io(std::env::temp_dir(), e))?;
        let mut file = tokio::fs::File::from_std(
            temp.reopen().map_err(|e| Error::io(temp.path(), e))?,
        );

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| transport(&e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::io(temp.path(), e))?;
            downloaded += chunk.len() as u64;
            progress.update(&label, total, downloaded);
        }

        file.flush().await.map_err(|e| Error::io(temp.path(), e))?;
        drop(file);
        progress.finish(&label);

        info!(spec = %spec, size = downloaded, "download complete");
        Ok(temp)
    }

    /// Upload a package archive.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read and
    /// [`Error::Repository`] with a descriptive message if the server
    /// rejects the upload.
    pub async fn submit(&self, archive: &Path) -> Result<()> {
        let data = tokio::fs::read(archive)
            .await
            .map_err(|e| Error::io(archive, e))?;
        let file_name = archive
            .file_name()
            .map_or_else(|| "package".to_string(), |n| n.to_string_lossy().into_owned());

        let form = multipart::Form::new()
            .text("user", self.config.user_name().to_string())
            .part("file", multipart::Part::bytes(data).file_name(file_name));

        let url = self.config.endpoint("submit")?;
        debug!(url = %url, archive = ?archive, "submitting package");
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let status = response.status();
        let message = match status {
            StatusCode::OK => {
                info!(archive = ?archive, "submitted package");
                return Ok(());
            }
            StatusCode::METHOD_NOT_ALLOWED => "invalid request",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "invalid specification file",
            StatusCode::INTERNAL_SERVER_ERROR => "internal server error",
            _ => return Err(unexpected(status, "submitting")),
        };

        Err(Error::Repository {
            status: Some(status.as_u16()),
            message: format!("couldn't upload package: {message}"),
        })
    }

    /// Mark the package with `digest` as broken.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the server does not know the digest and
    /// [`Error::Repository`] for any other failure.
    pub async fn annotate(&self, digest: &str) -> Result<()> {
        let url = self.config.endpoint("annotate")?;
        debug!(url = %url, digest, "annotating package");
        let response = self
            .client
            .post(url)
            .form(&[("digest", digest), ("user", self.config.user_name())])
            .send()
            .await
            .map_err(|e| transport(&e))?;

        match response.status() {
            status if status.is_success() => {
                info!(digest, "annotated package");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(Error::NotFound {
                name: digest.to_string(),
            }),
            status => Err(unexpected(status, "annotating")),
        }
    }
}
