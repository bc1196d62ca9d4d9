//! Document fetching.
//!
//! The indexing pipeline only needs `fetch(path, headers) -> text`.
//! Local doc trees are read with tokio's filesystem API; published
//! sites are fetched over HTTP with reqwest.

use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::core::error::{DocsiftError, Result};

/// Request headers sent with each fetch
pub type RequestHeaders = BTreeMap<String, String>;

/// Retrieves the raw markdown of a logical document path
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, path: &str, headers: &RequestHeaders) -> Result<String>;

    /// Human-readable source description for logs
    fn describe(&self) -> String;
}

/// Reads documents from a local docs root
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        if is_absolute_url(path) {
            return Err(DocsiftError::FetchFailed(format!(
                "Cannot fetch URL '{path}' from a local docs root"
            )));
        }

        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(DocsiftError::InvalidPath(format!(
                "'{path}' escapes the docs root"
            )));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DocumentFetcher for FileFetcher {
    async fn fetch(&self, path: &str, _headers: &RequestHeaders) -> Result<String> {
        let file = self.resolve(path)?;
        tokio::fs::read_to_string(&file)
            .await
            .map_err(|e| DocsiftError::FetchFailed(format!("{}: {e}", file.display())))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Fetches documents from a published docs site
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DocsiftError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Absolute URL for a document path
    pub fn url_for(&self, path: &str) -> String {
        if is_absolute_url(path) {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, path: &str, headers: &RequestHeaders) -> Result<String> {
        let url = self.url_for(path);

        let mut request = self.client.get(&url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DocsiftError::FetchFailed(format!("HTTP {status} - {url}")));
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// `http://`, `https://` or protocol-relative `//host`
pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}
