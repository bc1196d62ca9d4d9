//! Document path resolution.
//!
//! Turns the `paths` setting into a concrete list of documents:
//! an explicit list is used as is, a JSON manifest is fetched and
//! parsed, and `auto` reads the sidebar's links (falling back to a
//! walk of the local docs root).

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::PathsSetting;
use crate::core::error::Result;
use crate::core::indexer::fetch::{DocumentFetcher, RequestHeaders};
use crate::core::indexer::walker::FileWalker;

const DOC_EXTENSION: &str = ".md";

static SIDEBAR_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[[^\]]*\]\(\s*<?([^)\s>]+)>?(?:\s+["'][^"']*["'])?\s*\)"#).unwrap());

/// Canonical document path: `.md` appended when missing,
/// directory paths resolved to their `README.md`.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path.trim().to_string();
    if normalized.is_empty() || normalized.ends_with('/') {
        normalized.push_str("README");
    }
    if !normalized.ends_with(DOC_EXTENSION) {
        normalized.push_str(DOC_EXTENSION);
    }
    normalized
}

/// Normalize every path and drop repeats, keeping the first occurrence
pub fn dedupe_paths<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(paths.len());

    for original in paths {
        let normalized = normalize_path(original.as_ref());
        if seen.insert(normalized.clone()) {
            unique.push(normalized);
        } else {
            tracing::debug!(
                "Skipping duplicate path {:?} (normalized to {})",
                original.as_ref(),
                normalized
            );
        }
    }

    unique
}

/// Site-local link targets of a sidebar document, in order
pub fn sidebar_links(markdown: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for caps in SIDEBAR_LINK.captures_iter(markdown) {
        let href = &caps[1];
        // Anything with a scheme or host is off-site
        if href.contains(':') || href.contains("//") {
            continue;
        }

        let target = href
            .split(['#', '?'])
            .next()
            .unwrap_or("")
            .trim_start_matches("./");
        if target.is_empty() {
            continue;
        }

        if seen.insert(target.to_string()) {
            links.push(target.to_string());
        }
    }

    links
}

/// Resolves a [`PathsSetting`] to document paths
pub struct PathResolver {
    fetcher: Arc<dyn DocumentFetcher>,
    headers: RequestHeaders,
    sidebar: String,
    local: Option<(PathBuf, FileWalker)>,
}

impl PathResolver {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, headers: RequestHeaders, sidebar: String) -> Self {
        Self {
            fetcher,
            headers,
            sidebar,
            local: None,
        }
    }

    /// Walk `root` when `auto` finds no sidebar links
    pub fn with_local_fallback(mut self, root: PathBuf, walker: FileWalker) -> Self {
        self.local = Some((root, walker));
        self
    }

    pub async fn resolve(&self, setting: &PathsSetting) -> Result<Vec<String>> {
        match setting {
            PathsSetting::List(paths) => Ok(paths.clone()),
            PathsSetting::Manifest(location) => match self.load_manifest(location).await {
                Ok(paths) => {
                    tracing::info!("Loaded {} paths from {}", paths.len(), location);
                    Ok(paths)
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load path manifest {}: {}; falling back to auto",
                        location,
                        e
                    );
                    self.resolve_auto().await
                }
            },
            PathsSetting::Auto => self.resolve_auto().await,
        }
    }

    async fn load_manifest(&self, location: &str) -> Result<Vec<String>> {
        let text = self.fetcher.fetch(location, &self.headers).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn resolve_auto(&self) -> Result<Vec<String>> {
        match self.fetcher.fetch(&self.sidebar, &self.headers).await {
            Ok(markdown) => {
                let links = sidebar_links(&markdown);
                if !links.is_empty() {
                    tracing::info!("Found {} documents in {}", links.len(), self.sidebar);
                    return Ok(links);
                }
                tracing::debug!("{} has no site-local links", self.sidebar);
            }
            Err(e) => tracing::debug!("No sidebar at {}: {}", self.sidebar, e),
        }

        match &self.local {
            Some((root, walker)) => {
                let documents = walker.collect_documents(root)?;
                tracing::info!("Discovered {} documents under {:?}", documents.len(), root);
                Ok(documents)
            }
            None => {
                tracing::warn!(
                    "No sidebar links found at {} and no local root to walk",
                    self.fetcher.describe()
                );
                Ok(Vec::new())
            }
        }
    }
}
