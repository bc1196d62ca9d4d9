//! Indexing pipeline orchestration.
//!
//! Coordinates one indexing pass:
//! 1. Reset (or reload) the namespace
//! 2. Normalize and de-duplicate paths
//! 3. Fetch and index every document concurrently
//! 4. Persist the snapshot and its expiry

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

use crate::core::config::CachePolicy;
use crate::core::error::Result;
use crate::core::indexer::document::DocumentIndexer;
use crate::core::indexer::fetch::{DocumentFetcher, RequestHeaders};
use crate::core::indexer::paths::dedupe_paths;
use crate::core::storage::IndexStore;
use crate::core::types::BuildReport;

/// Orchestrates the indexing pipeline
pub struct IndexingPipeline {
    fetcher: Arc<dyn DocumentFetcher>,
    store: Arc<IndexStore>,
    depth: u8,
    max_age_ms: i64,
    headers: RequestHeaders,
    cache_policy: CachePolicy,
}

impl IndexingPipeline {
    /// Create a new indexing pipeline
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of raw document text
    /// * `store` - Index shared with the query engine
    /// * `depth` - Deepest heading level that opens an entry
    /// * `max_age_ms` - Lifetime of the persisted copy
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        store: Arc<IndexStore>,
        depth: u8,
        max_age_ms: i64,
    ) -> Self {
        Self {
            fetcher,
            store,
            depth,
            max_age_ms,
            headers: RequestHeaders::new(),
            cache_policy: CachePolicy::default(),
        }
    }

    /// Headers sent with every fetch
    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    /// Run one indexing pass over `paths`
    ///
    /// Fetch failures are logged and skipped, and a storage failure
    /// leaves the index in memory only, so the pass always completes.
    /// Returns once every fetch has settled.
    pub async fn build(&self, paths: &[String], namespace: Option<&str>) -> BuildReport {
        let start = Instant::now();
        let mut report = BuildReport {
            namespace: namespace.map(str::to_string),
            paths_requested: paths.len(),
            ..Default::default()
        };

        // Step 1: Reset the namespace (or reuse a fresh copy)
        self.prepare_namespace(namespace);

        // Step 2: Normalize and de-duplicate
        let unique = dedupe_paths(paths);
        report.paths_unique = unique.len();
        tracing::info!(
            "Indexing {} documents ({} requested) from {}",
            unique.len(),
            paths.len(),
            self.fetcher.describe()
        );

        let (reused, pending): (Vec<&String>, Vec<&String>) = unique
            .iter()
            .partition(|path| self.store.contains(namespace, path));
        report.documents_reused = reused.len();
        if !reused.is_empty() {
            tracing::info!("Reusing {} documents from the persisted index", reused.len());
        }

        // Step 3: One future per document, all in flight at once
        let outcomes = join_all(pending.iter().map(|path| async move {
            (*path, self.index_document(path, namespace).await)
        }))
        .await;

        for (path, outcome) in outcomes {
            match outcome {
                Ok(entries) => {
                    report.documents_indexed += 1;
                    report.entries_created += entries;
                }
                Err(e) => {
                    tracing::warn!("Failed to index {}: {}", path, e);
                    report.documents_failed += 1;
                }
            }
        }

        // Step 4: Persist
        match self.store.persist(namespace, self.max_age_ms) {
            Ok(expires_at) => {
                report.persisted = true;
                report.expires_at = Some(expires_at);
            }
            Err(e) => {
                tracing::warn!("Index kept in memory only, persist failed: {}", e);
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexing complete: {} documents indexed, {} failed, {} reused, \
             {} entries created in {}ms",
            report.documents_indexed,
            report.documents_failed,
            report.documents_reused,
            report.entries_created,
            report.duration_ms
        );

        report
    }

    fn prepare_namespace(&self, namespace: Option<&str>) {
        if self.cache_policy == CachePolicy::TrustFresh {
            match self.store.load_if_fresh(namespace) {
                Ok(true) => return,
                Ok(false) => {}
                // Malformed snapshots are already discarded by the store
                Err(e) => tracing::warn!("Rebuilding index: {}", e),
            }
        }
        self.store.clear_namespace(namespace);
    }

    /// Fetch, index and merge a single document
    async fn index_document(&self, path: &str, namespace: Option<&str>) -> Result<usize> {
        let text = self.fetcher.fetch(path, &self.headers).await?;

        let segment = DocumentIndexer::new(self.depth).index(path, &text);
        let entries = segment.len();
        self.store.merge(namespace, path, segment);

        tracing::debug!("Merged {} ({} entries)", path, entries);
        Ok(entries)
    }
}
