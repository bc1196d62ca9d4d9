//! Unified service container for docsift
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::{
    DocumentFetcher, FileFetcher, FileWalker, HttpFetcher, IndexingPipeline, PathResolver,
};
use crate::core::search::SearchService;
use crate::core::storage::{FileStore, IndexStore, KeyValueStore, MemoryStore};
use crate::core::types::BuildReport;
use std::sync::Arc;
use std::time::Duration;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Shared index, read by queries and written by builds
    pub store: Arc<IndexStore>,

    /// Query engine over the store
    pub search: Arc<SearchService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    ///
    /// Persists under `storage.index_dir`; if that directory cannot be
    /// used the index is kept in memory only.
    pub fn new(config: Config) -> Self {
        let kv: Arc<dyn KeyValueStore> = match FileStore::open(&config.storage.index_dir) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!("Index will not be persisted: {}", e);
                Arc::new(MemoryStore::new())
            }
        };
        Self::with_store(config, kv)
    }

    /// Create services over an explicit key/value backend
    pub fn with_store(config: Config, kv: Arc<dyn KeyValueStore>) -> Self {
        let store = Arc::new(IndexStore::new(kv));
        let search = Arc::new(SearchService::new(Arc::clone(&store)));

        Self {
            store,
            search,
            config: Arc::new(config),
        }
    }

    /// Namespace scoping the persisted keys
    pub fn namespace(&self) -> Option<&str> {
        self.config.search.namespace.as_deref()
    }

    /// HTTP fetcher when `base_url` is set, local files otherwise
    pub fn create_fetcher(&self) -> Result<Arc<dyn DocumentFetcher>> {
        let source = &self.config.source;
        match &source.base_url {
            Some(base_url) => Ok(Arc::new(HttpFetcher::new(
                base_url.clone(),
                Duration::from_secs(self.config.limits.request_timeout_sec),
            )?)),
            None => Ok(Arc::new(FileFetcher::new(source.root.clone()))),
        }
    }

    /// Create an IndexingPipeline from the search settings
    pub fn create_pipeline(&self) -> Result<IndexingPipeline> {
        let search = &self.config.search;
        Ok(IndexingPipeline::new(
            self.create_fetcher()?,
            Arc::clone(&self.store),
            search.depth,
            search.max_age_ms,
        )
        .with_headers(self.config.source.request_headers.clone())
        .with_cache_policy(search.cache_policy))
    }

    /// Resolver for the configured `paths` setting
    ///
    /// Local sources fall back to walking the docs root.
    pub fn path_resolver(&self) -> Result<PathResolver> {
        let source = &self.config.source;
        let resolver = PathResolver::new(
            self.create_fetcher()?,
            source.request_headers.clone(),
            source.sidebar.clone(),
        );

        if source.base_url.is_some() {
            return Ok(resolver);
        }
        let walker = FileWalker::new(
            source.include_patterns.clone(),
            source.exclude_patterns.clone(),
        )?;
        Ok(resolver.with_local_fallback(source.root.clone(), walker))
    }

    /// Document paths for the configured `paths` setting (not yet normalized)
    pub async fn resolve_paths(&self) -> Result<Vec<String>> {
        self.path_resolver()?
            .resolve(&self.config.search.paths)
            .await
    }

    /// Resolve paths and run one indexing pass
    pub async fn build_index(&self) -> Result<BuildReport> {
        let paths = self.resolve_paths().await?;
        let pipeline = self.create_pipeline()?;
        Ok(pipeline.build(&paths, self.namespace()).await)
    }

    /// Load a fresh persisted index, or build one
    ///
    /// Returns the build report when a build was needed.
    pub async fn ensure_index(&self) -> Result<Option<BuildReport>> {
        let namespace = self.namespace();
        match self.store.load_if_fresh(namespace) {
            Ok(true) => {
                tracing::debug!("Using persisted index ({} entries)", self.store.entry_count());
                return Ok(None);
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("Rebuilding index: {}", e),
        }
        self.build_index().await.map(Some)
    }
}
