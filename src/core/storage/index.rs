//! Process-wide search index and its persisted copy.

use chrono::Utc;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::error::{DocsiftError, Result};
use crate::core::storage::kv::{KeyValueStore, MemoryStore};
use crate::core::types::{DocumentIndex, IndexEntry, NamespaceIndex};

const EXPIRES_KEY: &str = "docsift.search.expires";
const INDEX_KEY: &str = "docsift.search.index";

/// Persisted expiry key for a namespace
pub fn expires_key(namespace: Option<&str>) -> String {
    scoped(EXPIRES_KEY, namespace)
}

/// Persisted snapshot key for a namespace
pub fn index_key(namespace: Option<&str>) -> String {
    scoped(INDEX_KEY, namespace)
}

fn scoped(base: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{base}/{ns}"),
        _ => base.to_string(),
    }
}

fn namespace_key(namespace: Option<&str>) -> &str {
    namespace.unwrap_or("")
}

/// Namespace -> document path -> segment
///
/// The default namespace lives under the empty key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalIndex {
    namespaces: IndexMap<String, NamespaceIndex>,
}

impl GlobalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every segment of a namespace
    pub fn clear(&mut self, namespace: Option<&str>) {
        self.namespaces.shift_remove(namespace_key(namespace));
    }

    /// Replace the segment for `path`
    pub fn merge(&mut self, namespace: Option<&str>, path: &str, segment: DocumentIndex) {
        self.namespaces
            .entry(namespace_key(namespace).to_string())
            .or_default()
            .insert(path.to_string(), segment);
    }

    pub fn contains(&self, namespace: Option<&str>, path: &str) -> bool {
        self.namespaces
            .get(namespace_key(namespace))
            .is_some_and(|ns| ns.contains_key(path))
    }

    /// JSON object of path -> slug -> entry for one namespace
    pub fn snapshot(&self, namespace: Option<&str>) -> Result<String> {
        let empty = NamespaceIndex::new();
        let ns = self.namespaces.get(namespace_key(namespace)).unwrap_or(&empty);
        Ok(serde_json::to_string(ns)?)
    }

    /// Replace a namespace with a serialized snapshot.
    ///
    /// A snapshot that fails to parse leaves the namespace empty.
    pub fn load(&mut self, namespace: Option<&str>, serialized: &str) -> Result<usize> {
        match serde_json::from_str::<NamespaceIndex>(serialized) {
            Ok(ns) => {
                let documents = ns.len();
                self.namespaces
                    .insert(namespace_key(namespace).to_string(), ns);
                Ok(documents)
            }
            Err(e) => {
                self.clear(namespace);
                Err(DocsiftError::InvalidSnapshot(e.to_string()))
            }
        }
    }

    /// Every entry across all namespaces, in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.namespaces
            .values()
            .flat_map(|ns| ns.values())
            .flat_map(|segment| segment.values())
    }

    pub fn document_count(&self) -> usize {
        self.namespaces.values().map(|ns| ns.len()).sum()
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.document_count() == 0
    }
}

/// Shared index plus its durable copy
///
/// Builds and queries share one store. The write lock is held for a
/// single merge at a time, so queries during a build see whatever has
/// been merged so far.
pub struct IndexStore {
    index: RwLock<GlobalIndex>,
    kv: Arc<dyn KeyValueStore>,
}

impl IndexStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            index: RwLock::new(GlobalIndex::new()),
            kv,
        }
    }

    /// Store with no durable backing
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn read(&self) -> RwLockReadGuard<'_, GlobalIndex> {
        self.index.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, GlobalIndex> {
        self.index.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn clear_namespace(&self, namespace: Option<&str>) {
        self.write().clear(namespace);
    }

    pub fn merge(&self, namespace: Option<&str>, path: &str, segment: DocumentIndex) {
        self.write().merge(namespace, path, segment);
    }

    pub fn contains(&self, namespace: Option<&str>, path: &str) -> bool {
        self.read().contains(namespace, path)
    }

    /// Owned copy of every entry, in insertion order
    pub fn entries(&self) -> Vec<IndexEntry> {
        self.read().entries().cloned().collect()
    }

    pub fn document_count(&self) -> usize {
        self.read().document_count()
    }

    pub fn entry_count(&self) -> usize {
        self.read().entry_count()
    }

    pub fn snapshot(&self, namespace: Option<&str>) -> Result<String> {
        self.read().snapshot(namespace)
    }

    /// Write the snapshot, then the expiry; returns the expiry (epoch ms)
    ///
    /// The expiry goes last so a failed snapshot write never leaves a
    /// fresh expiry behind.
    pub fn persist(&self, namespace: Option<&str>, max_age_ms: i64) -> Result<i64> {
        let expires_at = Utc::now().timestamp_millis().saturating_add(max_age_ms);
        let snapshot = self.snapshot(namespace)?;

        self.kv.set(&index_key(namespace), &snapshot)?;
        self.kv
            .set(&expires_key(namespace), &expires_at.to_string())?;

        tracing::debug!(
            "Persisted {} ({} bytes, expires at {})",
            index_key(namespace),
            snapshot.len(),
            expires_at
        );
        Ok(expires_at)
    }

    /// Stored expiry, if one exists and parses
    pub fn stored_expiry(&self, namespace: Option<&str>) -> Result<Option<i64>> {
        let raw = self.kv.get(&expires_key(namespace))?;
        Ok(raw.and_then(|value| value.trim().parse().ok()))
    }

    /// Whether the persisted copy has not yet expired
    pub fn is_fresh(&self, namespace: Option<&str>) -> bool {
        match self.stored_expiry(namespace) {
            Ok(Some(expires_at)) => expires_at > Utc::now().timestamp_millis(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Cannot read index expiry: {}", e);
                false
            }
        }
    }

    /// Replace a namespace with its persisted snapshot.
    ///
    /// Returns the number of documents loaded, or `None` when no
    /// snapshot is stored.
    pub fn load(&self, namespace: Option<&str>) -> Result<Option<usize>> {
        let Some(serialized) = self.kv.get(&index_key(namespace))? else {
            return Ok(None);
        };

        match self.write().load(namespace, &serialized) {
            Ok(documents) => Ok(Some(documents)),
            Err(e) => {
                tracing::warn!("Discarding persisted index {}: {}", index_key(namespace), e);
                Err(e)
            }
        }
    }

    /// Load the persisted snapshot only while it is fresh
    ///
    /// A fresh expiry with no snapshot next to it counts as stale.
    pub fn load_if_fresh(&self, namespace: Option<&str>) -> Result<bool> {
        if !self.is_fresh(namespace) {
            return Ok(false);
        }
        match self.load(namespace)? {
            Some(_) => Ok(true),
            None => {
                tracing::warn!(
                    "Persisted expiry without snapshot {}",
                    index_key(namespace)
                );
                Ok(false)
            }
        }
    }

    /// Remove both persisted keys of a namespace
    pub fn clear_persisted(&self, namespace: Option<&str>) -> Result<()> {
        self.kv.remove(&expires_key(namespace))?;
        self.kv.remove(&index_key(namespace))?;
        Ok(())
    }
}
