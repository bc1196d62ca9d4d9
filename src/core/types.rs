//! Core data types for docsift.
//!
//! Index entries, per-document segments, scored results and build
//! reports shared by the indexer, the store and the query engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One heading-scoped section of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Document path plus anchor (`guide.md#setup`), or the bare path
    /// for content that precedes the first heading
    #[serde(default)]
    pub slug: String,

    /// Heading text with directives and ignore markers removed
    #[serde(default)]
    pub title: String,

    /// Raw text of the blocks following the heading
    #[serde(default)]
    pub body: String,
}

impl IndexEntry {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            body: String::new(),
        }
    }
}

/// Slug -> entry for a single document, in document order
pub type DocumentIndex = IndexMap<String, IndexEntry>;

/// Document path -> segment, for a single namespace
pub type NamespaceIndex = IndexMap<String, DocumentIndex>;

/// A ranked query hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// HTML-escaped, diacritic-folded title
    pub title: String,

    /// HTML-safe snippet with `<em class="search-keyword">` highlights
    pub content: String,

    /// Slug of the matched entry
    pub url: String,

    /// Accumulated keyword weight (3 per title hit, 2 per body hit)
    pub score: u32,
}

/// Statistics from one indexing pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildReport {
    /// Namespace the pass wrote to (`None` for the default namespace)
    pub namespace: Option<String>,

    /// Paths handed to the build before normalization
    pub paths_requested: usize,

    /// Paths left after normalization and de-duplication
    pub paths_unique: usize,

    /// Documents fetched and indexed successfully
    pub documents_indexed: usize,

    /// Documents whose fetch failed (skipped)
    pub documents_failed: usize,

    /// Documents reused from a fresh persisted copy
    pub documents_reused: usize,

    /// Entries produced by this pass
    pub entries_created: usize,

    /// Whether the snapshot and expiry reached durable storage
    pub persisted: bool,

    /// Expiry written with the snapshot (epoch milliseconds)
    pub expires_at: Option<i64>,

    /// Indexing duration in milliseconds
    pub duration_ms: u64,
}
