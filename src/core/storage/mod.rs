//! Index persistence.
//!
//! The process-wide [`GlobalIndex`] lives in an [`IndexStore`] that
//! builds merge into and queries read from. The store persists one
//! snapshot and one expiry per namespace to a [`KeyValueStore`].
//!
//! # Persisted Layout
//!
//! ```text
//! docsift.search.expires[/{namespace}]   # epoch ms, decimal string
//! docsift.search.index[/{namespace}]     # {"path": {"slug": {slug, title, body}}}
//! ```

mod index;
mod kv;

pub use index::{expires_key, index_key, GlobalIndex, IndexStore};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
