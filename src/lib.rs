//! docsift - full-text search for markdown documentation sites
//!
//! Splits each document into heading-scoped sections, keeps the
//! resulting index in a time-limited persisted cache, and answers
//! keyword queries with weighted, highlighted results.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - indexer (directives, tokenizer, slugs, segmentation, fetch, pipeline)
//!   - storage (global index, key/value persistence)
//!   - search (keyword parsing, markdown stripping, scoring)
//!   - services (unified service container)
//!
//! - **cli**: The `docsift` command-line front end
//!
//! # Key Features
//!
//! - Docsify-compatible anchors (`:id=` directives, duplicate counters)
//! - Concurrent document fetch from a local tree or a published site
//! - Namespaced persistence with expiry
//! - UTF-8 safe snippets (character-based windows, never panics)

// Core domain logic
pub mod core;

// Command-line front end
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{DocsiftError, Result};
pub use core::services::Services;
pub use core::types::*;
