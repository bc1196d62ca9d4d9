//! Core domain logic
//!
//! Everything except the command-line front end.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Index entries, results and build reports
//! - **xdg**: XDG directory handling
//! - **indexer**: Path resolution, fetching and per-document segmentation
//! - **storage**: Shared index and its persisted copy
//! - **search**: Keyword scoring and snippet extraction
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod indexer;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{DocsiftError, Result};
pub use services::Services;
