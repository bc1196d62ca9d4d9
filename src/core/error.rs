//! Error types and error handling for docsift.
//!
//! This module defines the error types used throughout the crate.
//! Most failures inside an indexing pass are recovered locally
//! (skipped documents, in-memory fallback); the variants here are
//! what gets logged or surfaced to the CLI.

use thiserror::Error;

/// Result type alias for docsift operations
pub type Result<T> = std::result::Result<T, DocsiftError>;

/// Main error type for docsift
#[derive(Error, Debug)]
pub enum DocsiftError {
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid index snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl DocsiftError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocsiftError::InvalidPath(_))
            || matches!(self, DocsiftError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
