//! Local docs discovery.
//!
//! Walks a docs root and returns the markdown documents under it as
//! root-relative, `/`-separated paths. Used when `paths = "auto"` and
//! the site has no sidebar to read links from.

use glob::Pattern;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{DocsiftError, Result};

/// File system walker with pattern-based filtering
pub struct FileWalker {
    /// Patterns to include (e.g., "*.md")
    include_patterns: Vec<Pattern>,

    /// Patterns to exclude (e.g., "**/node_modules/**", "**/_*.md")
    exclude_patterns: Vec<Pattern>,
}

impl FileWalker {
    /// Create a new file walker
    ///
    /// Returns an error if any pattern is not valid glob syntax.
    pub fn new(include_patterns: Vec<String>, exclude_patterns: Vec<String>) -> Result<Self> {
        Ok(Self {
            include_patterns: compile(include_patterns, "include")?,
            exclude_patterns: compile(exclude_patterns, "exclude")?,
        })
    }

    /// Collect matching documents under `root`, sorted
    pub fn collect_documents(&self, root: &Path) -> Result<Vec<String>> {
        if !root.is_dir() {
            return Err(DocsiftError::InvalidPath(format!(
                "Docs root {root:?} is not a directory"
            )));
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_descend(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let Ok(relative) = entry.path().strip_prefix(root) else {
                        continue;
                    };
                    let Some(relative) = to_slash_path(relative) else {
                        tracing::debug!("Skipping non-UTF-8 path: {:?}", entry.path());
                        continue;
                    };

                    if self.matches_patterns(&relative) {
                        documents.push(relative);
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        documents.sort();
        Ok(documents)
    }

    /// Skip hidden and excluded directories early; never the root itself
    fn should_descend(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();
        if path == root || !entry.file_type().is_dir() {
            return true;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                return false;
            }
        }

        let Some(relative) = path.strip_prefix(root).ok().and_then(to_slash_path) else {
            return true;
        };
        let probe = format!("{relative}/");
        if self
            .exclude_patterns
            .iter()
            .any(|p| p.matches(&relative) || p.matches(&probe))
        {
            tracing::debug!("Skipping excluded directory: {:?}", path);
            return false;
        }

        true
    }

    fn matches_patterns(&self, relative: &str) -> bool {
        let file_name = relative.rsplit('/').next().unwrap_or(relative);

        let included = self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|p| p.matches(relative) || p.matches(file_name));

        included
            && !self
                .exclude_patterns
                .iter()
                .any(|p| p.matches(relative) || p.matches(file_name))
    }
}

fn compile(patterns: Vec<String>, kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .into_iter()
        .map(|p| {
            Pattern::new(&p).map_err(|e| {
                DocsiftError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}"))
            })
        })
        .collect()
}

fn to_slash_path(path: &Path) -> Option<String> {
    let parts = path
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}
