//! Document indexing module.
//!
//! Turns markdown documents into heading-scoped index entries:
//!
//! - Directive parsing (`:id=`, `:ignore`, ...) in heading text
//! - Block tokenization via pulldown-cmark
//! - Docsify-compatible anchor slugs
//! - Per-document segmentation by heading depth
//! - Path resolution (sidebar, manifest, or explicit list)
//! - Concurrent fetch and merge into the shared index store

pub mod directive;
pub mod document;
pub mod fetch;
pub mod paths;
pub mod pipeline;
pub mod slugger;
pub mod tokenizer;
pub mod walker;

pub use directive::{parse_directives, strip_ignore_markers, DirectiveValue, Directives};
pub use document::{escape_html, DocumentIndexer};
pub use fetch::{DocumentFetcher, FileFetcher, HttpFetcher, RequestHeaders};
pub use paths::{dedupe_paths, normalize_path, sidebar_links, PathResolver};
pub use pipeline::IndexingPipeline;
pub use slugger::{DocsifySlugger, Slugify};
pub use tokenizer::{BlockToken, MarkdownTokenizer, TokenKind, Tokenizer};
pub use walker::FileWalker;
