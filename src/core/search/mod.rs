//! Full-text search over the heading-scoped index.
//!
//! Keywords are matched literally and case-insensitively against the
//! diacritic-folded, HTML-escaped title and markdown-stripped body of
//! every entry. Results carry an HTML-safe highlighted snippet.

mod engine;
mod query;
mod strip;

pub use engine::{score_entries, SearchService};
pub use query::{keyword_pattern, normalize_for_match, parse_keywords, strip_diacritics};
pub use strip::{is_embedded_content, strip_markdown};
