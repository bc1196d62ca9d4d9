//! Query preprocessing.
//!
//! Splits a query into keywords and builds the literal,
//! case-insensitive pattern each keyword is matched with.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use unicode_normalization::UnicodeNormalization;

use crate::core::indexer::escape_html;

// Whitespace, hyphen, fullwidth comma, backslash, slash
static KEYWORD_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-，\\/]+").unwrap());

/// Keywords of a query.
///
/// A query that splits into several tokens is also kept whole, first,
/// so it is scored both as a phrase and word by word. An empty query
/// has no keywords.
///
/// # Examples
///
/// ```
/// use docsift::core::search::parse_keywords;
///
/// assert_eq!(parse_keywords("token"), vec!["token"]);
/// assert_eq!(
///     parse_keywords(" docsify-cli init "),
///     vec!["docsify-cli init", "docsify", "cli", "init"]
/// );
/// assert!(parse_keywords("   ").is_empty());
/// ```
pub fn parse_keywords(query: &str) -> Vec<String> {
    let query = query.trim();

    let mut keywords: Vec<String> = KEYWORD_SEPARATOR
        .split(query)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    if keywords.len() > 1 {
        keywords.insert(0, query.to_string());
    }
    keywords
}

/// Decompose (NFD) and drop combining diacritical marks
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Text as it is matched: diacritic-free, then HTML-escaped
pub fn normalize_for_match(text: &str) -> String {
    escape_html(&strip_diacritics(text))
}

/// Case-insensitive literal pattern for a keyword
pub fn keyword_pattern(keyword: &str) -> Option<Regex> {
    let literal = regex::escape(&normalize_for_match(keyword));
    match RegexBuilder::new(&literal).case_insensitive(true).build() {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::debug!("Skipping keyword {:?}: {}", keyword, e);
            None
        }
    }
}
