//! Keyword scoring over the shared index.
//!
//! Every entry is scored against every keyword: a title hit is worth
//! 3, a body-only hit 2. Each matching keyword contributes a
//! highlighted snippet window around its first body match.

use regex::Regex;
use std::sync::Arc;
use std::time::Instant;

use crate::core::search::query::{keyword_pattern, normalize_for_match, parse_keywords};
use crate::core::search::strip::{is_embedded_content, strip_markdown};
use crate::core::storage::IndexStore;
use crate::core::types::{IndexEntry, ScoredResult};

const TITLE_WEIGHT: u32 = 3;
const BODY_WEIGHT: u32 = 2;

/// Matches closer than this to the start keep the window at 0
const LEADING_CONTEXT: usize = 11;
const CONTEXT_BEFORE: usize = 10;
const CONTEXT_AFTER: usize = 60;
const LEADING_WINDOW: usize = 70;

const HIGHLIGHT: &str = r#"<em class="search-keyword">${0}</em>"#;
const ELLIPSIS: &str = "...";

/// Query service over an [`IndexStore`]
#[derive(Clone)]
pub struct SearchService {
    store: Arc<IndexStore>,
}

impl SearchService {
    /// Create a new search service
    pub fn new(store: Arc<IndexStore>) -> Self {
        Self { store }
    }

    /// Rank every indexed entry against `query`.
    ///
    /// Never fails; an empty query returns no results. Queries issued
    /// during a build see the entries merged so far.
    pub fn search(&self, query: &str) -> Vec<ScoredResult> {
        let start = Instant::now();
        let entries = self.store.entries();
        let results = score_entries(&entries, query);

        tracing::debug!(
            "Query {:?}: {} results from {} entries in {}ms",
            query,
            results.len(),
            entries.len(),
            start.elapsed().as_millis()
        );
        results
    }

    /// Like [`search`](Self::search), keeping at most `limit` results
    pub fn search_limited(&self, query: &str, limit: usize) -> Vec<ScoredResult> {
        let mut results = self.search(query);
        results.truncate(limit);
        results
    }
}

/// Score `entries` against `query`, highest score first.
///
/// Ties keep the order the entries were given in.
pub fn score_entries<'a, I>(entries: I, query: &str) -> Vec<ScoredResult>
where
    I: IntoIterator<Item = &'a IndexEntry>,
{
    let keywords: Vec<(usize, Regex)> = parse_keywords(query)
        .iter()
        .filter_map(|keyword| keyword_pattern(keyword).map(|p| (keyword.chars().count(), p)))
        .collect();
    if keywords.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<ScoredResult> = entries
        .into_iter()
        .filter_map(|entry| score_entry(entry, &keywords))
        .collect();

    // Stable: equal scores stay in encounter order
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

fn score_entry(entry: &IndexEntry, keywords: &[(usize, Regex)]) -> Option<ScoredResult> {
    let title = entry.title.trim();
    let body = strip_markdown(entry.body.trim());

    if is_embedded_content(&body) || (title.is_empty() && body.is_empty()) {
        return None;
    }

    let title = normalize_for_match(title);
    let body = normalize_for_match(&body);
    let body_chars: Vec<char> = body.chars().collect();

    let mut score = 0;
    let mut content = String::new();

    for (keyword_len, pattern) in keywords {
        let title_hit = pattern.is_match(&title);
        let body_hit = pattern
            .find(&body)
            .map(|m| body[..m.start()].chars().count());

        if !title_hit && body_hit.is_none() {
            continue;
        }
        score += if title_hit { TITLE_WEIGHT } else { BODY_WEIGHT };

        if body_chars.is_empty() {
            continue;
        }
        let (start, end) = snippet_window(&body_chars, body_hit.unwrap_or(0), *keyword_len);
        let window: String = body_chars[start..end].iter().collect();
        content.push_str(&pattern.replace_all(&window, HIGHLIGHT));
        content.push_str(ELLIPSIS);
    }

    (score > 0).then(|| ScoredResult {
        title,
        content,
        url: entry.slug.clone(),
        score,
    })
}

/// Character range of the snippet around a match at `index`
fn snippet_window(text: &[char], index: usize, keyword_len: usize) -> (usize, usize) {
    let len = text.len();

    let start = if index < LEADING_CONTEXT {
        Some(0)
    } else {
        let limit = (index - CONTEXT_BEFORE).min(len.saturating_sub(1));
        text[..=limit].iter().rposition(|c| *c == ' ')
    };

    let end = match start {
        Some(0) => LEADING_WINDOW,
        _ => {
            let from = index + keyword_len + CONTEXT_AFTER;
            text.iter()
                .skip(from)
                .position(|c| *c == ' ')
                .map(|offset| from + offset)
                .unwrap_or(len)
        }
    };

    let start = start.unwrap_or(0);
    (start.min(len), end.clamp(start.min(len), len))
}
