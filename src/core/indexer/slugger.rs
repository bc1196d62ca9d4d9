//! Heading anchor ids.
//!
//! Produces the same anchors the docs site renders, so a search hit
//! links straight to its heading. Repeated headings within one
//! document get `-1`, `-2`, ... suffixes until `clear()` is called.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]+").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"[\u{2000}-\u{206F}\u{2E00}-\u{2E7F}\\'!"#$%&()*+,./:;<=>?@\[\]^`{|}~]"##)
        .unwrap()
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());
static DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());
static LEADING_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d)").unwrap());

/// Anchor id generator with a per-document reset hook
pub trait Slugify: Send {
    /// Anchor id for `text`, unique since the last `clear()`
    fn slugify(&mut self, text: &str) -> String;

    /// Forget previously issued ids
    fn clear(&mut self);
}

/// Docsify-compatible slugger
#[derive(Debug, Default)]
pub struct DocsifySlugger {
    seen: HashMap<String, usize>,
}

impl DocsifySlugger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Slugify for DocsifySlugger {
    fn slugify(&mut self, text: &str) -> String {
        let base = slug_base(text);

        let count = match self.seen.get(&base) {
            Some(previous) => previous + 1,
            None => 0,
        };
        self.seen.insert(base.clone(), count);

        if count > 0 {
            format!("{base}-{count}")
        } else {
            base
        }
    }

    fn clear(&mut self) {
        self.seen.clear();
    }
}

/// Stateless part of slug generation
pub fn slug_base(text: &str) -> String {
    let slug = UPPERCASE.replace_all(text.trim(), |caps: &regex::Captures| {
        caps[0].to_ascii_lowercase()
    });
    let slug = HTML_TAG.replace_all(&slug, "");
    let slug = PUNCTUATION.replace_all(&slug, "");
    let slug = WHITESPACE.replace_all(&slug, "-");
    let slug = DASHES.replace_all(&slug, "-");
    LEADING_DIGIT.replace(&slug, "_$1").into_owned()
}
