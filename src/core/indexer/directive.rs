//! Inline heading directives.
//!
//! Headings may carry `:key` or `:key=value` tokens, e.g.
//! `## Install :id=setup :ignore`. They are removed from the text
//! before it is used as a title and collected into a map.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static DIRECTIVE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s):([\w-]+:?)=?([\w\-%]+)?").unwrap());

const IGNORE_MARKERS: [&str; 4] = [
    "<!-- {docsify-ignore} -->",
    "{docsify-ignore}",
    "<!-- {docsify-ignore-all} -->",
    "{docsify-ignore-all}",
];

/// Value of a parsed directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
    /// `:key` with no value
    Flag,
    /// `:key=value`
    Value(String),
}

impl DirectiveValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DirectiveValue::Flag => None,
            DirectiveValue::Value(v) => Some(v),
        }
    }
}

/// Directives found in one heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives(HashMap<String, DirectiveValue>);

impl Directives {
    pub fn get(&self, key: &str) -> Option<&DirectiveValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Explicit anchor id (`:id=...`), if one was given with a value
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(DirectiveValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Split heading text into cleaned text and its directives.
///
/// One surrounding quote character is dropped at each end. A key with
/// an internal colon (`:a:b`) is not a directive and stays in the text.
pub fn parse_directives(text: &str) -> (String, Directives) {
    let mut directives = HashMap::new();
    if text.is_empty() {
        return (String::new(), Directives(directives));
    }

    let unquoted = strip_one_quote(text);

    let cleaned = DIRECTIVE_PATTERN.replace_all(unquoted, |caps: &Captures| {
        let key = &caps[1];
        if key.contains(':') {
            return caps[0].to_string();
        }

        let value = caps
            .get(2)
            .map(|v| v.as_str().replace("&quot;", ""))
            .filter(|v| !v.is_empty());
        directives.insert(
            key.to_string(),
            value.map_or(DirectiveValue::Flag, DirectiveValue::Value),
        );
        String::new()
    });

    (cleaned.trim().to_string(), Directives(directives))
}

/// Remove the docsify ignore markers (first occurrence of each) and trim.
pub fn strip_ignore_markers(text: &str) -> String {
    let mut out = text.to_string();
    for marker in IGNORE_MARKERS {
        if let Some(pos) = out.find(marker) {
            out.replace_range(pos..pos + marker.len(), "");
        }
    }
    out.trim().to_string()
}

fn strip_one_quote(text: &str) -> &str {
    let text = text
        .strip_prefix('"')
        .or_else(|| text.strip_prefix('\''))
        .unwrap_or(text);
    text.strip_suffix('"')
        .or_else(|| text.strip_suffix('\''))
        .unwrap_or(text)
}
