//! Markdown and HTML stripping for matchable body text.
//!
//! A fixed, ordered list of substitutions. The regex crate has no
//! backreferences, so each paired delimiter gets its own pattern.

use once_cell::sync::Lazy;
use regex::Regex;

// Regex patterns compiled once at startup
static SUBSTITUTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // Images: ![alt](url)
        (r"!\[[^\]]*\]\([^)]*\)", ""),
        // Links: [text](url)
        (r"\[([^\]]+)\]\(([^)]+)\)", "$1"),
        // Bold
        (r"\*\*(.*?)\*\*", "$1"),
        (r"__(.*?)__", "$1"),
        // Italic
        (r"\*(.*?)\*", "$1"),
        (r"_(.*?)_", "$1"),
        // Bold-italic
        (r"\*\*\*(.*?)\*\*\*", "$1"),
        (r"___(.*?)___", "$1"),
        // Headers
        (r"(?m)^#{1,6}\s*(.*)$", "$1"),
        // Unordered list markers
        (r"(?m)^\s*[-*+]\s+", ""),
        // Ordered list markers
        (r"(?m)^\s*\d+\.\s+", ""),
        // Blockquote markers
        (r"(?m)^\s*>+\s*", ""),
        // HTML tags
        (r"</?[^>]+(>|$)", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Markers of embedded widgets that are not searchable prose
const EMBED_MARKERS: [&str; 4] = ["iframe", ":fas", ":fab", "embedly-card"];

/// Plain text of a markdown body
pub fn strip_markdown(content: &str) -> String {
    let mut text = content.to_string();
    for (pattern, replacement) in SUBSTITUTIONS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text.trim().to_string()
}

/// Whether stripped body text carries an embed marker
pub fn is_embedded_content(text: &str) -> bool {
    EMBED_MARKERS.iter().any(|marker| text.contains(marker))
}
