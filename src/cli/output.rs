//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! form. Supports colored output (respects NO_COLOR env var).

use once_cell::sync::Lazy;
use regex::Regex;

static HIGHLIGHT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<em class="search-keyword">(.*?)</em>"#).unwrap());

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for namespaces
    pub fn namespace(s: &str) -> ColoredString {
        s.cyan()
    }

    /// Style for document paths and result URLs
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Style for search scores
    pub fn score(s: &str) -> ColoredString {
        s.magenta()
    }

    /// Style for rank numbers
    pub fn rank(s: &str) -> ColoredString {
        s.green().bold()
    }

    /// Style for matched keywords in snippets
    pub fn keyword(s: &str) -> ColoredString {
        s.yellow().bold()
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Time left until an epoch-millisecond expiry (e.g., "in 59m", "expired")
pub fn format_expiry(expires_at_ms: i64, now_ms: i64) -> String {
    let remaining = expires_at_ms - now_ms;
    if remaining <= 0 {
        return "expired".to_string();
    }

    let mins = remaining / 60_000;
    let hours = mins / 60;
    let days = hours / 24;

    if days > 0 {
        format!("in {days}d")
    } else if hours > 0 {
        format!("in {hours}h {}m", mins % 60)
    } else if mins > 0 {
        format!("in {mins}m")
    } else {
        "in <1m".to_string()
    }
}

/// Terminal rendering of an HTML-safe result field.
///
/// Keyword highlights become colored text and entities are decoded.
pub fn render_html(text: &str) -> String {
    let highlighted = HIGHLIGHT_TAG.replace_all(text, |caps: &regex::Captures<'_>| {
        colors::keyword(&caps[1]).to_string()
    });
    unescape_html(&highlighted)
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}
