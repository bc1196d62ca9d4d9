//! Per-document indexing.
//!
//! Splits one markdown document into heading-scoped entries. Every
//! heading at or above the configured depth opens a new entry keyed
//! by `path#anchor`; everything until the next such heading becomes
//! its body. Content before the first heading lands in an entry
//! keyed by the bare path.

use crate::core::indexer::directive::{parse_directives, strip_ignore_markers};
use crate::core::indexer::slugger::{DocsifySlugger, Slugify};
use crate::core::indexer::tokenizer::{MarkdownTokenizer, TokenKind, Tokenizer};
use crate::core::types::{DocumentIndex, IndexEntry};

/// Builds a [`DocumentIndex`] from markdown source
pub struct DocumentIndexer<T = MarkdownTokenizer, S = DocsifySlugger> {
    tokenizer: T,
    slugger: S,
    depth: u8,
}

impl DocumentIndexer {
    /// Indexer with the markdown tokenizer and docsify slugs
    pub fn new(depth: u8) -> Self {
        Self::with_parts(MarkdownTokenizer::new(), DocsifySlugger::new(), depth)
    }
}

impl<T: Tokenizer, S: Slugify> DocumentIndexer<T, S> {
    pub fn with_parts(tokenizer: T, slugger: S, depth: u8) -> Self {
        Self {
            tokenizer,
            slugger,
            depth,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Index one document.
    ///
    /// Never fails: malformed blocks contribute empty text.
    pub fn index(&mut self, path: &str, text: &str) -> DocumentIndex {
        let tokens = self.tokenizer.tokenize(text);
        let mut index = DocumentIndex::new();
        let mut current: Option<String> = None;

        for (position, token) in tokens.iter().enumerate() {
            if token.kind == TokenKind::Heading && token.depth <= self.depth {
                let (cleaned, directives) = parse_directives(&token.text);
                let title = strip_ignore_markers(&cleaned);

                let anchor = match directives.id() {
                    Some(id) => self.slugger.slugify(id),
                    None => self.slugger.slugify(&escape_html(&title)),
                };
                let slug = format!("{path}#{anchor}");

                index.insert(slug.clone(), IndexEntry::new(slug.clone(), title));
                current = Some(slug);
                continue;
            }

            if position == 0 {
                let slug = path.to_string();
                index
                    .entry(slug.clone())
                    .or_insert_with(|| IndexEntry::new(slug.clone(), ""));
                current = Some(slug);
            }

            let Some(slug) = current.as_ref() else {
                continue;
            };

            let content = match token.kind {
                TokenKind::Heading => strip_ignore_markers(&token.content()),
                _ => token.content(),
            };
            // Rules and other text-free blocks add no blank lines
            if content.is_empty() {
                continue;
            }

            let entry = index
                .entry(slug.clone())
                .or_insert_with(|| IndexEntry::new(slug.clone(), ""));
            if entry.body.is_empty() {
                entry.body = content;
            } else {
                entry.body.push('\n');
                entry.body.push_str(&content);
            }
        }

        self.slugger.clear();
        tracing::debug!("Indexed {} ({} entries)", path, index.len());
        index
    }
}

/// Escape the five HTML-significant characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
