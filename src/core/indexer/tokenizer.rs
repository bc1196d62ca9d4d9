//! Markdown block tokenizer.
//!
//! Flattens a document into its top-level blocks (headings,
//! paragraphs, code, lists, tables, ...) using pulldown-cmark.
//! Inline markup is not interpreted; each token keeps its raw
//! source so the indexer and the search stripper see what the
//! author wrote.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::ops::Range;

/// Kind of a top-level markdown block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Heading,
    Paragraph,
    Code,
    Blockquote,
    List,
    Table,
    Html,
    Hr,
    Other,
}

/// A top-level markdown block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockToken {
    pub kind: TokenKind,

    /// Heading level (1-6); 0 for other blocks
    pub depth: u8,

    /// Text content (heading text, paragraph source, code body, ...)
    pub text: String,

    /// Block source as written
    pub raw: String,

    /// Table header cells
    pub header: Vec<String>,

    /// Table body rows
    pub cells: Vec<Vec<String>>,
}

impl BlockToken {
    fn new(kind: TokenKind, raw: &str) -> Self {
        Self {
            kind,
            depth: 0,
            text: String::new(),
            raw: raw.to_string(),
            header: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Text contributed to an entry body.
    ///
    /// Tables become one pipe-joined line per row (header first),
    /// lists use their raw source.
    pub fn content(&self) -> String {
        if !self.text.is_empty() {
            return self.text.clone();
        }

        match self.kind {
            TokenKind::Table => std::iter::once(&self.header)
                .chain(self.cells.iter())
                .map(|row| row.join(" | "))
                .collect::<Vec<_>>()
                .join(" |\n "),
            TokenKind::List => self.raw.trim_end().to_string(),
            _ => String::new(),
        }
    }
}

/// Converts markdown source into block tokens
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<BlockToken>;
}

/// pulldown-cmark backed tokenizer (CommonMark + GFM tables)
#[derive(Debug, Clone)]
pub struct MarkdownTokenizer {
    options: Options,
}

impl MarkdownTokenizer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }
}

impl Default for MarkdownTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for MarkdownTokenizer {
    fn tokenize(&self, text: &str) -> Vec<BlockToken> {
        let mut tokens = Vec::new();
        let mut nesting = 0usize;
        let mut current: Option<PendingBlock> = None;

        for (event, range) in Parser::new_ext(text, self.options).into_offset_iter() {
            match event {
                Event::Start(tag) => {
                    let raw = slice(text, &range);
                    if nesting == 0 {
                        current = Some(PendingBlock::open(&tag, raw));
                    } else if let Some(block) = current.as_mut() {
                        block.start_inner(&tag, raw);
                    }
                    nesting += 1;
                }
                Event::End(tag_end) => {
                    nesting = nesting.saturating_sub(1);
                    if nesting == 0 {
                        if let Some(block) = current.take() {
                            tokens.push(block.finish());
                        }
                    } else if let Some(block) = current.as_mut() {
                        block.end_inner(tag_end);
                    }
                }
                Event::Rule if nesting == 0 => {
                    tokens.push(BlockToken::new(TokenKind::Hr, slice(text, &range)));
                }
                Event::Html(html) if nesting == 0 => {
                    let mut token = BlockToken::new(TokenKind::Html, &html);
                    token.text = html.trim_end().to_string();
                    tokens.push(token);
                }
                Event::Text(t) | Event::Code(t) => {
                    if let Some(block) = current.as_mut() {
                        block.text.push_str(&t);
                    }
                }
                _ => {}
            }
        }

        tokens
    }
}

/// A top-level block being assembled from parser events
struct PendingBlock {
    token: BlockToken,
    text: String,
    row: Vec<String>,
    in_head: bool,
}

impl PendingBlock {
    fn open(tag: &Tag<'_>, raw: &str) -> Self {
        let kind = match tag {
            Tag::Heading { .. } => TokenKind::Heading,
            Tag::Paragraph => TokenKind::Paragraph,
            Tag::CodeBlock(_) => TokenKind::Code,
            Tag::BlockQuote(..) => TokenKind::Blockquote,
            Tag::List(_) => TokenKind::List,
            Tag::Table(_) => TokenKind::Table,
            Tag::HtmlBlock => TokenKind::Html,
            _ => TokenKind::Other,
        };

        let mut token = BlockToken::new(kind, raw);
        if let Tag::Heading { level, .. } = tag {
            token.depth = *level as u8;
        }

        Self {
            token,
            text: String::new(),
            row: Vec::new(),
            in_head: false,
        }
    }

    fn start_inner(&mut self, tag: &Tag<'_>, raw: &str) {
        match tag {
            Tag::TableHead => self.in_head = true,
            Tag::TableCell => self.row.push(clean_cell(raw)),
            _ => {}
        }
    }

    fn end_inner(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::TableHead => {
                self.in_head = false;
                if !self.row.is_empty() {
                    self.token.header = std::mem::take(&mut self.row);
                }
            }
            TagEnd::TableRow if self.in_head => {
                self.token.header = std::mem::take(&mut self.row);
            }
            TagEnd::TableRow => {
                let row = std::mem::take(&mut self.row);
                self.token.cells.push(row);
            }
            _ => {}
        }
    }

    fn finish(mut self) -> BlockToken {
        let raw = self.token.raw.clone();
        self.token.text = match self.token.kind {
            TokenKind::Heading => heading_text(&raw),
            TokenKind::Paragraph | TokenKind::Html => raw.trim_end().to_string(),
            TokenKind::Code => self.text.trim_end_matches('\n').to_string(),
            TokenKind::Blockquote => blockquote_text(&raw),
            TokenKind::Other => self.text,
            TokenKind::List | TokenKind::Table | TokenKind::Hr => String::new(),
        };
        self.token
    }
}

fn slice<'a>(text: &'a str, range: &Range<usize>) -> &'a str {
    text.get(range.clone()).unwrap_or("")
}

fn clean_cell(raw: &str) -> String {
    raw.trim().trim_matches('|').trim().to_string()
}

/// Heading source without its ATX markers or setext underline
fn heading_text(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(rest) = trimmed.strip_prefix('#') {
        let content = rest.trim_start_matches('#');
        let content = content.trim();
        // Closing sequence: a run of '#' preceded by a space (or nothing)
        let without_closing = content.trim_end_matches('#');
        if without_closing.is_empty() {
            return String::new();
        }
        if without_closing.len() != content.len() && without_closing.ends_with([' ', '\t']) {
            return without_closing.trim_end().to_string();
        }
        return content.to_string();
    }

    // Setext: drop the underline
    let mut lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() > 1 {
        lines.pop();
    }
    lines
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

fn blockquote_text(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
