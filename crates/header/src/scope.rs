//! Comment-scope classification.
//!
//! An editor host answers "is this offset inside a comment" from its syntax
//! engine. Without one, a line-oriented scan over the language's delimiters
//! is enough for header work: headers sit in plain comment blocks at the top
//! of a file, not inside string literals or other constructs that would fool
//! a token scan.

use std::ops::Range;

use masthead_core::CommentStyle;

/// Comment spans of a piece of text, precomputed for membership queries.
#[derive(Debug)]
pub struct CommentScope {
    spans: Vec<Range<usize>>,
}

impl CommentScope {
    /// Scan `text` with the given delimiters.
    pub fn new(text: &str, style: &CommentStyle) -> Self {
        let spans = if style.is_block() {
            block_spans(text, style.start, style.end)
        } else {
            line_spans(text, style.start.trim())
        };
        Self { spans }
    }

    /// Whether a byte offset falls inside a comment.
    pub fn contains(&self, offset: usize) -> bool {
        self.spans.iter().any(|s| s.contains(&offset))
    }

    /// Whether an entire byte range falls inside one comment span.
    pub fn contains_range(&self, range: &Range<usize>) -> bool {
        self.spans
            .iter()
            .any(|s| s.start <= range.start && range.end <= s.end)
    }
}

/// Spans of `open ... close` comments; an unclosed comment runs to the end.
fn block_spans(text: &str, open: &str, close: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(start) = text[pos..].find(open).map(|i| pos + i) {
        let body = start + open.len();
        let end = text[body..]
            .find(close)
            .map(|i| body + i + close.len())
            .unwrap_or(text.len());
        spans.push(start..end);
        pos = end;
    }
    spans
}

/// Per-line spans from the first comment token to the end of the line.
fn line_spans(text: &str, token: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        if let Some(i) = content.find(token) {
            spans.push(line_start + i..line_start + content.len());
        }
        line_start += line.len();
    }
    spans
}
