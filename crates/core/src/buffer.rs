//! Text buffer with path, selections and detected language.
//!
//! Stands in for an editor view: the header and formatter machinery operate
//! on a `Buffer` and never touch the filesystem or a UI themselves. A front
//! end loads file contents into a buffer, lets the application mutate it, and
//! decides what to do with the result.

use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

use crate::language::Language;

/// A selected byte range in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Selection {
    /// Create a selection, normalizing order.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Whether the selection covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The selection as a byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// An in-memory text buffer.
#[derive(Debug, Clone)]
pub struct Buffer {
    text: String,
    path: Option<PathBuf>,
    language: Option<&'static Language>,
    selections: Vec<Selection>,
}

impl Buffer {
    /// Create a buffer from text with no backing file.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
            language: None,
            selections: Vec::new(),
        }
    }

    /// Load a buffer from a file, detecting the language from its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self {
            text,
            path: Some(path.to_path_buf()),
            language: Language::detect(path),
            selections: Vec::new(),
        })
    }

    /// Attach a path (and re-detect the language) after the fact.
    pub fn set_path(&mut self, path: PathBuf) {
        self.language = Language::detect(&path);
        self.path = Some(path);
    }

    /// Override the detected language.
    pub fn set_language(&mut self, language: &'static Language) {
        self.language = Some(language);
    }

    /// Buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Backing file path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Basename of the backing file, if any.
    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Detected language, if any.
    pub fn language(&self) -> Option<&'static Language> {
        self.language
    }

    /// Current selections.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Replace the selection list.
    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        self.selections = selections;
    }

    /// Drop all selections.
    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    /// Slice of the text covered by a selection.
    pub fn slice(&self, selection: Selection) -> &str {
        &self.text[selection.range()]
    }

    /// Replace a byte range with new text, shifting selections after it.
    pub fn replace(&mut self, range: Range<usize>, replacement: &str) {
        let removed = range.len();
        let inserted = replacement.len();
        self.text.replace_range(range.clone(), replacement);

        for sel in &mut self.selections {
            if sel.start >= range.end {
                sel.start = sel.start - removed + inserted;
                sel.end = sel.end - removed + inserted;
            } else if sel.start == range.start && sel.end == range.end {
                sel.end = sel.start + inserted;
            }
        }
    }

    /// Insert text at a byte offset.
    pub fn insert(&mut self, offset: usize, text: &str) {
        self.replace(offset..offset, text);
    }

    /// Remove a whole line including its trailing newline.
    pub fn remove_line(&mut self, row: usize) {
        if let Some(range) = self.line_range(row) {
            let end = if range.end < self.text.len() {
                range.end + 1
            } else {
                range.end
            };
            self.replace(range.start..end, "");
        }
    }

    /// Byte range of line `row` (0-based), excluding the newline.
    pub fn line_range(&self, row: usize) -> Option<Range<usize>> {
        let mut start = 0usize;
        for (idx, line) in self.text.split('\n').enumerate() {
            let end = start + line.len();
            if idx == row {
                return Some(start..end);
            }
            start = end + 1;
        }
        None
    }

    /// Text of line `row` (0-based), excluding the newline.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.line_range(row).map(|r| &self.text[r])
    }

    /// (row, column) of a byte offset; the column is a character count.
    pub fn rowcol(&self, offset: usize) -> (usize, usize) {
        let before = &self.text[..offset.min(self.text.len())];
        let row = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|l| l.chars().count())
            .unwrap_or(0);
        (row, col)
    }

    /// Byte range of the full line containing `offset`.
    pub fn line_range_at(&self, offset: usize) -> Range<usize> {
        let offset = offset.min(self.text.len());
        let start = self.text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let end = self.text[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(self.text.len());
        start..end
    }

    /// First regex match at or after `from`, as a byte range.
    pub fn find(&self, pattern: &Regex, from: usize) -> Option<Range<usize>> {
        let from = from.min(self.text.len());
        pattern
            .find(&self.text[from..])
            .map(|m| from + m.start()..from + m.end())
    }

    /// First occurrence of a literal string at or after `from`.
    pub fn find_literal(&self, needle: &str, from: usize) -> Option<Range<usize>> {
        let from = from.min(self.text.len());
        self.text[from..]
            .find(needle)
            .map(|i| from + i..from + i + needle.len())
    }

    /// Display column of the first non-blank character of line `row`.
    ///
    /// Mirrors how an editor places a header at the indentation level of the
    /// cursor line: an all-blank or missing line yields column 0.
    pub fn indent_column(&self, row: usize) -> usize {
        match self.line(row) {
            Some(line) if !line.trim().is_empty() => {
                let indent_end = line.len() - line.trim_start().len();
                UnicodeWidthStr::width(&line[..indent_end])
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_access() {
        let buf = Buffer::new("one\ntwo\nthree");
        assert_eq!(buf.line(0), Some("one"));
        assert_eq!(buf.line(2), Some("three"));
        assert_eq!(buf.line(3), None);
        assert_eq!(buf.line_range(1), Some(4..7));
    }

    #[test]
    fn test_rowcol() {
        let buf = Buffer::new("one\ntwo\nthree");
        assert_eq!(buf.rowcol(0), (0, 0));
        assert_eq!(buf.rowcol(5), (1, 1));
        assert_eq!(buf.rowcol(8), (2, 0));
    }

    #[test]
    fn test_replace_shifts_later_selections() {
        let mut buf = Buffer::new("aaa bbb ccc");
        buf.set_selections(vec![Selection::new(0, 3), Selection::new(8, 11)]);
        buf.replace(0..3, "xxxxx");
        assert_eq!(buf.text(), "xxxxx bbb ccc");
        assert_eq!(buf.selections()[1], Selection::new(10, 13));
    }

    #[test]
    fn test_replace_resizes_matching_selection() {
        let mut buf = Buffer::new("aaa bbb");
        buf.set_selections(vec![Selection::new(4, 7)]);
        buf.replace(4..7, "b");
        assert_eq!(buf.text(), "aaa b");
        assert_eq!(buf.selections()[0], Selection::new(4, 5));
    }

    #[test]
    fn test_remove_line() {
        let mut buf = Buffer::new("one\ntwo\nthree\n");
        buf.remove_line(1);
        assert_eq!(buf.text(), "one\nthree\n");
    }

    #[test]
    fn test_find_from_offset() {
        let buf = Buffer::new("year 2020 and year 2024");
        let re = Regex::new("20[0-9]*").unwrap();
        assert_eq!(buf.find(&re, 0), Some(5..9));
        assert_eq!(buf.find(&re, 9), Some(19..23));
    }

    #[test]
    fn test_indent_column() {
        let buf = Buffer::new("    code here\n\nno_indent");
        assert_eq!(buf.indent_column(0), 4);
        assert_eq!(buf.indent_column(1), 0);
        assert_eq!(buf.indent_column(2), 0);
    }

    #[test]
    fn test_line_range_at() {
        let buf = Buffer::new("one\ntwo\nthree");
        assert_eq!(buf.line_range_at(5), 4..7);
        assert_eq!(buf.line_range_at(0), 0..3);
        assert_eq!(buf.line_range_at(10), 8..13);
    }
}
