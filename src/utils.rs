//! Common utility functions shared across the codebase.

use crate::core::Span;

/// Character-offset view over a text.
///
/// Matchers report spans in characters; Rust strings index by byte. This maps
/// one onto the other once per document so slicing stays O(1).
pub struct CharIndex<'a> {
    text: &'a str,
    /// Byte offset of each char, plus a trailing `text.len()` sentinel.
    byte_offsets: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut byte_offsets: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        byte_offsets.push(text.len());
        Self { text, byte_offsets }
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.byte_offsets.len() - 1
    }

    /// Text covered by `span`, or `None` if the span runs past the end.
    pub fn slice(&self, span: &Span) -> Option<&'a str> {
        let start = *self.byte_offsets.get(span.start)?;
        let end = *self.byte_offsets.get(span.end)?;
        self.text.get(start..end)
    }

    /// 1-based line and column (in characters) of a character offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let byte = self
            .byte_offsets
            .get(offset)
            .copied()
            .unwrap_or(self.text.len());
        let before = &self.text[..byte];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before[line_start..].chars().count() + 1;
        (line, col)
    }

    /// The full line containing a character offset, without its newline.
    pub fn line_at(&self, offset: usize) -> &'a str {
        let byte = self
            .byte_offsets
            .get(offset)
            .copied()
            .unwrap_or(self.text.len());
        let line_start = self.text[..byte].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = self.text[byte..]
            .find('\n')
            .map(|i| byte + i)
            .unwrap_or(self.text.len());
        self.text[line_start..line_end].trim_end_matches('\r')
    }
}

/// Pluralize a noun for counts in report lines.
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
