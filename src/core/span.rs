//! Half-open character spans over the source text.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::AnnotateError;

/// A half-open interval `[start, end)` of character offsets.
///
/// Offsets count Unicode scalar values, not bytes, so a span lines up with
/// what a matcher reports for text containing accented characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Build a span, rejecting empty and inverted intervals.
    pub fn new(start: usize, end: usize) -> Result<Self, AnnotateError> {
        let span = Self { start, end };
        if !span.is_well_formed() {
            return Err(AnnotateError::InvalidSpan {
                term: None,
                start,
                end,
                text_len: None,
            });
        }
        Ok(span)
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Two spans intersect unless one ends at or before the other starts.
    pub fn overlaps(&self, other: &Span) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
