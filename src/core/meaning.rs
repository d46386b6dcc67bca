//! Clinical codings and the raw occurrences a matcher reports.

use serde::{Deserialize, Serialize};

use super::span::Span;

/// One clinical coding attached to a matched span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    /// Semantic group label, e.g. "Disorder" or "Vital Sign".
    pub semantic_group: String,
    /// Concept identifiers in matcher order. Duplicates are kept.
    pub cuis: Vec<String>,
    pub negated: bool,
    pub uncertain: bool,
}

impl Meaning {
    pub fn new(semantic_group: impl Into<String>, cuis: Vec<String>) -> Self {
        Self {
            semantic_group: semantic_group.into(),
            cuis,
            negated: false,
            uncertain: false,
        }
    }

    pub fn negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn uncertain(mut self, uncertain: bool) -> Self {
        self.uncertain = uncertain;
        self
    }
}

/// A single raw match: one span, one meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub span: Span,
    pub meaning: Meaning,
}

impl Occurrence {
    pub fn new(span: Span, meaning: Meaning) -> Self {
        Self { span, meaning }
    }
}

/// All occurrences the matcher reported for one dictionary term, in the
/// order the matcher produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatches {
    pub term: String,
    pub occurrences: Vec<Occurrence>,
}

impl TermMatches {
    pub fn new(term: impl Into<String>, occurrences: Vec<Occurrence>) -> Self {
        Self {
            term: term.into(),
            occurrences,
        }
    }
}

/// Append an occurrence under `term`, creating the term entry on first use.
///
/// Keeps terms in first-seen order, which is the order fusion walks them in.
pub fn push_occurrence(matches: &mut Vec<TermMatches>, term: &str, occurrence: Occurrence) {
    match matches.iter_mut().find(|m| m.term == term) {
        Some(entry) => entry.occurrences.push(occurrence),
        None => matches.push(TermMatches::new(term, vec![occurrence])),
    }
}
