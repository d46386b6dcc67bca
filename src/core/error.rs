use thiserror::Error;

use super::entity::EntityId;

/// Errors raised by fusion and resolution.
///
/// Empty input is never an error: both stages return an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotateError {
    /// An occurrence span is empty, inverted, or runs past the end of the text.
    #[error("invalid span [{start}, {end}){}{}", term_suffix(.term), len_suffix(.text_len))]
    InvalidSpan {
        term: Option<String>,
        start: usize,
        end: usize,
        text_len: Option<usize>,
    },

    /// An entity reached resolution in a state fusion never produces.
    #[error("malformed entity #{id}: {reason}")]
    MalformedEntity { id: EntityId, reason: String },
}

fn term_suffix(term: &Option<String>) -> String {
    term.as_ref()
        .map(|t| format!(" for term \"{}\"", t))
        .unwrap_or_default()
}

fn len_suffix(text_len: &Option<usize>) -> String {
    text_len
        .map(|len| format!(" (text has {} characters)", len))
        .unwrap_or_default()
}
