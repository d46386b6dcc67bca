use std::fmt;

use serde::Serialize;

use super::{meaning::Meaning, span::Span};

/// Stable identifier of a fused entity: its position in the fused sequence.
///
/// Assigned once right after fusion and carried through sorting and
/// resolution unchanged, so a displayed entity can always be traced back to
/// the full fused set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(pub usize);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All meanings found for one exact span of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    #[serde(flatten)]
    pub span: Span,
    /// The covered slice of the source text.
    pub text: String,
    /// Dictionary terms that contributed a meaning, first-seen order.
    pub terms: Vec<String>,
    pub meanings: Vec<Meaning>,
}

impl Entity {
    pub fn is_ambiguous(&self) -> bool {
        self.meanings.len() > 1
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Semantic groups of all meanings, deduplicated, in meaning order.
    pub fn semantic_groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for meaning in &self.meanings {
            if !groups.contains(&meaning.semantic_group.as_str()) {
                groups.push(&meaning.semantic_group);
            }
        }
        groups
    }
}
