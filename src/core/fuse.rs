//! Fusion stage: fold occurrences that share an exact span into one entity.
//!
//! Two scopes are supported:
//!
//! - `Global` groups by span across every term, so the same surface text
//!   matched by two dictionary terms becomes one ambiguous entity.
//! - `PerTerm` only folds occurrences of the same term and concatenates the
//!   per-term results, reproducing the older behaviour byte for byte.

use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    entity::{Entity, EntityId},
    error::AnnotateError,
    meaning::{Meaning, Occurrence, TermMatches},
    span::Span,
};
use crate::utils::CharIndex;

/// Which occurrences may be folded into the same entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FusionScope {
    /// Exact-span fusion across all terms.
    #[default]
    Global,
    /// Exact-span fusion within each term only.
    PerTerm,
}

/// Fuse matcher occurrences into entities.
///
/// Returns one entity per distinct fusion group, in the order groups were
/// first seen. Entity ids are their positions in the returned sequence. The
/// result is *not* sorted by position; [`crate::core::annotate`] does that.
///
/// Fails with [`AnnotateError::InvalidSpan`] if any occurrence is empty,
/// inverted, or ends past the text.
pub fn fuse(
    text: &str,
    matches: &[TermMatches],
    scope: FusionScope,
) -> Result<Vec<Entity>, AnnotateError> {
    let index = CharIndex::new(text);
    validate_spans(matches, index.char_len())?;

    let groups = match scope {
        FusionScope::Global => group_global(matches),
        FusionScope::PerTerm => matches.iter().flat_map(group_term).collect(),
    };

    let entities = groups
        .into_iter()
        .enumerate()
        .map(|(position, group)| group.into_entity(EntityId(position), &index))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        scope = ?scope,
        terms = matches.len(),
        occurrences = matches.iter().map(|m| m.occurrences.len()).sum::<usize>(),
        entities = entities.len(),
        ambiguous = entities.iter().filter(|e| e.is_ambiguous()).count(),
        "fused occurrences"
    );

    Ok(entities)
}

/// Drop occurrences whose semantic group already appeared earlier in the same
/// fusion group.
///
/// A matcher often reports the same span several times with different CUIs of
/// one semantic group. Collapsing keeps the first of each group so the entity
/// only stays ambiguous across genuinely different categories.
pub fn collapse_semantic_groups(matches: &[TermMatches], scope: FusionScope) -> Vec<TermMatches> {
    let mut seen_global: Vec<(Span, String)> = Vec::new();

    matches
        .iter()
        .map(|term_matches| {
            let mut seen_term: Vec<(Span, String)> = Vec::new();
            let seen = match scope {
                FusionScope::Global => &mut seen_global,
                FusionScope::PerTerm => &mut seen_term,
            };

            let occurrences = term_matches
                .occurrences
                .iter()
                .filter(|occ| {
                    let key = (occ.span, occ.meaning.semantic_group.clone());
                    if seen.contains(&key) {
                        false
                    } else {
                        seen.push(key);
                        true
                    }
                })
                .cloned()
                .collect();

            TermMatches::new(term_matches.term.clone(), occurrences)
        })
        .collect()
}

fn validate_spans(matches: &[TermMatches], text_len: usize) -> Result<(), AnnotateError> {
    for term_matches in matches {
        for occ in &term_matches.occurrences {
            if !occ.span.is_well_formed() || occ.span.end > text_len {
                return Err(AnnotateError::InvalidSpan {
                    term: Some(term_matches.term.clone()),
                    start: occ.span.start,
                    end: occ.span.end,
                    text_len: Some(text_len),
                });
            }
        }
    }
    Ok(())
}

/// An entity under construction.
struct Group {
    span: Span,
    terms: Vec<String>,
    meanings: Vec<Meaning>,
}

impl Group {
    fn open(term: &str, occ: &Occurrence) -> Self {
        Self {
            span: occ.span,
            terms: vec![term.to_string()],
            meanings: vec![occ.meaning.clone()],
        }
    }

    fn absorb(&mut self, term: &str, occ: &Occurrence) {
        if !self.terms.iter().any(|t| t == term) {
            self.terms.push(term.to_string());
        }
        self.meanings.push(occ.meaning.clone());
    }

    fn into_entity(self, id: EntityId, index: &CharIndex) -> Result<Entity, AnnotateError> {
        let text = index
            .slice(&self.span)
            .ok_or_else(|| AnnotateError::InvalidSpan {
                term: self.terms.first().cloned(),
                start: self.span.start,
                end: self.span.end,
                text_len: Some(index.char_len()),
            })?
            .to_string();

        Ok(Entity {
            id,
            span: self.span,
            text,
            terms: self.terms,
            meanings: self.meanings,
        })
    }
}

/// Per-term fusion: scan later occurrences for exact-span matches, marking
/// the ones already folded so they are not emitted twice.
fn group_term(term_matches: &TermMatches) -> Vec<Group> {
    let term = term_matches.term.as_str();
    let occurrences = &term_matches.occurrences;
    let mut processed = vec![false; occurrences.len()];
    let mut groups = Vec::new();

    for (i, occ) in occurrences.iter().enumerate() {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        let mut group = Group::open(term, occ);
        for (j, later) in occurrences.iter().enumerate().skip(i + 1) {
            if !processed[j] && later.span == group.span {
                group.absorb(term, later);
                processed[j] = true;
            }
        }
        groups.push(group);
    }

    groups
}

fn group_global(matches: &[TermMatches]) -> Vec<Group> {
    let mut by_span: HashMap<Span, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for term_matches in matches {
        let term = term_matches.term.as_str();
        for occ in &term_matches.occurrences {
            match by_span.get(&occ.span) {
                Some(&position) => groups[position].absorb(term, occ),
                None => {
                    by_span.insert(occ.span, groups.len());
                    groups.push(Group::open(term, occ));
                }
            }
        }
    }

    groups
}
