//! The annotation pipeline and the lookup structure it produces.

use serde::Serialize;

use super::{
    entity::{Entity, EntityId},
    error::AnnotateError,
    fuse::{FusionScope, collapse_semantic_groups, fuse},
    meaning::TermMatches,
    resolve::{ResolveStrategy, resolve},
};

/// Knobs for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateOptions {
    pub fusion_scope: FusionScope,
    pub resolve_strategy: ResolveStrategy,
    pub collapse_semantic_groups: bool,
}

/// Fused entities of one document plus the non-overlapping subset chosen for
/// display.
///
/// `fused[i].id == EntityId(i)` always holds, so ids from the resolved layer
/// index straight back into the full set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationLayer {
    #[serde(skip)]
    text: String,
    fused: Vec<Entity>,
    resolved: Vec<Entity>,
}

/// Run fusion and resolution over one document.
///
/// Fused entities are stable-sorted by start before resolution, so entities
/// with equal starts keep their fusion order.
pub fn annotate(
    text: &str,
    matches: &[TermMatches],
    options: &AnnotateOptions,
) -> Result<AnnotationLayer, AnnotateError> {
    let fused = if options.collapse_semantic_groups {
        fuse(
            text,
            &collapse_semantic_groups(matches, options.fusion_scope),
            options.fusion_scope,
        )?
    } else {
        fuse(text, matches, options.fusion_scope)?
    };

    let mut ordered = fused.clone();
    ordered.sort_by_key(|e| e.span.start);
    let resolved = resolve(ordered, options.resolve_strategy)?;

    Ok(AnnotationLayer {
        text: text.to_string(),
        fused,
        resolved,
    })
}

impl AnnotationLayer {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every fused entity, in id order.
    pub fn fused(&self) -> &[Entity] {
        &self.fused
    }

    /// The displayed entities: non-overlapping, ascending by start.
    pub fn resolved(&self) -> &[Entity] {
        &self.resolved
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.fused.get(id.0)
    }

    /// Fused entities that lost resolution, in start order.
    pub fn suppressed(&self) -> Vec<&Entity> {
        let mut suppressed: Vec<&Entity> = self
            .fused
            .iter()
            .filter(|e| !self.is_displayed(e.id))
            .collect();
        suppressed.sort_by_key(|e| e.span.start);
        suppressed
    }

    pub fn is_displayed(&self, id: EntityId) -> bool {
        self.resolved.iter().any(|e| e.id == id)
    }

    /// All fused entities under the span of `id`, the entity itself included,
    /// ordered by start.
    ///
    /// For a displayed entity this answers "what did the matcher find here",
    /// including the matches resolution dropped.
    pub fn matches_at(&self, id: EntityId) -> Vec<&Entity> {
        let Some(anchor) = self.entity(id) else {
            return Vec::new();
        };
        let mut found: Vec<&Entity> = self
            .fused
            .iter()
            .filter(|e| e.span.overlaps(&anchor.span))
            .collect();
        found.sort_by_key(|e| e.span.start);
        found
    }

    pub fn ambiguous_count(&self) -> usize {
        self.resolved.iter().filter(|e| e.is_ambiguous()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.fused.is_empty()
    }
}
