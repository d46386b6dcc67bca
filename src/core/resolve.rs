//! Overlap resolution: pick a non-overlapping subset of fused entities.
//!
//! Both strategies return entities in ascending start order and never split,
//! merge, or synthesize an entity; the output is always a subset of the input.

use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{entity::Entity, error::AnnotateError};

/// How overlapping entities are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolveStrategy {
    /// Left-to-right sweep where the first overlapping kept entity is
    /// replaced only by a strictly longer one.
    #[default]
    Greedy,
    /// Weighted interval scheduling maximizing the number of covered characters.
    MaxCoverage,
}

impl ResolveStrategy {
    fn resolver(self) -> ResolverKind {
        match self {
            ResolveStrategy::Greedy => GreedyResolver.into(),
            ResolveStrategy::MaxCoverage => MaxCoverageResolver.into(),
        }
    }
}

/// A resolution algorithm over already-validated entities.
#[enum_dispatch]
pub trait Resolve {
    fn resolve_valid(&self, entities: Vec<Entity>) -> Vec<Entity>;
}

#[enum_dispatch(Resolve)]
enum ResolverKind {
    GreedyResolver,
    MaxCoverageResolver,
}

/// Resolve overlaps with the given strategy.
///
/// Fails with [`AnnotateError::MalformedEntity`] if an entity has an empty or
/// inverted span or carries no meanings. Entities produced by
/// [`crate::core::fuse`] never do.
pub fn resolve(
    entities: Vec<Entity>,
    strategy: ResolveStrategy,
) -> Result<Vec<Entity>, AnnotateError> {
    for entity in &entities {
        check_entity(entity)?;
    }

    let input = entities.len();
    let resolved = strategy.resolver().resolve_valid(entities);

    debug!(
        strategy = ?strategy,
        input,
        kept = resolved.len(),
        dropped = input - resolved.len(),
        "resolved overlaps"
    );

    Ok(resolved)
}

fn check_entity(entity: &Entity) -> Result<(), AnnotateError> {
    if !entity.span.is_well_formed() {
        return Err(AnnotateError::MalformedEntity {
            id: entity.id,
            reason: format!("span {} is empty or inverted", entity.span),
        });
    }
    if entity.meanings.is_empty() {
        return Err(AnnotateError::MalformedEntity {
            id: entity.id,
            reason: "no meanings".to_string(),
        });
    }
    Ok(())
}

pub struct GreedyResolver;

impl Resolve for GreedyResolver {
    fn resolve_valid(&self, mut entities: Vec<Entity>) -> Vec<Entity> {
        // Longer first among equal starts, so the more specific span is seen first.
        entities.sort_by(|a, b| {
            a.span
                .start
                .cmp(&b.span.start)
                .then_with(|| b.span.len().cmp(&a.span.len()))
        });

        let mut resolved: Vec<Entity> = Vec::new();
        for current in entities {
            // First intersection decides, not the best one.
            match resolved.iter().position(|e| e.span.overlaps(&current.span)) {
                Some(i) => {
                    if current.span.len() > resolved[i].span.len() {
                        resolved[i] = current;
                    }
                }
                None => resolved.push(current),
            }
        }

        resolved.sort_by_key(|e| e.span.start);
        resolved
    }
}

pub struct MaxCoverageResolver;

impl Resolve for MaxCoverageResolver {
    fn resolve_valid(&self, mut entities: Vec<Entity>) -> Vec<Entity> {
        entities.sort_by(|a, b| {
            a.span
                .end
                .cmp(&b.span.end)
                .then_with(|| a.span.start.cmp(&b.span.start))
                .then_with(|| a.id.cmp(&b.id))
        });

        let ends: Vec<usize> = entities.iter().map(|e| e.span.end).collect();
        let n = entities.len();

        // best[i]: max coverage using the first i entities.
        let mut best = vec![0usize; n + 1];
        let mut compatible = vec![0usize; n];
        let mut take = vec![false; n];

        for (i, entity) in entities.iter().enumerate() {
            compatible[i] = ends[..i].partition_point(|&end| end <= entity.span.start);
            let with = entity.span.len() + best[compatible[i]];
            // Strict: on ties keep the solution without the later-ending entity.
            if with > best[i] {
                best[i + 1] = with;
                take[i] = true;
            } else {
                best[i + 1] = best[i];
            }
        }

        let mut keep = vec![false; n];
        let mut i = n;
        while i > 0 {
            if take[i - 1] {
                keep[i - 1] = true;
                i = compatible[i - 1];
            } else {
                i -= 1;
            }
        }

        let mut resolved: Vec<Entity> = entities
            .into_iter()
            .zip(keep)
            .filter_map(|(entity, kept)| kept.then_some(entity))
            .collect();
        resolved.sort_by_key(|e| e.span.start);
        resolved
    }
}
