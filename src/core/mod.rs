//! Core annotation engine.
//!
//! Turns matcher occurrences into a single non-overlapping annotation layer in
//! two pure stages:
//!
//! 1. **Fusion** ([`fuse`]): occurrences sharing an exact span become one
//!    entity carrying every meaning found there.
//! 2. **Resolution** ([`resolve`]): overlapping entities are reduced to a
//!    non-overlapping subset, preferring longer spans.
//!
//! [`annotate`] chains both and returns an [`AnnotationLayer`] that can map a
//! displayed entity back to everything the matcher found under it.

mod entity;
mod error;
mod fuse;
mod layer;
mod meaning;
mod resolve;
mod span;

pub use entity::{Entity, EntityId};
pub use error::AnnotateError;
pub use fuse::{FusionScope, collapse_semantic_groups, fuse};
pub use layer::{AnnotateOptions, AnnotationLayer, annotate};
pub use meaning::{Meaning, Occurrence, TermMatches, push_occurrence};
pub use resolve::{GreedyResolver, MaxCoverageResolver, Resolve, ResolveStrategy, resolve};
pub use span::Span;
