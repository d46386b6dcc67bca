//! Medlayer - annotation layers from clinical term-matcher output
//!
//! Medlayer takes the raw output of a medical term matcher (term -> spans and
//! meanings) for one document, fuses occurrences covering the same text into
//! entities, and resolves overlaps into a display layer where no two
//! annotations share a character.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (annotate, batch, convert, init)
//! - `config`: Configuration file loading and parsing
//! - `core`: Fusion, overlap resolution and the annotation layer
//! - `matcher`: Readers for JSON and cTAKES BSV matcher output
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod matcher;
pub mod utils;
