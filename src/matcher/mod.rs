//! Readers for term-matcher output.
//!
//! The matcher itself runs elsewhere; this module only turns what it wrote
//! into validated [`TermMatches`] for the core.
//!
//! - `json`: term -> occurrence records, in either record shape
//! - `bsv`: cTAKES bar-separated tables

mod bsv;
mod json;

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;

use crate::core::TermMatches;

pub use bsv::parse_bsv;
pub use json::{matches_from_value, matches_to_value, parse_matches};

/// Serialization of matcher output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchFormat {
    Json,
    Bsv,
}

impl MatchFormat {
    /// Guess the format from a file extension; anything but `.bsv` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bsv") => MatchFormat::Bsv,
            _ => MatchFormat::Json,
        }
    }

    pub fn parse(self, input: &str) -> Result<Vec<TermMatches>> {
        match self {
            MatchFormat::Json => parse_matches(input),
            MatchFormat::Bsv => parse_bsv(input),
        }
    }
}
