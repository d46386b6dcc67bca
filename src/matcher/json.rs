//! JSON matcher output: an object mapping each term to its occurrence records.
//!
//! Record shapes differ between matcher versions, so each record is decoded
//! into one of the known variants and validated before it reaches fusion.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::core::{Meaning, Occurrence, Span, TermMatches};

/// Parse a JSON document of the form `{ "<term>": [record, ...], ... }`.
///
/// Term order follows the document.
pub fn parse_matches(input: &str) -> Result<Vec<TermMatches>> {
    let value: Value = serde_json::from_str(input).context("Failed to parse matcher JSON")?;
    matches_from_value(value)
}

/// Same as [`parse_matches`] for an already-decoded JSON value.
pub fn matches_from_value(value: Value) -> Result<Vec<TermMatches>> {
    let Value::Object(terms) = value else {
        bail!("Matcher output must be a JSON object mapping terms to occurrence lists");
    };

    terms
        .into_iter()
        .map(|(term, records)| -> Result<TermMatches> {
            let Value::Array(records) = records else {
                bail!("Occurrences for term \"{}\" must be a JSON array", term);
            };

            let mut occurrences = Vec::new();
            for (i, record) in records.into_iter().enumerate() {
                let record: Record = serde_json::from_value(record).with_context(|| {
                    format!(
                        "Unrecognized occurrence record #{} for term \"{}\"",
                        i + 1,
                        term
                    )
                })?;
                occurrences.extend(
                    record
                        .into_occurrences()
                        .with_context(|| format!("Record #{} for term \"{}\"", i + 1, term))?,
                );
            }

            Ok(TermMatches::new(term, occurrences))
        })
        .collect()
}

/// Serialize matches back into the spanned record shape, one record per
/// occurrence.
pub fn matches_to_value(matches: &[TermMatches]) -> Value {
    let mut terms = Map::new();
    for term_matches in matches {
        let records: Vec<Value> = term_matches
            .occurrences
            .iter()
            .map(|occ| {
                json!({
                    "cui": occ.meaning.cuis,
                    "negated": occ.meaning.negated,
                    "uncertain": occ.meaning.uncertain,
                    "spans": [{ "start": occ.span.start, "end": occ.span.end }],
                    "semanticGroup": occ.meaning.semantic_group,
                })
            })
            .collect();
        terms.insert(term_matches.term.clone(), Value::Array(records));
    }
    Value::Object(terms)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Record {
    /// cTAKES export: one meaning, possibly several spans.
    Spanned(SpannedRecord),
    /// One meaning at one span, fields inline.
    Flat(FlatRecord),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpannedRecord {
    #[serde(alias = "cuis")]
    cui: CuiList,
    #[serde(default)]
    negated: bool,
    #[serde(default)]
    uncertain: bool,
    spans: Vec<SpanRecord>,
    #[serde(alias = "semantic_group")]
    semantic_group: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatRecord {
    start: usize,
    end: usize,
    #[serde(alias = "cui")]
    cuis: CuiList,
    #[serde(default)]
    negated: bool,
    #[serde(default)]
    uncertain: bool,
    #[serde(alias = "semantic_group")]
    semantic_group: String,
}

#[derive(Debug, Deserialize)]
struct SpanRecord {
    start: usize,
    end: usize,
}

/// CUIs as a list, or as one `;`-joined string the way cTAKES tables hold them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CuiList {
    Many(Vec<String>),
    Joined(String),
}

impl CuiList {
    fn into_vec(self) -> Vec<String> {
        match self {
            CuiList::Many(cuis) => cuis,
            CuiList::Joined(joined) => split_cuis(&joined),
        }
    }
}

pub(super) fn split_cuis(joined: &str) -> Vec<String> {
    joined
        .split(';')
        .map(str::trim)
        .filter(|cui| !cui.is_empty())
        .map(String::from)
        .collect()
}

impl Record {
    fn into_occurrences(self) -> Result<Vec<Occurrence>> {
        match self {
            Record::Spanned(record) => {
                if record.spans.is_empty() {
                    bail!("Record lists no spans");
                }
                let meaning = Meaning::new(record.semantic_group, record.cui.into_vec())
                    .negated(record.negated)
                    .uncertain(record.uncertain);
                record
                    .spans
                    .iter()
                    .map(|s| -> Result<Occurrence> {
                        Ok(Occurrence::new(Span::new(s.start, s.end)?, meaning.clone()))
                    })
                    .collect()
            }
            Record::Flat(record) => {
                let meaning = Meaning::new(record.semantic_group, record.cuis.into_vec())
                    .negated(record.negated)
                    .uncertain(record.uncertain);
                Ok(vec![Occurrence::new(
                    Span::new(record.start, record.end)?,
                    meaning,
                )])
            }
        }
    }
}
