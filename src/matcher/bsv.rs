//! cTAKES "bar separated values" tables.
//!
//! The clinical pipeline writes one table per document with a header row and
//! one row per identified annotation. Only six columns matter here; any other
//! columns are ignored.

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use tracing::debug;

use super::json::split_cuis;
use crate::core::{Meaning, Occurrence, Span, TermMatches, push_occurrence};

const DOCUMENT_TEXT: &str = "Document Text";
const SEMANTIC_GROUP: &str = "Semantic Group";
const SPAN: &str = "Span";
const NEGATED: &str = "Negated";
const UNCERTAIN: &str = "Uncertain";
const CUI: &str = "CUI";

static SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*,\s*(\d+)\s*$").unwrap());

/// Column positions resolved from the header row.
struct Columns {
    text: usize,
    group: usize,
    span: usize,
    negated: usize,
    uncertain: usize,
    cui: usize,
    width: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self> {
        let names: Vec<&str> = header.split('|').map(str::trim).collect();
        let find = |name: &str| {
            names
                .iter()
                .position(|n| n.eq_ignore_ascii_case(name))
                .ok_or_else(|| anyhow!("BSV header is missing the \"{}\" column", name))
        };

        Ok(Self {
            text: find(DOCUMENT_TEXT)?,
            group: find(SEMANTIC_GROUP)?,
            span: find(SPAN)?,
            negated: find(NEGATED)?,
            uncertain: find(UNCERTAIN)?,
            cui: find(CUI)?,
            width: names.len(),
        })
    }
}

/// Parse a cTAKES BSV table into per-term matches.
///
/// Rows without a CUI are skipped. Terms are the trimmed document text of
/// each row, in order of first appearance.
pub fn parse_bsv(input: &str) -> Result<Vec<TermMatches>> {
    let mut lines = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(Vec::new());
    };
    let columns = Columns::from_header(header)?;

    let mut matches: Vec<TermMatches> = Vec::new();
    let mut skipped = 0usize;

    for (line_idx, line) in lines {
        let line_no = line_idx + 1;
        let cells: Vec<&str> = line.split('|').map(str::trim).collect();
        if cells.len() < columns.width {
            bail!(
                "BSV line {}: expected {} columns, found {}",
                line_no,
                columns.width,
                cells.len()
            );
        }

        let cuis = split_cuis(cells[columns.cui]);
        if cuis.is_empty() {
            skipped += 1;
            continue;
        }

        let context = || format!("BSV line {}", line_no);
        let span = parse_span(cells[columns.span]).with_context(context)?;
        let negated = parse_flag(cells[columns.negated]).with_context(context)?;
        let uncertain = parse_flag(cells[columns.uncertain]).with_context(context)?;

        let meaning = Meaning::new(cells[columns.group], cuis)
            .negated(negated)
            .uncertain(uncertain);

        push_occurrence(&mut matches, cells[columns.text], Occurrence::new(span, meaning));
    }

    if skipped > 0 {
        debug!(skipped, "skipped BSV rows without a CUI");
    }

    Ok(matches)
}

fn parse_span(cell: &str) -> Result<Span> {
    let captures = SPAN_REGEX
        .captures(cell)
        .ok_or_else(|| anyhow!("malformed span \"{}\", expected \"start, end\"", cell))?;
    let start: usize = captures[1].parse()?;
    let end: usize = captures[2].parse()?;
    Ok(Span::new(start, end)?)
}

fn parse_flag(cell: &str) -> Result<bool> {
    match cell.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" | "" => Ok(false),
        other => bail!("malformed flag \"{}\", expected true or false", other),
    }
}
