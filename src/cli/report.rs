//! Report formatting and printing utilities.
//!
//! Annotations are displayed cargo-style: the covered text, its location,
//! the source line with a caret underline, then one note per meaning.
//! Separate from core logic so medlayer can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use serde_json::json;
use unicode_width::UnicodeWidthStr;

use super::commands::BatchSummary;
use crate::core::{AnnotationLayer, Entity, Meaning};
use crate::utils::{CharIndex, plural};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the resolved annotations of one document to stdout.
pub fn report_layer(layer: &AnnotationLayer, source: &str) {
    report_layer_to(layer, source, &mut io::stdout().lock());
}

/// Print the resolved annotations of one document to a custom writer.
pub fn report_layer_to<W: Write>(layer: &AnnotationLayer, source: &str, writer: &mut W) {
    let index = CharIndex::new(layer.text());

    // Calculate max line number width for alignment
    let max_line_width = layer
        .resolved()
        .iter()
        .map(|e| index.line_col(e.span.start).0.to_string().len())
        .max()
        .unwrap_or(1);

    for entity in layer.resolved() {
        print_entity(layer, entity, &index, source, writer, max_line_width);
    }

    print_layer_summary(layer, writer);
}

/// Print the layer as pretty JSON.
pub fn print_layer_json<W: Write>(layer: &AnnotationLayer, writer: &mut W) -> io::Result<()> {
    let json = serde_json::to_string_pretty(layer)?;
    writeln!(writer, "{}", json)
}

/// Print one line per batch document and a closing summary.
pub fn report_batch_to<W: Write>(summary: &BatchSummary, writer: &mut W) {
    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(layer) => {
                let _ = writeln!(
                    writer,
                    "{} {}: {}",
                    SUCCESS_MARK.green(),
                    outcome.name,
                    layer_counts(layer)
                );
            }
            Err(reason) => {
                let _ = writeln!(
                    writer,
                    "{} {}: {}",
                    FAILURE_MARK.red(),
                    outcome.name,
                    reason.red()
                );
            }
        }
    }

    let _ = writeln!(writer);
    let mut line = format!(
        "Processed {}: {} annotated, {} rejected",
        plural(summary.outcomes.len(), "document", "documents"),
        summary.annotated_count(),
        summary.rejected_count()
    );
    if summary.ignored_count > 0 {
        line.push_str(&format!(", {} ignored", summary.ignored_count));
    }

    let line = if summary.rejected_count() > 0 {
        line.bold().red()
    } else {
        line.bold().green()
    };
    let _ = writeln!(writer, "{}", line);
}

/// Print the batch result as pretty JSON.
pub fn print_batch_json<W: Write>(summary: &BatchSummary, writer: &mut W) -> io::Result<()> {
    let documents: Vec<_> = summary
        .outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(layer) => json!({
                "document": outcome.name,
                "annotations": layer.resolved(),
                "suppressed": layer.suppressed().len(),
            }),
            Err(reason) => json!({
                "document": outcome.name,
                "error": reason,
            }),
        })
        .collect();

    let value = json!({
        "documents": documents,
        "annotated": summary.annotated_count(),
        "rejected": summary.rejected_count(),
        "ignored": summary.ignored_count,
    });
    writeln!(writer, "{}", serde_json::to_string_pretty(&value)?)
}

// ============================================================
// Internal Functions
// ============================================================

fn print_entity<W: Write>(
    layer: &AnnotationLayer,
    entity: &Entity,
    index: &CharIndex,
    source: &str,
    writer: &mut W,
    max_line_width: usize,
) {
    let (line, col) = index.line_col(entity.span.start);
    let source_line = index.line_at(entity.span.start);

    let label = if entity.is_ambiguous() {
        "ambiguous".bold().yellow()
    } else {
        "annotation".bold().green()
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        label,
        entity.text,
        entity.semantic_groups().join(", ").dimmed().cyan()
    );

    // Print clickable location: --> source:line:col
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), source, line, col);

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    // Underline only the part of the entity on its first line (col is 1-based)
    let prefix: String = source_line.chars().take(col - 1).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let first_line = entity.text.lines().next().unwrap_or_default();
    let carets = "^".repeat(UnicodeWidthStr::width(first_line).max(1));
    let carets = if entity.is_ambiguous() {
        carets.yellow()
    } else {
        carets.green()
    };
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        carets,
        width = max_line_width,
        padding = caret_padding
    );

    for meaning in &entity.meanings {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "meaning:".bold(),
            describe_meaning(meaning),
            width = max_line_width
        );
    }

    for other in layer.matches_at(entity.id) {
        if other.id == entity.id {
            continue;
        }
        let _ = writeln!(
            writer,
            "{:>width$} {} {} also matched \"{}\" {}",
            "",
            "=".blue(),
            "note:".bold(),
            other.text,
            other.span,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn describe_meaning(meaning: &Meaning) -> String {
    let mut parts = vec![meaning.semantic_group.clone()];
    parts.extend(meaning.cuis.iter().cloned());
    if meaning.negated {
        parts.push("[negated]".to_string());
    }
    if meaning.uncertain {
        parts.push("[uncertain]".to_string());
    }
    parts.join(" ")
}

fn layer_counts(layer: &AnnotationLayer) -> String {
    format!(
        "{} ({} ambiguous), {}",
        plural(layer.resolved().len(), "annotation", "annotations"),
        layer.ambiguous_count(),
        plural(
            layer.suppressed().len(),
            "suppressed match",
            "suppressed matches"
        )
    )
}

fn print_layer_summary<W: Write>(layer: &AnnotationLayer, writer: &mut W) {
    let msg = if layer.resolved().is_empty() {
        format!("{} {}", SUCCESS_MARK.green(), "No annotations found".green())
    } else {
        format!("{} {}", SUCCESS_MARK.green(), layer_counts(layer).green())
    };
    let _ = writeln!(writer, "{}", msg);
}
