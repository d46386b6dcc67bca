use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::super::{
    args::{BatchCommand, OutputFormat},
    exit_status::ExitStatus,
    report::{print_batch_json, report_batch_to},
};
use super::{BatchSummary, DocumentOutcome};
use crate::{
    config::{CONFIG_FILE_NAME, load_config},
    core::{AnnotateOptions, AnnotationLayer, annotate},
    matcher::matches_from_value,
};

/// One document file: its text and the matcher output produced for it.
#[derive(Debug, Deserialize)]
struct Document {
    id: Option<String>,
    text: String,
    #[serde(default)]
    matches: Option<Value>,
}

pub fn batch(cmd: BatchCommand) -> Result<ExitStatus> {
    if !cmd.dir.is_dir() {
        bail!("Not a directory: {}", cmd.dir.display());
    }

    let loaded = load_config(&cmd.dir)?;
    let options = cmd.common.options(&loaded.config);
    let ignores: Vec<Pattern> = loaded
        .config
        .ignores
        .iter()
        .map(|p| Pattern::new(p))
        .collect::<Result<_, _>>()?;

    let (files, ignored_count) = collect_documents(&cmd.dir, &ignores);
    debug!(
        documents = files.len(),
        ignored = ignored_count,
        "collected batch documents"
    );

    let outcomes: Vec<DocumentOutcome> = files
        .par_iter()
        .map(|path| {
            let fallback = relative_name(&cmd.dir, path);
            match annotate_file(path, &options) {
                Ok((id, layer)) => DocumentOutcome {
                    name: id.unwrap_or(fallback),
                    result: Ok(layer),
                },
                Err(err) => {
                    warn!(document = %fallback, "rejected: {:#}", err);
                    DocumentOutcome {
                        name: fallback,
                        result: Err(format!("{:#}", err)),
                    }
                }
            }
        })
        .collect();

    let summary = BatchSummary {
        outcomes,
        ignored_count,
    };
    info!(
        annotated = summary.annotated_count(),
        rejected = summary.rejected_count(),
        ignored = summary.ignored_count,
        "batch finished"
    );

    match cmd.common.format {
        OutputFormat::Text => report_batch_to(&summary, &mut io::stdout().lock()),
        OutputFormat::Json => print_batch_json(&summary, &mut io::stdout().lock())?,
    }

    if summary.rejected_count() > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

/// JSON files under `dir` in file-name order, minus the config file and
/// anything matched by `ignores`.
fn collect_documents(dir: &Path, ignores: &[Pattern]) -> (Vec<PathBuf>, usize) {
    let mut files = Vec::new();
    let mut ignored_count = 0;

    let entries = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        });

    for entry in entries {
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some("json")
            || entry.file_name() == CONFIG_FILE_NAME
        {
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path);
        if ignores.iter().any(|p| p.matches_path(relative)) {
            ignored_count += 1;
            continue;
        }
        files.push(path.to_path_buf());
    }

    (files, ignored_count)
}

fn annotate_file(
    path: &Path,
    options: &AnnotateOptions,
) -> Result<(Option<String>, AnnotationLayer)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: Document =
        serde_json::from_str(&content).context("Not a document: expected {\"text\", \"matches\"}")?;

    let matches = match document.matches {
        Some(value) => matches_from_value(value)?,
        None => Vec::new(),
    };
    let layer = annotate(&document.text, &matches, options)?;
    Ok((document.id, layer))
}

fn relative_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
