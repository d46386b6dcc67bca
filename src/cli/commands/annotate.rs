use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::super::{
    args::{AnnotateCommand, OutputFormat},
    exit_status::ExitStatus,
    report::{print_layer_json, report_layer},
};
use super::helper::read_input_text;
use crate::{config::load_config, core::annotate as annotate_text, matcher::MatchFormat};

pub fn annotate(cmd: AnnotateCommand) -> Result<ExitStatus> {
    let text = read_input_text(cmd.text.as_ref(), cmd.input.as_ref())?;

    let raw = fs::read_to_string(&cmd.matches)
        .with_context(|| format!("Failed to read matches file {}", cmd.matches.display()))?;
    let format = cmd
        .matches_format
        .unwrap_or_else(|| MatchFormat::from_path(&cmd.matches));
    let matches = format
        .parse(&raw)
        .with_context(|| format!("Failed to parse matches file {}", cmd.matches.display()))?;
    debug!(
        terms = matches.len(),
        format = ?format,
        "loaded matcher output"
    );

    let loaded = load_config(&std::env::current_dir()?)?;
    if loaded.from_file {
        debug!("using configuration file");
    }
    let options = cmd.common.options(&loaded.config);

    let layer = annotate_text(&text, &matches, &options)?;
    info!(
        annotations = layer.resolved().len(),
        suppressed = layer.suppressed().len(),
        "annotated document"
    );

    match cmd.common.format {
        OutputFormat::Text => report_layer(&layer, &source_name(cmd.text.is_some(), cmd.input)),
        OutputFormat::Json => print_layer_json(&layer, &mut io::stdout().lock())?,
    }

    Ok(ExitStatus::Success)
}

fn source_name(literal: bool, input: Option<PathBuf>) -> String {
    match input {
        _ if literal => "<text>".to_string(),
        Some(path) if path.as_os_str() != "-" => path.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}
