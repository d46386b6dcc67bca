use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use super::super::{args::ConvertCommand, exit_status::ExitStatus, report::SUCCESS_MARK};
use super::helper::write_output;
use crate::matcher::{matches_to_value, parse_bsv};

pub fn convert(cmd: ConvertCommand) -> Result<ExitStatus> {
    let raw = fs::read_to_string(&cmd.input)
        .with_context(|| format!("Failed to read BSV file {}", cmd.input.display()))?;
    let matches = parse_bsv(&raw)?;
    debug!(terms = matches.len(), "converted BSV rows");

    let json = serde_json::to_string_pretty(&matches_to_value(&matches))?;
    write_output(&json, cmd.output.as_ref())?;

    if let Some(path) = &cmd.output {
        eprintln!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Wrote {}", path.display()).green()
        );
    }

    Ok(ExitStatus::Success)
}
