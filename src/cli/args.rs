//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `annotate`: Fuse and resolve one document's matcher output
//! - `batch`: Annotate every document file under a directory
//! - `convert`: Rewrite a cTAKES BSV table as matcher JSON
//! - `init`: Initialize medlayer configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::core::{AnnotateOptions, FusionScope, ResolveStrategy};
use crate::matcher::MatchFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Annotate(cmd)) => cmd.common.verbose,
            Some(Command::Batch(cmd)) => cmd.common.verbose,
            Some(Command::Convert(_)) | Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// Common arguments shared by the annotating commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Fusion scope (overrides config file)
    #[arg(long, value_enum)]
    pub fusion_scope: Option<FusionScope>,

    /// Overlap resolution strategy (overrides config file)
    #[arg(long, value_enum)]
    pub strategy: Option<ResolveStrategy>,

    /// Keep only the first meaning of each semantic group per span
    #[arg(long)]
    pub collapse_semantic_groups: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Config file values with command-line overrides applied.
    pub fn options(&self, config: &Config) -> AnnotateOptions {
        let mut options = config.annotate_options();
        if let Some(scope) = self.fusion_scope {
            options.fusion_scope = scope;
        }
        if let Some(strategy) = self.strategy {
            options.resolve_strategy = strategy;
        }
        if self.collapse_semantic_groups {
            options.collapse_semantic_groups = true;
        }
        options
    }
}

#[derive(Debug, Args)]
pub struct AnnotateCommand {
    /// Document text as a literal string. Conflicts with --input.
    #[arg(long, value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// Path to the document text. Use '-' to read from stdin.
    #[arg(
        long,
        short = 'i',
        value_name = "FILE",
        value_hint = clap::ValueHint::FilePath
    )]
    pub input: Option<PathBuf>,

    /// Matcher output for the document (JSON or cTAKES BSV)
    #[arg(
        long,
        short = 'm',
        value_name = "FILE",
        value_hint = clap::ValueHint::FilePath
    )]
    pub matches: PathBuf,

    /// Matcher output format (default: from file extension)
    #[arg(long, value_enum)]
    pub matches_format: Option<MatchFormat>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct BatchCommand {
    /// Directory of JSON documents: {"id"?, "text", "matches"}
    #[arg(value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ConvertCommand {
    /// cTAKES BSV table to convert
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Write JSON here instead of stdout
    #[arg(
        long,
        short = 'o',
        value_name = "FILE",
        value_hint = clap::ValueHint::FilePath
    )]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fuse and resolve one document's term matches into an annotation layer
    Annotate(AnnotateCommand),
    /// Annotate every JSON document under a directory in parallel
    Batch(BatchCommand),
    /// Convert a cTAKES BSV table into matcher JSON
    Convert(ConvertCommand),
    /// Initialize a new .medlayerrc.json configuration file
    Init,
}
