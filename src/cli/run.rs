use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{annotate::annotate, batch::batch, convert::convert, init::init},
    exit_status::ExitStatus,
};

/// Dispatch to the handler of the parsed subcommand.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Annotate(cmd)) => annotate(cmd),
        Some(Command::Batch(cmd)) => batch(cmd),
        Some(Command::Convert(cmd)) => convert(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
