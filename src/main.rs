use std::process::ExitCode;

use clap::Parser;
use medlayer::cli::{Arguments, ExitStatus};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `MEDLAYER_LOG=medlayer=trace`.
const LOG_ENV: &str = "MEDLAYER_LOG";

fn main() -> ExitCode {
    let args = Arguments::parse();

    let default_level = if args.verbose() { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match medlayer::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
