//! Command-line interface for the `tome` book checker.

use std::{io, process::ExitCode};

use clap::Parser;
use tome::cli::{args::Cli, commands};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    commands::run(cli.command)
}

/// Installs the log subscriber.
///
/// `-v` and `-vv` force debug and trace output; otherwise `RUST_LOG` applies,
/// falling back to warnings only.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
