//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod init;
pub mod tree;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Loads the context for `root` and dispatches to the selected subcommand.
pub fn run(command: Commands) -> ExitCode {
    match command {
        Commands::Check(cmd) => match CommandContext::load(&cmd.book.root) {
            Ok(ctx) => check::run(&ctx, &cmd),
            Err(code) => code,
        },
        Commands::Tree(cmd) => match CommandContext::load(&cmd.book.root) {
            Ok(ctx) => tree::run(&ctx, &cmd),
            Err(code) => code,
        },
        Commands::Config(cmd) => match CommandContext::load(&cmd.root) {
            Ok(ctx) => config::run(&ctx),
            Err(code) => code,
        },
        Commands::Init(cmd) => init::run(&CommandContext::load_root_only(&cmd.root), &cmd),
    }
}
