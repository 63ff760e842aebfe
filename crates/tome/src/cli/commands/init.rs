//! Implementation of `tome init`.

use std::{fs, process::ExitCode};

use tome_config::{CONFIG_FILENAME, DEFAULT_MANIFEST, local_template};
use tome_highlight::{Highlighter, indent};

use crate::cli::{args::InitCommand, context::CommandContext, exit_codes};

/// Writes a commented `.tome.toml` into the repository root.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let err = ctx.err;

    if !ctx.root.is_dir() {
        eprintln!(
            "{} not a directory: {}",
            err.error("error:"),
            ctx.root.display()
        );
        return exit_codes::fatal();
    }

    let config_path = ctx.root.join(CONFIG_FILENAME);
    if config_path.exists() && !cmd.force {
        eprintln!(
            "{} configuration file already exists: {}",
            err.error("error:"),
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = local_template();
    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!(
            "{} failed to write {}: {e}",
            err.error("error:"),
            config_path.display()
        );
        return exit_codes::fatal();
    }

    println!("Created {}", config_path.display());
    println!();
    println!("{}", ctx.out.subheader("Configuration written:"));
    let highlighted = Highlighter::new(ctx.out).highlight_toml(&template);
    println!("{}", indent(&highlighted, 2));

    if !ctx.root.join(DEFAULT_MANIFEST).exists() {
        println!();
        println!(
            "{}",
            ctx.out.dim(&format!(
                "No {DEFAULT_MANIFEST} found; set [book] manifest if the book lives elsewhere."
            ))
        );
    }

    exit_codes::OK
}
