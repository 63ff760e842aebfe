//! Implementation of `tome config`.

use std::process::ExitCode;

use tome_config::{discover_config_files, format_path_for_display, is_global_config};
use tome_highlight::Highlighter;

use crate::cli::{context::CommandContext, exit_codes};

/// Shows discovered config files, warnings and the effective settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let out = ctx.out;

    let files = discover_config_files(&ctx.root);
    println!("{}", out.subheader("Config files (highest precedence first):"));
    if files.is_empty() {
        println!("   {}", out.dim("(none, using defaults)"));
    }
    for path in &files {
        let display = format_path_for_display(path, Some(&ctx.root));
        if is_global_config(path) {
            println!("   {display} {}", out.dim("(global)"));
        } else {
            println!("   {display}");
        }
    }
    println!();

    let warnings = ctx.config.validate(&ctx.root);
    if !warnings.is_empty() {
        println!("{}", out.subheader("Warnings:"));
        for warning in &warnings {
            println!("   {}", out.warning(&warning.to_string()));
        }
        println!();
    }

    let settings = match ctx.config.settings_to_toml() {
        Ok(settings) => settings,
        Err(e) => return ctx.fatal(&e),
    };
    println!("{}", out.subheader("Effective settings:"));
    println!("{}", out.rule(40));
    print!("{}", Highlighter::new(out).highlight_toml(&settings));
    println!("{}", out.rule(40));

    exit_codes::OK
}
