//! Clap argument definitions for the `tome` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tome_config::OutputFormat;

/// Parses a report format from a string.
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "tome")]
#[command(about = "Build and check the chapter tree of an mdBook-style book")]
pub struct Cli {
    /// Increase log output (-v for debug, -vv for trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Location of the book on disk.
#[derive(Args, Debug, Clone)]
pub struct BookArgs {
    /// Repository root containing the book
    pub root: PathBuf,

    /// Manifest path, relative to the root [default: SUMMARY.md]
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

/// Arguments for `tome check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    #[command(flatten)]
    /// Book location.
    pub book: BookArgs,

    /// Fail when any chapter or cross-reference is broken
    #[arg(long)]
    pub strict_cross_refs: bool,

    /// Report format: text or json [default: text]
    #[arg(long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `tome tree`.
#[derive(Args, Debug, Clone)]
pub struct TreeCommand {
    #[command(flatten)]
    /// Book location.
    pub book: BookArgs,

    /// Output the tree as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tome config`.
#[derive(Args, Debug, Clone)]
pub struct ConfigCommand {
    /// Repository root to load configuration for
    #[arg(default_value = ".")]
    pub root: PathBuf,
}

/// Arguments for `tome init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Directory to create `.tome.toml` in
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `tome` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate chapter files and cross-references
    #[command(after_help = "\
EXIT STATUS:
  0  no findings, or findings reported as warnings
  1  findings under --strict-cross-refs (or check.strict = true)
  2  the book could not be loaded (config, manifest syntax, structure)")]
    Check(CheckCommand),

    /// Print the resolved chapter tree
    Tree(TreeCommand),

    /// Show configuration files and effective settings
    Config(ConfigCommand),

    /// Create a commented .tome.toml
    Init(InitCommand),
}
