//! CLI support for the `tome` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;

pub use context::CommandContext;

/// Process exit codes shared by all commands.
pub mod exit_codes {
    use std::process::ExitCode;

    /// The command succeeded; findings, if any, were only warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Validation findings under strict mode.
    pub const FINDINGS: ExitCode = ExitCode::FAILURE;

    /// The book or configuration could not be loaded.
    pub fn fatal() -> ExitCode {
        ExitCode::from(2)
    }
}
