//! Implementation of `tome check`.

use std::process::ExitCode;

use serde::Serialize;
use tome_book::BookPath;
use tome_check::{Finding, FsCorpus, ValidationReport, validate};
use tome_config::{ConfigWarning, OutputFormat};

use crate::cli::{
    args::CheckCommand,
    context::CommandContext,
    exit_codes,
    output::{format_finding, print_json},
};

/// JSON document printed by `tome check --format json`.
#[derive(Serialize)]
struct JsonCheckOutput<'a> {
    /// Manifest that was checked.
    manifest: &'a BookPath,
    /// Number of chapters with a content file.
    chapters: usize,
    /// Whether findings fail the run.
    strict: bool,
    /// True when the run succeeds.
    ok: bool,
    /// Findings grouped by category.
    report: &'a ValidationReport,
    /// Findings in printable form.
    findings: Vec<Finding>,
}

/// Builds the book, validates it and reports the findings.
pub fn run(ctx: &CommandContext, cmd: &CheckCommand) -> ExitCode {
    // A missing manifest is reported by load_book as a hard error.
    let warnings: Vec<_> = ctx
        .config
        .validate(&ctx.root)
        .into_iter()
        .filter(|w| !matches!(w, ConfigWarning::ManifestMissing { .. }))
        .collect();
    ctx.print_config_warnings(&warnings);

    let book = match ctx.load_book(cmd.book.manifest.as_deref()) {
        Ok(book) => book,
        Err(code) => return code,
    };
    let ignore = match ctx.config.compile_link_patterns() {
        Ok(patterns) => patterns,
        Err(e) => return ctx.fatal(&e),
    };

    let report = validate(
        &book.tree,
        &FsCorpus::new(&book.resolver),
        &book.resolver,
        &ignore,
    );

    let strict = cmd.strict_cross_refs || ctx.config.check.strict;
    let ok = report.is_empty() || !strict;
    let chapters = book.tree.chapters().count();

    match cmd.format.unwrap_or(ctx.config.check.format) {
        OutputFormat::Json => {
            let output = JsonCheckOutput {
                manifest: &book.manifest,
                chapters,
                strict,
                ok,
                report: &report,
                findings: report.findings(),
            };
            if let Err(code) = print_json(&output, ctx.out) {
                return code;
            }
        }
        OutputFormat::Text => print_text(ctx, &report, chapters, strict),
    }

    if ok {
        exit_codes::OK
    } else {
        exit_codes::FINDINGS
    }
}

/// Prints findings to stderr and a one-line summary to stdout.
fn print_text(ctx: &CommandContext, report: &ValidationReport, chapters: usize, strict: bool) {
    for finding in report.findings() {
        eprintln!("{}", format_finding(&finding, ctx.err, strict));
    }

    let summary = format!("checked {chapters} chapters");
    if report.is_empty() {
        println!("{}", ctx.out.success(&format!("{summary}: no problems found")));
    } else {
        let noun = if report.len() == 1 { "finding" } else { "findings" };
        let line = format!("{summary}: {} {noun}", report.len());
        if strict {
            println!("{}", ctx.out.error(&line));
        } else {
            println!("{}", ctx.out.warning(&line));
        }
    }
}
