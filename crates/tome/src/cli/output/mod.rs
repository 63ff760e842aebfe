//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use tome_book::{DocumentTree, NodeKind};
use tome_check::Finding;
use tome_highlight::{Highlighter, Palette};

use super::exit_codes;

/// Prints `value` as pretty JSON on stdout, highlighted when stdout is a terminal.
pub fn print_json<T: Serialize>(value: &T, palette: Palette) -> Result<(), ExitCode> {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let highlighter = Highlighter::new(palette);
            println!("{}", highlighter.highlight_json(&json));
            Ok(())
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            Err(exit_codes::fatal())
        }
    }
}

/// Formats a finding as `<path>: <kind> — <detail>`.
///
/// The kind is coloured as an error under strict checking and as a warning otherwise.
pub fn format_finding(finding: &Finding, palette: Palette, strict: bool) -> String {
    let kind = finding.kind.as_str();
    let kind = if strict {
        palette.error(kind)
    } else {
        palette.warning(kind)
    };
    format!("{}: {kind} — {}", finding.path, finding.detail)
}

/// Builds a table of every node: number, indented title, id and path.
pub fn tree_table(tree: &DocumentTree, palette: Palette) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Title", "Id", "Path"]);

    for (_, node) in tree.iter_preorder() {
        let number = node
            .number
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let indent = "  ".repeat(node.depth);
        let (title, path) = match &node.kind {
            NodeKind::Part => (palette.subheader(&node.title), String::new()),
            NodeKind::Draft => (node.title.clone(), palette.dim("(draft)")),
            NodeKind::Chapter { path } => (node.title.clone(), path.to_string()),
        };
        table.add_row(vec![
            Cell::new(number),
            Cell::new(format!("{indent}{title}")),
            Cell::new(palette.dim(&node.id)),
            Cell::new(path),
        ]);
    }

    table
}
