//! Implementation of `tome tree`.

use std::process::ExitCode;

use crate::cli::{
    args::TreeCommand,
    context::CommandContext,
    exit_codes,
    output::{print_json, tree_table},
};

/// Prints the resolved chapter tree as a table or as JSON.
pub fn run(ctx: &CommandContext, cmd: &TreeCommand) -> ExitCode {
    let book = match ctx.load_book(cmd.book.manifest.as_deref()) {
        Ok(book) => book,
        Err(code) => return code,
    };

    if cmd.json {
        return match print_json(&book.tree, ctx.out) {
            Ok(()) => exit_codes::OK,
            Err(code) => code,
        };
    }

    let title = book.tree.title().unwrap_or("(untitled)");
    println!("{} {}", ctx.out.header(title), ctx.out.dim(&format!("({})", book.manifest)));
    if book.tree.is_empty() {
        println!("{}", ctx.out.dim("The manifest lists no chapters."));
    } else {
        println!("{}", tree_table(&book.tree, ctx.out));
    }
    exit_codes::OK
}
