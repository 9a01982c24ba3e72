//! Implementation of `songq parse`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use songq_filter::SongFilter;

use super::shared::{FilterOptions, build_filter};
use crate::cli::{args::ParseCommand, context::CommandContext};

/// JSON output for `songq parse`.
#[derive(Serialize)]
struct JsonParseOutput {
    /// Canonical expression, empty for an empty filter.
    expression: String,
    /// Indented predicate tree.
    tree: String,
    /// First top-level base constraint.
    base: Option<String>,
    /// Whether a top-level string comparison ignores case.
    fold_case: bool,
    /// Whether there is anything besides base constraints.
    other_than_base: bool,
    /// Whether the optimizer ran.
    optimized: bool,
}

impl JsonParseOutput {
    /// Collects the facts about a built filter.
    fn new(filter: &SongFilter, optimized: bool) -> Self {
        Self {
            expression: filter.to_expression(),
            tree: filter.to_string(),
            base: filter.base().map(str::to_string),
            fold_case: filter.has_fold_case(),
            other_than_base: filter.has_other_than_base(),
            optimized,
        }
    }
}

/// Shows the tree, canonical expression and structural facts of a filter.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let options = FilterOptions::resolve(ctx, &cmd.filter);
    let filter = match build_filter(&cmd.filter.args, options) {
        Ok(filter) => filter,
        Err(code) => return code,
    };
    let output = JsonParseOutput::new(&filter, options.optimize);

    if cmd.json {
        match serde_json::to_string_pretty(&output) {
            Ok(json_str) => println!("{json_str}"),
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("Expression:");
    if output.expression.is_empty() {
        println!("  (matches everything)");
    } else {
        println!("  {}", output.expression);
    }
    println!();

    println!("Tree:");
    for line in output.tree.lines() {
        println!("  {line}");
    }
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Property", "Value"]);
    table.add_row(vec![
        Cell::new("base"),
        Cell::new(output.base.as_deref().unwrap_or("-")),
    ]);
    table.add_row(vec![Cell::new("fold case"), Cell::new(yes_no(output.fold_case))]);
    table.add_row(vec![
        Cell::new("other than base"),
        Cell::new(yes_no(output.other_than_base)),
    ]);
    table.add_row(vec![Cell::new("optimized"), Cell::new(yes_no(output.optimized))]);
    println!("{table}");

    ExitCode::SUCCESS
}

/// Renders a flag for the facts table.
fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
