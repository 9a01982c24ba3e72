//! Implementation of `songq find`.

use std::process::ExitCode;

use serde::Serialize;
use tracing::debug;

use super::shared::{FilterOptions, build_filter};
use crate::cli::{args::FindCommand, context::CommandContext};

/// JSON output for `songq find`.
#[derive(Serialize)]
struct JsonFindOutput {
    /// Canonical expression of the filter that was run.
    expression: String,
    /// Number of matching songs before `--limit`.
    total_matches: usize,
    /// Matching song URIs.
    matches: Vec<String>,
}

/// Prints the URIs of library songs matching the filter.
pub fn run(ctx: &CommandContext, cmd: &FindCommand) -> ExitCode {
    let options = FilterOptions::resolve(ctx, &cmd.filter);
    let filter = match build_filter(&cmd.filter.args, options) {
        Ok(filter) => filter,
        Err(code) => return code,
    };
    let library = match ctx.library(cmd.library.as_deref()) {
        Ok(library) => library,
        Err(code) => return code,
    };

    let mut matches = library.find(&filter);
    let total_matches = matches.len();
    debug!(total_matches, songs = library.len(), "scanned library");
    if let Some(limit) = cmd.limit {
        matches.truncate(limit);
    }

    if cmd.json {
        let output = JsonFindOutput {
            expression: filter.to_expression(),
            total_matches,
            matches,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json_str) => println!("{json_str}"),
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for uri in &matches {
        println!("{uri}");
    }
    ExitCode::SUCCESS
}
