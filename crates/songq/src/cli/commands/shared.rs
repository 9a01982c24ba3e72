//! Helpers shared by filter commands.

use std::process::ExitCode;

use songq_filter::SongFilter;
use tracing::debug;

use crate::cli::{args::FilterArgs, context::CommandContext};

/// Options that decide how a filter is built.
#[derive(Debug, Clone, Copy)]
pub struct FilterOptions {
    /// Case folding for legacy pairs.
    pub fold_case: bool,
    /// Whether to run the optimizer.
    pub optimize: bool,
}

impl FilterOptions {
    /// Combines command flags with configured defaults. Flags only ever switch a default on
    /// (`--fold-case`) or off (`--no-optimize`).
    pub fn resolve(ctx: &CommandContext, args: &FilterArgs) -> Self {
        Self {
            fold_case: args.fold_case || ctx.config.filter.fold_case,
            optimize: ctx.config.filter.optimize && !args.no_optimize,
        }
    }
}

/// Builds the filter described by the command arguments, printing any error.
pub fn build_filter(args: &[String], options: FilterOptions) -> Result<SongFilter, ExitCode> {
    let mut filter = SongFilter::parse(args, options.fold_case).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })?;

    if options.optimize {
        filter.optimize();
    }
    debug!(?options, expression = %filter.to_expression(), "built filter");
    Ok(filter)
}
