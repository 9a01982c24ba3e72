//! Command-line interface for songq.

mod cli;

use std::{io, process::ExitCode};

use clap::Parser;
use cli::{CommandContext, args::Cli, commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter, e.g. `SONGQ_LOG=songq_filter=trace`.
const LOG_ENV: &str = "SONGQ_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = if cli.command.needs_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}

/// Installs the stderr log subscriber.
///
/// `-v`/`-vv` select debug/trace output for everything; otherwise `SONGQ_LOG` is read,
/// falling back to warnings only.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose > 1);
    if let Err(e) = subscriber.try_init() {
        eprintln!("warning: failed to initialize logging: {e}");
    }
}
