//! Implementation of `songq config`.

use std::process::ExitCode;

use songq_config::is_global_config;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
///
/// The merged files are listed as TOML comments so the output stays a valid config file.
/// Validation warnings go to stderr and do not change the exit code.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    if config.files.is_empty() {
        println!("# no configuration files found, showing defaults");
    }
    for path in &config.files {
        let scope = if is_global_config(path) { " (global)" } else { "" };
        println!("# {}{scope}", path.display());
    }
    print!("{}", config.settings_to_toml());

    for warning in config.validate() {
        eprintln!("warning: {warning}");
    }
    ExitCode::SUCCESS
}
