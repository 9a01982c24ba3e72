//! Clap argument definitions for the `songq` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "songq")]
#[command(about = "Filter a song library with search expressions")]
pub struct Cli {
    /// Verbosity level (-v for debug logs, -vv for trace logs)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared flags for commands that build a filter.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Compare TAG VALUE pairs case-insensitively as substrings
    #[arg(short = 'i', long)]
    pub fold_case: bool,

    /// Use the filter exactly as written
    #[arg(long)]
    pub no_optimize: bool,

    /// Filter: parenthesized expressions and/or TAG VALUE pairs
    #[arg(required = true, value_name = "FILTER")]
    pub args: Vec<String>,
}

/// Arguments for `songq parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    #[command(flatten)]
    /// Filter construction flags.
    pub filter: FilterArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `songq find`.
#[derive(Args, Debug, Clone)]
pub struct FindCommand {
    #[command(flatten)]
    /// Filter construction flags.
    pub filter: FilterArgs,

    /// Library file (overrides [library] path)
    #[arg(short = 'l', long)]
    pub library: Option<PathBuf>,

    /// Maximum number of songs to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `songq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.songq.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `songq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show how a filter is parsed
    #[command(after_help = "\
FILTER SYNTAX:
  TAG VALUE                     Legacy pair, e.g. artist Air
  (TAG == \"v\")                  Equality (also !=, eq_cs, eq_ci)
  (TAG contains \"v\")            Substring (also contains_cs, contains_ci)
  (TAG starts_with \"v\")         Prefix (also starts_with_cs, starts_with_ci)
  (TAG =~ \"regex\")              Regular expression (also !~)
  (any ...) / (file ...)        Any tag / the song URI
  (base \"dir\")                  Songs below a directory
  (modified-since \"2024-01-01\") Also added-since
  (AudioFormat =~ \"44100:*:2\")  Audio format mask (or == for exact)
  (prio >= 10)                  Queue priority
  (!EXPR)                       Negation
  (EXPR AND EXPR ...)           Conjunction

Use -- before filters that start with '-'.")]
    Parse(ParseCommand),

    /// List library songs matching a filter
    Find(FindCommand),

    /// Initialize songq configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}

impl Commands {
    /// Whether the command reads the merged configuration.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}
