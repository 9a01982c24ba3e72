//! CLI support for the `songq` binary.

pub mod args;
pub mod commands;
pub mod context;

pub use context::CommandContext;
