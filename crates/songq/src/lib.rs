//! songq: song filter queries over a music library.
//!
//! The `songq` binary builds filters from the command line with `songq-filter` and runs
//! them against a JSON song library. This library half holds the library model and the
//! scan driver so they can be tested without the CLI.

#![warn(missing_docs)]

pub mod library;
