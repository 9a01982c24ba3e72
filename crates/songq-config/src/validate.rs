//! Configuration validation.

use std::{fmt, path::Path};

use crate::Config;

/// A non-fatal problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No library file is configured.
    NoLibraryConfigured,
    /// The configured library file does not exist.
    LibraryMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The configured library path exists but is not a file.
    LibraryNotFile {
        /// Path that is not a file.
        path: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLibraryConfigured => write!(f, "no library path is configured"),
            Self::LibraryMissing { path } => write!(f, "library file does not exist: {path}"),
            Self::LibraryNotFile { path } => write!(f, "library path is not a file: {path}"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let Some(path) = &config.library.path else {
        return vec![ConfigWarning::NoLibraryConfigured];
    };

    validate_library(path).into_iter().collect()
}

/// Checks the library path on disk.
fn validate_library(path: &Path) -> Option<ConfigWarning> {
    let display = path.display().to_string();
    if !path.exists() {
        Some(ConfigWarning::LibraryMissing { path: display })
    } else if !path.is_file() {
        Some(ConfigWarning::LibraryNotFile { path: display })
    } else {
        None
    }
}
