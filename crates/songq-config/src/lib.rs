//! Configuration system for songq.
//!
//! songq reads TOML files named `.songq.toml`. Configuration is resolved by walking up the
//! directory tree from the current working directory, collecting every `.songq.toml` found,
//! then loading `~/.songq.toml` as the global config with the lowest precedence.
//!
//! ```toml
//! root = false
//!
//! [filter]
//! fold_case = false
//! optimize = true
//!
//! [library]
//! path = "library.json"
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawFilterSettings, RawLibrarySettings, parse_config_file, parse_config_str,
};
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
use tracing::debug;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Fully merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Filter construction settings.
    pub filter: FilterSettings,
    /// Song library location.
    pub library: LibrarySettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Files the configuration was merged from, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging every relevant `.songq.toml`.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from an explicit list of files, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let config = merge_configs(&parsed)?;
        debug!(files = files.len(), "loaded configuration");
        Ok(config)
    }

    /// Checks the configuration for problems that do not prevent loading.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings in `.songq.toml` form.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            filter: self.filter.clone(),
            library: SerializableLibrarySettings {
                path: self
                    .library
                    .path
                    .as_ref()
                    .map(|path| path.display().to_string()),
            },
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Settings for building filters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Compare `TAG VALUE` pairs case-insensitively and as substrings.
    pub fold_case: bool,
    /// Optimize filters before evaluating them.
    pub optimize: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            fold_case: false,
            optimize: true,
        }
    }
}

/// Where the song library lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySettings {
    /// Resolved library file.
    pub path: Option<PathBuf>,
    /// Whether the path came from the global `~/.songq.toml`.
    pub is_global: bool,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Filter settings.
    filter: FilterSettings,
    /// Library settings.
    library: SerializableLibrarySettings,
}

/// Library settings with the path rendered as text.
#[derive(Serialize)]
struct SerializableLibrarySettings {
    /// Resolved library file.
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_defaults() {
        let filter = FilterSettings::default();
        assert!(!filter.fold_case);
        assert!(filter.optimize);
    }

    #[test]
    fn config_default() {
        let config = Config::default();
        assert!(config.library.path.is_none());
        assert!(config.config_root.is_none());
        assert!(config.files.is_empty());
    }

    #[test]
    fn settings_to_toml_defaults() {
        let toml = Config::default().settings_to_toml();

        assert!(toml.contains("[filter]"));
        assert!(toml.contains("fold_case = false"));
        assert!(toml.contains("optimize = true"));
        assert!(!toml.contains("path"));

        let parsed: toml::Value = toml::from_str(&toml).unwrap();
        assert!(parsed.get("filter").is_some());
    }

    #[test]
    fn settings_to_toml_reparses() {
        let config = Config {
            filter: FilterSettings {
                fold_case: true,
                optimize: false,
            },
            library: LibrarySettings {
                path: Some(PathBuf::from("/srv/music/songs.json")),
                is_global: false,
            },
            ..Config::default()
        };

        let raw = parse_config_str(&config.settings_to_toml(), Path::new("effective")).unwrap();
        let filter = raw.filter.unwrap();
        assert_eq!(filter.fold_case, Some(true));
        assert_eq!(filter.optimize, Some(false));
        assert_eq!(
            raw.library.unwrap().path.as_deref(),
            Some("/srv/music/songs.json")
        );
    }
}
