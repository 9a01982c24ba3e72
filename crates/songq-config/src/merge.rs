//! Configuration merging.
//!
//! Layers parsed files into one resolved [`Config`], closest file winning.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    Config, ConfigError, FilterSettings, LibrarySettings,
    discovery::is_global_config,
    parse::{RawConfig, RawFilterSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files into a single resolved `Config`.
///
/// Configs are given highest precedence first. For every setting the first file that
/// defines it wins. A library path is resolved relative to the file that declares it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let filter = merge_filter_settings(configs);
    let library = merge_library_settings(configs)?;
    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Ok(Config {
        filter,
        library,
        config_root,
        files: configs.iter().map(|c| c.path.clone()).collect(),
    })
}

/// Merges `[filter]` sections.
fn merge_filter_settings(configs: &[ParsedConfig]) -> FilterSettings {
    let mut result = FilterSettings::default();

    // lowest precedence first so closer files overwrite
    for parsed in configs.iter().rev() {
        if let Some(ref filter) = parsed.config.filter {
            apply_raw_filter(&mut result, filter);
        }
    }

    result
}

/// Applies the values present in a raw section.
fn apply_raw_filter(result: &mut FilterSettings, raw: &RawFilterSettings) {
    if let Some(v) = raw.fold_case {
        result.fold_case = v;
    }
    if let Some(v) = raw.optimize {
        result.optimize = v;
    }
}

/// Picks the library path from the closest file that sets one.
fn merge_library_settings(configs: &[ParsedConfig]) -> Result<LibrarySettings, ConfigError> {
    let declared = configs.iter().find_map(|parsed| {
        parsed
            .config
            .library
            .as_ref()
            .and_then(|library| library.path.as_deref())
            .map(|path| (parsed, path))
    });

    let Some((parsed, path)) = declared else {
        return Ok(LibrarySettings::default());
    };

    let config_dir = parsed.path.parent().unwrap_or_else(|| Path::new(""));
    let resolved = resolve_path(path, config_dir)?;
    let is_global = is_global_config(&parsed.path);
    debug!(path = %resolved.display(), is_global, "resolved library path");

    Ok(LibrarySettings {
        path: Some(resolved),
        is_global,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::parse_config_str, test_support::TestDir};

    fn parsed(path: PathBuf, toml: &str) -> ParsedConfig {
        ParsedConfig {
            config: parse_config_str(toml, &path).unwrap(),
            path,
        }
    }

    #[test]
    fn empty() {
        let result = merge_configs(&[]).unwrap();
        assert!(!result.filter.fold_case);
        assert!(result.filter.optimize);
        assert!(result.library.path.is_none());
        assert!(result.config_root.is_none());
    }

    #[test]
    fn single_config() {
        let test_dir = TestDir::new();
        let config = parsed(
            test_dir.path().join(".songq.toml"),
            "[filter]\nfold_case = true\n\n[library]\npath = \"songs.json\"\n",
        );

        let result = merge_configs(&[config]).unwrap();
        assert!(result.filter.fold_case);
        assert!(result.filter.optimize);
        assert_eq!(result.library.path, Some(test_dir.path().join("songs.json")));
        assert!(!result.library.is_global);
        assert_eq!(result.config_root.as_deref(), Some(test_dir.path()));
    }

    #[test]
    fn closest_scalar_wins() {
        let test_dir = TestDir::new();
        let high = parsed(
            test_dir.path().join("project/.songq.toml"),
            "[filter]\nfold_case = false\n",
        );
        let low = parsed(
            test_dir.path().join(".songq.toml"),
            "[filter]\nfold_case = true\noptimize = false\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        assert!(!result.filter.fold_case);
        // not set by the closer file, so inherited
        assert!(!result.filter.optimize);
        assert_eq!(result.config_root, Some(test_dir.path().join("project")));
    }

    #[test]
    fn library_resolved_against_declaring_file() {
        let test_dir = TestDir::new();
        let high = parsed(test_dir.path().join("project/.songq.toml"), "[filter]\n");
        let low = parsed(
            test_dir.path().join(".songq.toml"),
            "[library]\npath = \"music/songs.json\"\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        assert_eq!(
            result.library.path,
            Some(test_dir.path().join("music/songs.json"))
        );
    }

    #[test]
    fn closest_library_wins() {
        let test_dir = TestDir::new();
        let high = parsed(
            test_dir.path().join("a/.songq.toml"),
            "[library]\npath = \"/srv/near.json\"\n",
        );
        let low = parsed(
            test_dir.path().join(".songq.toml"),
            "[library]\npath = \"far.json\"\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        assert_eq!(result.library.path, Some(PathBuf::from("/srv/near.json")));
    }

    #[test]
    fn records_files_in_order() {
        let test_dir = TestDir::new();
        let a = test_dir.path().join("a/.songq.toml");
        let b = test_dir.path().join(".songq.toml");
        let result = merge_configs(&[parsed(a.clone(), ""), parsed(b.clone(), "")]).unwrap();
        assert_eq!(result.files, vec![a, b]);
    }
}
