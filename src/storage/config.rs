//! Configuration handling
//!
//! Configuration lives in the platform config directory
//! (`~/.config/taskline/config.toml` on Linux). Every setting is optional;
//! CLI flags take precedence over the config file, which takes precedence
//! over built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Default location of the task file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "./data/tasks.txt";

const DEFAULT_SEPARATOR_WIDTH: usize = 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the task file (the `--file` flag overrides this)
    pub data_file: Option<PathBuf>,

    /// Width of the separator line framing each output block
    pub separator_width: Option<usize>,
}

impl Config {
    /// Loads the global config, or defaults when no file exists
    pub fn load_global() -> Result<Self> {
        match Self::global_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads a config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Returns the platform config file path, if one can be determined
    pub fn global_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "taskline").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolves the task file path: CLI flag, then config, then default
    pub fn resolve_data_file(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Returns the configured separator width, or the default
    pub fn separator_width(&self) -> usize {
        self.separator_width.unwrap_or(DEFAULT_SEPARATOR_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults_when_nothing_is_configured() {
        let config = Config::default();

        assert_eq!(
            config.resolve_data_file(None),
            PathBuf::from(DEFAULT_DATA_FILE)
        );
        assert_eq!(config.separator_width(), DEFAULT_SEPARATOR_WIDTH);
    }

    #[test]
    fn cli_flag_wins_over_config() {
        let config = Config {
            data_file: Some(PathBuf::from("/etc/tasks.txt")),
            separator_width: None,
        };

        assert_eq!(
            config.resolve_data_file(Some(PathBuf::from("/tmp/override.txt"))),
            PathBuf::from("/tmp/override.txt")
        );
        assert_eq!(
            config.resolve_data_file(None),
            PathBuf::from("/etc/tasks.txt")
        );
    }

    #[test]
    fn loads_settings_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data_file = \"/home/me/tasks.txt\"\nseparator_width = 40\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/home/me/tasks.txt")));
        assert_eq!(config.separator_width(), 40);
    }

    #[test]
    fn empty_config_file_is_all_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.data_file.is_none());
        assert_eq!(config.separator_width(), DEFAULT_SEPARATOR_WIDTH);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = [1, 2]\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
