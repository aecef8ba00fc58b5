//! Configuration file support for the vocab tool.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/vocab/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of due words surfaced per review session
pub const DEFAULT_WORDS_PER_DAY: i64 = 10;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default, skip_serializing_if = "DataConfig::is_unset")]
    pub data: DataConfig,

    #[serde(default)]
    pub review: ReviewConfig,
}

/// Data storage configuration
///
/// An unset `data_dir` is resolved at runtime and never written back.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DataConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl DataConfig {
    fn is_unset(&self) -> bool {
        self.data_dir.is_none()
    }
}

/// Review session configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Daily quota. Not validated: zero or negative simply selects nothing.
    #[serde(default = "default_words_per_day")]
    pub words_per_day: i64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            words_per_day: default_words_per_day(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(base) => base.join("vocab"),
        None => PathBuf::from("data"),
    }
}

fn default_words_per_day() -> i64 {
    DEFAULT_WORDS_PER_DAY
}

impl Config {
    /// Configured data directory, or the platform default
    pub fn data_dir(&self) -> PathBuf {
        self.data
            .data_dir
            .clone()
            .unwrap_or_else(default_data_dir)
    }

    /// Load configuration from `path`, falling back to defaults if it is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("vocab").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.review.words_per_day, 10);
        assert!(config.data.data_dir.is_none());
        assert_eq!(config.data_dir(), default_data_dir());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.review.words_per_day = 25;
        config.data.data_dir = Some(temp_dir.path().join("words"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.review.words_per_day, 25);
        assert_eq!(loaded.data_dir(), temp_dir.path().join("words"));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[review]
words_per_day = -3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.review.words_per_day, -3);
        assert_eq!(config.data_dir(), default_data_dir()); // default
    }

    #[test]
    fn test_default_data_dir_is_not_saved() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.review.words_per_day = 4;
        config.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("words_per_day = 4"));
        assert!(!contents.contains("data_dir"));
        assert!(!contents.contains("[data]"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.review.words_per_day, DEFAULT_WORDS_PER_DAY);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[review\nwords_per_day = ").unwrap();

        assert!(matches!(Config::load_or_default(&path), Err(Error::Toml(_))));
    }
}
