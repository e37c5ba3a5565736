//! Canvas and preview settings, loaded from ~/.dbn/config.yaml.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Settings for the `dbn` command. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Canvas width in pixels.
    #[serde(default = "default_size")]
    pub width: usize,
    /// Canvas height in pixels.
    #[serde(default = "default_size")]
    pub height: usize,
    /// Maximum width of the terminal preview, in characters.
    #[serde(default = "default_preview_columns")]
    pub preview_columns: usize,
}

fn default_size() -> usize {
    400
}

fn default_preview_columns() -> usize {
    80
}

/// The standard config path (~/.dbn/config.yaml).
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".dbn").join("config.yaml"))
}

impl Config {
    /// Load config from the standard path.
    /// Returns None if the file doesn't exist or doesn't parse.
    pub fn load() -> Option<Self> {
        Self::load_at(&config_path()?)
    }

    fn load_at(path: &Path) -> Option<Self> {
        match Self::from_path(path) {
            Ok(config) => Some(config),
            Err(e) => {
                debug!("no config loaded: {e}");
                None
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?path, ?config, "loaded config");
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            preview_columns: default_preview_columns(),
        }
    }
}
