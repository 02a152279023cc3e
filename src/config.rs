//! Runtime configuration, read from YAML
//!
//! ```yaml
//! characteristics: /path/to/characteristics.txt
//! solutions: /path/to/solutions.txt
//! default_increment: 1.0
//! ranking: exclude_disabled
//! ```

use crate::graph::DEFAULT_INCREMENT;
use crate::query::RankingMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Characteristic catalog file
    pub characteristics: Option<PathBuf>,
    /// Solution catalog file
    pub solutions: Option<PathBuf>,
    /// Amount applied when an observation carries no explicit amount
    pub default_increment: f64,
    /// Whether rankings shown to users include disabled solutions
    pub ranking: RankingMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            characteristics: None,
            solutions: None,
            default_increment: DEFAULT_INCREMENT,
            ranking: RankingMode::default(),
        }
    }
}

impl Config {
    /// Read a config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, else the default location if it exists,
    /// else defaults
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/convograph/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("convograph").join("config.yaml"))
    }
}
