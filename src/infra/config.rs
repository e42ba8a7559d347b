//! Configuration file support.
//!
//! An optional file supplies defaults for both subcommands; any flag
//! given on the command line wins over it. YAML and TOML are both
//! accepted, picked by extension.
//!
//! # Example TOML configuration:
//! ```toml
//! [training]
//! data_path = "data/crop_data.csv"
//! model_path = "models/crop_model.bin"
//! n_estimators = 100
//! seed = 42
//! holdout_fraction = 0.2
//!
//! [server]
//! bind = "0.0.0.0"
//! port = 5001
//! model_path = "models/crop_model.bin"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::model_store::DEFAULT_MODEL_PATH;
use crate::ml::forest::{DEFAULT_N_ESTIMATORS, DEFAULT_SEED};

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/crop_data.csv";

/// Default service port.
pub const DEFAULT_PORT: u16 = 5001;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Trainer settings
    pub training: TrainingSection,

    /// Predictor service settings
    pub server: ServerSection,
}

/// Trainer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrainingSection {
    /// CSV dataset to fit on
    pub data_path: PathBuf,

    /// Where the artifact is written
    pub model_path: PathBuf,

    /// Number of trees
    pub n_estimators: usize,

    /// Master RNG seed
    pub seed: u64,

    /// Maximum tree depth (unlimited when absent)
    pub max_depth: Option<usize>,

    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,

    /// Share of rows held out for accuracy reporting (0 disables)
    pub holdout_fraction: f64,
}

impl Default for TrainingSection {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            n_estimators: DEFAULT_N_ESTIMATORS,
            seed: DEFAULT_SEED,
            max_depth: None,
            min_samples_split: 2,
            holdout_fraction: 0.0,
        }
    }
}

/// Predictor service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address
    pub bind: String,

    /// Listen port
    pub port: u16,

    /// Artifact to load at startup
    pub model_path: PathBuf,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML, auto-detected by extension)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e.to_string()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content),
            "toml" => Self::from_toml(&content),
            _ => Self::from_yaml(&content).or_else(|_| Self::from_toml(&content)),
        }
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                let config = Self::load(p)?;
                tracing::info!("Loaded configuration from '{}'", p.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    IoError(PathBuf, String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.training.n_estimators, 100);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.training.data_path, PathBuf::from("data/crop_data.csv"));
        assert_eq!(config.training.model_path, config.server.model_path);
    }

    #[test]
    fn test_toml_parsing() {
        let toml = r#"
[training]
n_estimators = 10
holdout_fraction = 0.25

[server]
port = 8080
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.training.n_estimators, 10);
        assert_eq!(config.training.holdout_fraction, 0.25);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "127.0.0.1");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
server:
  bind: "0.0.0.0"
  model_path: /srv/crop.bin
training:
  max_depth: 12
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.model_path, PathBuf::from("/srv/crop.bin"));
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.training.max_depth, Some(12));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crop.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(..)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[server]\nport = \"high\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
