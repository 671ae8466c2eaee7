//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Classification thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Unknown-role players above this effectiveness are treated as armor spotters
    #[serde(default = "default_spotting_armor_effectiveness")]
    pub spotting_armor_effectiveness: u32,

    /// Infantry above this effectiveness may be asked about
    #[serde(default = "default_low_confidence_effectiveness")]
    pub low_confidence_effectiveness: u32,

    /// ...when their infantry evidence is below this
    #[serde(default = "default_low_confidence_infantry_max")]
    pub low_confidence_infantry_max: u32,

    /// Weapons shown with a decision request
    #[serde(default = "default_summary_top_weapons")]
    pub summary_top_weapons: usize,

    /// Optional TOML file with extra weapon catalog entries
    #[serde(default)]
    pub catalog_extensions: Option<PathBuf>,
}

fn default_spotting_armor_effectiveness() -> u32 {
    100
}

fn default_low_confidence_effectiveness() -> u32 {
    300
}

fn default_low_confidence_infantry_max() -> u32 {
    15
}

fn default_summary_top_weapons() -> usize {
    5
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            spotting_armor_effectiveness: default_spotting_armor_effectiveness(),
            low_confidence_effectiveness: default_low_confidence_effectiveness(),
            low_confidence_infantry_max: default_low_confidence_infantry_max(),
            summary_top_weapons: default_summary_top_weapons(),
            catalog_extensions: None,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            classifier: ClassifierConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file if it exists, otherwise defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.low_confidence_infantry_max == 0 {
            return Err(ConfigError::ValidationError(
                "low_confidence_infantry_max must be greater than 0".to_string(),
            ));
        }

        if self.classifier.summary_top_weapons == 0 {
            return Err(ConfigError::ValidationError(
                "summary_top_weapons must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.classifier.catalog_extensions.is_none());
    }

    #[test]
    fn test_classifier_defaults() {
        let c = ClassifierConfig::default();

        assert_eq!(c.spotting_armor_effectiveness, 100);
        assert_eq!(c.low_confidence_effectiveness, 300);
        assert_eq!(c.low_confidence_infantry_max, 15);
        assert_eq!(c.summary_top_weapons, 5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            data_dir = "/srv/hll"

            [classifier]
            low_confidence_effectiveness = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/hll"));
        assert_eq!(config.classifier.low_confidence_effectiveness, 250);
        assert_eq!(config.classifier.low_confidence_infantry_max, 15);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_infantry_max() {
        let mut config = AppConfig::default();
        config.classifier.low_confidence_infantry_max = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = \"debug\"\n[server]\nport = 9000\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.server.port, 9000);
    }
}
