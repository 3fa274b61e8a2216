use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::insight::AnalysisThresholds;
use crate::logging::LogConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// General application settings
    pub settings: AppSettings,

    /// Analysis thresholds used by the insight engine
    ///
    /// These are fixed heuristics, not clinically derived values. They are
    /// exposed here so deployments can tune them without a rebuild.
    pub thresholds: AnalysisThresholds,

    /// Logging settings
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory holding the record database
    pub data_dir: PathBuf,

    /// Database file name inside `data_dir`
    pub database_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        AppConfig {
            metadata: ConfigMetadata {
                version: "1".to_string(),
                created_at: now,
                updated_at: now,
            },
            settings: AppSettings {
                data_dir: default_data_dir(),
                database_file: "wellrs.db".to_string(),
            },
            thresholds: AnalysisThresholds::default(),
            logging: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config file location (`<config_dir>/wellrs/config.toml`)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wellrs")
            .join("config.toml")
    }

    /// Load configuration from the given path, falling back to defaults if
    /// the file does not exist yet
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Persist configuration to the given path, creating parent directories
    /// as needed
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }

        self.metadata.updated_at = Utc::now();
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Full path to the record database
    pub fn database_path(&self) -> PathBuf {
        self.settings.data_dir.join(&self.settings.database_file)
    }
}

/// Default data directory (`<data_dir>/wellrs`)
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wellrs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.metadata.version, "1");
        assert_eq!(config.settings.database_file, "wellrs.db");
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.settings.database_file = "custom.db".to_string();
        config.save(&path).unwrap();

        let loaded = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.settings.database_file, "custom.db");
        assert_eq!(
            loaded.thresholds.concern.sleep_short,
            config.thresholds.concern.sleep_short
        );
    }

    #[test]
    fn test_missing_config_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        let config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.settings.database_file, "wellrs.db");
    }
}
