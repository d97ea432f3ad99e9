//! # Store Configuration
//!
//! Where the document snapshot lives, and the platform file that
//! provisions the administrator record.

use food_core::AdminRecord;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default snapshot location, relative to the working directory
pub const DEFAULT_STORE_PATH: &str = "data/delivery.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Document store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Snapshot file path
    pub path: PathBuf,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `FOOD_STORE_PATH` (default `data/delivery.json`)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let path = env::var("FOOD_STORE_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string());

        Self { path: path.into() }
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_PATH)
    }
}

/// Contents of `config/platform.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformConfig {
    /// Administrator record to provision when the store has none
    #[serde(default)]
    pub admin: Option<AdminSeed>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSeed {
    #[serde(default)]
    pub promoted_restaurants: Vec<String>,
}

impl From<AdminSeed> for AdminRecord {
    fn from(seed: AdminSeed) -> Self {
        AdminRecord::new(seed.promoted_restaurants)
    }
}

impl PlatformConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read the platform file. A missing file yields `None`.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        Self::from_toml(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_config_parsing() {
        let config = PlatformConfig::from_toml(
            r#"
            [admin]
            promoted_restaurants = ["r1", "r2"]
            "#,
        )
        .unwrap();

        let admin: AdminRecord = config.admin.unwrap().into();
        assert_eq!(admin.promoted_restaurants, vec!["r1", "r2"]);
    }

    #[test]
    fn test_platform_config_without_admin() {
        let config = PlatformConfig::from_toml("").unwrap();
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let loaded = PlatformConfig::load(Path::new("does/not/exist.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("platform.toml");
        std::fs::write(&path, "[admin\n").unwrap();

        assert!(matches!(
            PlatformConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_store_config_default_path() {
        assert_eq!(StoreConfig::default().path, PathBuf::from("data/delivery.json"));
    }
}
