//! Configuration types and parsing for tidemark.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project configuration from tidemark.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory containing migration SQL files
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Connection string for the target database.
    ///
    /// `key=value` pairs separated by `;`. Recognized keys: `path` (data
    /// directory holding database files) and `database`/`initial catalog`
    /// (target database name).
    #[serde(default = "default_connection")]
    pub connection: String,

    /// Explicit target database name. Overrides any name embedded in the
    /// connection string.
    #[serde(default)]
    pub database: Option<String>,

    /// Logical migration stream name scoping the history table
    #[serde(default = "default_service")]
    pub service: String,
}

fn default_migrations_path() -> String {
    "migrations".to_string()
}

fn default_connection() -> String {
    "path=.".to_string()
}

fn default_service() -> String {
    "main".to_string()
}

impl Config {
    /// Load configuration from a YAML file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must not be empty".to_string(),
            });
        }
        if self.service.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "service must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
