//! Shared helpers: config loading and target wiring

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tm_core::{Config, FileSystemSource, NumberComparer};
use tm_db::{DuckDbCommander, Migrator};

use crate::cli::{GlobalArgs, TargetArgs};

/// Configuration file name looked up in the project directory.
pub const CONFIG_FILE: &str = "tidemark.yml";

/// Load the project configuration, honoring the `--config` override.
pub fn load_config(global: &GlobalArgs) -> Result<(Config, PathBuf)> {
    let root = PathBuf::from(&global.project_dir);
    let config_path = match &global.config {
        Some(path) => PathBuf::from(path),
        None => root.join(CONFIG_FILE),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    Ok((config, root))
}

/// A fully wired migration target: the migrator plus the names used for
/// reporting.
pub struct Target {
    pub migrator: Migrator,
    pub database: String,
    pub service: String,
}

/// Resolve config values against CLI overrides and wire up the migrator.
pub fn build_target(config: &Config, root: &Path, args: &TargetArgs) -> Target {
    let connection = args.connection.as_ref().unwrap_or(&config.connection);
    let database = args.database.clone().or_else(|| config.database.clone());
    let service = args.service.clone().unwrap_or_else(|| config.service.clone());

    let migrations_path = match &args.source {
        Some(source) => PathBuf::from(source),
        None => root.join(&config.migrations_path),
    };

    let commander = DuckDbCommander::new(connection, database, Some(service.clone()));
    let database = commander.database().to_string();

    let migrator = Migrator::new(
        Arc::new(FileSystemSource::new(migrations_path)),
        Arc::new(NumberComparer),
        Arc::new(commander),
    );

    Target {
        migrator,
        database,
        service,
    }
}
