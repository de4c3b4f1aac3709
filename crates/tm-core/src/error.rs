//! Error types for tm-core

use thiserror::Error;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Version identifier contains no digit runs
    #[error("[E001] Invalid version format for this comparer: {number}")]
    InvalidVersionFormat { number: String },

    /// E002: Configuration file not found
    #[error("[E002] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Migration source location not found
    #[error("[E004] Migration source not found: {path}")]
    SourceNotFound { path: String },

    /// E005: IO error
    #[error("[E005] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E006: IO error with file path context
    #[error("[E006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E007: Config/YAML parse error
    #[error("[E007] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
