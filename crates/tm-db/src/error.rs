//! Error types for tm-db

use thiserror::Error;
use tm_core::CoreError;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Script execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Duplicate application attempt (D003)
    #[error("[D003] Migration {number} already applied")]
    AlreadyApplied { number: String },

    /// Transaction management error (D004)
    #[error("[D004] Transaction failed: {0}")]
    TransactionError(String),

    /// Lock acquisition or release error (D005)
    #[error("[D005] Migration lock failed: {0}")]
    LockError(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}

/// Errors surfaced by a full migration run: either a core failure (version
/// comparison, source loading) or a database failure.
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
