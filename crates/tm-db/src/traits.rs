//! Database commander and locking trait definitions

use crate::error::DbResult;
use async_trait::async_trait;
use tm_core::{DatabaseVersion, Migration};

/// All interaction with a physical database: state detection, provisioning,
/// and per-migration application.
///
/// Implementations must be Send + Sync for async operation. One commander
/// targets one database and one service for its whole lifetime.
#[async_trait]
pub trait DatabaseCommander: Send + Sync {
    /// Idempotently ensure the database, the migration metadata schema, and
    /// the history table exist. Runs outside any transaction. Returns the
    /// resolved database name.
    async fn create(&self) -> DbResult<String>;

    /// Ensure the migration history table exists. On this engine the
    /// history table is not provisioned separately from the full bootstrap,
    /// so this converges with [`DatabaseCommander::create`].
    async fn create_history_table(&self) -> DbResult<()>;

    /// Apply one migration: duplicate check, then all of its batches plus
    /// the history-row insert in a single transaction.
    ///
    /// Fails with [`crate::DbError::AlreadyApplied`] if a history row for
    /// the migration's number already exists; the migration is never
    /// re-executed.
    async fn execute_migration(&self, migration: &Migration) -> DbResult<()>;

    /// Inspect the database's provisioning state.
    ///
    /// Read failures are reclassified into one of the
    /// [`DatabaseVersion`] states via existence probes, never surfaced.
    async fn current_version(&self) -> DbResult<DatabaseVersion>;
}

/// Mutual exclusion around one migration run.
///
/// The migrator acquires the lock before reading database state and
/// releases it on every exit path, including failure.
#[async_trait]
pub trait Locker: Send + Sync {
    /// Acquire the lock, suspending until it is granted. Implementations
    /// report acquisition failure as [`crate::DbError::LockError`], which
    /// aborts the run before any database state is read.
    async fn lock(&self) -> DbResult<()>;

    /// Release the lock. Failures are reported as
    /// [`crate::DbError::LockError`].
    async fn release(&self) -> DbResult<()>;
}

/// Locker that grants immediately and releases nothing.
///
/// DuckDB's own file lock already excludes concurrent writers per database
/// file; this stands in where no external coordinator is configured.
pub struct NullLocker;

#[async_trait]
impl Locker for NullLocker {
    async fn lock(&self) -> DbResult<()> {
        Ok(())
    }

    async fn release(&self) -> DbResult<()> {
        Ok(())
    }
}
