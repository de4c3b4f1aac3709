//! DuckDB commander implementation.
//!
//! A "database" is a DuckDB file named `<database>.duckdb` under the data
//! directory from the connection string's `path` key. Creating the database
//! means creating that file, which cannot happen inside a transaction, so
//! the bootstrap runs unwrapped; per-migration work runs in one transaction.

use crate::batch::split_batches;
use crate::conninfo;
use crate::error::{DbError, DbResult};
use crate::templates;
use crate::traits::DatabaseCommander;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::PathBuf;
use tm_core::{DatabaseVersion, Migration};

/// Default logical service name scoping the history table.
pub const DEFAULT_SERVICE: &str = "main";

/// DuckDB-backed [`DatabaseCommander`].
///
/// Database name resolution happens once at construction: explicit override,
/// then the `database`/`initial catalog` key of the connection string, then
/// a freshly generated unique name. Each operation opens and closes its own
/// connection.
pub struct DuckDbCommander {
    database: String,
    service: String,
    db_path: PathBuf,
}

impl DuckDbCommander {
    /// Create a commander for `connection`, optionally overriding the
    /// database name and the service.
    pub fn new(connection: &str, database: Option<String>, service: Option<String>) -> Self {
        let database = database
            .or_else(|| conninfo::database_name(connection))
            .unwrap_or_else(|| format!("db_{}", uuid::Uuid::new_v4().simple()));
        let data_dir = PathBuf::from(conninfo::data_dir(connection).unwrap_or_else(|| ".".into()));
        let db_path = data_dir.join(format!("{database}.duckdb"));
        Self {
            database,
            service: service.unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            db_path,
        }
    }

    /// Resolved database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Service scoping the history table.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// File backing the target database.
    pub fn db_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Open the target database, failing if its file does not exist.
    /// Opening a DuckDB path creates the file, so existence is checked
    /// first to keep reads side-effect free.
    fn open_existing(&self) -> DbResult<Connection> {
        if !self.db_path.exists() {
            return Err(DbError::ConnectionError(format!(
                "database '{}' does not exist at {}",
                self.database,
                self.db_path.display()
            )));
        }
        self.open_or_create()
    }

    /// Open the target database, creating its file if absent.
    fn open_or_create(&self) -> DbResult<Connection> {
        Connection::open(&self.db_path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", self.db_path.display())))
    }

    /// Execute each `GO`-split batch of `sql` sequentially, outside any
    /// transaction.
    fn run_batches(conn: &Connection, sql: &str) -> DbResult<()> {
        for batch in split_batches(sql) {
            conn.execute_batch(&batch)
                .map_err(|e| DbError::ExecutionError(format!("{e}: {batch}")))?;
        }
        Ok(())
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back
    /// on error.
    fn with_transaction<T, F>(conn: &Connection, body: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = conn.execute_batch("COMMIT") {
                    let _ = conn.execute_batch("ROLLBACK");
                    return Err(DbError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = conn.execute_batch("ROLLBACK");
            }
        }
        result
    }

    /// Count of history rows for `(service, number)`.
    fn applied_count(&self, conn: &Connection, number: &str) -> DbResult<i64> {
        let count: i64 = conn
            .query_row(
                templates::COUNT_APPLIED,
                duckdb::params![self.service, number],
                |row| row.get(0),
            )
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count)
    }
}

#[async_trait]
impl DatabaseCommander for DuckDbCommander {
    async fn create(&self) -> DbResult<String> {
        let conn = self.open_or_create()?;
        Self::run_batches(&conn, templates::BOOTSTRAP_SCRIPT)?;
        log::debug!("bootstrapped database {}", self.database);
        Ok(self.database.clone())
    }

    async fn create_history_table(&self) -> DbResult<()> {
        // Provisioning the history table is not separable from the full
        // bootstrap on this engine; both transitions converge here.
        self.create().await.map(|_| ())
    }

    async fn execute_migration(&self, migration: &Migration) -> DbResult<()> {
        let conn = self.open_existing()?;

        if self.applied_count(&conn, &migration.number)? > 0 {
            log::info!(
                "trying to reapply migration {} to database {}",
                migration.number,
                self.database
            );
            return Err(DbError::AlreadyApplied {
                number: migration.number.clone(),
            });
        }

        Self::with_transaction(&conn, |conn| {
            for batch in split_batches(&migration.sql) {
                conn.execute_batch(&batch).map_err(|e| {
                    DbError::ExecutionError(format!(
                        "migration {} failed: {e}",
                        migration.number
                    ))
                })?;
            }
            conn.execute(
                templates::INSERT_HISTORY,
                duckdb::params![self.service, migration.number],
            )
            .map_err(|e| {
                DbError::ExecutionError(format!(
                    "failed to record migration {}: {e}",
                    migration.number
                ))
            })?;
            Ok(())
        })
    }

    async fn current_version(&self) -> DbResult<DatabaseVersion> {
        if !self.db_path.exists() {
            return Ok(DatabaseVersion::NotCreated);
        }
        let conn = self.open_existing()?;

        let read = conn.query_row(
            templates::LAST_APPLIED,
            duckdb::params![self.service],
            |row| row.get::<_, String>(0),
        );
        match read {
            Ok(number) => Ok(DatabaseVersion::Version(Some(number))),
            Err(duckdb::Error::QueryReturnedNoRows) => {
                // History table present, nothing applied for this service.
                Ok(DatabaseVersion::Version(None))
            }
            Err(e) => {
                log::debug!(
                    "failed to read last applied migration number, probing: {e}"
                );
                let table_count: i64 = conn
                    .query_row(templates::HISTORY_TABLE_PROBE, [], |row| row.get(0))
                    .map_err(|probe| DbError::ExecutionError(probe.to_string()))?;
                if table_count == 0 {
                    Ok(DatabaseVersion::MissingHistoryTable)
                } else {
                    Ok(DatabaseVersion::Version(None))
                }
            }
        }
    }
}
