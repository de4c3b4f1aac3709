//! SQL script templates for the DuckDB commander.
//!
//! The statement set is immutable and held per commander instance, not in
//! process-global mutable state. The bootstrap script is embedded from a
//! `.sql` file and, like migration scripts, uses `GO` batch boundaries.

/// Idempotent bootstrap: provisions the `migrations` schema and the
/// `migrations.history` table. Runs outside any transaction.
pub(crate) const BOOTSTRAP_SCRIPT: &str = include_str!("sql/bootstrap.sql");

/// Most recently applied migration number for a service.
pub(crate) const LAST_APPLIED: &str =
    "SELECT number FROM migrations.history WHERE service = ? ORDER BY applied DESC LIMIT 1";

/// Duplicate-application check for one `(service, number)` pair.
pub(crate) const COUNT_APPLIED: &str =
    "SELECT count(*) FROM migrations.history WHERE service = ? AND number = ?";

/// History-row insert, executed in the same transaction as the migration's
/// batches.
pub(crate) const INSERT_HISTORY: &str =
    "INSERT INTO migrations.history (service, number, applied) VALUES (?, ?, now())";

/// Existence probe for the history table.
pub(crate) const HISTORY_TABLE_PROBE: &str =
    "SELECT count(*) FROM information_schema.tables WHERE table_schema = 'migrations' AND table_name = 'history'";
