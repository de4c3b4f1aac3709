//! tm-db - Database layer for Tidemark
//!
//! This crate provides the `DatabaseCommander` trait, its DuckDB
//! implementation, and the `Migrator` orchestrator that drives a full
//! migration run.

pub mod batch;
pub mod conninfo;
pub mod duckdb;
pub mod error;
pub mod migrator;
pub(crate) mod templates;
pub mod traits;

pub use duckdb::DuckDbCommander;
pub use error::{DbError, DbResult, MigrateError, MigrateResult};
pub use migrator::{BootstrapAction, MigratePlan, MigrateSummary, Migrator};
pub use traits::{DatabaseCommander, Locker, NullLocker};
