//! tm-core - Core library for Tidemark
//!
//! This crate provides the shared migration types, version-number ordering,
//! migration sources, configuration parsing, and the error taxonomy used
//! across all Tidemark components.

pub mod config;
pub mod error;
pub mod migration;
pub mod source;
pub mod version;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use migration::Migration;
pub use source::{EmbeddedSource, FileSystemSource, MigrationSource};
pub use version::{DatabaseVersion, MigrationComparer, NumberComparer};
