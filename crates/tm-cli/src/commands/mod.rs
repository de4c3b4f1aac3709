//! Command implementations

pub mod common;
pub mod init;
pub mod migrate;
pub mod status;
