//! Tidemark CLI - versioned SQL migrations for DuckDB

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{init, migrate, status};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.global.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    match &cli.command {
        cli::Commands::Init(args) => init::execute(args, &cli.global).await,
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
    }
}
