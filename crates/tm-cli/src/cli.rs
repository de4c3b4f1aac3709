//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Tidemark - versioned SQL migrations for DuckDB
#[derive(Parser, Debug)]
#[command(name = "tidemark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a tidemark.yml and a migrations directory
    Init(InitArgs),

    /// Apply all pending migrations to the target database
    Migrate(MigrateArgs),

    /// Show provisioning state and pending migrations without applying
    Status(StatusArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name (default: project directory name)
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Target overrides shared by migrate and status
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Connection string (key=value pairs, e.g. "path=./data;database=app")
    #[arg(long, env = "TIDEMARK_CONNECTION")]
    pub connection: Option<String>,

    /// Target database name (overrides the connection string)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Migration stream name scoping the history table
    #[arg(short, long)]
    pub service: Option<String>,

    /// Directory containing migration SQL files
    #[arg(long)]
    pub source: Option<String>,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Target overrides
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Target overrides
    #[command(flatten)]
    pub target: TargetArgs,
}
