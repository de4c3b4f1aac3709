//! Status command implementation

use anyhow::Result;
use tm_core::DatabaseVersion;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{build_target, load_config};

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let (config, root) = load_config(global)?;
    let target = build_target(&config, &root, &args.target);

    let plan = target.migrator.plan().await?;

    println!("Database: {} (service: {})", target.database, target.service);
    match &plan.current {
        DatabaseVersion::NotCreated => println!("State:    not created"),
        DatabaseVersion::MissingHistoryTable => {
            println!("State:    missing migration history table")
        }
        DatabaseVersion::Version(Some(number)) => println!("State:    at version {number}"),
        DatabaseVersion::Version(None) => println!("State:    no migrations applied"),
    }

    if plan.pending.is_empty() {
        println!("Pending:  none");
    } else {
        println!("Pending:  {} migration(s)", plan.pending.len());
        for number in &plan.pending {
            println!("  {number}");
        }
    }
    Ok(())
}
