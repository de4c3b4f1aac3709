//! Migrate command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{build_target, load_config};
use tm_db::BootstrapAction;

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let (config, root) = load_config(global)?;
    let target = build_target(&config, &root, &args.target);

    println!(
        "Migrating database {} (service: {})",
        target.database, target.service
    );

    let summary = target
        .migrator
        .migrate()
        .await
        .with_context(|| format!("migration run against {} failed", target.database))?;

    match summary.bootstrap {
        BootstrapAction::CreatedDatabase => println!("  created database {}", target.database),
        BootstrapAction::CreatedHistoryTable => println!("  created migration history table"),
        BootstrapAction::None => {}
    }
    for number in &summary.applied {
        println!("  \u{2713} {number}");
    }

    if summary.applied.is_empty() {
        println!("Nothing to apply, database is up to date");
    } else {
        println!("Applied {} migration(s)", summary.applied.len());
    }
    Ok(())
}
