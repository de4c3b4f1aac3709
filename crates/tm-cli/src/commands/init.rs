//! Init command implementation

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::cli::{GlobalArgs, InitArgs};
use crate::commands::common::CONFIG_FILE;

/// Execute the init command
pub async fn execute(args: &InitArgs, global: &GlobalArgs) -> Result<()> {
    let root = Path::new(&global.project_dir);
    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    fs::create_dir_all(root)?;
    let name = match &args.name {
        Some(name) => name.clone(),
        None => root
            .canonicalize()?
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tidemark".to_string()),
    };

    fs::write(
        &config_path,
        format!(
            "name: {name}\nmigrations_path: migrations\nconnection: path=.;database={name}\nservice: main\n"
        ),
    )?;
    fs::create_dir_all(root.join("migrations"))?;

    println!("Initialized project: {name}");
    println!("  {}", config_path.display());
    println!("  {}", root.join("migrations").display());
    Ok(())
}
