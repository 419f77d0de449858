use std::{fs, path::Path};

use anyhow::Result;
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json};

/// Write a default `.queryshiftrc.json` into the current directory.
///
/// An existing config is never overwritten.
pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Error);
    }

    fs::write(config_path, default_config_json()?)?;

    let config = Config::default();
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    println!(
        "  reading references from {} (ignoring {})",
        config.manifest.cyan(),
        config.ignores.join(", ")
    );
    println!(
        "Run {} once the manifest is in place.",
        "queryshift plan".cyan()
    );

    Ok(ExitStatus::Success)
}
