use anyhow::{Context, Result};
use colored::Colorize;
use kilngraph_config::{ConfigOverrides, KilnGraphConfig};
use std::path::{Path, PathBuf};

use crate::cli::ConfigCommands;

/// Execute config subcommand
pub fn execute(cmd: ConfigCommands, config_file: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Init { path, force } => init(path, force),
        ConfigCommands::Show => show(config_file),
    }
}

/// Write an example config file
fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = path
        .or_else(|| KilnGraphConfig::default_config_path().ok())
        .context("Could not determine config file path")?;

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    KilnGraphConfig::create_example(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!(
        "{} Created config file at: {}",
        "Success:".green().bold(),
        config_path.display()
    );
    println!("{}", "Edit this file to point kgraph at your kiln.".dimmed());

    Ok(())
}

/// Print the effective configuration (file and environment applied)
fn show(config_file: Option<&Path>) -> Result<()> {
    let config = KilnGraphConfig::load(config_file, &ConfigOverrides::default())
        .context("Failed to load configuration")?;
    print!("{}", config.to_toml()?);
    Ok(())
}
