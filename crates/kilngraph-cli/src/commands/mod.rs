pub mod build;
pub mod config;
pub mod stats;

use anyhow::{Context, Result};
use kilngraph_config::{ConfigOverrides, KilnGraphConfig};
use std::path::Path;

use crate::cli::{Cli, Commands};

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let config_file = cli.config.as_deref();

    match cli.command {
        Commands::Build {
            kiln,
            output,
            template,
            pretty,
        } => {
            let overrides = ConfigOverrides {
                output_dir: output,
                template,
                pretty,
                ..kiln.overrides()
            };
            build::execute(&load_config(config_file, &overrides)?)
        }
        Commands::Stats { kiln, format } => {
            stats::execute(&load_config(config_file, &kiln.overrides())?, format)
        }
        Commands::Config(cmd) => config::execute(cmd, config_file),
    }
}

/// Load the effective configuration for a command
pub(crate) fn load_config(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<KilnGraphConfig> {
    KilnGraphConfig::load(config_file, overrides).context("Failed to load configuration")
}
