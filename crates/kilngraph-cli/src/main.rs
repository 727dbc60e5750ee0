use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use kilngraph_cli::{cli::Cli, commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.level_filter());

    commands::run(cli)
}

/// Install the stderr subscriber; `RUST_LOG` takes precedence over the flags.
fn init_logging(level: LevelFilter) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
