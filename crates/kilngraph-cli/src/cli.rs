use clap::{Args, Parser, Subcommand, ValueEnum};
use kilngraph_config::ConfigOverrides;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors (default)
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for `stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON object
    Json,
}

#[derive(Parser)]
#[command(name = "kgraph")]
#[command(about = "kgraph - turn a kiln of linked markdown notes into a graph")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/kilngraph/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Effective log level: explicit flag, then --verbose, then warn
    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

/// Kiln selection shared by graph commands
#[derive(Args, Debug, Clone, Default)]
pub struct KilnArgs {
    /// Kiln directory (overrides config and KILNGRAPH_KILN_PATH)
    #[arg(long = "vault", visible_alias = "kiln")]
    pub kiln: Option<PathBuf>,

    /// Color settings file, relative to the current directory
    /// (default: <kiln>/.obsidian/graph.json)
    #[arg(long)]
    pub color_config: Option<PathBuf>,

    /// Abort when two notes share a file name instead of keeping the last one
    #[arg(long)]
    pub reject_collisions: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the graph and write it to the output directory
    Build {
        #[command(flatten)]
        kiln: KilnArgs,

        /// Output directory (overrides config and KILNGRAPH_OUTPUT_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// HTML template to fill with the graph data
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Pretty-print the JSON export
        #[arg(long)]
        pretty: bool,
    },

    /// Print graph statistics without writing anything
    Stats {
        #[command(flatten)]
        kiln: KilnArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = StatsFormat::Table)]
        format: StatsFormat,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Write an example config file
    Init {
        /// Where to write (default: ~/.config/kilngraph/config.toml)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}

impl KilnArgs {
    /// Config overrides for these arguments
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            kiln_path: self.kiln.clone(),
            color_config: self.color_config.clone(),
            reject_collisions: self.reject_collisions,
            ..ConfigOverrides::default()
        }
    }
}
