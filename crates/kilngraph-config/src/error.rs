//! Configuration errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config file could not be written
    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// No platform config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Specialized Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
