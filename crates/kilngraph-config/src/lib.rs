//! # kilngraph configuration
//!
//! Type-safe loading of the kilngraph TOML config file, with environment and
//! command-line overrides layered on top.
//!
//! ```rust,no_run
//! use kilngraph_config::{ConfigOverrides, KilnGraphConfig};
//!
//! let config = KilnGraphConfig::load(None, &ConfigOverrides::default())?;
//! let options = config.graph_options();
//! # Ok::<(), kilngraph_config::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod loader;

pub use config::*;
pub use error::*;
pub use loader::*;
