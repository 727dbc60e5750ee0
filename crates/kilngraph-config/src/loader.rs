//! Configuration loading
//!
//! Precedence, lowest to highest: built-in defaults, config file,
//! environment variables, command-line overrides.

use crate::config::KilnGraphConfig;
use crate::error::{ConfigError, ConfigResult};
use kilngraph_core::CollisionPolicy;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the kiln path
pub const ENV_KILN_PATH: &str = "KILNGRAPH_KILN_PATH";

/// Environment variable overriding the output directory
pub const ENV_OUTPUT_DIR: &str = "KILNGRAPH_OUTPUT_DIR";

/// Command-line values applied on top of file and environment settings
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Kiln directory
    pub kiln_path: Option<PathBuf>,
    /// Export directory
    pub output_dir: Option<PathBuf>,
    /// HTML template
    pub template: Option<PathBuf>,
    /// Color settings file, used as given rather than joined to the kiln root
    pub color_config: Option<PathBuf>,
    /// Abort on note id collisions
    pub reject_collisions: bool,
    /// Pretty-print JSON
    pub pretty: bool,
}

const EXAMPLE_CONFIG: &str = r#"# kilngraph configuration

[kiln]
# Path to your kiln (Obsidian vault)
# Default: current directory
path = "/home/user/Documents/my-vault"

# Extension of note files, without the dot
note_extension = "md"

# Obsidian graph settings holding color groups, relative to the kiln root
color_config = ".obsidian/graph.json"

# "overwrite" keeps the last file when two notes share a name, "reject" aborts
on_collision = "overwrite"

[output]
# Directory receiving vault_graph.json / vault_graph.html
dir = "."

# HTML template with {{nodes}}, {{links}} and {{colorGroups}} placeholders
# template = "/home/user/.config/kilngraph/graph.html"

pretty = false
"#;

impl KilnGraphConfig {
    /// Load configuration with precedence: defaults < file < env < overrides.
    ///
    /// An explicitly given config file must exist. When no file is given the
    /// default location is used if present, otherwise defaults apply.
    pub fn load(config_file: Option<&Path>, overrides: &ConfigOverrides) -> ConfigResult<Self> {
        let mut config = Self::from_file_or_default(config_file)?;
        config.apply_env();
        config.apply_overrides(overrides);
        Ok(config)
    }

    /// Read the config file, falling back to defaults when none exists
    pub fn from_file_or_default(config_file: Option<&Path>) -> ConfigResult<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply `KILNGRAPH_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(ENV_KILN_PATH) {
            self.kiln.path = PathBuf::from(path);
        }
        if let Ok(dir) = std::env::var(ENV_OUTPUT_DIR) {
            self.output.dir = PathBuf::from(dir);
        }
    }

    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.kiln_path {
            self.kiln.path = path.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.output.dir = dir.clone();
        }
        if let Some(template) = &overrides.template {
            self.output.template = Some(template.clone());
        }
        if let Some(color_config) = &overrides.color_config {
            self.kiln.color_config_file = Some(color_config.clone());
        }
        if overrides.reject_collisions {
            self.kiln.on_collision = CollisionPolicy::Reject;
        }
        if overrides.pretty {
            self.output.pretty = true;
        }
    }

    /// Default config file location (`<config dir>/kilngraph/config.toml`)
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("kilngraph").join("config.toml"))
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write a commented example config file, creating parent directories
    pub fn create_example(path: &Path) -> ConfigResult<()> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, EXAMPLE_CONFIG).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_config_parses() {
        let config: KilnGraphConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.kiln.path, PathBuf::from("/home/user/Documents/my-vault"));
        assert_eq!(config.kiln.on_collision, CollisionPolicy::Overwrite);
        assert_eq!(config.output.template, None);
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut config = KilnGraphConfig::default();
        config.output.dir = PathBuf::from("/from/file");

        config.apply_overrides(&ConfigOverrides {
            kiln_path: Some(PathBuf::from("/cli/kiln")),
            reject_collisions: true,
            ..ConfigOverrides::default()
        });

        assert_eq!(config.kiln.path, PathBuf::from("/cli/kiln"));
        assert_eq!(config.output.dir, PathBuf::from("/from/file"));
        assert_eq!(config.kiln.on_collision, CollisionPolicy::Reject);
        assert!(!config.output.pretty);
    }

    #[test]
    fn color_config_override_is_kept_apart_from_kiln_relative_setting() {
        let mut config = KilnGraphConfig::default();

        config.apply_overrides(&ConfigOverrides {
            color_config: Some(PathBuf::from("colors.json")),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.kiln.color_config, PathBuf::from(".obsidian/graph.json"));
        let options = config.graph_options();
        assert_eq!(
            options.color_config_path(std::path::Path::new("/kiln")),
            PathBuf::from("colors.json")
        );
    }

    #[test]
    fn to_toml_round_trips() {
        let mut config = KilnGraphConfig::default();
        config.output.template = Some(PathBuf::from("/t.html"));

        let rendered = config.to_toml().unwrap();
        let parsed: KilnGraphConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
