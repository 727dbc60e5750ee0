//! Configuration schema

use kilngraph_core::{CollisionPolicy, GraphOptions, DEFAULT_COLOR_CONFIG, DEFAULT_NOTE_EXTENSION};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KilnGraphConfig {
    /// Kiln (note tree) settings
    #[serde(default)]
    pub kiln: KilnConfig,

    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Kiln configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KilnConfig {
    /// Path to the kiln directory
    #[serde(default = "default_kiln_path")]
    pub path: PathBuf,

    /// Note file extension, without the dot
    #[serde(default = "default_note_extension")]
    pub note_extension: String,

    /// Color settings file, relative to the kiln root unless absolute
    #[serde(default = "default_color_config")]
    pub color_config: PathBuf,

    /// What to do when two notes share an id
    #[serde(default)]
    pub on_collision: CollisionPolicy,

    /// Color settings file given on the command line, used as given
    #[serde(skip)]
    pub color_config_file: Option<PathBuf>,
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the export
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Optional HTML template with `{{nodes}}`, `{{links}}` and `{{colorGroups}}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Pretty-print the JSON export
    #[serde(default)]
    pub pretty: bool,
}

impl Default for KilnConfig {
    fn default() -> Self {
        Self {
            path: default_kiln_path(),
            note_extension: default_note_extension(),
            color_config: default_color_config(),
            on_collision: CollisionPolicy::default(),
            color_config_file: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            template: None,
            pretty: false,
        }
    }
}

impl KilnGraphConfig {
    /// Core build options derived from this configuration
    pub fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            note_extension: self.kiln.note_extension.clone(),
            collision_policy: self.kiln.on_collision,
            color_config: self.kiln.color_config.clone(),
            color_config_file: self.kiln.color_config_file.clone(),
        }
    }
}

fn default_kiln_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn default_note_extension() -> String {
    DEFAULT_NOTE_EXTENSION.to_string()
}

fn default_color_config() -> PathBuf {
    PathBuf::from(DEFAULT_COLOR_CONFIG)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_options_mirror_kiln_section() {
        let mut config = KilnGraphConfig::default();
        config.kiln.note_extension = "txt".to_string();
        config.kiln.on_collision = CollisionPolicy::Reject;
        config.kiln.color_config = PathBuf::from("colors.json");

        let options = config.graph_options();
        assert_eq!(options.note_extension, "txt");
        assert_eq!(options.collision_policy, CollisionPolicy::Reject);
        assert_eq!(options.color_config, PathBuf::from("colors.json"));
        assert_eq!(options.color_config_file, None);
    }

    #[test]
    fn defaults_match_core_defaults() {
        let options = KilnGraphConfig::default().graph_options();
        let core = GraphOptions::default();
        assert_eq!(options, core);
    }
}
