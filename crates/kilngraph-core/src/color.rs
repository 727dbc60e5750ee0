//! Node color classification
//!
//! Color rules come from the kiln's Obsidian graph settings
//! (`.obsidian/graph.json`, `colorGroups`). Each rule pairs a query with a
//! packed RGB color. Rules are checked in order against a note's raw content
//! and the first match decides the color.
//!
//! Classification never fails. A missing or malformed settings file yields an
//! empty rule set, and every note then gets [`DEFAULT_NODE_COLOR`].

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Color for notes that match no rule
pub const DEFAULT_NODE_COLOR: &str = "#7f7f7f";

/// Location of the color settings, relative to the kiln root
pub const DEFAULT_COLOR_CONFIG: &str = ".obsidian/graph.json";

/// A single (pattern, color) rule
#[derive(Debug, Clone, Serialize)]
pub struct ColorRule {
    /// Pattern source as configured
    pub query: String,
    /// Compiled case-insensitive pattern
    #[serde(skip)]
    pub pattern: Regex,
    /// `#rrggbb` color
    pub color: String,
}

impl ColorRule {
    /// Compile a rule; the pattern matches case-insensitively
    pub fn new(query: impl Into<String>, color: impl Into<String>) -> Result<Self, regex::Error> {
        let query = query.into();
        let pattern = RegexBuilder::new(&query).case_insensitive(true).build()?;
        Ok(Self {
            query,
            pattern,
            color: color.into(),
        })
    }

    /// Whether the rule matches anywhere in `content`
    pub fn matches(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

#[derive(Debug, Deserialize)]
struct GraphSettings {
    #[serde(rename = "colorGroups", default)]
    color_groups: Vec<ColorGroupEntry>,
}

#[derive(Debug, Deserialize)]
struct ColorGroupEntry {
    query: String,
    color: PackedColor,
}

#[derive(Debug, Deserialize)]
struct PackedColor {
    rgb: u32,
}

/// Convert a packed `0xRRGGBB` value to `#rrggbb`
pub fn rgb_to_hex(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0x00ff_ffff)
}

/// Ordered color rules with first-match-wins lookup
#[derive(Debug, Clone, Default)]
pub struct ColorClassifier {
    rules: Vec<ColorRule>,
}

impl ColorClassifier {
    /// Classifier with no rules; everything gets the default color
    pub fn empty() -> Self {
        Self::default()
    }

    /// Classifier over an explicit rule list
    pub fn from_rules(rules: Vec<ColorRule>) -> Self {
        Self { rules }
    }

    /// Load rules from a graph settings file, degrading to no rules on any failure
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no color settings, using default color");
                return Self::empty();
            }
        };

        let classifier = Self::from_json(&content);
        debug!(path = %path.display(), rules = classifier.rules.len(), "loaded color rules");
        classifier
    }

    /// Parse rules from graph settings JSON, degrading to no rules on malformed input
    pub fn from_json(content: &str) -> Self {
        let settings: GraphSettings = match serde_json::from_str(content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "malformed color settings ignored");
                return Self::empty();
            }
        };

        let rules = settings
            .color_groups
            .into_iter()
            .filter(|group| !group.query.is_empty())
            .filter_map(|group| match ColorRule::new(group.query, rgb_to_hex(group.color.rgb)) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!(error = %e, "skipping color rule with invalid pattern");
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Color for a note's content
    pub fn classify(&self, content: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(content))
            .map_or(DEFAULT_NODE_COLOR, |rule| rule.color.as_str())
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[ColorRule] {
        &self.rules
    }

    /// Whether there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
