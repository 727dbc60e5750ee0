//! End-to-end graph construction
//!
//! Runs the whole pipeline for one kiln: scan, extract, resolve, classify,
//! assemble. Nothing is cached between runs.

use crate::color::{ColorClassifier, DEFAULT_COLOR_CONFIG};
use crate::error::ScanResult;
use crate::graph::{Graph, GraphAssembler};
use crate::links::LinkExtractor;
use crate::note::DEFAULT_NOTE_EXTENSION;
use crate::registry::{CollisionPolicy, NoteRegistry};
use crate::resolver::LinkResolver;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for a graph build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    /// Note file extension, without the dot
    pub note_extension: String,
    /// Handling of notes whose ids collide
    pub collision_policy: CollisionPolicy,
    /// Color settings file; relative paths are joined to the kiln root
    pub color_config: PathBuf,
    /// Color settings file used as given, bypassing `color_config`.
    /// Relative paths resolve against the working directory.
    pub color_config_file: Option<PathBuf>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            note_extension: DEFAULT_NOTE_EXTENSION.to_string(),
            collision_policy: CollisionPolicy::default(),
            color_config: PathBuf::from(DEFAULT_COLOR_CONFIG),
            color_config_file: None,
        }
    }
}

impl GraphOptions {
    /// Color settings path for a kiln
    pub fn color_config_path(&self, root: &Path) -> PathBuf {
        match &self.color_config_file {
            Some(path) => path.clone(),
            None => root.join(&self.color_config),
        }
    }
}

/// Output of a build: the graph plus the inputs it was derived from
#[derive(Debug)]
pub struct GraphBuild {
    /// Scanned notes
    pub registry: NoteRegistry,
    /// Rules used for node colors
    pub classifier: ColorClassifier,
    /// Assembled graph
    pub graph: Graph,
}

/// Builds graphs for kilns using fixed options
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    options: GraphOptions,
}

impl GraphBuilder {
    /// Builder with the given options
    pub fn new(options: GraphOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Build the graph for the kiln at `root`
    pub fn build(&self, root: &Path) -> ScanResult<GraphBuild> {
        let registry = NoteRegistry::scan(
            root,
            &self.options.note_extension,
            self.options.collision_policy,
        )?;
        let classifier = ColorClassifier::load(&self.options.color_config_path(root));

        let graph = {
            let resolver = LinkResolver::with_extension(&registry, &self.options.note_extension);
            let assembler = GraphAssembler::new(&registry, resolver, &classifier);
            let references = assembler.collect_references(&LinkExtractor::new());
            assembler.assemble(&references)
        };

        info!(
            root = %root.display(),
            notes = graph.stats.notes,
            edges = graph.stats.edges,
            "built kiln graph"
        );

        Ok(GraphBuild {
            registry,
            classifier,
            graph,
        })
    }
}

/// Build the graph for `root` with default options.
///
/// `color_config` overrides the color settings file and is used as given, so
/// a relative path resolves against the working directory. `None` uses
/// `<root>/.obsidian/graph.json`.
pub fn build_graph(root: &Path, color_config: Option<&Path>) -> ScanResult<Graph> {
    let options = GraphOptions {
        color_config_file: color_config.map(Path::to_path_buf),
        ..GraphOptions::default()
    };
    GraphBuilder::new(options).build(root).map(|build| build.graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_color_config_is_joined_to_root() {
        let options = GraphOptions::default();
        assert_eq!(
            options.color_config_path(Path::new("/kiln")),
            PathBuf::from("/kiln/.obsidian/graph.json")
        );
    }

    #[test]
    fn absolute_color_config_is_kept() {
        let options = GraphOptions {
            color_config: PathBuf::from("/etc/colors.json"),
            ..GraphOptions::default()
        };
        assert_eq!(
            options.color_config_path(Path::new("/kiln")),
            PathBuf::from("/etc/colors.json")
        );
    }

    #[test]
    fn explicit_color_config_file_is_not_joined_to_root() {
        let options = GraphOptions {
            color_config_file: Some(PathBuf::from("colors.json")),
            ..GraphOptions::default()
        };
        assert_eq!(
            options.color_config_path(Path::new("/kiln")),
            PathBuf::from("colors.json")
        );
    }
}
