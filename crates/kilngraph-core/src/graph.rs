//! Graph assembly
//!
//! Turns the registry and its link references into the node/edge model the
//! renderer consumes.
//!
//! A node's `link_count` is not its edge degree. Every outgoing reference
//! counts, resolved or not, while incoming references count only when they
//! resolve. A note linking `[[b]] [[missing]] [[b]]` therefore scores 3 and
//! gives `b` +2.

use crate::color::{ColorClassifier, ColorRule};
use crate::links::{LinkExtractor, RawLinkReference};
use crate::note::display_label;
use crate::registry::NoteRegistry;
use crate::resolver::LinkResolver;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// A note as rendered in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Note id
    pub id: String,
    /// Display label
    pub label: String,
    /// Outgoing reference attempts plus incoming resolved references
    pub link_count: usize,
    /// `#rrggbb` fill color
    pub color: String,
}

/// A resolved link between two notes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    /// Id of the linking note
    pub source: String,
    /// Id of the linked note
    pub target: String,
}

/// Counts gathered while assembling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Notes in the graph
    pub notes: usize,
    /// Resolved edges
    pub edges: usize,
    /// Raw references seen
    pub references: usize,
    /// References that matched no note
    pub unresolved: usize,
}

/// Assembled graph: nodes and edges in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// One node per note
    pub nodes: Vec<GraphNode>,
    /// One edge per resolved reference
    pub edges: Vec<GraphEdge>,
    /// Assembly counters
    pub stats: GraphStats,
}

impl Graph {
    /// Find a node by id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Edges leaving `id`
    pub fn edges_from<'g>(&'g self, id: &'g str) -> impl Iterator<Item = &'g GraphEdge> + 'g {
        self.edges.iter().filter(move |edge| edge.source == id)
    }

    /// Serializable document for the renderer, including the color rules
    pub fn document<'g>(&'g self, color_groups: &'g [ColorRule]) -> GraphDocument<'g> {
        GraphDocument {
            nodes: &self.nodes,
            links: &self.edges,
            color_groups,
        }
    }
}

/// JSON shape handed to the rendering template
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument<'g> {
    /// Graph nodes
    pub nodes: &'g [GraphNode],
    /// Graph edges
    pub links: &'g [GraphEdge],
    /// Color rules in evaluation order
    pub color_groups: &'g [ColorRule],
}

/// Combines registry, resolver and classifier into a [`Graph`]
#[derive(Debug)]
pub struct GraphAssembler<'a> {
    registry: &'a NoteRegistry,
    resolver: LinkResolver<'a>,
    classifier: &'a ColorClassifier,
}

impl<'a> GraphAssembler<'a> {
    /// Create an assembler
    pub fn new(
        registry: &'a NoteRegistry,
        resolver: LinkResolver<'a>,
        classifier: &'a ColorClassifier,
    ) -> Self {
        Self {
            registry,
            resolver,
            classifier,
        }
    }

    /// Extract every note's references in registry order
    pub fn collect_references(&self, extractor: &LinkExtractor) -> Vec<RawLinkReference> {
        self.registry
            .iter()
            .flat_map(|note| extractor.extract(&note.id, &note.raw_text))
            .collect()
    }

    /// Build the graph from references in the given order
    ///
    /// References whose source is not a registered note are ignored.
    pub fn assemble(&self, references: &[RawLinkReference]) -> Graph {
        let mut link_counts: HashMap<&str, usize> =
            self.registry.ids().map(|id| (id, 0)).collect();
        let mut edges = Vec::new();
        let mut stats = GraphStats {
            notes: self.registry.len(),
            ..GraphStats::default()
        };

        for reference in references {
            let Some(source) = link_counts.get_mut(reference.source_note_id.as_str()) else {
                debug!(source = %reference.source_note_id, "reference from unknown note ignored");
                continue;
            };
            *source += 1;
            stats.references += 1;

            match self.resolver.resolve(&reference.raw_target) {
                Some(target) => {
                    edges.push(GraphEdge {
                        source: reference.source_note_id.clone(),
                        target: target.to_string(),
                    });
                    if let Some(count) = link_counts.get_mut(target) {
                        *count += 1;
                    }
                }
                None => stats.unresolved += 1,
            }
        }

        let nodes = self
            .registry
            .iter()
            .map(|note| GraphNode {
                id: note.id.clone(),
                label: display_label(&note.id),
                link_count: link_counts.get(note.id.as_str()).copied().unwrap_or_default(),
                color: self.classifier.classify(&note.raw_text).to_string(),
            })
            .collect();

        stats.edges = edges.len();
        debug!(
            notes = stats.notes,
            edges = stats.edges,
            unresolved = stats.unresolved,
            "graph assembled"
        );

        Graph {
            nodes,
            edges,
            stats,
        }
    }
}
