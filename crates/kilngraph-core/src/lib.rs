//! kilngraph core
//!
//! Builds a link graph from a kiln of markdown notes:
//! - Note registry: recursive scan, case-insensitive note ids
//! - Link extraction: wikilinks, markdown links and embeds
//! - Link resolution: ordered candidate matching, unresolved links dropped
//! - Color classification: first matching Obsidian color group
//! - Graph assembly: nodes, edges and link counts for the renderer
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let graph = kilngraph_core::build_graph(Path::new("my-kiln"), None)?;
//! println!("{} notes, {} links", graph.nodes.len(), graph.edges.len());
//! # Ok::<(), kilngraph_core::ScanError>(())
//! ```

pub mod builder;
pub mod color;
pub mod error;
pub mod graph;
pub mod links;
pub mod note;
pub mod registry;
pub mod resolver;

pub use builder::{build_graph, GraphBuild, GraphBuilder, GraphOptions};
pub use color::{ColorClassifier, ColorRule, DEFAULT_COLOR_CONFIG, DEFAULT_NODE_COLOR};
pub use error::{ScanError, ScanResult};
pub use graph::{Graph, GraphAssembler, GraphDocument, GraphEdge, GraphNode, GraphStats};
pub use links::{normalize_target, LinkExtractor, LinkSyntax, RawLinkReference};
pub use note::{Note, DEFAULT_NOTE_EXTENSION};
pub use registry::{CollisionPolicy, NoteCollision, NoteRegistry};
pub use resolver::LinkResolver;
