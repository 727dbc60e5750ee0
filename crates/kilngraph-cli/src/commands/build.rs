use anyhow::{Context, Result};
use kilngraph_config::KilnGraphConfig;
use kilngraph_core::GraphBuilder;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::export;

/// Build the graph and write the export; prints the written path
pub fn execute(config: &KilnGraphConfig) -> Result<()> {
    let path = build_and_export(config)?;
    println!("{}", path.display());
    Ok(())
}

/// Build the graph for the configured kiln and write it to the output directory
pub fn build_and_export(config: &KilnGraphConfig) -> Result<PathBuf> {
    let kiln = &config.kiln.path;
    let build = GraphBuilder::new(config.graph_options())
        .build(kiln)
        .with_context(|| format!("Failed to build graph for kiln {}", kiln.display()))?;

    let document = build.graph.document(build.classifier.rules());

    let out_dir = &config.output.dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let path = match &config.output.template {
        Some(template) => export::write_html(&document, template, out_dir)?,
        None => export::write_json(&document, out_dir, config.output.pretty)?,
    };

    info!(
        notes = build.graph.stats.notes,
        edges = build.graph.stats.edges,
        path = %path.display(),
        "graph written"
    );
    Ok(path)
}
