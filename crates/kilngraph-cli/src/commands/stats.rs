use anyhow::{Context, Result};
use kilngraph_config::KilnGraphConfig;
use kilngraph_core::GraphBuilder;

use crate::cli::StatsFormat;
use crate::output;

/// Print note, edge and reference counts for the configured kiln
pub fn execute(config: &KilnGraphConfig, format: StatsFormat) -> Result<()> {
    let kiln = &config.kiln.path;
    let build = GraphBuilder::new(config.graph_options())
        .build(kiln)
        .with_context(|| format!("Failed to build graph for kiln {}", kiln.display()))?;

    let stats = &build.graph.stats;
    let collisions = build.registry.collisions();

    match format {
        StatsFormat::Table => {
            println!("Kiln Statistics\n");
            println!("{}", output::stats_table(stats, collisions));
            println!("\nKiln: {}", kiln.display());
        }
        StatsFormat::Json => {
            let json = output::stats_json(stats, collisions);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
