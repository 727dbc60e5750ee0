//! Terminal output formatting

use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use kilngraph_core::{GraphStats, NoteCollision};
use serde_json::{json, Value};

/// Statistics as a table
pub fn stats_table(stats: &GraphStats, collisions: &[NoteCollision]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Count"]);

    table.add_row(vec![Cell::new("Notes"), Cell::new(stats.notes)]);
    table.add_row(vec![Cell::new("Links"), Cell::new(stats.edges)]);
    table.add_row(vec![Cell::new("References"), Cell::new(stats.references)]);
    table.add_row(vec![
        Cell::new("Unresolved"),
        highlight_nonzero(stats.unresolved),
    ]);
    table.add_row(vec![Cell::new("Name collisions"), highlight_nonzero(collisions.len())]);

    table
}

/// Statistics as a JSON object; collisions are listed with both file paths
pub fn stats_json(stats: &GraphStats, collisions: &[NoteCollision]) -> Value {
    json!({
        "notes": stats.notes,
        "edges": stats.edges,
        "references": stats.references,
        "unresolved": stats.unresolved,
        "collisions": collisions,
    })
}

fn highlight_nonzero(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}
