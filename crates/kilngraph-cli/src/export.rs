//! Graph export
//!
//! The graph document is written either as plain JSON or spliced into an
//! HTML template. Templates carry the placeholders `{{nodes}}`, `{{links}}`
//! and `{{colorGroups}}`, each replaced with the matching JSON array.

use anyhow::{Context, Result};
use kilngraph_core::GraphDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the JSON export
pub const JSON_FILE_NAME: &str = "vault_graph.json";

/// File name of the rendered template
pub const HTML_FILE_NAME: &str = "vault_graph.html";

const NODES_PLACEHOLDER: &str = "{{nodes}}";
const LINKS_PLACEHOLDER: &str = "{{links}}";
const COLOR_GROUPS_PLACEHOLDER: &str = "{{colorGroups}}";

/// Serialize the whole document
pub fn to_json(document: &GraphDocument<'_>, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    }
}

/// Substitute the graph arrays into a template
///
/// `</` is escaped in the embedded JSON so a note id cannot close the
/// surrounding `<script>` element.
pub fn render_template(template: &str, document: &GraphDocument<'_>) -> serde_json::Result<String> {
    let nodes = script_safe(serde_json::to_string(document.nodes)?);
    let links = script_safe(serde_json::to_string(document.links)?);
    let color_groups = script_safe(serde_json::to_string(document.color_groups)?);

    let mut rendered = String::with_capacity(template.len() + nodes.len() + links.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (value, consumed) = if tail.starts_with(NODES_PLACEHOLDER) {
            (nodes.as_str(), NODES_PLACEHOLDER.len())
        } else if tail.starts_with(LINKS_PLACEHOLDER) {
            (links.as_str(), LINKS_PLACEHOLDER.len())
        } else if tail.starts_with(COLOR_GROUPS_PLACEHOLDER) {
            (color_groups.as_str(), COLOR_GROUPS_PLACEHOLDER.len())
        } else {
            ("{{", 2)
        };
        rendered.push_str(value);
        rest = &tail[consumed..];
    }
    rendered.push_str(rest);

    Ok(rendered)
}

fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

/// Write `vault_graph.json` into `out_dir`
pub fn write_json(document: &GraphDocument<'_>, out_dir: &Path, pretty: bool) -> Result<PathBuf> {
    let path = out_dir.join(JSON_FILE_NAME);
    let json = to_json(document, pretty).context("Failed to serialize graph")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Render `template` and write `vault_graph.html` into `out_dir`
pub fn write_html(document: &GraphDocument<'_>, template: &Path, out_dir: &Path) -> Result<PathBuf> {
    let source = fs::read_to_string(template)
        .with_context(|| format!("Failed to read template {}", template.display()))?;
    let html = render_template(&source, document).context("Failed to serialize graph")?;

    let path = out_dir.join(HTML_FILE_NAME);
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kilngraph_core::{ColorRule, GraphEdge, GraphNode};
    use serde_json::Value;
    use tempfile::TempDir;

    fn sample() -> (Vec<GraphNode>, Vec<GraphEdge>, Vec<ColorRule>) {
        let nodes = vec![
            GraphNode {
                id: "a.md".into(),
                label: "A.md".into(),
                link_count: 1,
                color: "#ff0000".into(),
            },
            GraphNode {
                id: "b.md".into(),
                label: "B.md".into(),
                link_count: 1,
                color: "#7f7f7f".into(),
            },
        ];
        let edges = vec![GraphEdge {
            source: "a.md".into(),
            target: "b.md".into(),
        }];
        let rules = vec![ColorRule::new("urgent", "#ff0000").unwrap()];
        (nodes, edges, rules)
    }

    fn document<'g>(
        nodes: &'g [GraphNode],
        links: &'g [GraphEdge],
        color_groups: &'g [ColorRule],
    ) -> GraphDocument<'g> {
        GraphDocument {
            nodes,
            links,
            color_groups,
        }
    }

    #[test]
    fn json_uses_renderer_field_names() {
        let (nodes, edges, rules) = sample();
        let json = to_json(&document(&nodes, &edges, &rules), false).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["nodes"][0]["linkCount"], 1);
        assert_eq!(value["nodes"][1]["label"], "B.md");
        assert_eq!(value["links"][0]["source"], "a.md");
        assert_eq!(value["links"][0]["target"], "b.md");
        assert_eq!(value["colorGroups"][0]["query"], "urgent");
        assert_eq!(value["colorGroups"][0]["color"], "#ff0000");
        assert!(value["colorGroups"][0].get("pattern").is_none());
    }

    #[test]
    fn template_placeholders_are_replaced() {
        let (nodes, edges, rules) = sample();
        let template = "var nodes = {{nodes}};\nvar links = {{links}};\nvar groups = {{colorGroups}};";

        let html = render_template(template, &document(&nodes, &edges, &rules)).unwrap();

        assert!(!html.contains("{{"));
        assert!(html.contains(r#"var links = [{"source":"a.md","target":"b.md"}];"#));
        assert!(html.contains(r##"var groups = [{"query":"urgent","color":"#ff0000"}];"##));
    }

    #[test]
    fn unknown_braces_are_left_alone() {
        let (nodes, edges, rules) = sample();
        let html = render_template("{{title}} {{ {{links}}", &document(&nodes, &edges, &rules)).unwrap();

        assert!(html.starts_with("{{title}} {{ [{"));
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let nodes = vec![GraphNode {
            id: "{{links}}.md".into(),
            label: "{{links}}.md".into(),
            link_count: 0,
            color: "#7f7f7f".into(),
        }];
        let html = render_template("{{nodes}}|{{links}}", &document(&nodes, &[], &[])).unwrap();

        assert!(html.ends_with("|[]"));
        assert!(html.contains(r#""id":"{{links}}.md""#));
    }

    #[test]
    fn script_end_tags_are_escaped() {
        let nodes = vec![GraphNode {
            id: "</script>.md".into(),
            label: "</script>.md".into(),
            link_count: 0,
            color: "#7f7f7f".into(),
        }];
        let html = render_template("{{nodes}}", &document(&nodes, &[], &[])).unwrap();

        assert!(!html.contains("</script>"));
        let value: Value = serde_json::from_str(&html).unwrap();
        assert_eq!(value[0]["id"], "</script>.md");
    }

    #[test]
    fn writers_use_fixed_file_names() {
        let dir = TempDir::new().unwrap();
        let (nodes, edges, rules) = sample();
        let doc = document(&nodes, &edges, &rules);

        let json_path = write_json(&doc, dir.path(), true).unwrap();
        assert_eq!(json_path, dir.path().join(JSON_FILE_NAME));
        assert!(fs::read_to_string(&json_path).unwrap().contains("\n  \"nodes\""));

        let template = dir.path().join("template.html");
        fs::write(&template, "<script>const n = {{nodes}};</script>").unwrap();
        let html_path = write_html(&doc, &template, dir.path()).unwrap();
        assert_eq!(html_path, dir.path().join(HTML_FILE_NAME));
        assert!(fs::read_to_string(html_path).unwrap().contains("\"a.md\""));
    }

    #[test]
    fn missing_template_is_an_error() {
        let dir = TempDir::new().unwrap();
        let (nodes, edges, rules) = sample();

        let err = write_html(
            &document(&nodes, &edges, &rules),
            &dir.path().join("absent.html"),
            dir.path(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read template"));
    }
}
