//! Note type and file-name helpers

use pulldown_cmark::{html, Options, Parser};
use std::path::{Path, PathBuf};

/// Default note extension (without the leading dot)
pub const DEFAULT_NOTE_EXTENSION: &str = "md";

/// A single note loaded from the kiln
///
/// Notes are read-only once registered. The id is the lowercased file name,
/// extension included, so `Daily/Plan.MD` and `plan.md` share the id `plan.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Lowercased file name including extension
    pub id: String,

    /// Source path as discovered under the kiln root
    pub path: PathBuf,

    /// File content as read from disk
    pub raw_text: String,

    /// HTML rendering of the raw text
    pub rendered_markup: String,
}

impl Note {
    /// Build a note from its source path and content
    pub fn new(path: impl Into<PathBuf>, raw_text: impl Into<String>) -> Self {
        let path = path.into();
        let raw_text = raw_text.into();
        let id = note_id(&path);
        let rendered_markup = render_markup(&raw_text);

        Self {
            id,
            path,
            raw_text,
            rendered_markup,
        }
    }

    /// Display label derived from the id
    pub fn label(&self) -> String {
        display_label(&self.id)
    }
}

/// Compute the note id for a path (lowercased file name)
pub fn note_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Render markdown to HTML.
pub fn render_markup(raw_text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(raw_text, options);
    let mut out = String::with_capacity(raw_text.len() + raw_text.len() / 2);
    html::push_html(&mut out, parser);
    out
}

/// Split a name into `(stem, extension)` where the extension keeps its dot.
///
/// Only the last path component is inspected, and leading dots of that
/// component never start an extension: `".md"` has no extension,
/// `"a.b/c"` has none either, `"notes.tar.gz"` splits as `("notes.tar", ".gz")`.
pub fn split_extension(name: &str) -> (&str, &str) {
    let base_start = name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let Some(dot) = name.rfind('.') else {
        return (name, "");
    };
    if dot < base_start {
        return (name, "");
    }
    if name[base_start..dot].chars().all(|c| c == '.') {
        return (name, "");
    }
    name.split_at(dot)
}

/// Id with the extension removed and the first character upper-cased
pub fn display_label(id: &str) -> String {
    let (stem, _) = split_extension(id);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalize a configured extension to its dotted suffix form (`"md"` -> `".md"`)
pub fn extension_suffix(extension: &str) -> String {
    format!(".{}", extension.trim_start_matches('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_lowercased_file_name() {
        assert_eq!(note_id(Path::new("/kiln/Daily/Plan.MD")), "plan.md");
        assert_eq!(note_id(Path::new("readme.md")), "readme.md");
    }

    #[test]
    fn split_extension_matches_last_component_only() {
        assert_eq!(split_extension("note.md"), ("note", ".md"));
        assert_eq!(split_extension("notes.tar.gz"), ("notes.tar", ".gz"));
        assert_eq!(split_extension("note"), ("note", ""));
        assert_eq!(split_extension("dir.v2/note"), ("dir.v2/note", ""));
        assert_eq!(split_extension(".md"), (".md", ""));
        assert_eq!(split_extension("..md"), ("..md", ""));
        assert_eq!(split_extension("a/.hidden"), ("a/.hidden", ""));
        assert_eq!(split_extension(""), ("", ""));
    }

    #[test]
    fn label_capitalizes_stem() {
        assert_eq!(display_label("project ideas.md"), "Project ideas");
        assert_eq!(display_label("émile.md"), "Émile");
        assert_eq!(display_label("2024-01-01.md"), "2024-01-01");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn extension_suffix_accepts_dotted_and_bare() {
        assert_eq!(extension_suffix("md"), ".md");
        assert_eq!(extension_suffix(".md"), ".md");
    }

    #[test]
    fn new_note_renders_markup() {
        let note = Note::new("/kiln/Intro.md", "# Hello\n\nSome *text*.");
        assert_eq!(note.id, "intro.md");
        assert_eq!(note.label(), "Intro");
        assert!(note.rendered_markup.contains("<h1>Hello</h1>"));
        assert!(note.rendered_markup.contains("<em>text</em>"));
    }
}
