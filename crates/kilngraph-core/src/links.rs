//! Link extraction
//!
//! Recognizes the three link forms found in Obsidian-style kilns:
//! - Wikilinks: `[[note]]`, `[[note|alias]]`, `[[note#heading]]`
//! - Markdown links: `[label](note.md)`
//! - Embeds: `![[note]]`
//!
//! Each form is scanned separately over the full text. An embed is also a
//! syntactically valid wikilink, so it yields two references. Duplicates are
//! kept, and every occurrence counts towards the source's link total.

use regex::Regex;
use std::sync::LazyLock;

static WIKILINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("wikilink regex"));

static MARKDOWN_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("markdown link regex"));

static EMBED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[(.*?)\]\]").expect("embed regex"));

/// Syntax that produced a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSyntax {
    /// `[[target]]`
    Wikilink,
    /// `[label](target)`
    Markdown,
    /// `![[target]]`
    Embed,
}

impl LinkSyntax {
    /// Scan order used by [`LinkExtractor`]
    pub const ALL: [LinkSyntax; 3] = [Self::Wikilink, Self::Markdown, Self::Embed];

    fn regex(self) -> &'static Regex {
        match self {
            Self::Wikilink => &WIKILINK_REGEX,
            Self::Markdown => &MARKDOWN_LINK_REGEX,
            Self::Embed => &EMBED_REGEX,
        }
    }

    /// Capture group holding the target
    fn target_group(self) -> usize {
        match self {
            Self::Markdown => 2,
            Self::Wikilink | Self::Embed => 1,
        }
    }
}

/// An unresolved link occurrence, normalized but not yet matched to a note
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawLinkReference {
    /// Id of the note containing the link
    pub source_note_id: String,
    /// Normalized target text
    pub raw_target: String,
    /// Link form it was found in
    pub syntax: LinkSyntax,
}

/// Extracts raw link references from note text
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkExtractor;

impl LinkExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract every link occurrence in `text`.
    ///
    /// Results are ordered by syntax (wikilinks, then markdown links, then
    /// embeds) and by position within each syntax.
    pub fn extract(&self, source_note_id: &str, text: &str) -> Vec<RawLinkReference> {
        LinkSyntax::ALL
            .into_iter()
            .flat_map(move |syntax| {
                syntax
                    .regex()
                    .captures_iter(text)
                    .filter_map(move |cap| cap.get(syntax.target_group()))
                    .map(move |target| RawLinkReference {
                        source_note_id: source_note_id.to_string(),
                        raw_target: normalize_target(target.as_str()),
                        syntax,
                    })
            })
            .collect()
    }
}

/// Normalize a link target.
///
/// Drops the alias (after `|`), then the heading or block fragment (after
/// `#`), trims whitespace and lowercases.
pub fn normalize_target(target: &str) -> String {
    let target = target.split('|').next().unwrap_or_default();
    let target = target.split('#').next().unwrap_or_default();
    target.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(text: &str) -> Vec<(LinkSyntax, String)> {
        LinkExtractor::new()
            .extract("src.md", text)
            .into_iter()
            .map(|r| (r.syntax, r.raw_target))
            .collect()
    }

    #[test]
    fn normalization_strips_alias_fragment_and_case() {
        assert_eq!(normalize_target("Note|Alias"), "note");
        assert_eq!(normalize_target("Note#Heading"), "note");
        assert_eq!(normalize_target(" NOTE "), "note");
        assert_eq!(normalize_target("Note#^block-id|Shown"), "note");
        assert_eq!(normalize_target("Note|Alias#NotAFragment"), "note");
        assert_eq!(normalize_target("#Heading only"), "");
    }

    #[test]
    fn wikilink_extraction() {
        assert_eq!(
            targets("See [[Other Note]] and [[Third|alias]]."),
            vec![
                (LinkSyntax::Wikilink, "other note".to_string()),
                (LinkSyntax::Wikilink, "third".to_string()),
            ]
        );
    }

    #[test]
    fn markdown_link_takes_target_not_label() {
        assert_eq!(
            targets("Read [the guide](Guide.md#setup) first."),
            vec![(LinkSyntax::Markdown, "guide.md".to_string())]
        );
    }

    #[test]
    fn embed_also_counts_as_wikilink() {
        assert_eq!(
            targets("![[diagram]]"),
            vec![
                (LinkSyntax::Wikilink, "diagram".to_string()),
                (LinkSyntax::Embed, "diagram".to_string()),
            ]
        );
    }

    #[test]
    fn syntaxes_are_grouped_in_scan_order() {
        let text = "![[e]] [m](m.md) [[w]]";
        assert_eq!(
            targets(text),
            vec![
                (LinkSyntax::Wikilink, "e".to_string()),
                (LinkSyntax::Wikilink, "w".to_string()),
                (LinkSyntax::Markdown, "m.md".to_string()),
                (LinkSyntax::Embed, "e".to_string()),
            ]
        );
    }

    #[test]
    fn repeated_links_are_not_deduplicated() {
        let refs = LinkExtractor::new().extract("a.md", "[[b]] [[B]] [[b|again]]");
        assert_eq!(refs.len(), 3);
        assert!(refs.iter().all(|r| r.raw_target == "b" && r.source_note_id == "a.md"));
    }

    #[test]
    fn wikilinks_do_not_span_lines() {
        assert!(targets("[[broken\nlink]]").is_empty());
    }

    #[test]
    fn text_without_links() {
        assert!(targets("no links here, just [brackets] and (parens)").is_empty());
    }

    #[test]
    fn empty_wikilink_is_still_a_reference() {
        assert_eq!(targets("[[]]"), vec![(LinkSyntax::Wikilink, String::new())]);
    }
}
