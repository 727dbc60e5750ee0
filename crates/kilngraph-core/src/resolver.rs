//! Link resolution against the note registry

use crate::note::{extension_suffix, split_extension, DEFAULT_NOTE_EXTENSION};
use crate::registry::NoteRegistry;
use tracing::trace;

/// Resolves normalized link targets to note ids
///
/// Candidates are tried in a fixed order and the first one present in the
/// registry wins:
/// 1. the target as written (`guide.md`)
/// 2. the target plus the note extension (`guide` -> `guide.md`)
/// 3. the target with its own extension replaced (`guide.txt` -> `guide.md`)
///
/// Targets that match nothing resolve to `None`. Broken and external links
/// are normal in a kiln, so this is not an error.
#[derive(Debug)]
pub struct LinkResolver<'a> {
    registry: &'a NoteRegistry,
    suffix: String,
}

impl<'a> LinkResolver<'a> {
    /// Resolver using the default `.md` extension
    pub fn new(registry: &'a NoteRegistry) -> Self {
        Self::with_extension(registry, DEFAULT_NOTE_EXTENSION)
    }

    /// Resolver for a custom note extension
    pub fn with_extension(registry: &'a NoteRegistry, extension: &str) -> Self {
        Self {
            registry,
            suffix: extension_suffix(extension),
        }
    }

    /// Candidate ids for `raw_target`, in lookup order
    pub fn candidates(&self, raw_target: &str) -> [String; 3] {
        let (stem, _) = split_extension(raw_target);
        [
            raw_target.to_string(),
            format!("{raw_target}{}", self.suffix),
            format!("{stem}{}", self.suffix),
        ]
    }

    /// Resolve a normalized target to the id of an existing note
    pub fn resolve(&self, raw_target: &str) -> Option<&'a str> {
        let registry = self.registry;
        let resolved = self
            .candidates(raw_target)
            .into_iter()
            .find_map(|candidate| registry.get(&candidate).map(|note| note.id.as_str()));

        if resolved.is_none() {
            trace!(link = raw_target, "unresolved link dropped");
        }
        resolved
    }
}
