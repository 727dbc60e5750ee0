//! Note registry
//!
//! Walks a kiln directory, loads every note file and indexes it by its
//! case-insensitive id. The registry is write-once: it is fully built before
//! any link is resolved, so forward references always see every note.

use crate::error::{ScanError, ScanResult};
use crate::note::{extension_suffix, note_id, Note};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// What to do when two files normalize to the same note id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Keep the file visited last, recording the collision
    #[default]
    Overwrite,
    /// Abort the scan on the first collision
    Reject,
}

/// A collision resolved by [`CollisionPolicy::Overwrite`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCollision {
    /// Shared note id
    pub id: String,
    /// File that was dropped
    pub replaced: PathBuf,
    /// File that now backs the id
    pub kept: PathBuf,
}

/// Index of every note in a kiln, keyed by id
///
/// Iteration is in lexicographic id order.
#[derive(Debug, Clone, Default)]
pub struct NoteRegistry {
    notes: BTreeMap<String, Note>,
    collisions: Vec<NoteCollision>,
}

impl NoteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `root` recursively for files ending in `.{extension}`.
    ///
    /// Directory entries are visited sorted by file name. Any unreadable
    /// directory or file aborts the scan.
    pub fn scan(root: &Path, extension: &str, policy: CollisionPolicy) -> ScanResult<Self> {
        let metadata = fs::metadata(root).map_err(|_| ScanError::RootNotFound(root.to_path_buf()))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let suffix = extension_suffix(extension);
        let paths = collect_note_paths(root, &suffix)?;
        debug!(root = %root.display(), files = paths.len(), "discovered note files");

        let mut registry = Self::new();
        for note in read_notes(&paths)? {
            registry.insert(note, policy)?;
        }

        debug!(
            notes = registry.len(),
            collisions = registry.collisions.len(),
            "note registry built"
        );
        Ok(registry)
    }

    /// Build a registry from already-loaded notes; later notes overwrite earlier ones
    pub fn from_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        let mut registry = Self::new();
        for note in notes {
            // Overwrite never fails
            let _ = registry.insert(note, CollisionPolicy::Overwrite);
        }
        registry
    }

    /// Register a note under its id, applying the collision policy
    pub fn insert(&mut self, note: Note, policy: CollisionPolicy) -> ScanResult<()> {
        if let Some(existing) = self.notes.get(&note.id) {
            match policy {
                CollisionPolicy::Reject => {
                    return Err(ScanError::DuplicateNote {
                        id: note.id.clone(),
                        first: existing.path.clone(),
                        second: note.path,
                    });
                }
                CollisionPolicy::Overwrite => {
                    warn!(
                        id = %note.id,
                        replaced = %existing.path.display(),
                        kept = %note.path.display(),
                        "note id collision, later file wins"
                    );
                    self.collisions.push(NoteCollision {
                        id: note.id.clone(),
                        replaced: existing.path.clone(),
                        kept: note.path.clone(),
                    });
                }
            }
        }

        self.notes.insert(note.id.clone(), note);
        Ok(())
    }

    /// Look up a note by id
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Whether a note with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.notes.contains_key(id)
    }

    /// Iterate notes in id order
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Iterate note ids in order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.notes.keys().map(String::as_str)
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the registry holds no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Collisions resolved by overwriting during the scan
    pub fn collisions(&self) -> &[NoteCollision] {
        &self.collisions
    }
}

fn collect_note_paths(root: &Path, suffix: &str) -> ScanResult<Vec<PathBuf>> {
    let mut paths = Vec::new();

    let walk_dir = WalkDir::new(root).follow_links(false).sort_by_file_name();
    for entry in walk_dir {
        let entry = entry.map_err(|e| ScanError::from_walk(root, e))?;
        if is_note_file(&entry, suffix) {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}

/// Regular files and symlinks that do not point at a directory.
///
/// Symlinked directories are never descended into, but symlinked notes are
/// loaded. A dangling link is kept so that reading it fails the scan.
fn is_note_file(entry: &DirEntry, suffix: &str) -> bool {
    if !entry.file_name().to_string_lossy().ends_with(suffix) {
        return false;
    }
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

fn read_note(path: &Path) -> ScanResult<Note> {
    let raw_text = fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(id = %note_id(path), "loaded note");
    Ok(Note::new(path, raw_text))
}

#[cfg(not(feature = "parallel-scan"))]
fn read_notes(paths: &[PathBuf]) -> ScanResult<Vec<Note>> {
    paths.iter().map(|path| read_note(path)).collect()
}

// Order of the collected Vec matches `paths`, so insertion order is unchanged.
#[cfg(feature = "parallel-scan")]
fn read_notes(paths: &[PathBuf]) -> ScanResult<Vec<Note>> {
    use rayon::prelude::*;

    paths.par_iter().map(|path| read_note(path)).collect()
}
