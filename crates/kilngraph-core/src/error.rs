//! Scan error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while building the note registry.
///
/// Every variant aborts the whole scan; no partial graph is produced.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The kiln root does not exist
    #[error("Kiln root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The kiln root exists but is not a directory
    #[error("Kiln root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A directory inside the kiln could not be listed
    #[error("Failed to read directory {}: {source}", path.display())]
    Walk {
        /// Directory (or entry) that failed
        path: PathBuf,
        /// Underlying traversal error
        #[source]
        source: walkdir::Error,
    },

    /// A note file could not be read
    #[error("Failed to read note {}: {source}", path.display())]
    Read {
        /// Note file that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Two files normalize to the same note id and collisions are rejected
    #[error("Duplicate note id '{id}': {} and {}", first.display(), second.display())]
    DuplicateNote {
        /// Shared lowercased id
        id: String,
        /// File registered first
        first: PathBuf,
        /// File that collided with it
        second: PathBuf,
    },
}

/// Specialized Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    pub(crate) fn from_walk(root: &std::path::Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| root.to_path_buf());
        Self::Walk { path, source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_note_message_names_both_files() {
        let err = ScanError::DuplicateNote {
            id: "a.md".to_string(),
            first: PathBuf::from("x/A.md"),
            second: PathBuf::from("y/a.md"),
        };

        let msg = err.to_string();
        assert!(msg.contains("a.md"));
        assert!(msg.contains("x/A.md"));
        assert!(msg.contains("y/a.md"));
    }

    #[test]
    fn read_error_exposes_source() {
        use std::error::Error as _;

        let err = ScanError::Read {
            path: PathBuf::from("note.md"),
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };

        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Failed to read note note.md"));
    }
}
