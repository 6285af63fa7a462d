//! Error types for jumplist loading, key resolution, and bookmarking.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JumplistError {
    #[error("Missing {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Invalid index: {0}")]
    InvalidKey(String),

    #[error("Index {index} out of range (have {len} sessions)")]
    OutOfRange { index: String, len: usize },
}

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("invalid key {0:?}: keys must be ASCII letters or digits")]
    InvalidKey(String),

    #[error("invalid session name {0:?}: must be non-empty without ':' or control characters")]
    InvalidName(String),

    #[error("invalid directory {0:?}: must not contain control characters")]
    InvalidDirectory(String),

    #[error("key '{key}' already exists (used keys: {})", used.join(" "))]
    KeyInUse { key: String, used: Vec<String> },

    #[error("bookmark io error: {0}")]
    Io(#[from] std::io::Error),
}
