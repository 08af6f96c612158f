//! Indexer error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during scanning operations.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// I/O error while reading a document
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Walk error: {0}")]
    Walk(String),

    /// A configured pattern could not be compiled
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The header-end marker text is unusable as a line pattern
    #[error("Invalid header-end marker: {0:?}")]
    InvalidMarker(String),

    /// Path not found
    #[error("Path not found: {0}")]
    NotFound(PathBuf),
}

impl IndexerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexerError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ignore::Error> for IndexerError {
    fn from(e: ignore::Error) -> Self {
        IndexerError::Walk(e.to_string())
    }
}
