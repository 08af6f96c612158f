//! Error types for rendering generated blocks.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while regenerating documents.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Writing a document failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The reference target lacks its start/end marker pair
    #[error("Could not find range delimited by '{start}' and '{end}' in {path}")]
    MissingMarkers {
        path: PathBuf,
        start: &'static str,
        end: &'static str,
    },

    /// Reading or scanning failed
    #[error("Indexer error: {0}")]
    Indexer(#[from] docsync_indexer::IndexerError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
