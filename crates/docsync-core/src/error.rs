//! Core error types for docsync.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in core operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration file could not be parsed
    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A reference pass was requested without any target document
    #[error("No reference targets configured")]
    NoReferenceTargets,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scanning error
    #[error(transparent)]
    Indexer(#[from] docsync_indexer::IndexerError),

    /// Rendering error
    #[error(transparent)]
    Render(#[from] docsync_render::RenderError),
}
