//! Whole-document text output.

use crate::{RenderError, Result};
use std::path::Path;

/// Replace a document's content in full.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
