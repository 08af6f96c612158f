//! Splicing generated blocks into target documents.

use crate::{write_text, RenderError, Result};
use docsync_indexer::read_text;
use std::path::Path;
use tracing::debug;

pub const REFERENCES_START: &str = "//references start";
pub const REFERENCES_END: &str = "//references end";

/// Replace the first `REFERENCES_START` .. `REFERENCES_END` range, markers
/// included, with `block`.
///
/// Returns `None` when the content has no complete marker pair.
pub fn splice_block(content: &str, block: &str) -> Option<String> {
    let start = content.find(REFERENCES_START)?;
    let after_start = start + REFERENCES_START.len();
    let end = after_start + content[after_start..].find(REFERENCES_END)? + REFERENCES_END.len();

    Some([&content[..start], block, &content[end..]].concat())
}

/// Splice `block` into the target document on disk.
///
/// The target must already contain a marker pair. Returns whether the
/// content changed; the document is written back either way.
pub fn update_reference_target(path: &Path, block: &str) -> Result<bool> {
    let content = read_text(path)?;

    let updated = splice_block(&content, block).ok_or_else(|| RenderError::MissingMarkers {
        path: path.to_path_buf(),
        start: REFERENCES_START,
        end: REFERENCES_END,
    })?;

    let changed = updated != content;
    write_text(path, &updated)?;

    debug!(path = ?path, changed = changed, "Reference block spliced");

    Ok(changed)
}
