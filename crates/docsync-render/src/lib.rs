//! docsync Render
//!
//! Regenerates the machine-owned regions of documents:
//! - The boilerplate header at the top of every document
//! - The cross-reference table spliced into designated target documents

mod document;
mod error;
pub mod header;
pub mod references;
pub mod splice;

pub use document::write_text;
pub use error::{RenderError, Result};
pub use header::{BoundaryMode, HeaderNormalizer, HeaderOptions, HeaderOutcome};
pub use references::{
    build_reference_block, normalize_key, reference_entries, ReferenceEntry, ReferenceMode,
};
pub use splice::{splice_block, update_reference_target, REFERENCES_END, REFERENCES_START};
