//! docsync Core Components
//!
//! This crate ties the scanner and the renderers together: it loads the
//! configuration and runs the header and reference passes over a
//! documentation tree.

mod config;
mod error;
mod tree;

pub use config::{DocsConfig, ReferenceTarget, CONFIG_FILE_NAME};
pub use error::CoreError;
pub use tree::{DocTree, HeaderReport, ReferenceReport, SyncReport, TargetReport};
