//! docsync Indexer
//!
//! This crate provides the document scanner for docsync, including:
//! - File system walking filtered by document extension, with gitignore support
//! - Configurable line patterns for headings, aliases and the header-end marker
//! - Lightweight per-document descriptors (title, aliases, boundary offsets)

mod error;
pub mod scanner;

pub use error::IndexerError;
pub use scanner::{
    canonical_root, parse_descriptor, read_text, relative_path, DocumentDescriptor, FileEntry,
    PatternOptions, Patterns, ScanOptions, ScanResult, Scanner, Walker,
    DEFAULT_HEADER_END_MARKER,
};
