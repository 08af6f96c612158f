//! File system walker with gitignore support.

use crate::IndexerError;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A discovered document entry.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path to the document
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// File system walker that respects .gitignore rules and keeps only
/// files carrying the document extension.
pub struct Walker {
    root: PathBuf,
    extension: String,
    follow_symlinks: bool,
    exclude: Vec<String>,
}

impl Walker {
    /// Create a new walker for the given root directory.
    pub fn new(root: &Path, extension: &str, follow_symlinks: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
            follow_symlinks,
            exclude: Vec::new(),
        }
    }

    /// Skip files matching any of the given globs (relative to the root).
    pub fn with_exclude(mut self, patterns: &[String]) -> Self {
        self.exclude = patterns.to_vec();
        self
    }

    /// Walk the directory tree and return all matching documents, sorted by path.
    ///
    /// Any traversal error aborts the walk.
    pub fn walk(&self) -> Result<Vec<FileEntry>, IndexerError> {
        let mut overrides = OverrideBuilder::new(&self.root);
        for pattern in &self.exclude {
            overrides.add(&format!("!{}", pattern))?;
        }

        let walker = WalkBuilder::new(&self.root)
            .follow_links(self.follow_symlinks)
            .hidden(true) // Skip hidden files by default
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .parents(true)
            .overrides(overrides.build()?)
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = result?;

            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                continue;
            }
            if !self.has_document_extension(entry.path()) {
                continue;
            }

            let metadata = entry.metadata()?;
            entries.push(FileEntry {
                path: entry.path().to_path_buf(),
                size: metadata.len(),
            });
        }

        debug!(root = ?self.root, count = entries.len(), "Documents discovered");

        // Sort by path for deterministic ordering
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(entries)
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e == self.extension)
    }
}
