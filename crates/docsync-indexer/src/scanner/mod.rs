//! Document scanner module.
//!
//! Walks a documentation root, reads every document and extracts a
//! lightweight descriptor from each one.

mod descriptor;
mod patterns;
mod walker;

pub use descriptor::{parse_descriptor, read_text, relative_path, DocumentDescriptor};
pub use patterns::{PatternOptions, Patterns, DEFAULT_HEADER_END_MARKER};
pub use walker::{FileEntry, Walker};

use crate::IndexerError;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Options for scanning a documentation root.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Extension identifying documents (without the dot)
    pub extension: String,
    /// Whether to follow symlinks
    pub follow_symlinks: bool,
    /// Globs of files to leave out, relative to the root
    pub exclude: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: "adoc".to_string(),
            follow_symlinks: false,
            exclude: Vec::new(),
        }
    }
}

/// Result of scanning a documentation root.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Canonical root that was scanned
    pub root: PathBuf,
    /// One descriptor per document, titled or not
    pub documents: Vec<DocumentDescriptor>,
    /// Scan duration in milliseconds
    pub duration_ms: u64,
}

impl ScanResult {
    /// Descriptors that carry a title.
    pub fn titled(&self) -> impl Iterator<Item = &DocumentDescriptor> {
        self.documents.iter().filter(|d| d.title.is_some())
    }
}

/// The main scanner that orchestrates document discovery and parsing.
pub struct Scanner {
    options: ScanOptions,
    patterns: Patterns,
}

impl Scanner {
    /// Create a scanner with the given options and compiled patterns.
    pub fn new(options: ScanOptions, patterns: Patterns) -> Self {
        Self { options, patterns }
    }

    /// Patterns this scanner parses documents with.
    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    /// List every document under `root`, sorted by path.
    pub fn list(&self, root: &Path) -> Result<Vec<PathBuf>, IndexerError> {
        let walker = Walker::new(root, &self.options.extension, self.options.follow_symlinks)
            .with_exclude(&self.options.exclude);
        Ok(walker.walk()?.into_iter().map(|e| e.path).collect())
    }

    /// Scan a directory and return a descriptor for every document.
    ///
    /// Unreadable documents abort the scan.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, IndexerError> {
        let start = Instant::now();

        let root = canonical_root(root)?;

        info!(path = ?root, "Starting scan");

        let paths = self.list(&root)?;
        let mut documents = Vec::with_capacity(paths.len());

        for path in paths {
            let content = read_text(&path)?;
            let descriptor = DocumentDescriptor::from_content(&path, &content, &self.patterns);

            if descriptor.title.is_none() {
                debug!(path = ?path, "No heading found");
            }

            documents.push(descriptor);
        }

        let duration = start.elapsed();
        let titled = documents.iter().filter(|d| d.title.is_some()).count();

        info!(
            documents = documents.len(),
            titled = titled,
            duration_ms = duration.as_millis(),
            "Scan complete"
        );

        Ok(ScanResult {
            root,
            documents,
            duration_ms: duration.as_millis() as u64,
        })
    }
}

/// Canonicalize a documentation root, failing if it does not exist.
pub fn canonical_root(root: &Path) -> Result<PathBuf, IndexerError> {
    root.canonicalize()
        .map_err(|_| IndexerError::NotFound(root.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn scanner() -> Scanner {
        let patterns = Patterns::new(&PatternOptions::default()).unwrap();
        Scanner::new(ScanOptions::default(), patterns)
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = tempdir().unwrap();

        let result = scanner().scan(temp_dir.path()).unwrap();

        assert_eq!(result.documents.len(), 0);
    }

    #[test]
    fn test_scan_keeps_untitled_documents() {
        let temp_dir = tempdir().unwrap();

        fs::write(temp_dir.path().join("lorem.adoc"), "= Lorem\n").unwrap();
        fs::write(temp_dir.path().join("_init.adoc"), "//references start\n//references end\n").unwrap();
        fs::write(temp_dir.path().join("notes.md"), "# Not a document\n").unwrap();

        let result = scanner().scan(temp_dir.path()).unwrap();

        assert_eq!(result.documents.len(), 2);
        let titles: Vec<_> = result.titled().filter_map(|d| d.title.as_deref()).collect();
        assert_eq!(titles, vec!["Lorem"]);
    }

    #[test]
    fn test_scan_missing_root() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = scanner().scan(&missing).unwrap_err();
        assert!(matches!(err, IndexerError::NotFound(_)));
    }

    #[test]
    fn test_scan_canonicalizes_root() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();
        fs::write(temp_dir.path().join("docs/a.adoc"), "= A\n").unwrap();

        let result = scanner().scan(&temp_dir.path().join("docs/../docs")).unwrap();

        assert_eq!(result.root, temp_dir.path().join("docs").canonicalize().unwrap());
        assert!(result.documents[0].path.starts_with(&result.root));
    }

    #[test]
    fn test_scan_options_default() {
        let opts = ScanOptions::default();
        assert_eq!(opts.extension, "adoc");
        assert!(!opts.follow_symlinks);
        assert!(opts.exclude.is_empty());
    }
}
