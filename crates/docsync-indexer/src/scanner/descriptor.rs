//! Per-document descriptors extracted from raw text.

use super::Patterns;
use crate::IndexerError;
use std::path::{Component, Path, PathBuf};

/// Snapshot of one read of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescriptor {
    /// Location of the document
    pub path: PathBuf,
    /// First heading text, trimmed
    pub title: Option<String>,
    /// Alias declarations found before the title, in source order
    pub aliases: Vec<String>,
    /// Byte offset of the header-end marker line, `None` if the document has no header yet
    pub header_boundary: Option<usize>,
    /// Byte offset of the first heading line
    pub title_start: Option<usize>,
}

impl DocumentDescriptor {
    /// Build a descriptor from content, whether or not it has a heading.
    pub fn from_content(path: &Path, content: &str, patterns: &Patterns) -> Self {
        let (title_start, title) = match patterns.find_title(content) {
            Some((start, title)) => (Some(start), Some(title)),
            None => (None, None),
        };
        let aliases = title_start
            .map(|start| patterns.find_aliases(content, start))
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            title,
            aliases,
            header_boundary: patterns.find_header_end(content),
            title_start,
        }
    }

    /// Primary title followed by every alias.
    pub fn all_titles(&self) -> Vec<&str> {
        self.title
            .iter()
            .chain(self.aliases.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Parse a document for title-dependent consumers; `None` when it has no heading.
pub fn parse_descriptor(path: &Path, content: &str, patterns: &Patterns) -> Option<DocumentDescriptor> {
    let descriptor = DocumentDescriptor::from_content(path, content, patterns);
    descriptor.title.is_some().then_some(descriptor)
}

/// Read a whole document as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, IndexerError> {
    std::fs::read_to_string(path).map_err(|e| IndexerError::io(path, e))
}

/// Path of `path` relative to `root`, joined with forward slashes on every platform.
///
/// Paths outside `root` are returned whole.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PatternOptions;

    fn patterns() -> Patterns {
        Patterns::new(&PatternOptions::default()).unwrap()
    }

    const LOREM: &str = "//ALIAS: lorem\n//ALIAS: finibus lorem\n\n= Lorem\n\nLorem ipsum.\n";

    #[test]
    fn test_parse_descriptor_with_aliases() {
        let path = Path::new("/docs/concepts/lorem.adoc");
        let descriptor = parse_descriptor(path, LOREM, &patterns()).unwrap();

        assert_eq!(descriptor.path, path);
        assert_eq!(descriptor.title.as_deref(), Some("Lorem"));
        assert_eq!(descriptor.aliases, vec!["lorem", "finibus lorem"]);
        assert_eq!(descriptor.title_start, Some(LOREM.find("= Lorem").unwrap()));
        assert_eq!(descriptor.header_boundary, None);
        assert_eq!(descriptor.all_titles(), vec!["Lorem", "lorem", "finibus lorem"]);
    }

    #[test]
    fn test_parse_descriptor_without_heading() {
        let content = "//references start\n//references end\n";
        assert!(parse_descriptor(Path::new("_init.adoc"), content, &patterns()).is_none());

        let descriptor = DocumentDescriptor::from_content(Path::new("_init.adoc"), content, &patterns());
        assert_eq!(descriptor.title, None);
        assert!(descriptor.aliases.is_empty());
        assert!(descriptor.all_titles().is_empty());
    }

    #[test]
    fn test_boundary_is_not_constrained_by_title() {
        let content = "= Ipsum\n\n//header end\nbody\n";
        let descriptor = DocumentDescriptor::from_content(Path::new("ipsum.adoc"), content, &patterns());
        assert_eq!(descriptor.title_start, Some(0));
        assert_eq!(descriptor.header_boundary, Some("= Ipsum\n\n".len()));
    }

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = Path::new("/docs");
        assert_eq!(relative_path(root, Path::new("/docs/concepts/lorem.adoc")), "concepts/lorem.adoc");
        assert_eq!(relative_path(root, Path::new("/docs/file1.adoc")), "file1.adoc");
        assert_eq!(relative_path(root, Path::new("/docs")), "");
    }

    #[test]
    fn test_read_text_reports_path() {
        let err = read_text(Path::new("/definitely/missing.adoc")).unwrap_err();
        assert!(err.to_string().contains("/definitely/missing.adoc"));
    }
}
