//! Integration tests for the docsync scan pipeline.

use std::path::{Path, PathBuf};
use tempfile::tempdir;

use docsync_indexer::{relative_path, PatternOptions, Patterns, ScanOptions, Scanner};

/// Helper to create a small documentation tree
fn create_docs(base: &Path) -> PathBuf {
    let docs = base.join("docs");
    std::fs::create_dir_all(docs.join("concepts")).unwrap();

    std::fs::write(
        docs.join("_init.adoc"),
        "//references start\n//references end\n",
    )
    .unwrap();

    std::fs::write(
        docs.join("concepts/lorem.adoc"),
        r#"// {root} must point to the `docs/` folder:
ifndef::root[]
:root: ../
endif::[]

//ALIAS: lorem
//ALIAS: finibus lorem
//header end

= Lorem

Lorem ipsum dolor sit amet.
"#,
    )
    .unwrap();

    std::fs::write(
        docs.join("concepts/ipsum.adoc"),
        "= Ipsum\n\n== Details\n\nIpsum text.\n",
    )
    .unwrap();

    docs
}

fn scanner() -> Scanner {
    let patterns = Patterns::new(&PatternOptions::default()).unwrap();
    Scanner::new(ScanOptions::default(), patterns)
}

/// Test full scan pipeline end-to-end
#[test]
fn test_scan_pipeline_end_to_end() {
    let temp_dir = tempdir().unwrap();
    let docs = create_docs(temp_dir.path());

    let result = scanner().scan(&docs).unwrap();

    let paths: Vec<_> = result
        .documents
        .iter()
        .map(|d| relative_path(&result.root, &d.path))
        .collect();
    assert_eq!(
        paths,
        vec!["_init.adoc", "concepts/ipsum.adoc", "concepts/lorem.adoc"]
    );

    let lorem = &result.documents[2];
    assert_eq!(lorem.title.as_deref(), Some("Lorem"));
    assert_eq!(lorem.aliases, vec!["lorem", "finibus lorem"]);
    assert!(lorem.header_boundary.unwrap() < lorem.title_start.unwrap());

    let ipsum = &result.documents[1];
    assert_eq!(ipsum.title.as_deref(), Some("Ipsum"));
    assert!(ipsum.aliases.is_empty());
    assert_eq!(ipsum.header_boundary, None);

    assert_eq!(result.titled().count(), 2);
}

/// Excluded documents never reach the descriptor list
#[test]
fn test_scan_with_exclusions() {
    let temp_dir = tempdir().unwrap();
    let docs = create_docs(temp_dir.path());

    let patterns = Patterns::new(&PatternOptions::default()).unwrap();
    let options = ScanOptions {
        exclude: vec!["concepts/ipsum.adoc".to_string()],
        ..ScanOptions::default()
    };
    let result = Scanner::new(options, patterns).scan(&docs).unwrap();

    assert_eq!(result.documents.len(), 2);
    assert!(result
        .documents
        .iter()
        .all(|d| !d.path.ends_with("ipsum.adoc")));
}

/// A custom marker moves the detected boundary
#[test]
fn test_scan_with_custom_marker() {
    let temp_dir = tempdir().unwrap();
    let docs = temp_dir.path().join("docs");
    std::fs::create_dir_all(&docs).unwrap();
    std::fs::write(docs.join("a.adoc"), "// note\n//// header ////\n= A\n").unwrap();

    let patterns = Patterns::new(&PatternOptions {
        header_end_marker: "//// header ////".to_string(),
        ..PatternOptions::default()
    })
    .unwrap();
    let result = Scanner::new(ScanOptions::default(), patterns)
        .scan(&docs)
        .unwrap();

    assert_eq!(result.documents[0].header_boundary, Some("// note\n".len()));
}
