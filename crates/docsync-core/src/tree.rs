//! Passes over a documentation tree.
//!
//! A `DocTree` compiles the configured patterns once and runs the header
//! pass, the reference pass, or both. Every pass re-reads documents from
//! disk; nothing is cached between invocations.

use crate::{CoreError, DocsConfig, ReferenceTarget};
use docsync_indexer::{canonical_root, DocumentDescriptor, Patterns, ScanResult, Scanner};
use docsync_render::{
    build_reference_block, update_reference_target, HeaderNormalizer, HeaderOutcome,
    ReferenceMode,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Summary of a header pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderReport {
    /// Documents found under the root
    pub documents: usize,
    /// Documents written back
    pub rewritten: usize,
    /// Written documents whose content changed
    pub changed: usize,
    /// Documents without a header region, or reference targets
    pub skipped: usize,
}

/// Outcome for one reference target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub path: PathBuf,
    pub mode: ReferenceMode,
    /// Number of `:key: value` lines written
    pub entries: usize,
    pub changed: bool,
}

/// Summary of a reference pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceReport {
    /// Documents contributing titles
    pub titled_documents: usize,
    pub targets: Vec<TargetReport>,
}

/// Summary of a header pass followed by a reference pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub headers: HeaderReport,
    /// Absent when no reference target is configured
    pub references: Option<ReferenceReport>,
}

/// A documentation root together with the configuration to process it.
pub struct DocTree {
    root: PathBuf,
    config: DocsConfig,
    scanner: Scanner,
    normalizer: HeaderNormalizer,
}

impl DocTree {
    /// Open the tree rooted at `config.root`.
    pub fn open(config: DocsConfig) -> Result<Self, CoreError> {
        let patterns = Patterns::new(&config.pattern_options())?;
        let root = canonical_root(&config.root)?;

        let scanner = Scanner::new(config.scan_options(), patterns.clone());
        let normalizer = HeaderNormalizer::new(config.header_options(), patterns);

        Ok(Self {
            root,
            config,
            scanner,
            normalizer,
        })
    }

    /// Canonical documentation root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Describe every document in the tree.
    pub fn scan(&self) -> Result<ScanResult, CoreError> {
        Ok(self.scanner.scan(&self.root)?)
    }

    /// Normalize the header of every document except the reference targets.
    pub fn normalize_headers(&self) -> Result<HeaderReport, CoreError> {
        let start = Instant::now();
        let targets = self.target_paths(&self.config.references);

        let paths = self.scanner.list(&self.root)?;
        let mut report = HeaderReport {
            documents: paths.len(),
            ..HeaderReport::default()
        };

        for path in &paths {
            if targets.contains(path) {
                debug!(path = ?path, "Reference target, skipping header");
                report.skipped += 1;
                continue;
            }

            match self.normalizer.rewrite(&self.root, path)? {
                HeaderOutcome::Rewritten { changed } => {
                    report.rewritten += 1;
                    if changed {
                        report.changed += 1;
                    }
                }
                HeaderOutcome::Skipped => report.skipped += 1,
            }
        }

        info!(
            documents = report.documents,
            rewritten = report.rewritten,
            changed = report.changed,
            skipped = report.skipped,
            duration_ms = start.elapsed().as_millis(),
            "Header pass complete"
        );

        Ok(report)
    }

    /// Rebuild the reference table in every configured target.
    pub fn update_references(&self) -> Result<ReferenceReport, CoreError> {
        self.update_references_in(&self.config.references)
    }

    /// Rebuild the reference table in the given targets from a single scan.
    pub fn update_references_in(
        &self,
        targets: &[ReferenceTarget],
    ) -> Result<ReferenceReport, CoreError> {
        if targets.is_empty() {
            return Err(CoreError::NoReferenceTargets);
        }

        let scan = self.scan()?;
        let titled: Vec<&DocumentDescriptor> = scan.titled().collect();

        let mut report = ReferenceReport {
            titled_documents: titled.len(),
            targets: Vec::with_capacity(targets.len()),
        };

        for target in targets {
            let path = self.resolve_target(&target.target);
            let block = build_reference_block(&self.root, titled.iter().copied(), target.mode);
            // Marker lines plus one line per entry
            let entries = block.lines().count().saturating_sub(2);

            let changed = update_reference_target(&path, &block)?;

            info!(path = ?path, mode = ?target.mode, entries = entries, changed = changed, "Reference table updated");

            report.targets.push(TargetReport {
                path,
                mode: target.mode,
                entries,
                changed,
            });
        }

        Ok(report)
    }

    /// Header pass, then the reference pass when targets are configured.
    pub fn sync(&self) -> Result<SyncReport, CoreError> {
        let headers = self.normalize_headers()?;
        let references = if self.config.references.is_empty() {
            None
        } else {
            Some(self.update_references()?)
        };

        Ok(SyncReport {
            headers,
            references,
        })
    }

    fn resolve_target(&self, target: &Path) -> PathBuf {
        let path = self.root.join(target);
        path.canonicalize().unwrap_or(path)
    }

    fn target_paths(&self, targets: &[ReferenceTarget]) -> Vec<PathBuf> {
        targets
            .iter()
            .map(|t| self.resolve_target(&t.target))
            .collect()
    }
}
