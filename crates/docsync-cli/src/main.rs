//! docsync CLI
//!
//! Command-line interface for normalizing document headers and regenerating
//! reference tables in a documentation tree.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docsync_core::{DocTree, DocsConfig, HeaderReport, ReferenceReport, ReferenceTarget};
use docsync_indexer::relative_path;
use docsync_render::ReferenceMode;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docsync")]
#[command(about = "docsync - Generated headers and reference tables for AsciiDoc trees")]
#[command(version)]
struct Cli {
    /// Configuration file (default: ./docsync.yaml, then the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Documentation root, overriding the configured one
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List documents with their titles and aliases
    Scan {
        /// Print descriptors as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize the generated header of every document
    Headers,

    /// Regenerate the reference table in the target documents
    References {
        /// Target document relative to the root (repeatable; default: configured targets)
        #[arg(long, value_name = "FILE")]
        target: Vec<PathBuf>,

        /// Value format, overriding each target's configured mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Normalize headers, then regenerate reference tables
    Sync,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Plain title text
    Text,
    /// Cross-reference to the document
    Link,
}

impl From<ModeArg> for ReferenceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Text => ReferenceMode::Text,
            ModeArg::Link => ReferenceMode::Link,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DocsConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DocsConfig::load().context("Failed to load config")?,
    };
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let tree = DocTree::open(config.clone())
        .with_context(|| format!("Invalid documentation root {}", config.root.display()))?;

    tracing::debug!(root = ?tree.root(), "Documentation tree opened");

    match cli.command {
        Commands::Scan { json } => cmd_scan(&tree, json),
        Commands::Headers => cmd_headers(&tree),
        Commands::References { target, mode } => cmd_references(&tree, target, mode),
        Commands::Sync => cmd_sync(&tree),
    }
}

/// One scanned document, as printed by `scan --json`
#[derive(Serialize)]
struct ScanEntry<'a> {
    path: String,
    title: Option<&'a str>,
    aliases: &'a [String],
    header_boundary: Option<usize>,
}

fn cmd_scan(tree: &DocTree, json: bool) -> Result<()> {
    let result = tree.scan()?;

    if json {
        let entries: Vec<ScanEntry> = result
            .documents
            .iter()
            .map(|d| ScanEntry {
                path: relative_path(&result.root, &d.path),
                title: d.title.as_deref(),
                aliases: &d.aliases,
                header_boundary: d.header_boundary,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Root: {}", result.root.display());
    println!();
    for doc in &result.documents {
        let path = relative_path(&result.root, &doc.path);
        match &doc.title {
            Some(title) => println!("  {}  {}", path, title),
            None => println!("  {}  (no heading)", path),
        }
        for alias in &doc.aliases {
            println!("      alias: {}", alias);
        }
    }
    println!();
    println!(
        "{} documents, {} titled ({}ms)",
        result.documents.len(),
        result.titled().count(),
        result.duration_ms
    );

    Ok(())
}

fn cmd_headers(tree: &DocTree) -> Result<()> {
    let report = tree
        .normalize_headers()
        .context("Header normalization failed")?;
    print_header_report(&report);
    Ok(())
}

fn cmd_references(tree: &DocTree, target: Vec<PathBuf>, mode: Option<ModeArg>) -> Result<()> {
    let targets: Vec<ReferenceTarget> = if target.is_empty() {
        tree.config().references.clone()
    } else {
        target
            .into_iter()
            .map(|target| ReferenceTarget {
                target,
                mode: ReferenceMode::default(),
            })
            .collect()
    };

    let targets: Vec<ReferenceTarget> = match mode {
        Some(mode) => targets
            .into_iter()
            .map(|t| ReferenceTarget {
                mode: mode.into(),
                ..t
            })
            .collect(),
        None => targets,
    };

    let report = tree
        .update_references_in(&targets)
        .context("Reference update failed")?;
    print_reference_report(tree.root(), &report);
    Ok(())
}

fn cmd_sync(tree: &DocTree) -> Result<()> {
    let report = tree.sync().context("Sync failed")?;

    print_header_report(&report.headers);
    match &report.references {
        Some(references) => print_reference_report(tree.root(), references),
        None => println!("No reference targets configured."),
    }

    Ok(())
}

fn print_header_report(report: &HeaderReport) {
    println!(
        "✓ Headers: {} documents, {} rewritten ({} changed), {} skipped",
        report.documents, report.rewritten, report.changed, report.skipped
    );
}

fn print_reference_report(root: &Path, report: &ReferenceReport) {
    println!(
        "✓ References from {} titled documents:",
        report.titled_documents
    );
    for target in &report.targets {
        println!(
            "  {}  {} entries, {:?} mode{}",
            relative_path(root, &target.path),
            target.entries,
            target.mode,
            if target.changed { ", updated" } else { ", unchanged" }
        );
    }
}
