//! Configuration for docsync.

use crate::CoreError;
use docsync_indexer::{PatternOptions, ScanOptions, DEFAULT_HEADER_END_MARKER};
use docsync_render::{BoundaryMode, HeaderOptions, ReferenceMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "docsync.yaml";

/// docsync configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Documentation root; relative paths resolve against the config file's directory
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Extension of the documents to manage
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Text of the line closing the generated header
    #[serde(default = "default_header_end_marker")]
    pub header_end_marker: String,

    /// Where the header region ends (marker or title)
    #[serde(default)]
    pub boundary: BoundaryMode,

    /// Accept headings behind a `//` comment prefix
    #[serde(default)]
    pub commented_headings: bool,

    /// Include target for the `init` header block
    #[serde(default)]
    pub init_expression: Option<String>,

    /// Value of the `imgs` header attribute
    #[serde(default)]
    pub imgs_expression: Option<String>,

    /// Follow symlinks while walking the root
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Globs (relative to the root) of documents to leave alone
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Documents receiving the generated reference table
    #[serde(default)]
    pub references: Vec<ReferenceTarget>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// A document holding a `//references start` .. `//references end` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTarget {
    /// Path of the target, relative to the documentation root
    pub target: PathBuf,

    /// How values are rendered in this target
    #[serde(default)]
    pub mode: ReferenceMode,
}

fn default_root() -> PathBuf {
    PathBuf::from("docs")
}

fn default_extension() -> String {
    "adoc".to_string()
}

fn default_header_end_marker() -> String {
    DEFAULT_HEADER_END_MARKER.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            header_end_marker: default_header_end_marker(),
            boundary: BoundaryMode::default(),
            commented_headings: false,
            init_expression: None,
            imgs_expression: None,
            follow_symlinks: false,
            exclude: Vec::new(),
            references: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl DocsConfig {
    /// Load configuration from `docsync.yaml` in the working directory, then
    /// from the user config directory, falling back to defaults.
    ///
    /// A file that exists but does not parse is an error.
    pub fn load() -> Result<Self, CoreError> {
        for path in Self::search_paths() {
            if path.is_file() {
                tracing::debug!(path = ?path, "Loading configuration");
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yaml::from_str(&content).map_err(|e| CoreError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if config.root.is_relative() {
            if let Some(dir) = path.parent() {
                config.root = dir.join(&config.root);
            }
        }

        Ok(config)
    }

    /// Candidate configuration files, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("docsync").join("config.yaml"));
        }
        paths
    }

    pub fn pattern_options(&self) -> PatternOptions {
        PatternOptions {
            header_end_marker: self.header_end_marker.clone(),
            commented_headings: self.commented_headings,
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extension: self.extension.clone(),
            follow_symlinks: self.follow_symlinks,
            exclude: self.exclude.clone(),
        }
    }

    pub fn header_options(&self) -> HeaderOptions {
        HeaderOptions {
            init_expression: self.init_expression.clone(),
            imgs_expression: self.imgs_expression.clone(),
            boundary: self.boundary,
        }
    }
}
