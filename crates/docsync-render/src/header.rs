//! Header normalization.
//!
//! Every document starts with a generated header: conditional attribute
//! definitions that let a page render on its own as well as included from
//! the documentation root. The header region runs from the start of the
//! document to a boundary (the header-end marker line, or the first heading
//! in [`BoundaryMode::Title`]). Normalizing a document regenerates the
//! directives in that region and keeps any extra `//` comment lines found
//! there; everything from the boundary onward is passed through untouched.
//!
//! ```text
//! // {root} must point to the `docs/` folder:
//! ifndef::root[]
//! :root: ../
//! endif::[]
//!
//! // init this page in case of standalone display:
//! ifndef::init[]
//! include::{root}_init.adoc[]
//! endif::[]
//!
//! // my own note          <- preserved
//! //header end            <- boundary, body follows unchanged
//! ```

use crate::{write_text, Result};
use docsync_indexer::{read_text, DocumentDescriptor, Patterns};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Leading text of the root-pointer comment; the folder name that follows varies.
pub const ROOT_COMMENT_PREFIX: &str = "// {root} must point to the";
pub const INIT_COMMENT: &str = "// init this page in case of standalone display:";
pub const IMGS_COMMENT: &str = "// init {imgs} in case of standalone display:";

const COMMENT_MARKER: &str = "//";

/// Where the header region of a document ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// At the header-end marker line; a marker is inserted when missing
    #[default]
    Marker,
    /// At the first heading; aliases are regenerated, headingless documents are skipped
    Title,
}

/// What the generated header contains.
#[derive(Debug, Clone, Default)]
pub struct HeaderOptions {
    /// Include target for the `init` block, e.g. `{root}_init.adoc`
    pub init_expression: Option<String>,
    /// Value of the `imgs` attribute, e.g. `{root}imgs/`
    pub imgs_expression: Option<String>,
    /// Where the header region ends
    pub boundary: BoundaryMode,
}

/// Result of normalizing one document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderOutcome {
    /// The document was written back; `changed` is false when the bytes are identical
    Rewritten { changed: bool },
    /// The document has no header region in the configured boundary mode
    Skipped,
}

/// Regenerates document headers for one configuration.
#[derive(Debug, Clone)]
pub struct HeaderNormalizer {
    options: HeaderOptions,
    patterns: Patterns,
}

impl HeaderNormalizer {
    pub fn new(options: HeaderOptions, patterns: Patterns) -> Self {
        Self { options, patterns }
    }

    /// Normalize `content`, the text `descriptor` was parsed from.
    ///
    /// Returns `None` when the document has no header region to rewrite.
    pub fn normalize(
        &self,
        root: &Path,
        descriptor: &DocumentDescriptor,
        content: &str,
    ) -> Option<String> {
        let boundary = match self.options.boundary {
            BoundaryMode::Marker => descriptor.header_boundary,
            BoundaryMode::Title => Some(descriptor.title_start?),
        };

        let mut fragments = self.generated_block(root, &descriptor.path);

        if self.options.boundary == BoundaryMode::Title && !descriptor.aliases.is_empty() {
            for alias in &descriptor.aliases {
                fragments.push(format!("//ALIAS: {}\n", alias));
            }
            fragments.push("\n".to_string());
        }

        match boundary {
            Some(position) => {
                let (prefix, body) = content.split_at(position);
                for comment in self.preserved_comments(prefix) {
                    fragments.push(format!("{}\n", comment));
                }
                fragments.push(body.to_string());
            }
            None => {
                fragments.push(format!("{}\n\n", self.patterns.header_end_marker()));
                fragments.push(content.to_string());
            }
        }

        Some(fragments.concat())
    }

    /// Read, normalize and write back one document.
    pub fn rewrite(&self, root: &Path, path: &Path) -> Result<HeaderOutcome> {
        let content = read_text(path)?;
        let descriptor = DocumentDescriptor::from_content(path, &content, &self.patterns);

        let Some(normalized) = self.normalize(root, &descriptor, &content) else {
            debug!(path = ?path, "No header region, skipping");
            return Ok(HeaderOutcome::Skipped);
        };

        let changed = normalized != content;
        write_text(path, &normalized)?;

        debug!(path = ?path, changed = changed, "Header rewritten");

        Ok(HeaderOutcome::Rewritten { changed })
    }

    /// The directive blocks, one fragment per line.
    fn generated_block(&self, root: &Path, path: &Path) -> Vec<String> {
        let folder = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        let mut lines = vec![
            format!("{} `{}/` folder:\n", ROOT_COMMENT_PREFIX, folder),
            "ifndef::root[]\n".to_string(),
            format!("{}\n", format!(":root: {}", root_reference(root, path)).trim_end()),
            "endif::[]\n".to_string(),
            "\n".to_string(),
        ];

        if let Some(init) = &self.options.init_expression {
            lines.push(format!("{}\n", INIT_COMMENT));
            lines.push("ifndef::init[]\n".to_string());
            lines.push(format!("include::{}[]\n", init));
            lines.push("endif::[]\n".to_string());
            lines.push("\n".to_string());
        }

        if let Some(imgs) = &self.options.imgs_expression {
            lines.push(format!("{}\n", IMGS_COMMENT));
            lines.push("ifndef::imgs[]\n".to_string());
            lines.push(format!(":imgs: {}\n", imgs));
            lines.push("endif::[]\n".to_string());
            lines.push("\n".to_string());
        }

        lines
    }

    /// Hand-written comment lines of the header region, in order.
    ///
    /// Non-comment lines are dropped: they are previous generated output.
    fn preserved_comments<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let drop_aliases = self.options.boundary == BoundaryMode::Title;
        prefix
            .lines()
            .filter(|line| line.starts_with(COMMENT_MARKER))
            .filter(|line| *line != INIT_COMMENT && *line != IMGS_COMMENT)
            .filter(|line| !line.starts_with(ROOT_COMMENT_PREFIX))
            .filter(move |line| !(drop_aliases && self.patterns.is_alias_line(line)))
    }
}

/// Path from the document's directory back to `root`, with a trailing slash.
///
/// Empty when the document lives directly in `root`.
fn root_reference(root: &Path, path: &Path) -> String {
    let depth = path
        .strip_prefix(root)
        .ok()
        .and_then(Path::parent)
        .map_or(0, |dir| dir.components().count());
    "../".repeat(depth)
}
