//! Reference table generation.
//!
//! Every title and alias in the tree becomes an AsciiDoc attribute whose name
//! is derived from the text by [`normalize_key`]. Texts normalizing to the
//! same key are ordered by (title, path) and told apart by position: `key`,
//! `_key`, then `__key_2`, `__key_3`, ...

use crate::splice::{REFERENCES_END, REFERENCES_START};
use docsync_indexer::{relative_path, DocumentDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// How reference values are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceMode {
    /// The title text alone
    Text,
    /// A cross-reference to the document, labelled with the title
    #[default]
    Link,
}

/// One `:key: value` line of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub key: String,
    pub value: String,
}

impl ReferenceEntry {
    fn to_definition(&self) -> String {
        format!(":{}: {}\n", self.key, self.value)
    }
}

/// Attribute name for a title.
pub fn normalize_key(title: &str) -> String {
    let spaced: String = title
        .chars()
        .filter(|c| !matches!(c, '&' | '-' | '\''))
        .map(|c| if matches!(c, '(' | ')' | '/' | '"') { ' ' } else { c })
        .collect();

    let collapsed = spaced
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    collapsed.trim().replace(' ', "-").to_lowercase()
}

/// Table entries for every titled descriptor, in output order.
pub fn reference_entries<'a, I>(root: &Path, descriptors: I, mode: ReferenceMode) -> Vec<ReferenceEntry>
where
    I: IntoIterator<Item = &'a DocumentDescriptor>,
{
    let mut groups: BTreeMap<String, Vec<(&str, String)>> = BTreeMap::new();

    for descriptor in descriptors {
        let rel = relative_path(root, &descriptor.path);
        for title in descriptor.all_titles() {
            groups
                .entry(normalize_key(title))
                .or_default()
                .push((title, rel.clone()));
        }
    }

    let mut entries = Vec::new();
    for (key, mut group) in groups {
        group.sort();

        for (i, (title, rel)) in group.into_iter().enumerate() {
            let key = match i {
                0 => key.clone(),
                1 => format!("_{}", key),
                _ => format!("__{}_{}", key, i),
            };
            let value = match mode {
                ReferenceMode::Text => title.to_string(),
                ReferenceMode::Link => format!("<<{{root}}{}#, {}>>", rel, title),
            };
            entries.push(ReferenceEntry { key, value });
        }
    }

    entries
}

/// The complete reference block, markers included, without a trailing newline.
pub fn build_reference_block<'a, I>(root: &Path, descriptors: I, mode: ReferenceMode) -> String
where
    I: IntoIterator<Item = &'a DocumentDescriptor>,
{
    let mut fragments = vec![format!("{}\n", REFERENCES_START)];
    fragments.extend(
        reference_entries(root, descriptors, mode)
            .iter()
            .map(ReferenceEntry::to_definition),
    );
    fragments.push(REFERENCES_END.to_string());
    fragments.concat()
}
