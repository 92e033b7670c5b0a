//! Parsed document snapshot
//!
//! A `ParsedDocument` is the read-only result of one parse call: the flat
//! item list, the header-nested tree, and the fingerprint of the text both
//! were computed from. Positions and IDs are valid only against that exact
//! text; a later edit requires a fresh parse, never an in-place update.

use crate::item_model::{
    build_tree, extract_items, extract_markdown_slice, flatten_tree, fnv1a_64, ItemKind,
    SliceError, TrackableItem,
};
use crate::markdown_ast::parse_blocks;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Errors from snapshot-level operations
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text handed in is not the text this snapshot was parsed from
    #[error("source text no longer matches the parsed document (re-parse required)")]
    SourceChanged,

    /// The recorded position cannot address the text
    #[error(transparent)]
    Slice(#[from] SliceError),
}

/// Immutable snapshot of one markdown parse
#[derive(Debug)]
pub struct ParsedDocument {
    /// Path the source was read from, when it came from a file
    pub source_path: Option<PathBuf>,

    /// Flat item list in document order (intrinsic list nesting as children)
    pub items: Vec<TrackableItem>,

    /// Header-nested tree built from `items`
    pub tree: Vec<TrackableItem>,

    /// Total number of items, descendants included
    pub item_count: usize,

    /// FNV-1a fingerprint of the exact source text parsed
    pub source_hash: u64,

    /// When this snapshot was created
    pub parsed_at: SystemTime,
}

/// Parse markdown text into a new snapshot
///
/// # Parameters
/// * `source` - Full markdown text (`\n` line endings)
/// * `source_path` - Originating file, if any (for logging and display)
///
/// # Returns
/// * `ParsedDocument` - Flat items, built tree, and source fingerprint
pub fn parse_document(source: &str, source_path: Option<&Path>) -> ParsedDocument {
    let blocks = parse_blocks(source);
    let items = extract_items(&blocks);
    let tree = build_tree(&items);
    let item_count = flatten_tree(&tree).len();

    warn_on_duplicate_ids(&tree, source_path);
    log::debug!(
        "parsed {}: {} items ({} roots)",
        display_path(source_path),
        item_count,
        tree.len()
    );

    ParsedDocument {
        source_path: source_path.map(Path::to_path_buf),
        items,
        tree,
        item_count,
        source_hash: fnv1a_64(source.as_bytes()),
        parsed_at: SystemTime::now(),
    }
}

impl ParsedDocument {
    /// Find an item anywhere in the tree by its stable ID
    pub fn find_item(&self, id: &str) -> Option<&TrackableItem> {
        flatten_tree(&self.tree)
            .into_iter()
            .find(|item| item.id == id)
    }

    /// Extract the source slice for an item, guarding against stale text
    ///
    /// The text is re-fingerprinted before any coordinates are trusted;
    /// handing in anything but the exact text this snapshot was parsed
    /// from fails with [`DocumentError::SourceChanged`] instead of
    /// silently returning the wrong span.
    pub fn slice_item(&self, source: &str, item: &TrackableItem) -> Result<String, DocumentError> {
        if fnv1a_64(source.as_bytes()) != self.source_hash {
            return Err(DocumentError::SourceChanged);
        }
        Ok(extract_markdown_slice(source, &item.position)?)
    }

    /// Number of checkbox items in the document
    pub fn checkbox_count(&self) -> usize {
        flatten_tree(&self.tree)
            .iter()
            .filter(|item| matches!(item.kind, ItemKind::Checkbox { .. }))
            .count()
    }

    /// Number of ticked checkbox items in the document
    pub fn checked_count(&self) -> usize {
        flatten_tree(&self.tree)
            .iter()
            .filter(|item| matches!(item.kind, ItemKind::Checkbox { checked: true, .. }))
            .count()
    }
}

/// Log colliding IDs within one snapshot
///
/// Collisions are tolerated (the hash space is large and consumers key off
/// IDs best-effort) but worth surfacing, since two items sharing an ID will
/// share tracking status downstream.
fn warn_on_duplicate_ids(tree: &[TrackableItem], source_path: Option<&Path>) {
    let duplicates: Vec<&str> = flatten_tree(tree)
        .iter()
        .map(|item| item.id.as_str())
        .duplicates()
        .collect();

    if !duplicates.is_empty() {
        log::warn!(
            "duplicate item IDs in {}: {}",
            display_path(source_path),
            duplicates.join(", ")
        );
    }
}

fn display_path(source_path: Option<&Path>) -> String {
    source_path.map_or_else(|| "<string>".to_string(), |p| p.display().to_string())
}
