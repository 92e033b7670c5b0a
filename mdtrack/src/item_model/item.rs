//! Trackable items extracted from markdown
//!
//! A trackable item is a header, list item, or checkbox treated as a unit
//! of progress tracking. Items form a forest: list items carry their nested
//! list children, and after tree building headers own every item up to the
//! next header of equal or higher rank.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// The kind of a trackable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// A markdown heading (`#` through `######`)
    Header,

    /// A plain list item
    ListItem {
        /// Whether the item belongs to a numbered list
        ordered: bool,
    },

    /// A task-list item (`- [ ]` / `- [x]`)
    Checkbox {
        /// Whether the box is ticked
        checked: bool,
        /// Whether the item belongs to a numbered list
        ordered: bool,
    },
}

impl ItemKind {
    /// Stable tag used as the kind component of item IDs
    pub fn tag(&self) -> &'static str {
        match self {
            ItemKind::Header => "header",
            ItemKind::ListItem { .. } => "list_item",
            ItemKind::Checkbox { .. } => "checkbox",
        }
    }

    /// Whether this is a header item
    pub fn is_header(&self) -> bool {
        matches!(self, ItemKind::Header)
    }
}

/// A single trackable item with its source span and nested children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackableItem {
    /// Stable identifier derived from kind, start position, and content
    pub id: String,

    /// Item kind (header, list item, or checkbox)
    pub kind: ItemKind,

    /// Flattened inline text of the item's own declaration
    pub content: String,

    /// Heading level (1-6) for headers; list nesting depth (from 0) otherwise
    pub depth: u32,

    /// Source span of the item; after tree building the end covers all descendants
    pub position: Position,

    /// Nested items in document order
    pub children: Vec<TrackableItem>,
}

impl TrackableItem {
    /// Total number of items in this subtree, this item included
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TrackableItem::subtree_len)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> TrackableItem {
        TrackableItem {
            id: id.to_string(),
            kind: ItemKind::ListItem { ordered: false },
            content: id.to_string(),
            depth: 0,
            position: Position::new(1, 1, 1, 5),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_kind_tags_are_distinct() {
        let header = ItemKind::Header;
        let plain = ItemKind::ListItem { ordered: false };
        let task = ItemKind::Checkbox {
            checked: true,
            ordered: false,
        };

        assert_eq!(header.tag(), "header");
        assert_eq!(plain.tag(), "list_item");
        assert_eq!(task.tag(), "checkbox");
    }

    #[test]
    fn test_checkbox_tag_ignores_state() {
        // The checked flag flips across re-parses; the identity tag must not.
        let unchecked = ItemKind::Checkbox {
            checked: false,
            ordered: true,
        };
        let checked = ItemKind::Checkbox {
            checked: true,
            ordered: true,
        };
        assert_eq!(unchecked.tag(), checked.tag());
    }

    #[test]
    fn test_subtree_len_counts_descendants() {
        let mut root = leaf("root");
        let mut mid = leaf("mid");
        mid.children.push(leaf("inner"));
        root.children.push(mid);
        root.children.push(leaf("sibling"));

        assert_eq!(root.subtree_len(), 4);
    }
}
