//! Flat item extraction from the block tree
//!
//! Walks parsed block nodes in document order and produces the flat,
//! depth-first list of trackable items. Headers and lists become items;
//! every other block contributes nothing and does not interrupt adjacency.
//! Depth reflects only intrinsic list nesting here; header ownership is
//! applied later by the tree builder.

use super::item::{ItemKind, TrackableItem};
use super::item_id::generate_id;
use crate::markdown_ast::{BlockNode, ListNode};

/// Extract the flat trackable-item list from parsed block nodes
///
/// # Parameters
/// * `blocks` - Block nodes in document order (see [`crate::markdown_ast`])
///
/// # Returns
/// * `Vec<TrackableItem>` - Headers and top-level list items in document
///   order; nested list items ride along as `children`
pub fn extract_items(blocks: &[BlockNode]) -> Vec<TrackableItem> {
    let mut items = Vec::new();

    for block in blocks {
        match block {
            BlockNode::Heading {
                depth,
                text,
                position,
            } => {
                let id = generate_id(ItemKind::Header.tag(), position.line, position.column, text);
                items.push(TrackableItem {
                    id,
                    kind: ItemKind::Header,
                    content: text.clone(),
                    depth: *depth,
                    position: position.clone(),
                    children: Vec::new(),
                });
            }
            BlockNode::List(list) => {
                items.extend(extract_list_items(list, 0));
            }
        }
    }

    log::debug!("extracted {} top-level items", items.len());
    items
}

/// Recursively extract a list's items at the given nesting depth
fn extract_list_items(list: &ListNode, depth: u32) -> Vec<TrackableItem> {
    let mut items = Vec::new();

    for entry in &list.items {
        let kind = match entry.checked {
            Some(checked) => ItemKind::Checkbox {
                checked,
                ordered: list.ordered,
            },
            None => ItemKind::ListItem {
                ordered: list.ordered,
            },
        };

        let mut children = Vec::new();
        for nested in &entry.nested {
            children.extend(extract_list_items(nested, depth + 1));
        }

        // The parent's span swallows whatever its children cover.
        let mut position = entry.position.clone();
        if let Some(last) = children.last() {
            position.extend_to(&last.position);
        }

        let id = generate_id(kind.tag(), position.line, position.column, &entry.text);
        items.push(TrackableItem {
            id,
            kind,
            content: entry.text.clone(),
            depth,
            position,
            children,
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown_ast::parse_blocks;

    fn extract(source: &str) -> Vec<TrackableItem> {
        extract_items(&parse_blocks(source))
    }

    #[test]
    fn test_empty_document_yields_no_items() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_paragraph_only_document_yields_no_items() {
        assert!(extract("just prose\n\nmore prose").is_empty());
    }

    #[test]
    fn test_extract_headers_and_items_in_order() {
        // Arrange / Act
        let items = extract("# Title\n\n- one\n- two\n\n## Sub");

        // Assert: document order, headers flat alongside list items
        let contents: Vec<&str> = items.iter().map(|i| i.content.as_str()).collect();
        assert_eq!(contents, vec!["Title", "one", "two", "Sub"]);
        assert!(items[0].kind.is_header());
        assert_eq!(items[0].depth, 1);
        assert_eq!(items[3].depth, 2);
    }

    #[test]
    fn test_checkbox_classification() {
        let items = extract("- [x] done\n- [ ] todo\n- plain");

        assert_eq!(
            items[0].kind,
            ItemKind::Checkbox {
                checked: true,
                ordered: false
            }
        );
        assert_eq!(
            items[1].kind,
            ItemKind::Checkbox {
                checked: false,
                ordered: false
            }
        );
        assert_eq!(items[2].kind, ItemKind::ListItem { ordered: false });
    }

    #[test]
    fn test_ordered_flag_carries_from_list() {
        let items = extract("1. [ ] numbered task\n2. numbered plain");

        assert_eq!(
            items[0].kind,
            ItemKind::Checkbox {
                checked: false,
                ordered: true
            }
        );
        assert_eq!(items[1].kind, ItemKind::ListItem { ordered: true });
    }

    #[test]
    fn test_depth_increments_per_nesting_level() {
        let items = extract("- L0\n  - L1\n    - L2");

        assert_eq!(items.len(), 1);
        let l0 = &items[0];
        let l1 = &l0.children[0];
        let l2 = &l1.children[0];
        assert_eq!(l0.depth, 0);
        assert_eq!(l1.depth, l0.depth + 1);
        assert_eq!(l2.depth, l1.depth + 1);
    }

    #[test]
    fn test_deeply_nested_lists_have_no_depth_cap() {
        let source = "- a\n  - b\n    - c\n      - d\n        - e\n          - f";

        let items = extract(source);
        let mut level = &items[0];
        let mut depth = level.depth;
        while let Some(child) = level.children.first() {
            assert_eq!(child.depth, depth + 1);
            depth = child.depth;
            level = child;
        }

        assert_eq!(depth, 5);
    }

    #[test]
    fn test_parent_end_extends_over_children() {
        let items = extract("- parent\n  - child one\n  - child two");

        let parent = &items[0];
        let last_child = parent.children.last().unwrap();
        assert_eq!(parent.position.end(), last_child.position.end());
    }

    #[test]
    fn test_ids_are_stable_across_reparses() {
        let source = "# Title\n\n- [ ] task";

        let first: Vec<String> = extract(source).iter().map(|i| i.id.clone()).collect();
        let second: Vec<String> = extract(source).iter().map(|i| i.id.clone()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_id_changes_when_content_changes() {
        let before = extract("- [ ] original");
        let after = extract("- [ ] edited");

        assert_ne!(before[0].id, after[0].id);
    }

    #[test]
    fn test_id_survives_checkbox_toggle() {
        // Toggling the box changes neither kind tag, position, nor content,
        // so the status store keeps tracking the same item.
        let unchecked = extract("- [ ] ship it");
        let checked = extract("- [x] ship it");

        assert_eq!(unchecked[0].id, checked[0].id);
    }

    #[test]
    fn test_interleaved_blocks_do_not_break_adjacency() {
        let source = "# A\n\nprose\n\n- item\n\n```\ncode\n```\n\n# B";

        let contents: Vec<String> = extract(source).iter().map(|i| i.content.clone()).collect();

        assert_eq!(contents, vec!["A", "item", "B"]);
    }
}
