//! Header-nested tree construction and flattening
//!
//! Tree building nests a flat item list under its headers: each header owns
//! every following item until the next header of equal or higher rank, and
//! its recorded end position is inflated to cover its last descendant. List
//! items keep the intrinsic nesting they arrived with. Flattening is the
//! depth-first inverse and recomputes nothing.

use super::item::TrackableItem;

/// Build the header-nested hierarchy from a flat item list
///
/// Maintains a stack of open headers. A new header closes every open header
/// of numerically greater-or-equal depth (an H2 closes a prior H2 or H3+,
/// never a prior H1); non-header items attach to the innermost open header,
/// or become roots when no header has been seen yet. Closing a header with
/// children sets its end position to its last child's end.
///
/// The input is cloned, never aliased: items already carrying children
/// (nested list items) keep them.
pub fn build_tree(items: &[TrackableItem]) -> Vec<TrackableItem> {
    let mut roots: Vec<TrackableItem> = Vec::new();
    let mut open_headers: Vec<TrackableItem> = Vec::new();

    for item in items {
        let node = item.clone();

        if node.kind.is_header() {
            while open_headers
                .last()
                .is_some_and(|top| top.depth >= node.depth)
            {
                let Some(mut closed) = open_headers.pop() else {
                    break;
                };
                close_over_children(&mut closed);
                attach(&mut roots, &mut open_headers, closed);
            }
            open_headers.push(node);
        } else {
            attach(&mut roots, &mut open_headers, node);
        }
    }

    while let Some(mut closed) = open_headers.pop() {
        close_over_children(&mut closed);
        attach(&mut roots, &mut open_headers, closed);
    }

    roots
}

/// Flatten a tree into depth-first pre-order (item, then children, then siblings)
pub fn flatten_tree(tree: &[TrackableItem]) -> Vec<&TrackableItem> {
    let mut flat = Vec::new();
    for item in tree {
        push_subtree(item, &mut flat);
    }
    flat
}

fn push_subtree<'a>(item: &'a TrackableItem, flat: &mut Vec<&'a TrackableItem>) {
    flat.push(item);
    for child in &item.children {
        push_subtree(child, flat);
    }
}

/// Inflate a closing header's end position over its last child
fn close_over_children(header: &mut TrackableItem) {
    if let Some(last) = header.children.last() {
        let last_position = last.position.clone();
        header.position.extend_to(&last_position);
    }
}

/// Attach a finished node to the innermost open header, or to the roots
fn attach(
    roots: &mut Vec<TrackableItem>,
    open_headers: &mut [TrackableItem],
    node: TrackableItem,
) {
    if let Some(top) = open_headers.last_mut() {
        top.children.push(node);
    } else {
        roots.push(node);
    }
}
