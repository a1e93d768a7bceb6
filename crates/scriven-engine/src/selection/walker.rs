//! Text-offset walker: converts between live (node, offset) positions
//! and plain-text character offsets measured over an editable root.
//!
//! Both directions are a single pre-order traversal with early exit, so
//! the positions they produce are stable across any markup change that
//! preserves text content and order.

use crate::dom::{DomTree, NodeId, NodeKind};

/// A boundary point inside a DOM tree.
///
/// For text nodes `offset` is a character offset into the node's text;
/// for element nodes it is a child index (the boundary sits before
/// `children[offset]`, or after the last child when `offset` equals the
/// child count).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomPosition {
    pub node: NodeId,
    pub offset: usize,
}

impl DomPosition {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Character offset of `position` within `root`'s plain-text content
/// (the export direction).
///
/// Positions outside `root` or with out-of-range offsets clamp to the
/// nearest valid boundary rather than failing.
pub fn offset_of(tree: &DomTree, root: NodeId, position: DomPosition) -> usize {
    let mut count = 0;
    walk_to(tree, root, position, &mut count);
    count
}

/// Accumulates text before `position` into `count`; true once found.
fn walk_to(tree: &DomTree, node: NodeId, position: DomPosition, count: &mut usize) -> bool {
    if node == position.node {
        match tree.kind(node) {
            NodeKind::Text { text } => {
                *count += position.offset.min(text.chars().count());
            }
            NodeKind::Element { .. } => {
                for &child in tree.children(node).iter().take(position.offset) {
                    *count += tree.text_len(child);
                }
            }
        }
        return true;
    }
    match tree.kind(node) {
        NodeKind::Text { text } => {
            *count += text.chars().count();
            false
        }
        NodeKind::Element { .. } => {
            for &child in tree.children(node) {
                if walk_to(tree, child, position, count) {
                    return true;
                }
            }
            false
        }
    }
}

/// The (node, offset) pair inside `root` representing character offset
/// `target` (the import direction).
///
/// Offsets past the end of the content clamp to the end of the last
/// text node; a root with no text nodes resolves to `(root, 0)`.
pub fn position_at(tree: &DomTree, root: NodeId, target: usize) -> DomPosition {
    let mut remaining = target;
    let mut last_text = None;
    if let Some(position) = descend(tree, root, &mut remaining, &mut last_text) {
        return position;
    }
    match last_text {
        Some(node) => DomPosition::new(node, tree.text_len(node)),
        None => DomPosition::new(root, 0),
    }
}

fn descend(
    tree: &DomTree,
    node: NodeId,
    remaining: &mut usize,
    last_text: &mut Option<NodeId>,
) -> Option<DomPosition> {
    match tree.kind(node) {
        NodeKind::Text { text } => {
            let len = text.chars().count();
            if *remaining <= len {
                Some(DomPosition::new(node, *remaining))
            } else {
                *remaining -= len;
                *last_text = Some(node);
                None
            }
        }
        NodeKind::Element { .. } => {
            for &child in tree.children(node) {
                if let Some(position) = descend(tree, child, remaining, last_text) {
                    return Some(position);
                }
            }
            None
        }
    }
}
