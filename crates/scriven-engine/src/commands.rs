//! Formatting command seam.
//!
//! Command execution proper (toggling, unwrapping, browser execCommand
//! parity) lives with the host; the engine supplies the one mutation
//! the save/restore contract is exercised by: wrapping a character
//! range of an editable root in a new inline element.

use crate::dom::{DomTree, NodeId, NodeKind};
use crate::selection::walker;

/// Inline formatting operations and their wrapper tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl FormatCommand {
    pub fn tag(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "b",
            FormatCommand::Italic => "i",
            FormatCommand::Underline => "u",
            FormatCommand::Strikethrough => "strike",
        }
    }
}

/// Wrap the text range `start..end` of `root` in a new `tag` element.
///
/// Text nodes are split at the range boundaries first, so the covered
/// region decomposes into whole nodes; the top-most fully covered nodes
/// are then moved into one wrapper per contiguous same-parent run.
/// Returns the first wrapper created, or `None` for a collapsed or
/// out-of-content range.
pub fn wrap_range(
    tree: &mut DomTree,
    root: NodeId,
    start: usize,
    end: usize,
    tag: &str,
) -> Option<NodeId> {
    let total = tree.text_len(root);
    let start = start.min(total);
    let end = end.min(total);
    if start >= end {
        return None;
    }

    split_text_at(tree, root, start);
    split_text_at(tree, root, end);

    let mut covered = Vec::new();
    let mut cursor = 0;
    collect_covered(tree, root, start, end, &mut cursor, &mut covered);
    if covered.is_empty() {
        return None;
    }

    let mut first_wrapper = None;
    let mut run: Vec<NodeId> = Vec::new();
    for node in covered {
        let continues = run.last().copied().is_some_and(|prev| {
            tree.parent(prev) == tree.parent(node)
                && tree.child_index(node) == tree.child_index(prev).map(|i| i + 1)
        });
        if !continues && !run.is_empty() {
            let wrapper = wrap_run(tree, tag, &run);
            first_wrapper.get_or_insert(wrapper);
            run.clear();
        }
        run.push(node);
    }
    let wrapper = wrap_run(tree, tag, &run);
    first_wrapper.get_or_insert(wrapper);
    log::debug!("wrapped {start}..{end} of root in <{tag}>");
    first_wrapper
}

/// Split the text node covering character offset `offset` so the offset
/// falls on a node boundary. No-op when it already does.
fn split_text_at(tree: &mut DomTree, root: NodeId, offset: usize) {
    let position = walker::position_at(tree, root, offset);
    let Some(text) = tree.text(position.node) else {
        return; // element position, already a boundary
    };
    let len = text.chars().count();
    if position.offset == 0 || position.offset >= len {
        return;
    }
    let split: String = text.chars().take(position.offset).collect();
    let rest: String = text.chars().skip(position.offset).collect();
    let parent = match tree.parent(position.node) {
        Some(p) => p,
        None => return,
    };
    tree.set_text(position.node, &split);
    let tail = tree.create_text(&rest);
    let next = tree
        .child_index(position.node)
        .and_then(|i| tree.children(parent).get(i + 1).copied());
    tree.insert_before(parent, tail, next);
}

/// Collect, in document order, the top-most nodes whose text lies
/// entirely within `start..end`. `cursor` tracks the character offset
/// at the current traversal point. Partially covered children are
/// always elements here (text boundaries were split beforehand), so
/// the walk descends into them.
fn collect_covered(
    tree: &DomTree,
    node: NodeId,
    start: usize,
    end: usize,
    cursor: &mut usize,
    out: &mut Vec<NodeId>,
) {
    for &child in tree.children(node) {
        let len = tree.text_len(child);
        let from = *cursor;
        let to = from + len;
        if to <= start || from >= end {
            *cursor = to;
            continue;
        }
        if from >= start && to <= end && len > 0 {
            out.push(child);
            *cursor = to;
            continue;
        }
        match tree.kind(child) {
            NodeKind::Element { .. } => collect_covered(tree, child, start, end, cursor, out),
            NodeKind::Text { .. } => *cursor = to,
        }
    }
}

fn wrap_run(tree: &mut DomTree, tag: &str, run: &[NodeId]) -> NodeId {
    let first = run[0];
    let parent = tree.parent(first).unwrap_or(first);
    let wrapper = tree.create_element(tag);
    tree.insert_before(parent, wrapper, Some(first));
    for &node in run {
        tree.append_child(wrapper, node);
    }
    wrapper
}
