//! Range codec: serializes the live selection into a DOM-independent
//! descriptor and rebuilds a live selection from one.
//!
//! The wire shape is part of the persisted contract: a flat record with
//! `start`, `end`, and `editableElementIndex` — the index key present
//! only when the owning editable root is not the first one.

use serde::{Deserialize, Serialize};

use crate::dom::{DomTree, NodeId};
use crate::selection::walker::{self, DomPosition};

/// DOM-independent, offset-based serialization of a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDescriptor {
    /// Character offset of the selection start within the root's text.
    pub start: usize,
    /// Character offset of the selection end (`end >= start`; equal
    /// means a collapsed cursor).
    pub end: usize,
    /// Index of the owning editable root. Omitted on the wire when the
    /// root is the first (index 0) one.
    #[serde(
        rename = "editableElementIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub editable_element_index: Option<usize>,
}

impl SelectionDescriptor {
    pub fn new(start: usize, end: usize, root_index: usize) -> Self {
        Self {
            start,
            end,
            editable_element_index: (root_index != 0).then_some(root_index),
        }
    }

    /// A cursor with no extent.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Owning root index, defaulting to 0 when omitted.
    pub fn root_index(&self) -> usize {
        self.editable_element_index.unwrap_or(0)
    }
}

/// One anchor/focus pair of the host's live selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSelection {
    pub anchor: DomPosition,
    pub focus: DomPosition,
}

impl RawSelection {
    pub fn collapsed(at: DomPosition) -> Self {
        Self { anchor: at, focus: at }
    }
}

/// Capability handle for the host-owned live selection.
///
/// The document's current selection is global mutable state owned by
/// the host; the codec only ever reads it on export and replaces it on
/// import, and never retains positions across a DOM mutation.
pub trait SelectionHandle {
    fn read(&self) -> Option<RawSelection>;
    fn write(&mut self, selection: RawSelection);
    fn clear(&mut self);
}

/// In-memory live selection for headless hosts and tests.
#[derive(Debug, Default)]
pub struct LiveSelection {
    current: Option<RawSelection>,
}

impl LiveSelection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionHandle for LiveSelection {
    fn read(&self) -> Option<RawSelection> {
        self.current
    }

    fn write(&mut self, selection: RawSelection) {
        self.current = Some(selection);
    }

    fn clear(&mut self) {
        self.current = None;
    }
}

/// Export the live selection as a descriptor.
///
/// Returns `None` when there is no live selection or its anchor lies
/// outside every registered root — "nothing to export", not an error.
/// A focus outside the anchor's root collapses to the anchor; reversed
/// selections are normalized by swapping.
pub fn export(
    tree: &DomTree,
    roots: &[NodeId],
    handle: &dyn SelectionHandle,
) -> Option<SelectionDescriptor> {
    let raw = handle.read()?;
    let root_index = roots.iter().position(|&r| tree.contains(r, raw.anchor.node));
    let Some(root_index) = root_index else {
        log::trace!("selection anchor outside all editable roots; nothing to export");
        return None;
    };
    let root = roots[root_index];

    let anchor_offset = walker::offset_of(tree, root, raw.anchor);
    let focus_offset = if tree.contains(root, raw.focus.node) {
        walker::offset_of(tree, root, raw.focus)
    } else {
        anchor_offset
    };

    let (start, end) = if anchor_offset <= focus_offset {
        (anchor_offset, focus_offset)
    } else {
        (focus_offset, anchor_offset)
    };
    Some(SelectionDescriptor::new(start, end, root_index))
}

/// Rebuild a live selection from `descriptor`, replacing whatever
/// selection existed before.
///
/// An out-of-range root index is a no-op; offsets beyond the current
/// text length clamp to the nearest valid boundary. Never fails.
pub fn import(
    tree: &DomTree,
    roots: &[NodeId],
    handle: &mut dyn SelectionHandle,
    descriptor: &SelectionDescriptor,
) {
    let Some(&root) = roots.get(descriptor.root_index()) else {
        log::debug!(
            "import skipped: no editable root at index {}",
            descriptor.root_index()
        );
        return;
    };
    let anchor = walker::position_at(tree, root, descriptor.start);
    let focus = if descriptor.is_collapsed() {
        anchor
    } else {
        walker::position_at(tree, root, descriptor.end)
    };
    handle.write(RawSelection { anchor, focus });
}
