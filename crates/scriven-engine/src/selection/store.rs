//! One saved selection per editor instance.
//!
//! Formatting commands wrap DOM mutations in `save`/`restore` so the
//! user's selection survives markup changes: the saved descriptor holds
//! only character offsets, so any mutation that preserves text content
//! and order restores to the same textual boundaries even though the
//! underlying nodes differ.

use crate::dom::{DomTree, NodeId};
use crate::selection::codec::{self, SelectionDescriptor, SelectionHandle};

#[derive(Debug, Default)]
pub struct SelectionStore {
    saved: Option<SelectionDescriptor>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current live selection, overwriting any previously
    /// saved value. With no exportable selection the store ends up
    /// holding nothing, and a later `restore` is a no-op.
    pub fn save(&mut self, tree: &DomTree, roots: &[NodeId], handle: &dyn SelectionHandle) {
        self.saved = codec::export(tree, roots, handle);
        log::trace!("selection saved: {:?}", self.saved);
    }

    /// Re-establish the saved selection against the current DOM.
    ///
    /// Idempotent: the saved value is not consumed, so repeated calls
    /// (with or without intervening mutation) keep reproducing the same
    /// offsets, best effort against the then-current content.
    pub fn restore(&self, tree: &DomTree, roots: &[NodeId], handle: &mut dyn SelectionHandle) {
        if let Some(descriptor) = &self.saved {
            codec::import(tree, roots, handle, descriptor);
        }
    }

    pub fn saved(&self) -> Option<&SelectionDescriptor> {
        self.saved.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::html;
    use crate::selection::codec::{LiveSelection, RawSelection};
    use crate::selection::walker::DomPosition;

    fn fixture(fragment: &str) -> (DomTree, Vec<NodeId>, LiveSelection) {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        html::append_fragment(&mut tree, root, fragment).unwrap();
        (tree, vec![root], LiveSelection::new())
    }

    #[test]
    fn restore_without_save_is_a_no_op() {
        let (tree, roots, mut live) = fixture("lorem");
        let store = SelectionStore::new();
        store.restore(&tree, &roots, &mut live);
        assert!(live.read().is_none());
    }

    #[test]
    fn restore_is_idempotent() {
        let (tree, roots, mut live) = fixture("lorem <i>ipsum</i> dolor");
        let i = tree.children(roots[0])[1];
        live.write(RawSelection {
            anchor: DomPosition::new(i, 0),
            focus: DomPosition::new(i, 1),
        });

        let mut store = SelectionStore::new();
        store.save(&tree, &roots, &live);

        store.restore(&tree, &roots, &mut live);
        let first = live.read().unwrap();
        store.restore(&tree, &roots, &mut live);
        assert_eq!(live.read().unwrap(), first);
        assert_eq!(store.saved(), Some(&SelectionDescriptor::new(6, 11, 0)));
    }

    #[test]
    fn save_with_nothing_selected_overwrites_previous_value() {
        let (tree, roots, mut live) = fixture("lorem");
        let text = tree.children(roots[0])[0];
        live.write(RawSelection {
            anchor: DomPosition::new(text, 0),
            focus: DomPosition::new(text, 5),
        });

        let mut store = SelectionStore::new();
        store.save(&tree, &roots, &live);
        assert!(store.saved().is_some());

        live.clear();
        store.save(&tree, &roots, &live);
        assert!(store.saved().is_none());

        store.restore(&tree, &roots, &mut live);
        assert!(live.read().is_none());
    }

    #[test]
    fn stale_offsets_restore_clamped() {
        let (mut tree, roots, mut live) = fixture("lorem ipsum");
        let text = tree.children(roots[0])[0];
        live.write(RawSelection {
            anchor: DomPosition::new(text, 6),
            focus: DomPosition::new(text, 11),
        });

        let mut store = SelectionStore::new();
        store.save(&tree, &roots, &live);

        // content shrinks between save and restore
        tree.set_text(text, "lore");
        store.restore(&tree, &roots, &mut live);

        let raw = live.read().unwrap();
        assert_eq!(raw.anchor, DomPosition::new(text, 4));
        assert_eq!(raw.focus, DomPosition::new(text, 4));
    }
}
