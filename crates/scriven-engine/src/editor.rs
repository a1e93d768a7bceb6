//! Editor facade: wires the DOM tree, ordered editable roots, the live
//! selection, the selection store, and the observer behind the public
//! API surface (`export_selection`, `import_selection`, `save_selection`,
//! `restore_selection`, `check_selection`).

use std::time::Instant;

use crate::commands::{self, FormatCommand};
use crate::dom::{html, DomTree, HtmlError, NodeId};
use crate::options::EditorOptions;
use crate::selection::codec::{self, SelectionDescriptor, SelectionHandle};
use crate::selection::observer::{CheckContext, CheckTrigger, SelectionObserver};
use crate::selection::walker::DomPosition;
use crate::selection::{LiveSelection, RawSelection, SelectionStore};
use crate::toolbar::Toolbar;

/// One editor instance over an ordered set of editable roots.
///
/// Root order is registration order and defines the
/// `editableElementIndex` of exported descriptors. The editor does not
/// own the concept of a document beyond its roots; hosts with a real
/// DOM adapt their tree behind [`DomTree`]'s shape instead.
pub struct Editor<T: Toolbar> {
    tree: DomTree,
    roots: Vec<NodeId>,
    live: LiveSelection,
    store: SelectionStore,
    observer: SelectionObserver,
    options: EditorOptions,
    toolbar: T,
}

impl<T: Toolbar> Editor<T> {
    pub fn new(tree: DomTree, roots: Vec<NodeId>, options: EditorOptions, toolbar: T) -> Self {
        Self {
            tree,
            roots,
            live: LiveSelection::new(),
            store: SelectionStore::new(),
            observer: SelectionObserver::new(),
            options,
            toolbar,
        }
    }

    /// Build an editor with one `div` root per HTML fragment, in order.
    pub fn from_html(
        fragments: &[&str],
        options: EditorOptions,
        toolbar: T,
    ) -> Result<Self, HtmlError> {
        let mut tree = DomTree::new();
        let mut roots = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let root = tree.create_element("div");
            html::append_fragment(&mut tree, root, fragment)?;
            roots.push(root);
        }
        Ok(Self::new(tree, roots, options, toolbar))
    }

    pub fn dom(&self) -> &DomTree {
        &self.tree
    }

    pub fn dom_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn toolbar(&self) -> &T {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut T {
        &mut self.toolbar
    }

    /// Serialized innerHTML of the root at `index`.
    pub fn root_html(&self, index: usize) -> Option<String> {
        self.roots.get(index).map(|&r| html::serialize(&self.tree, r))
    }

    /// Serialize the live selection. `None` when there is nothing
    /// exportable (no selection, or its anchor is outside every root).
    pub fn export_selection(&self) -> Option<SelectionDescriptor> {
        codec::export(&self.tree, &self.roots, &self.live)
    }

    /// Re-establish a live selection from `descriptor`, replacing the
    /// current one. Out-of-range indices no-op; offsets clamp.
    pub fn import_selection(&mut self, descriptor: &SelectionDescriptor) {
        codec::import(&self.tree, &self.roots, &mut self.live, descriptor);
    }

    /// Capture the current selection for a later [`Self::restore_selection`].
    pub fn save_selection(&mut self) {
        self.store.save(&self.tree, &self.roots, &self.live);
    }

    /// Best-effort re-establishment of the saved selection against the
    /// current DOM. Idempotent; no-op when nothing was saved.
    pub fn restore_selection(&mut self) {
        self.store.restore(&self.tree, &self.roots, &mut self.live);
    }

    /// Input-path selection check (mouseup/keyup/focus wiring calls
    /// this). Deactivation is immediate; activation is debounced until
    /// [`Self::tick`] observes a quiet window.
    pub fn check_selection(&mut self, now: Instant) {
        self.check_with(now, CheckTrigger::Input);
    }

    /// Externally fired selection check (resize, async refresh); uses
    /// the long batching window.
    pub fn broadcast_check(&mut self, now: Instant) {
        self.check_with(now, CheckTrigger::Broadcast);
    }

    fn check_with(&mut self, now: Instant, trigger: CheckTrigger) {
        self.toolbar.check_state();
        let ctx = CheckContext {
            tree: &self.tree,
            roots: &self.roots,
            handle: &self.live,
            options: &self.options,
        };
        self.observer.check(now, trigger, &ctx, &mut self.toolbar);
    }

    /// Pump pending debounced work. Hosts call this from their timer or
    /// event loop; tests pass explicit instants.
    pub fn tick(&mut self, now: Instant) {
        let ctx = CheckContext {
            tree: &self.tree,
            roots: &self.roots,
            handle: &self.live,
            options: &self.options,
        };
        self.observer.tick(now, &ctx, &mut self.toolbar);
    }

    /// Apply a formatting command to the current selection, bracketing
    /// the DOM mutation with an export/import pair so the user's
    /// selection survives the markup change.
    ///
    /// The bracket is transient: it must not clobber the instance's
    /// [`Self::save_selection`] slot, which the host may be holding
    /// across a longer interaction (the acceptance suite saves around
    /// an intervening command).
    pub fn exec_command(&mut self, command: FormatCommand) {
        let Some(descriptor) = self.export_selection() else {
            return;
        };
        if descriptor.is_collapsed() {
            return;
        }
        let root = self.roots[descriptor.root_index()];
        commands::wrap_range(
            &mut self.tree,
            root,
            descriptor.start,
            descriptor.end,
            command.tag(),
        );
        self.import_selection(&descriptor);
    }

    /// Select the full contents of `node`, the way hosts do when a user
    /// double-clicks or a test drives a scenario.
    pub fn select_node_contents(&mut self, node: NodeId) {
        let end = self.tree.children(node).len();
        self.live.write(RawSelection {
            anchor: DomPosition::new(node, 0),
            focus: DomPosition::new(node, end),
        });
    }

    /// Select the character range `start..end` of the root at
    /// `root_index`. Equal offsets place a collapsed cursor.
    pub fn select_text_range(&mut self, root_index: usize, start: usize, end: usize) {
        let Some(&root) = self.roots.get(root_index) else {
            return;
        };
        let anchor = crate::selection::walker::position_at(&self.tree, root, start);
        let focus = crate::selection::walker::position_at(&self.tree, root, end);
        self.live.write(RawSelection { anchor, focus });
    }

    pub fn clear_selection(&mut self) {
        self.live.clear();
    }

    /// Direct access to the live-selection handle for hosts that drive
    /// it from their own event wiring.
    pub fn selection_handle(&mut self) -> &mut dyn SelectionHandle {
        &mut self.live
    }
}
