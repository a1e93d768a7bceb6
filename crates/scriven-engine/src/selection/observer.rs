//! Selection observer: decides, after user interaction, whether
//! toolbar-relevant state needs recomputing, and coalesces rapid-fire
//! triggers behind a trailing debounce window.
//!
//! Hiding is synchronous (an empty or disallowed selection must never
//! flash a stale toolbar); showing and button-state refreshes are
//! deferred until a quiet period elapses after the last trigger. The
//! host pumps [`SelectionObserver::tick`] from its event loop; a new
//! trigger inside the window supersedes the pending deadline, which is
//! the only cancellation mechanism.

use std::time::Instant;

use crate::dom::{DomTree, NodeId};
use crate::options::EditorOptions;
use crate::selection::codec::{self, SelectionDescriptor, SelectionHandle};
use crate::toolbar::Toolbar;

/// Which call path triggered a check; selects the batching window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckTrigger {
    /// Direct input events (mouseup, keyup, focus). Short window.
    Input,
    /// Externally fired checks (resize, async refresh). Long window.
    Broadcast,
}

/// Borrowed view of everything a check needs to read.
pub struct CheckContext<'a> {
    pub tree: &'a DomTree,
    pub roots: &'a [NodeId],
    pub handle: &'a dyn SelectionHandle,
    pub options: &'a EditorOptions,
}

impl CheckContext<'_> {
    fn export(&self) -> Option<SelectionDescriptor> {
        codec::export(self.tree, self.roots, self.handle)
    }

    /// Collapsed or absent selection.
    fn is_empty(&self) -> bool {
        self.export().is_none_or(|d| d.is_collapsed())
    }

    /// Selection spans more than one block-level container of its root.
    fn spans_multiple_blocks(&self) -> bool {
        let Some(raw) = self.handle.read() else {
            return false;
        };
        let Some(&root) = self
            .roots
            .iter()
            .find(|&&r| self.tree.contains(r, raw.anchor.node))
        else {
            return false;
        };
        if !self.tree.contains(root, raw.focus.node) {
            return false;
        }
        self.tree.block_ancestor(root, raw.anchor.node)
            != self.tree.block_ancestor(root, raw.focus.node)
    }

    /// Collapsed selections still refresh button states for static,
    /// always-visible toolbars when the host opts in.
    fn updates_on_empty(&self) -> bool {
        self.options.update_on_empty_selection && self.options.static_toolbar
    }
}

/// Debounced re-evaluation trigger for toolbar state.
///
/// Calls the codec's export for comparison and decisions only; it never
/// persists a descriptor across DOM mutations.
#[derive(Debug, Default)]
pub struct SelectionObserver {
    /// Deadline of the pending recomputation, if one is scheduled.
    pending: Option<Instant>,
    /// Last descriptor a fired recomputation acted on.
    last_applied: Option<SelectionDescriptor>,
}

impl SelectionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the live selection after a trigger at `now`.
    ///
    /// Empty or disallowed selections deactivate the toolbar
    /// immediately and cancel any pending recomputation; anything else
    /// (re)schedules a recomputation at `now + window(trigger)`.
    pub fn check(
        &mut self,
        now: Instant,
        trigger: CheckTrigger,
        ctx: &CheckContext<'_>,
        toolbar: &mut dyn Toolbar,
    ) {
        let disallowed = !ctx.options.allow_multi_paragraph_selection && ctx.spans_multiple_blocks();
        if disallowed || (ctx.is_empty() && !ctx.updates_on_empty()) {
            self.pending = None;
            self.last_applied = None;
            if toolbar.is_active() {
                log::trace!("selection check: deactivating toolbar (empty or disallowed)");
                toolbar.hide_toolbar();
            }
            return;
        }

        // Unchanged selection with the toolbar already up needs no new cycle.
        if self.pending.is_none() && toolbar.is_active() && ctx.export() == self.last_applied {
            return;
        }

        let window = match trigger {
            CheckTrigger::Input => ctx.options.check_window(),
            CheckTrigger::Broadcast => ctx.options.broadcast_window(),
        };
        self.pending = Some(now + window);
    }

    /// Fire the pending recomputation once its deadline has elapsed.
    /// The host calls this from its timer/event loop.
    pub fn tick(&mut self, now: Instant, ctx: &CheckContext<'_>, toolbar: &mut dyn Toolbar) {
        let Some(deadline) = self.pending else {
            return;
        };
        if now < deadline {
            return;
        }
        self.pending = None;
        self.recompute(ctx, toolbar);
    }

    /// True while a recomputation is scheduled but not yet fired.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn recompute(&mut self, ctx: &CheckContext<'_>, toolbar: &mut dyn Toolbar) {
        let descriptor = ctx.export();
        let empty = descriptor.as_ref().is_none_or(|d| d.is_collapsed());

        if empty {
            if ctx.updates_on_empty() {
                toolbar.set_toolbar_button_states();
                self.last_applied = descriptor;
            } else if toolbar.is_active() {
                // selection emptied between scheduling and firing
                toolbar.hide_toolbar();
                self.last_applied = None;
            }
            return;
        }

        toolbar.set_toolbar_position();
        toolbar.set_toolbar_button_states();
        toolbar.show_and_update_toolbar();
        self.last_applied = descriptor;
    }
}
