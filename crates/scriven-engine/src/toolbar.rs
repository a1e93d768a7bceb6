//! Toolbar collaborator seam.
//!
//! The selection observer decides *when* toolbar state needs
//! recomputing; everything visual (positioning math, button rendering,
//! show/hide animation) belongs to the host's toolbar implementation
//! behind this trait. The codec, walker, and store never touch it.

/// Host toolbar contract, called only by the selection observer and the
/// editor facade.
pub trait Toolbar {
    /// Reposition the toolbar relative to the current selection.
    fn set_toolbar_position(&mut self);
    /// Recompute per-button active/disabled state.
    fn set_toolbar_button_states(&mut self);
    /// Make the toolbar visible and refresh its contents.
    fn show_and_update_toolbar(&mut self);
    /// Host-side state re-evaluation hook, invoked on every selection
    /// check before any debounced work is scheduled.
    fn check_state(&mut self);
    /// Deactivate and hide the toolbar.
    fn hide_toolbar(&mut self);
    /// Whether the toolbar is currently active (shown).
    fn is_active(&self) -> bool;
}

/// Call-counting [`Toolbar`] for tests and headless embedding demos.
#[derive(Debug, Default)]
pub struct RecordingToolbar {
    active: bool,
    pub position_calls: usize,
    pub button_state_calls: usize,
    pub show_calls: usize,
    pub check_state_calls: usize,
    pub hide_calls: usize,
}

impl RecordingToolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the active flag, the way a host would toggle the
    /// toolbar's active CSS class directly.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Toolbar for RecordingToolbar {
    fn set_toolbar_position(&mut self) {
        self.position_calls += 1;
    }

    fn set_toolbar_button_states(&mut self) {
        self.button_state_calls += 1;
    }

    fn show_and_update_toolbar(&mut self) {
        self.show_calls += 1;
        self.active = true;
    }

    fn check_state(&mut self) {
        self.check_state_calls += 1;
    }

    fn hide_toolbar(&mut self) {
        self.hide_calls += 1;
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
