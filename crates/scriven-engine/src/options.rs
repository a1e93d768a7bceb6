//! Editor configuration relevant to the selection core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Options the event wiring passes into selection checks.
///
/// The two batching windows cover distinct call paths: the short one
/// coalesces direct input events (mouseup/keyup), the long one covers
/// externally fired checks (resize, async triggers). Both are tunable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Allow a selection to span multiple block-level containers.
    pub allow_multi_paragraph_selection: bool,
    /// Recompute button states for collapsed selections (static
    /// toolbars that stay visible while typing).
    pub update_on_empty_selection: bool,
    /// The toolbar is always visible rather than selection-anchored.
    pub static_toolbar: bool,
    /// Debounce window for input-driven checks, in milliseconds.
    pub check_window_ms: u64,
    /// Debounce window for externally fired checks, in milliseconds.
    pub broadcast_window_ms: u64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            allow_multi_paragraph_selection: true,
            update_on_empty_selection: false,
            static_toolbar: false,
            check_window_ms: 50,
            broadcast_window_ms: 500,
        }
    }
}

impl EditorOptions {
    pub fn check_window(&self) -> Duration {
        Duration::from_millis(self.check_window_ms)
    }

    pub fn broadcast_window(&self) -> Duration {
        Duration::from_millis(self.broadcast_window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_windows() {
        let options = EditorOptions::default();
        assert!(options.allow_multi_paragraph_selection);
        assert!(!options.update_on_empty_selection);
        assert_eq!(options.check_window(), Duration::from_millis(50));
        assert_eq!(options.broadcast_window(), Duration::from_millis(500));
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let options: EditorOptions =
            serde_json::from_str(r#"{"allow_multi_paragraph_selection": false}"#).unwrap();
        assert!(!options.allow_multi_paragraph_selection);
        assert_eq!(options.check_window_ms, 50);
        assert_eq!(options.broadcast_window_ms, 500);
    }
}
