pub mod commands;
pub mod dom;
pub mod editor;
pub mod options;
pub mod selection;
pub mod toolbar;

// Re-export key types for easier usage
pub use commands::FormatCommand;
pub use dom::{DomTree, NodeId, NodeKind};
pub use editor::Editor;
pub use options::EditorOptions;
pub use selection::{
    CheckTrigger, DomPosition, LiveSelection, RawSelection, SelectionDescriptor, SelectionHandle,
    SelectionObserver, SelectionStore,
};
pub use toolbar::{RecordingToolbar, Toolbar};
