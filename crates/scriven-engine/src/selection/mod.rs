//! Selection serialization core.
//!
//! A live selection is a pair of (node, offset) boundary points, which
//! any DOM mutation invalidates. The modules here convert it to and
//! from plain-text character offsets that survive markup changes:
//!
//! - [`walker`] converts a boundary point to a character offset within
//!   an editable root, and back, via document-order traversal.
//! - [`codec`] turns the whole live selection into a serializable
//!   [`codec::SelectionDescriptor`] (and back), resolving which of the
//!   ordered editable roots owns it.
//! - [`store`] keeps one saved descriptor per editor so formatting
//!   commands can bracket DOM mutations with save/restore.
//! - [`observer`] debounces selection checks and drives the toolbar
//!   collaborator.

pub mod codec;
pub mod observer;
pub mod store;
pub mod walker;

pub use codec::{LiveSelection, RawSelection, SelectionDescriptor, SelectionHandle};
pub use observer::{CheckContext, CheckTrigger, SelectionObserver};
pub use store::SelectionStore;
pub use walker::DomPosition;
