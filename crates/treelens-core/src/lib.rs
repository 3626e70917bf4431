/// TreeLens Core — the visualisation engine behind the treemap explorer.
///
/// This crate contains all behaviour with zero UI dependencies: the GUI only
/// paints what these types compute and forwards pointer/key input to them.
///
/// # Modules
///
/// - [`model`] — Arena-allocated snapshot tree and the JSON wire format.
/// - [`layout`] — Slice-and-dice treemap layout.
/// - [`hit_test`] — Smallest-rectangle lookup under the pointer.
/// - [`navigation`] — Treemap zoom/selection state machine.
/// - [`list_view`] — Expandable list with incremental row updates.
/// - [`sync`] — Mediator keeping both views' selection in step.
/// - [`loader`] — Background snapshot loading with progress messages.
/// - [`color`] / [`settings`] — Colour rules and persisted viewer settings.
/// - [`clipboard`] — Copy-path action and transient notifications.
pub mod clipboard;
pub mod color;
pub mod error;
pub mod hit_test;
pub mod layout;
pub mod list_view;
pub mod loader;
pub mod model;
pub mod navigation;
pub mod settings;
pub mod sync;

pub use error::{Error, Result};
