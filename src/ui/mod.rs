//! UI module for handling user interactions and popup lifecycle.

pub mod handlers;
pub mod popup;

pub use handlers::{PageHandlers, UiEvent};
pub use popup::{PopupController, PopupKind};
