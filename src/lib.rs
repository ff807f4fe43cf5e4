//! Client-side page behavior for the campus restaurant recommendation site.
//!
//! Wires page events (button clicks, dropdown changes, page ready) to
//! selection-gated navigation, query-string state that survives page
//! transitions, and the modal map popup with its asynchronous geocoding. The
//! presentation layer, the server routes and the mapping SDK stay outside the
//! crate; hosts inject them through the capability traits in [`env`].

pub mod config;
pub mod env;
pub mod error;
pub mod query;
pub mod services;
pub mod startup;
pub mod state;
pub mod ui;

pub use config::PageConfig;
pub use error::{AppError, Result};
pub use state::PageState;
pub use ui::{PageHandlers, UiEvent};
