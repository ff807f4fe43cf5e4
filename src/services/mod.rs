//! Service layer for business logic.
//!
//! Separates business logic from UI handlers for better testability and
//! maintainability.

pub mod geocode_cache;
pub mod map_loader;
pub mod navigation_service;
pub mod selection_guard;

pub use geocode_cache::GeocodeCache;
pub use map_loader::MapLoader;
pub use navigation_service::NavigationService;
pub use selection_guard::SelectionGuard;
