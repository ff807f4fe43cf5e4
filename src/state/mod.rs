//! State management for the page behavior layer.

use crate::env::TimerId;
use crate::services::GeocodeCache;
use std::sync::{Arc, Mutex};

pub mod map_session;

pub use map_session::{MapSession, MapSessionSlot, RenderedHandles};

/// Page-wide state container.
pub struct PageState {
    /// The single slot for the active map session.
    pub map_session: Arc<Mutex<MapSessionSlot>>,
    /// Pending auto-hide timer for the selection warning, one at most.
    pub warning_timer: Arc<Mutex<Option<TimerId>>>,
    /// LRU cache of resolved geocoding results.
    pub geocode_cache: Arc<Mutex<GeocodeCache>>,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            map_session: Arc::new(Mutex::new(MapSessionSlot::new())),
            warning_timer: Arc::new(Mutex::new(None)),
            geocode_cache: Arc::new(Mutex::new(GeocodeCache::new(32))),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}
