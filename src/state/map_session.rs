//! Generation-counted map session slot.
//!
//! Only one map session is modeled at a time. Every open takes a fresh
//! generation; a geocode callback may write its result back only while that
//! generation is still current. Superseding opens and popup closes bump the
//! generation, so late callbacks are provable no-ops instead of last-writer
//! races.

use crate::env::{LatLng, MapHandle, MarkerHandle, OverlayHandle};
use log::debug;

/// Handles of a rendered map, marker and label overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedHandles {
    pub map: MapHandle,
    pub marker: MarkerHandle,
    pub overlay: OverlayHandle,
}

/// Transient state tied to one open-map-popup invocation.
#[derive(Debug, Clone)]
pub struct MapSession {
    pub generation: u64,
    pub address: String,
    pub display_name: String,
    pub coords: Option<LatLng>,
    pub rendered: Option<RenderedHandles>,
}

/// The single slot holding the active map session.
#[derive(Debug, Default)]
pub struct MapSessionSlot {
    generation: u64,
    current: Option<MapSession>,
}

impl MapSessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session, superseding any pending one, and returns the
    /// generation its callbacks must carry.
    pub fn begin(&mut self, address: &str, display_name: &str) -> u64 {
        self.generation += 1;
        self.current = Some(MapSession {
            generation: self.generation,
            address: address.to_string(),
            display_name: display_name.to_string(),
            coords: None,
            rendered: None,
        });
        debug!(
            "map session {} started for address: {}",
            self.generation, address
        );
        self.generation
    }

    /// Whether a callback carrying `generation` may still apply its result.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation && self.current.is_some()
    }

    /// Invalidates pending callbacks without discarding session data.
    ///
    /// Used when the popup closes: the resolved session survives, but nothing
    /// in flight may render into the closed popup. Reopening starts a fresh
    /// generation anyway.
    pub fn invalidate_pending(&mut self) {
        self.generation += 1;
    }

    /// Records resolved coordinates for a still-current session.
    pub fn resolve(&mut self, generation: u64, coords: LatLng) -> bool {
        if !self.is_current(generation) {
            debug!("stale geocode result for generation {}", generation);
            return false;
        }
        if let Some(session) = self.current.as_mut() {
            session.coords = Some(coords);
            return true;
        }
        false
    }

    /// Attaches rendered handles to a still-current session.
    pub fn attach(&mut self, generation: u64, handles: RenderedHandles) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        if let Some(session) = self.current.as_mut() {
            session.rendered = Some(handles);
            return true;
        }
        false
    }

    /// The active session, if one was started.
    pub fn current(&self) -> Option<&MapSession> {
        self.current.as_ref()
    }
}
