//! In-memory page environment for tests and the demo binary.
//!
//! Implements every capability trait with recorded side effects: alerts,
//! scrolls and navigations are collected, timers and geocoding callbacks are
//! held until a test fires them. This makes the deferred-task interleavings
//! (auto-hide timers, late geocode callbacks) deterministic to exercise.

use super::{
    Dom, GeocodeCallback, GeocodeResult, LatLng, MapHandle, MapSdk, MarkerHandle, Navigator,
    OverlayHandle, OverlaySpec, Scheduler, TimerId,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// State of one fake page element.
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub value: String,
    pub text: String,
    pub visible: bool,
    pub active: bool,
}

/// Fake presentation layer: a flat id → element map.
#[derive(Default)]
pub struct FakeDom {
    elements: Mutex<HashMap<String, FakeElement>>,
    alerts: Mutex<Vec<String>>,
    scrolls: Mutex<Vec<String>>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an element as present on the page.
    pub fn add_element(&self, id: &str) {
        self.elements
            .lock()
            .unwrap()
            .insert(id.to_string(), FakeElement::default());
    }

    /// Removes an element, as if the page no longer carried it.
    pub fn remove_element(&self, id: &str) {
        self.elements.lock().unwrap().remove(id);
    }

    /// Snapshot of an element's state.
    pub fn element(&self, id: &str) -> Option<FakeElement> {
        self.elements.lock().unwrap().get(id).cloned()
    }

    /// Every alert shown so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    /// Ids scrolled into view, oldest first.
    pub fn scrolls(&self) -> Vec<String> {
        self.scrolls.lock().unwrap().clone()
    }

    fn with_element<R>(&self, id: &str, f: impl FnOnce(&mut FakeElement) -> R) -> Option<R> {
        self.elements.lock().unwrap().get_mut(id).map(f)
    }
}

impl Dom for FakeDom {
    fn element_exists(&self, id: &str) -> bool {
        self.elements.lock().unwrap().contains_key(id)
    }

    fn value(&self, id: &str) -> Option<String> {
        self.elements.lock().unwrap().get(id).map(|e| e.value.clone())
    }

    fn set_value(&self, id: &str, value: &str) -> bool {
        self.with_element(id, |e| e.value = value.to_string()).is_some()
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        self.with_element(id, |e| e.text = text.to_string()).is_some()
    }

    fn set_visible(&self, id: &str, visible: bool) -> bool {
        self.with_element(id, |e| e.visible = visible).is_some()
    }

    fn set_active(&self, id: &str, active: bool) -> bool {
        self.with_element(id, |e| e.active = active).is_some()
    }

    fn is_active(&self, id: &str) -> bool {
        self.elements
            .lock()
            .unwrap()
            .get(id)
            .map(|e| e.active)
            .unwrap_or(false)
    }

    fn scroll_into_view(&self, id: &str) -> bool {
        if !self.element_exists(id) {
            return false;
        }
        self.scrolls.lock().unwrap().push(id.to_string());
        true
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// Fake document location recording every redirect instead of reloading.
pub struct FakeNavigator {
    path: Mutex<String>,
    query: Mutex<String>,
    navigations: Mutex<Vec<String>>,
}

impl FakeNavigator {
    /// Creates a navigator positioned at `path` with a raw `query` string
    /// (no leading `?`).
    pub fn new(path: &str, query: &str) -> Self {
        Self {
            path: Mutex::new(path.to_string()),
            query: Mutex::new(query.to_string()),
            navigations: Mutex::new(Vec::new()),
        }
    }

    /// Every navigation performed so far, oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    /// The most recent navigation, if any.
    pub fn last_navigation(&self) -> Option<String> {
        self.navigations.lock().unwrap().last().cloned()
    }
}

impl Navigator for FakeNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }

    fn current_query(&self) -> String {
        self.query.lock().unwrap().clone()
    }

    fn navigate(&self, url: &str) {
        self.navigations.lock().unwrap().push(url.to_string());
    }
}

type Task = Box<dyn FnOnce() + Send>;

/// Fake scheduler holding tasks until a test fires them.
#[derive(Default)]
pub struct FakeScheduler {
    next_id: AtomicU64,
    pending: Mutex<Vec<(TimerId, Duration, Task)>>,
    cancelled: Mutex<Vec<TimerId>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to fire.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Delays of the waiting tasks, in scheduling order.
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.pending
            .lock()
            .unwrap()
            .iter()
            .map(|(_, delay, _)| *delay)
            .collect()
    }

    /// Timers cancelled so far.
    pub fn cancelled(&self) -> Vec<TimerId> {
        self.cancelled.lock().unwrap().clone()
    }

    /// Fires every pending task in scheduling order.
    pub fn fire_all(&self) {
        let tasks: Vec<_> = self.pending.lock().unwrap().drain(..).collect();
        for (_, _, task) in tasks {
            task();
        }
    }
}

impl Scheduler for FakeScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.pending.lock().unwrap().push((id, delay, task));
        id
    }

    fn cancel(&self, timer: TimerId) {
        self.pending.lock().unwrap().retain(|(id, _, _)| *id != timer);
        self.cancelled.lock().unwrap().push(timer);
    }
}

/// A map rendering performed by the fake SDK.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMap {
    pub handle: MapHandle,
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
}

/// A marker placed by the fake SDK.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub handle: MarkerHandle,
    pub map: MapHandle,
    pub position: LatLng,
}

/// An overlay placed by the fake SDK.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOverlay {
    pub handle: OverlayHandle,
    pub map: MapHandle,
    pub spec: OverlaySpec,
}

/// Fake mapping SDK holding geocode callbacks until a test resolves them.
#[derive(Default)]
pub struct FakeMapSdk {
    unavailable: AtomicBool,
    next_handle: AtomicU64,
    geocodes: Mutex<Vec<(String, GeocodeCallback)>>,
    maps: Mutex<Vec<RenderedMap>>,
    markers: Mutex<Vec<PlacedMarker>>,
    overlays: Mutex<Vec<PlacedOverlay>>,
}

impl FakeMapSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// An SDK that reports itself as not loaded.
    pub fn unavailable() -> Self {
        let sdk = Self::default();
        sdk.unavailable.store(true, Ordering::Relaxed);
        sdk
    }

    /// Addresses with a geocoding request still in flight, oldest first.
    pub fn pending_geocodes(&self) -> Vec<String> {
        self.geocodes
            .lock()
            .unwrap()
            .iter()
            .map(|(address, _)| address.clone())
            .collect()
    }

    /// Settles the oldest in-flight geocoding request with `result`.
    /// Returns `false` when nothing was pending.
    pub fn resolve_next(&self, result: GeocodeResult) -> bool {
        let entry = {
            let mut geocodes = self.geocodes.lock().unwrap();
            if geocodes.is_empty() {
                return false;
            }
            geocodes.remove(0)
        };
        (entry.1)(result);
        true
    }

    /// Maps rendered so far, oldest first.
    pub fn maps(&self) -> Vec<RenderedMap> {
        self.maps.lock().unwrap().clone()
    }

    /// Markers placed so far, oldest first.
    pub fn markers(&self) -> Vec<PlacedMarker> {
        self.markers.lock().unwrap().clone()
    }

    /// Overlays placed so far, oldest first.
    pub fn overlays(&self) -> Vec<PlacedOverlay> {
        self.overlays.lock().unwrap().clone()
    }

    fn next_handle(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl MapSdk for FakeMapSdk {
    fn is_available(&self) -> bool {
        !self.unavailable.load(Ordering::Relaxed)
    }

    fn geocode(&self, address: &str, callback: GeocodeCallback) {
        self.geocodes
            .lock()
            .unwrap()
            .push((address.to_string(), callback));
    }

    fn render_map(&self, container_id: &str, center: LatLng, zoom: u8) -> Option<MapHandle> {
        let handle = MapHandle(self.next_handle());
        self.maps.lock().unwrap().push(RenderedMap {
            handle,
            container_id: container_id.to_string(),
            center,
            zoom,
        });
        Some(handle)
    }

    fn place_marker(&self, map: MapHandle, position: LatLng) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle());
        self.markers.lock().unwrap().push(PlacedMarker {
            handle,
            map,
            position,
        });
        handle
    }

    fn place_overlay(&self, map: MapHandle, spec: OverlaySpec) -> OverlayHandle {
        let handle = OverlayHandle(self.next_handle());
        self.overlays.lock().unwrap().push(PlacedOverlay { handle, map, spec });
        handle
    }
}
