//! Capability interfaces for the page environment.
//!
//! The behavior layer never probes ambient globals. The host page hands it a
//! [`Dom`], a [`Navigator`], a [`Scheduler`] and a [`MapSdk`], and tests
//! substitute the in-memory fakes from [`fake`]. Every DOM lookup tolerates
//! absence: elements not present on the current page answer `false`/`None`
//! and never raise.

pub mod fake;

use std::time::Duration;

/// Geographic coordinate pair as returned by geocoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Terminal outcome of a geocoding request: candidate coordinates, or the
/// failure status reported by the service.
pub type GeocodeResult = std::result::Result<Vec<LatLng>, String>;

/// Callback invoked exactly once when a geocoding request settles.
pub type GeocodeCallback = Box<dyn FnOnce(GeocodeResult) + Send>;

/// Opaque handle to a rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapHandle(pub u64);

/// Opaque handle to a placed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Opaque handle to a placed overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Handle to a scheduled single-shot task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Inline style of the label card: rounded white card with a drop shadow,
/// shifted so the anchor point sits above-and-centered on the marker.
pub const LABEL_CARD_STYLE: &str = "padding:10px 16px;font-size:14px;font-weight:bold;\
text-align:center;color:#333;background:white;border-radius:8px;\
box-shadow:0 2px 8px rgba(0,0,0,0.15);white-space:nowrap;\
transform:translate(-50%,-100%);margin-top:-15px";

/// A text label overlay anchored on a map position.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    pub position: LatLng,
    pub text: String,
    pub x_anchor: f32,
    pub y_anchor: f32,
    pub style: String,
}

impl OverlaySpec {
    /// The standard restaurant-name card, centered above the marker.
    pub fn label_card(position: LatLng, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            x_anchor: 0.5,
            y_anchor: 1.0,
            style: LABEL_CARD_STYLE.to_string(),
        }
    }
}

/// Element probing and mutation contract of the presentation layer.
pub trait Dom: Send + Sync {
    /// Whether an element with this id exists on the current page.
    fn element_exists(&self, id: &str) -> bool;
    /// Current value of a form control; `None` when the element is absent.
    fn value(&self, id: &str) -> Option<String>;
    /// Sets a form control's value. `false` when the element is absent.
    fn set_value(&self, id: &str, value: &str) -> bool;
    /// Sets an element's text content. `false` when the element is absent.
    fn set_text(&self, id: &str, text: &str) -> bool;
    /// Shows or hides an element. `false` when the element is absent.
    fn set_visible(&self, id: &str, visible: bool) -> bool;
    /// Adds or removes the "active" marker driving popup visibility.
    fn set_active(&self, id: &str, active: bool) -> bool;
    /// Whether the "active" marker is currently set on an element.
    fn is_active(&self, id: &str) -> bool;
    /// Smoothly scrolls an element to the viewport center.
    fn scroll_into_view(&self, id: &str) -> bool;
    /// Shows a blocking user-facing notice.
    fn alert(&self, message: &str);
}

/// Location of the current document, plus the redirect sink.
pub trait Navigator: Send + Sync {
    /// Path component of the current page URL.
    fn current_path(&self) -> String;
    /// Raw query string of the current page URL, without the leading `?`.
    fn current_query(&self) -> String;
    /// Performs a full navigation, replacing the current document.
    fn navigate(&self, url: &str);
}

/// Deferred single-shot tasks with cancellation.
pub trait Scheduler: Send + Sync {
    /// Schedules `task` to run once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TimerId;
    /// Cancels a pending task. Cancelling an already-fired timer is a no-op.
    fn cancel(&self, timer: TimerId);
}

/// The external mapping/geocoding service.
pub trait MapSdk: Send + Sync {
    /// Whether the SDK is present in the execution environment.
    fn is_available(&self) -> bool;
    /// Issues a single-shot geocoding request. Not cancellable and not
    /// retried; the callback fires whenever the service settles.
    fn geocode(&self, address: &str, callback: GeocodeCallback);
    /// Renders a map centered on `center` into the container element.
    /// `None` when the container is no longer present.
    fn render_map(&self, container_id: &str, center: LatLng, zoom: u8) -> Option<MapHandle>;
    /// Places a marker on a rendered map.
    fn place_marker(&self, map: MapHandle, position: LatLng) -> MarkerHandle;
    /// Places a label overlay on a rendered map.
    fn place_overlay(&self, map: MapHandle, spec: OverlaySpec) -> OverlayHandle;
}
