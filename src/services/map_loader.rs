//! Asynchronous map loading for the map popup.
//!
//! Geocoding is a single-shot callback the SDK fires later; the interaction
//! thread never blocks on it. Each load takes a fresh session generation, and
//! only a callback whose generation is still current may render, so a
//! superseding open or a popup close turns late callbacks into no-ops.

use crate::config::PageConfig;
use crate::env::{Dom, LatLng, MapSdk, OverlaySpec};
use crate::error::{AppError, Result};
use crate::services::GeocodeCache;
use crate::state::map_session::{MapSessionSlot, RenderedHandles};
use log::{debug, error, info};
use std::sync::{Arc, Mutex};

/// Resolves addresses and renders the map, marker and label overlay.
#[derive(Clone)]
pub struct MapLoader {
    dom: Arc<dyn Dom>,
    sdk: Arc<dyn MapSdk>,
    config: Arc<PageConfig>,
    session: Arc<Mutex<MapSessionSlot>>,
    cache: Arc<Mutex<GeocodeCache>>,
}

impl MapLoader {
    /// Creates a new map loader.
    pub fn new(
        dom: Arc<dyn Dom>,
        sdk: Arc<dyn MapSdk>,
        config: Arc<PageConfig>,
        session: Arc<Mutex<MapSessionSlot>>,
        cache: Arc<Mutex<GeocodeCache>>,
    ) -> Self {
        Self {
            dom,
            sdk,
            config,
            session,
            cache,
        }
    }

    /// Starts loading the map for `address`, labeled `display_name`.
    ///
    /// Fire-and-forget: the result arrives through the SDK callback. With the
    /// SDK absent this fails immediately, shows the unavailable notice and is
    /// not retried.
    pub fn load_map(&self, address: &str, display_name: &str) -> Result<()> {
        if !self.sdk.is_available() {
            error!("mapping SDK is not loaded");
            self.dom.alert(&self.config.map_unavailable_text);
            return Err(AppError::MapUnavailable);
        }

        let generation = self.session.lock().unwrap().begin(address, display_name);

        if let Some(coords) = self.cache.lock().unwrap().get(address) {
            self.apply_resolved(generation, coords);
            return Ok(());
        }

        let loader = self.clone();
        let requested = address.to_string();
        self.sdk.geocode(
            address,
            Box::new(move |result| match result {
                Ok(candidates) => {
                    let Some(coords) = candidates.first().copied() else {
                        loader.report_failure(generation, &requested, "ZERO_RESULT");
                        return;
                    };
                    loader.cache.lock().unwrap().put(requested.clone(), coords);
                    loader.apply_resolved(generation, coords);
                }
                Err(status) => loader.report_failure(generation, &requested, &status),
            }),
        );
        Ok(())
    }

    /// Renders the map for resolved coordinates, provided the session is
    /// still current and the container is still on the page.
    fn apply_resolved(&self, generation: u64, coords: LatLng) {
        let display_name = {
            let mut session = self.session.lock().unwrap();
            if !session.resolve(generation, coords) {
                return;
            }
            session
                .current()
                .map(|s| s.display_name.clone())
                .unwrap_or_default()
        };

        if !self.dom.element_exists(&self.config.map_canvas_id) {
            debug!("map container left the page before rendering");
            return;
        }
        let Some(map) =
            self.sdk
                .render_map(&self.config.map_canvas_id, coords, self.config.map_zoom_level)
        else {
            debug!("map container left the page before rendering");
            return;
        };

        let marker = self.sdk.place_marker(map, coords);
        let overlay = self
            .sdk
            .place_overlay(map, OverlaySpec::label_card(coords, display_name));
        self.session.lock().unwrap().attach(
            generation,
            RenderedHandles {
                map,
                marker,
                overlay,
            },
        );
        info!("map rendered at ({}, {})", coords.lat, coords.lng);
    }

    /// Logs a geocoding failure; the user is alerted only while the failed
    /// session is still the current one.
    fn report_failure(&self, generation: u64, address: &str, status: &str) {
        error!(
            "{}",
            AppError::Geocode {
                address: address.to_string(),
                status: status.to_string(),
            }
        );
        if self.session.lock().unwrap().is_current(generation) {
            self.dom
                .alert(&format!("{}{}", self.config.address_not_found_text, address));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MapLoader;
    use crate::config::PageConfig;
    use crate::env::LatLng;
    use crate::env::fake::{FakeDom, FakeMapSdk};
    use crate::services::GeocodeCache;
    use crate::state::map_session::MapSessionSlot;
    use std::sync::{Arc, Mutex};

    const COORDS: LatLng = LatLng {
        lat: 35.846,
        lng: 127.129,
    };

    struct Fixture {
        dom: Arc<FakeDom>,
        sdk: Arc<FakeMapSdk>,
        session: Arc<Mutex<MapSessionSlot>>,
        loader: MapLoader,
    }

    fn fixture_with(sdk: FakeMapSdk) -> Fixture {
        let config = Arc::new(PageConfig::default());
        let dom = Arc::new(FakeDom::new());
        dom.add_element(&config.map_canvas_id);
        let sdk = Arc::new(sdk);
        let session = Arc::new(Mutex::new(MapSessionSlot::new()));
        let loader = MapLoader::new(
            dom.clone(),
            sdk.clone(),
            config,
            session.clone(),
            Arc::new(Mutex::new(GeocodeCache::new(4))),
        );
        Fixture {
            dom,
            sdk,
            session,
            loader,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(FakeMapSdk::new())
    }

    #[test]
    fn renders_map_marker_and_label_on_success() {
        let f = fixture();
        f.loader.load_map("123 Main St", "Cafe A").unwrap();
        assert!(f.sdk.resolve_next(Ok(vec![COORDS])));

        let maps = f.sdk.maps();
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].container_id, "mapCanvas");
        assert_eq!(maps[0].center, COORDS);
        assert_eq!(maps[0].zoom, 2);
        assert_eq!(f.sdk.markers().len(), 1);

        let overlays = f.sdk.overlays();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].spec.text, "Cafe A");
        assert_eq!(overlays[0].spec.x_anchor, 0.5);
        assert_eq!(overlays[0].spec.y_anchor, 1.0);

        let session = f.session.lock().unwrap();
        assert!(session.current().unwrap().rendered.is_some());
    }

    #[test]
    fn failure_alerts_with_the_address_and_renders_nothing() {
        let f = fixture();
        f.loader.load_map("nowhere 1", "Cafe B").unwrap();
        f.sdk.resolve_next(Err("ERROR".to_string()));

        assert!(f.sdk.maps().is_empty());
        assert_eq!(
            f.dom.alerts(),
            vec!["Address could not be found: nowhere 1".to_string()]
        );
    }

    #[test]
    fn zero_candidates_counts_as_failure() {
        let f = fixture();
        f.loader.load_map("ghost town", "Cafe C").unwrap();
        f.sdk.resolve_next(Ok(vec![]));
        assert!(f.sdk.maps().is_empty());
        assert_eq!(f.dom.alerts().len(), 1);
    }

    #[test]
    fn unavailable_sdk_shows_notice_and_fails_fast() {
        let f = fixture_with(FakeMapSdk::unavailable());
        assert!(f.loader.load_map("123 Main St", "Cafe A").is_err());
        assert_eq!(
            f.dom.alerts(),
            vec!["The map is unavailable. Please try again later.".to_string()]
        );
        assert!(f.sdk.pending_geocodes().is_empty());
    }

    #[test]
    fn superseded_callback_does_not_render() {
        let f = fixture();
        f.loader.load_map("first addr", "First").unwrap();
        f.loader.load_map("second addr", "Second").unwrap();

        // First callback settles late; its generation was superseded.
        f.sdk.resolve_next(Ok(vec![LatLng { lat: 1.0, lng: 2.0 }]));
        assert!(f.sdk.maps().is_empty());

        f.sdk.resolve_next(Ok(vec![COORDS]));
        let maps = f.sdk.maps();
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].center, COORDS);
        assert_eq!(f.sdk.overlays()[0].spec.text, "Second");
    }

    #[test]
    fn superseded_failure_does_not_alert() {
        let f = fixture();
        f.loader.load_map("first addr", "First").unwrap();
        f.loader.load_map("second addr", "Second").unwrap();
        f.sdk.resolve_next(Err("ERROR".to_string()));
        assert!(f.dom.alerts().is_empty());
    }

    #[test]
    fn invalidated_session_ignores_the_callback() {
        let f = fixture();
        f.loader.load_map("addr", "Cafe").unwrap();
        f.session.lock().unwrap().invalidate_pending();
        f.sdk.resolve_next(Ok(vec![COORDS]));
        assert!(f.sdk.maps().is_empty());
    }

    #[test]
    fn missing_container_turns_render_into_a_no_op() {
        let f = fixture();
        f.loader.load_map("addr", "Cafe").unwrap();
        f.dom.remove_element("mapCanvas");
        f.sdk.resolve_next(Ok(vec![COORDS]));
        assert!(f.sdk.maps().is_empty());
        assert!(f.dom.alerts().is_empty());
    }

    #[test]
    fn cached_address_renders_without_a_new_geocode() {
        let f = fixture();
        f.loader.load_map("addr", "Cafe").unwrap();
        f.sdk.resolve_next(Ok(vec![COORDS]));
        assert_eq!(f.sdk.maps().len(), 1);

        // Reopening the popup hits the cache; no second request goes out.
        f.loader.load_map("addr", "Cafe").unwrap();
        assert!(f.sdk.pending_geocodes().is_empty());
        assert_eq!(f.sdk.maps().len(), 2);
    }
}
