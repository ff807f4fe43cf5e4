//! Popup lifecycle controller.
//!
//! Popups are DOM content already present on the page; opening and closing
//! toggles the "active" marker, and both operations are idempotent. The map
//! popup and the info/menu popup are independent and may coexist.

use crate::config::PageConfig;
use crate::env::Dom;
use crate::error::{AppError, Result};
use crate::services::MapLoader;
use crate::state::map_session::MapSessionSlot;
use log::{debug, error, warn};
use std::sync::{Arc, Mutex};

/// Named overlays managed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Map,
    Menu,
}

impl PopupKind {
    fn element_id<'a>(&self, config: &'a PageConfig) -> &'a str {
        match self {
            PopupKind::Map => &config.map_popup_id,
            PopupKind::Menu => &config.menu_popup_id,
        }
    }
}

/// Opens and closes the page's modal overlays.
#[derive(Clone)]
pub struct PopupController {
    dom: Arc<dyn Dom>,
    config: Arc<PageConfig>,
    map_loader: MapLoader,
    session: Arc<Mutex<MapSessionSlot>>,
}

impl PopupController {
    /// Creates a new popup controller.
    pub fn new(
        dom: Arc<dyn Dom>,
        config: Arc<PageConfig>,
        map_loader: MapLoader,
        session: Arc<Mutex<MapSessionSlot>>,
    ) -> Self {
        Self {
            dom,
            config,
            map_loader,
            session,
        }
    }

    /// Opens a popup. Opening an already-open popup is a no-op; a missing
    /// element is logged and left alone.
    pub fn open(&self, kind: PopupKind) -> Result<()> {
        let id = kind.element_id(&self.config);
        if !self.dom.element_exists(id) {
            error!("popup element not found: {}", id);
            return Err(AppError::ElementMissing(id.to_string()));
        }
        self.dom.set_active(id, true);
        debug!("popup opened: {}", id);
        Ok(())
    }

    /// Opens the map popup for an address and kicks off the map load.
    ///
    /// The address line falls back to a fixed literal when no address is
    /// available. Map loading is fire-and-forget; this never waits for
    /// rendering to complete.
    pub fn open_map(&self, address: &str, display_name: &str) {
        if self.open(PopupKind::Map).is_err() {
            return;
        }

        let line = if address.is_empty() {
            self.config.no_address_text.as_str()
        } else {
            address
        };
        self.dom.set_text(&self.config.popup_address_id, line);

        if let Err(e) = self.map_loader.load_map(address, display_name) {
            warn!("map load failed: {}", e);
        }
    }

    /// Closes a popup. Closing an already-closed or missing popup is a no-op.
    ///
    /// Map session data survives a close, but the pending generation is
    /// invalidated so an in-flight geocode callback cannot render into the
    /// closed popup; the next open triggers a full reload.
    pub fn close(&self, kind: PopupKind) {
        let id = kind.element_id(&self.config);
        if !self.dom.element_exists(id) {
            debug!("close ignored, popup element not found: {}", id);
            return;
        }
        self.dom.set_active(id, false);
        if kind == PopupKind::Map {
            self.session.lock().unwrap().invalidate_pending();
        }
        debug!("popup closed: {}", id);
    }
}
