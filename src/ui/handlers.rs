//! Event handlers for UI callbacks.
//!
//! The host page forwards its control events as [`UiEvent`]s and
//! [`PageHandlers`] routes each one to the owning service, mirroring the
//! page's onclick/onchange wiring. Handlers run to completion; deferred work
//! (timers, geocode callbacks) comes back through the injected capabilities.

use crate::config::PageConfig;
use crate::env::{Dom, MapSdk, Navigator, Scheduler};
use crate::services::{MapLoader, NavigationService, SelectionGuard};
use crate::state::PageState;
use crate::ui::popup::{PopupController, PopupKind};
use log::debug;
use std::sync::Arc;

/// Events the page controls can deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// An emotion button was clicked, carrying the emotion label.
    EmotionSelected(String),
    /// The weather button was clicked.
    WeatherRequested,
    /// The fortune button was clicked.
    FortuneRequested,
    /// The location-change dropdown fired its change event.
    LocationChanged,
    /// A restaurant's map link was clicked.
    MapPopupRequested {
        address: String,
        display_name: String,
    },
    /// The map popup's close control was clicked.
    MapPopupClosed,
    /// The info/menu popup was requested.
    MenuPopupRequested,
    /// The info/menu popup's close control was clicked.
    MenuPopupClosed,
    /// The selection form is about to submit.
    SubmissionRequested,
}

/// Routes page events to the services that implement them.
#[derive(Clone)]
pub struct PageHandlers {
    dom: Arc<dyn Dom>,
    config: Arc<PageConfig>,
    guard: SelectionGuard,
    navigation: NavigationService,
    popups: PopupController,
}

impl PageHandlers {
    /// Wires every service against the injected capabilities.
    pub fn new(
        dom: Arc<dyn Dom>,
        navigator: Arc<dyn Navigator>,
        scheduler: Arc<dyn Scheduler>,
        sdk: Arc<dyn MapSdk>,
        config: Arc<PageConfig>,
        state: &PageState,
    ) -> Self {
        let guard = SelectionGuard::new(
            dom.clone(),
            scheduler,
            config.clone(),
            state.warning_timer.clone(),
        );
        let navigation = NavigationService::new(navigator, guard.clone(), config.clone());
        let map_loader = MapLoader::new(
            dom.clone(),
            sdk,
            config.clone(),
            state.map_session.clone(),
            state.geocode_cache.clone(),
        );
        let popups = PopupController::new(
            dom.clone(),
            config.clone(),
            map_loader,
            state.map_session.clone(),
        );

        Self {
            dom,
            config,
            guard,
            navigation,
            popups,
        }
    }

    /// Handles one UI event.
    ///
    /// Returns whether a gated submission may proceed; every other event
    /// answers `true`.
    pub fn handle(&self, event: UiEvent) -> bool {
        debug!("ui event: {:?}", event);
        match event {
            UiEvent::EmotionSelected(emotion) => {
                self.navigation.select_emotion(&emotion);
                true
            }
            UiEvent::WeatherRequested => {
                self.navigation.select_weather();
                true
            }
            UiEvent::FortuneRequested => {
                self.navigation.select_fortune();
                true
            }
            UiEvent::LocationChanged => {
                let selected = self
                    .dom
                    .value(&self.config.university_change_select_id)
                    .unwrap_or_default();
                self.navigation.change_location(&selected);
                true
            }
            UiEvent::MapPopupRequested {
                address,
                display_name,
            } => {
                self.popups.open_map(&address, &display_name);
                true
            }
            UiEvent::MapPopupClosed => {
                self.popups.close(PopupKind::Map);
                true
            }
            UiEvent::MenuPopupRequested => {
                // Missing element is logged inside open; nothing else to do.
                let _ = self.popups.open(PopupKind::Menu);
                true
            }
            UiEvent::MenuPopupClosed => {
                self.popups.close(PopupKind::Menu);
                true
            }
            UiEvent::SubmissionRequested => self.guard.gate_submission(),
        }
    }

    /// The popup controller, for hosts that bind popups separately.
    pub fn popups(&self) -> &PopupController {
        &self.popups
    }

    /// The navigation service.
    pub fn navigation(&self) -> &NavigationService {
        &self.navigation
    }

    /// The selection guard.
    pub fn guard(&self) -> &SelectionGuard {
        &self.guard
    }
}
