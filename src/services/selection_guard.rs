//! Selection guard and form gate for the required university choice.
//!
//! Navigation and submission that depend on a chosen university must not
//! proceed while the selection is empty; rejection surfaces a transient
//! inline warning instead of an error.

use crate::config::PageConfig;
use crate::env::{Dom, Scheduler, TimerId};
use log::debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Guards navigation and submission on a non-empty university selection.
#[derive(Clone)]
pub struct SelectionGuard {
    dom: Arc<dyn Dom>,
    scheduler: Arc<dyn Scheduler>,
    config: Arc<PageConfig>,
    pending_hide: Arc<Mutex<Option<TimerId>>>,
}

impl SelectionGuard {
    /// Creates a new guard around the shared warning-timer slot.
    pub fn new(
        dom: Arc<dyn Dom>,
        scheduler: Arc<dyn Scheduler>,
        config: Arc<PageConfig>,
        pending_hide: Arc<Mutex<Option<TimerId>>>,
    ) -> Self {
        Self {
            dom,
            scheduler,
            config,
            pending_hide,
        }
    }

    fn selected_value(&self) -> Option<String> {
        // A missing control and a selected empty string are both "absent".
        self.dom
            .value(&self.config.university_select_id)
            .filter(|value| !value.is_empty())
    }

    /// Returns the selected university, or rejects: warning shown, auto-hide
    /// scheduled, viewport scrolled to the selection control.
    pub fn ensure_selected(&self) -> Option<String> {
        match self.selected_value() {
            Some(value) => Some(value),
            None => {
                debug!("navigation blocked: no university selected");
                self.flash_warning();
                self.dom
                    .scroll_into_view(&self.config.university_select_id);
                None
            }
        }
    }

    /// Shows the warning banner and schedules its auto-hide.
    ///
    /// One timer is owned at a time: scheduling cancels any pending hide, so
    /// an earlier timer can never hide a later warning prematurely.
    pub fn flash_warning(&self) {
        self.dom
            .set_visible(&self.config.university_alert_id, true);

        let mut pending = self.pending_hide.lock().unwrap();
        if let Some(previous) = pending.take() {
            self.scheduler.cancel(previous);
        }

        let dom = self.dom.clone();
        let alert_id = self.config.university_alert_id.clone();
        let slot = self.pending_hide.clone();
        let timer = self.scheduler.schedule(
            Duration::from_millis(self.config.warning_hide_ms),
            Box::new(move || {
                dom.set_visible(&alert_id, false);
                *slot.lock().unwrap() = None;
            }),
        );
        *pending = Some(timer);
    }

    /// Form gate: blocks submission without a selection, otherwise copies the
    /// value into the hidden field consumed by the normal submission path.
    ///
    /// `false` means the caller must abort the submission.
    pub fn gate_submission(&self) -> bool {
        let Some(value) = self.selected_value() else {
            debug!("submission blocked: no university selected");
            self.flash_warning();
            return false;
        };
        self.dom
            .set_value(&self.config.university_hidden_id, &value);
        true
    }
}
