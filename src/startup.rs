//! Page-ready bootstrap.
//!
//! One script is shared across every page, so each widget is probed for and
//! silently skipped when the current page does not carry it. This runs once
//! at load and does not subscribe to later URL changes.

use crate::config::PageConfig;
use crate::env::{Dom, Navigator};
use crate::query::QueryString;
use log::{debug, info};

/// Runs the one-time page-ready initialization.
pub fn on_page_ready(dom: &dyn Dom, navigator: &dyn Navigator, config: &PageConfig) {
    info!("page ready");
    init_location_dropdown(dom, navigator, config);
}

/// Mirrors the current `location` query value into the location-change
/// dropdown, on pages that have one.
fn init_location_dropdown(dom: &dyn Dom, navigator: &dyn Navigator, config: &PageConfig) {
    if !dom.element_exists(&config.university_change_select_id) {
        debug!("no location dropdown on this page");
        return;
    }

    let query = QueryString::parse(&navigator.current_query());
    match query.get(&config.location_param) {
        Some(location) if !location.is_empty() => {
            dom.set_value(&config.university_change_select_id, location);
            debug!("location dropdown restored to {}", location);
        }
        _ => debug!("no location in the current query"),
    }
}
