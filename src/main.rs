//! Demo driver: scripts a short page session against the in-memory
//! environment so the behavior layer can be watched through its logs.

use campus_eats_page::env::fake::{FakeDom, FakeMapSdk, FakeNavigator, FakeScheduler};
use campus_eats_page::env::{Dom, LatLng};
use campus_eats_page::{PageConfig, PageHandlers, PageState, UiEvent};
use std::sync::Arc;

fn main() {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let config = Arc::new(PageConfig::default());
    let dom = Arc::new(FakeDom::new());
    for id in [
        &config.university_select_id,
        &config.university_alert_id,
        &config.university_change_select_id,
        &config.map_popup_id,
        &config.popup_address_id,
        &config.map_canvas_id,
        &config.menu_popup_id,
    ] {
        dom.add_element(id);
    }

    let navigator = Arc::new(FakeNavigator::new(
        "/main_list",
        "emotion=%ED%9D%AC&location=JBNU",
    ));
    let scheduler = Arc::new(FakeScheduler::new());
    let sdk = Arc::new(FakeMapSdk::new());
    let state = PageState::new();

    campus_eats_page::startup::on_page_ready(dom.as_ref(), navigator.as_ref(), &config);

    let handlers = PageHandlers::new(
        dom.clone(),
        navigator.clone(),
        scheduler.clone(),
        sdk.clone(),
        config.clone(),
        &state,
    );

    // A visitor opens the map popup for a restaurant and closes it again.
    handlers.handle(UiEvent::MapPopupRequested {
        address: "전북 전주시 덕진구 백제대로 567".to_string(),
        display_name: "Cafe Onyul".to_string(),
    });
    sdk.resolve_next(Ok(vec![LatLng {
        lat: 35.846,
        lng: 127.129,
    }]));
    handlers.handle(UiEvent::MapPopupClosed);

    // An emotion click without a selection trips the guard, then succeeds.
    handlers.handle(UiEvent::EmotionSelected("희".to_string()));
    scheduler.fire_all();
    dom.set_value(&config.university_select_id, "전북대");
    handlers.handle(UiEvent::EmotionSelected("희".to_string()));

    for url in navigator.navigations() {
        println!("navigated: {}", url);
    }
}
