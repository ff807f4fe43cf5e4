//! Query-state navigation between pages.
//!
//! Builds redirect URLs that carry the emotion and location query state, and
//! rewrites the location key of the current query while preserving every
//! other key verbatim.

use crate::config::PageConfig;
use crate::env::Navigator;
use crate::query::{QueryString, encode_component};
use crate::services::SelectionGuard;
use log::{debug, info};
use std::sync::Arc;

/// High-level navigation operations triggered by page controls.
#[derive(Clone)]
pub struct NavigationService {
    navigator: Arc<dyn Navigator>,
    guard: SelectionGuard,
    config: Arc<PageConfig>,
}

impl NavigationService {
    /// Creates a new navigation service.
    pub fn new(
        navigator: Arc<dyn Navigator>,
        guard: SelectionGuard,
        config: Arc<PageConfig>,
    ) -> Self {
        Self {
            navigator,
            guard,
            config,
        }
    }

    /// Emotion button: requires a selected university, then redirects to the
    /// restaurant list carrying both the emotion and the location.
    pub fn select_emotion(&self, emotion: &str) {
        let Some(university) = self.guard.ensure_selected() else {
            return;
        };
        let url = format!(
            "{}?{}={}&{}={}",
            self.config.main_list_path,
            self.config.emotion_param,
            encode_component(emotion),
            self.config.location_param,
            encode_component(&university),
        );
        info!("navigating to {}", url);
        self.navigator.navigate(&url);
    }

    /// Weather button: unguarded redirect; the weather page carries its own
    /// university selection.
    pub fn select_weather(&self) {
        info!("navigating to {}", self.config.weather_select_path);
        self.navigator.navigate(&self.config.weather_select_path);
    }

    /// Fortune button: requires a selected university, then redirects with
    /// only the location parameter.
    pub fn select_fortune(&self) {
        let Some(university) = self.guard.ensure_selected() else {
            return;
        };
        let url = format!(
            "{}?{}={}",
            self.config.fortune_path,
            self.config.location_param,
            encode_component(&university),
        );
        info!("navigating to {}", url);
        self.navigator.navigate(&url);
    }

    /// Rewrites only the location key of the current query string and reloads
    /// the current path with it. Empty input is a no-op.
    pub fn change_location(&self, new_location: &str) {
        if new_location.is_empty() {
            debug!("location change ignored: nothing selected");
            return;
        }

        let mut query = QueryString::parse(&self.navigator.current_query());
        debug!("query before location change: {}", query.to_query());
        query.set(&self.config.location_param, new_location);
        debug!("query after location change: {}", query.to_query());

        let url = format!("{}?{}", self.navigator.current_path(), query.to_query());
        info!("reloading with updated location: {}", url);
        self.navigator.navigate(&url);
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationService;
    use crate::config::PageConfig;
    use crate::env::Dom;
    use crate::env::fake::{FakeDom, FakeNavigator, FakeScheduler};
    use crate::query::QueryString;
    use crate::services::SelectionGuard;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn service_fixture(
        path: &str,
        query: &str,
    ) -> (Arc<FakeDom>, Arc<FakeNavigator>, NavigationService) {
        let config = Arc::new(PageConfig::default());
        let dom = Arc::new(FakeDom::new());
        dom.add_element(&config.university_select_id);
        dom.add_element(&config.university_alert_id);
        let navigator = Arc::new(FakeNavigator::new(path, query));
        let guard = SelectionGuard::new(
            dom.clone(),
            Arc::new(FakeScheduler::new()),
            config.clone(),
            Arc::new(Mutex::new(None)),
        );
        let service = NavigationService::new(navigator.clone(), guard, config);
        (dom, navigator, service)
    }

    #[test]
    fn emotion_redirect_carries_emotion_and_encoded_location() {
        let (dom, navigator, service) = service_fixture("/", "");
        dom.set_value("universitySelect", "전북대");
        service.select_emotion("희");
        assert_eq!(
            navigator.last_navigation().as_deref(),
            Some("/main_list?emotion=%ED%9D%AC&location=%EC%A0%84%EB%B6%81%EB%8C%80"),
        );
    }

    #[test]
    fn emotion_without_selection_does_not_navigate() {
        let (dom, navigator, service) = service_fixture("/", "");
        service.select_emotion("락");
        assert!(navigator.navigations().is_empty());
        assert!(dom.element("universityAlert").unwrap().visible);
    }

    #[test]
    fn weather_redirect_is_unguarded() {
        let (_, navigator, service) = service_fixture("/", "");
        service.select_weather();
        assert_eq!(
            navigator.last_navigation().as_deref(),
            Some("/weather_select")
        );
    }

    #[test]
    fn fortune_redirect_carries_only_the_location() {
        let (dom, navigator, service) = service_fixture("/", "");
        dom.set_value("universitySelect", "JBNU");
        service.select_fortune();
        assert_eq!(
            navigator.last_navigation().as_deref(),
            Some("/fortune?location=JBNU")
        );
    }

    #[test]
    fn change_location_preserves_unrelated_keys() {
        let (_, navigator, service) = service_fixture("/main_list", "a=1&location=X&b=2");
        service.change_location("Y");

        let url = navigator.last_navigation().unwrap();
        let (path, query) = url.split_once('?').unwrap();
        assert_eq!(path, "/main_list");
        assert_eq!(query, "a=1&location=Y&b=2");

        let reparsed = QueryString::parse(query);
        assert_eq!(reparsed.get("a"), Some("1"));
        assert_eq!(reparsed.get("b"), Some("2"));
        assert_eq!(reparsed.get("location"), Some("Y"));
    }

    #[test]
    fn change_location_appends_when_key_was_absent() {
        let (_, navigator, service) = service_fixture("/main_list", "emotion=joy");
        service.change_location("JBNU");
        assert_eq!(
            navigator.last_navigation().as_deref(),
            Some("/main_list?emotion=joy&location=JBNU")
        );
    }

    #[test]
    fn change_location_with_empty_value_is_a_no_op() {
        let (_, navigator, service) = service_fixture("/main_list", "a=1&location=X");
        service.change_location("");
        assert!(navigator.navigations().is_empty());
    }
}
