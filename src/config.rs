//! Page configuration: the DOM contract, route paths, query keys and timings.
//!
//! Defaults mirror what the site's pages actually ship; a host can override
//! individual fields from a JSON blob.

use crate::error::Result;
use serde::Deserialize;

/// Configuration shared by every page of the site.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Dropdown on the landing page where the university is chosen.
    pub university_select_id: String,
    /// Inline warning banner shown when navigation needs a selection.
    pub university_alert_id: String,
    /// Hidden form field that receives the selection on submit.
    pub university_hidden_id: String,
    /// Dropdown on the list page used to switch universities.
    pub university_change_select_id: String,
    /// Root element of the map popup.
    pub map_popup_id: String,
    /// Text line inside the map popup showing the address.
    pub popup_address_id: String,
    /// Container element the map renders into.
    pub map_canvas_id: String,
    /// Root element of the info/menu popup.
    pub menu_popup_id: String,

    /// Restaurant list route.
    pub main_list_path: String,
    /// Weather selection route.
    pub weather_select_path: String,
    /// Fortune route.
    pub fortune_path: String,
    /// Query key carrying the chosen emotion.
    pub emotion_param: String,
    /// Query key carrying the chosen university.
    pub location_param: String,

    /// How long the selection warning stays visible, in milliseconds.
    pub warning_hide_ms: u64,
    /// Map zoom level on a 1-14 scale; smaller is more zoomed in.
    pub map_zoom_level: u8,

    /// Address line fallback when a restaurant has no address.
    pub no_address_text: String,
    /// Notice shown when the mapping SDK is not loaded.
    pub map_unavailable_text: String,
    /// Prefix of the notice naming an address that could not be resolved.
    pub address_not_found_text: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            university_select_id: "universitySelect".to_string(),
            university_alert_id: "universityAlert".to_string(),
            university_hidden_id: "universityHidden".to_string(),
            university_change_select_id: "universityChangeSelect".to_string(),
            map_popup_id: "mapPopup".to_string(),
            popup_address_id: "popupAddress".to_string(),
            map_canvas_id: "mapCanvas".to_string(),
            menu_popup_id: "menuPopup".to_string(),
            main_list_path: "/main_list".to_string(),
            weather_select_path: "/weather_select".to_string(),
            fortune_path: "/fortune".to_string(),
            emotion_param: "emotion".to_string(),
            location_param: "location".to_string(),
            warning_hide_ms: 3000,
            map_zoom_level: 2,
            no_address_text: "no address available".to_string(),
            map_unavailable_text: "The map is unavailable. Please try again later.".to_string(),
            address_not_found_text: "Address could not be found: ".to_string(),
        }
    }
}

impl PageConfig {
    /// Parses a configuration from JSON; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::PageConfig;

    #[test]
    fn defaults_match_the_page_contract() {
        let config = PageConfig::default();
        assert_eq!(config.university_select_id, "universitySelect");
        assert_eq!(config.main_list_path, "/main_list");
        assert_eq!(config.warning_hide_ms, 3000);
        assert_eq!(config.map_zoom_level, 2);
    }

    #[test]
    fn json_overrides_keep_unspecified_defaults() {
        let config =
            PageConfig::from_json(r#"{"warning_hide_ms": 5000, "fortune_path": "/luck"}"#).unwrap();
        assert_eq!(config.warning_hide_ms, 5000);
        assert_eq!(config.fortune_path, "/luck");
        assert_eq!(config.location_param, "location");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(PageConfig::from_json("{warning_hide_ms:").is_err());
    }
}
