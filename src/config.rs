//! Client configuration.
//!
//! Compiled-in defaults, with the analysis service base URL overridable
//! from the page query string (`?api=http://host:port`) so a deployed
//! bundle can point at a different pipeline without rebuilding.

use crate::model::Location;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the remote analysis service.
    pub api_base_url: String,
    /// Tile URL template handed to the map library.
    pub tile_url: String,
    pub tile_attribution: String,
    pub initial_center: Location,
    pub initial_zoom: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from("http://localhost:8000"),
            tile_url: String::from("https://tile.openstreetmap.org/{z}/{x}/{y}.png"),
            tile_attribution: String::from("© OpenStreetMap contributors"),
            // Continental US, wide view.
            initial_center: Location::new(39.8, -98.6),
            initial_zoom: 5.0,
        }
    }
}

impl AppConfig {
    /// Defaults plus any query-string overrides from the current page.
    pub fn from_window() -> Self {
        let mut config = Self::default();
        if let Some(api) = query_param("api") {
            if !api.trim().is_empty() {
                config.api_base_url = api;
            }
        }
        config
    }
}

fn query_param(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_usable() {
        let config = AppConfig::default();
        assert!(config.api_base_url.starts_with("http"));
        assert!(config.tile_url.contains("{z}"));
        assert!(config.initial_zoom > 0.0);
    }
}
