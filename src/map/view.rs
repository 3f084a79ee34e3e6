//! The interactive map: renders session state and reports clicks back.
//!
//! Owns no analysis state of its own. Clicks become candidate locations
//! fed into the session (auto-starting a run when the staged draft
//! validates); a single overlay group is rebuilt from the session state
//! whenever the result, selection or layer visibility changes.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::AppConfig;
use crate::geometry::{reduce, DisplayPoint};
use crate::model::{Location, RequestDraft};
use crate::session::{AnalysisSession, SessionStatus, LAYER_BURN_SEVERITY};

use super::leaflet;

const MAP_CONTAINER_ID: &str = "burnmap-map";

struct MapHandles {
    overlay: leaflet::LayerGroup,
}

#[component]
pub fn MapView(config: AppConfig, draft: RwSignal<RequestDraft>) -> impl IntoView {
    let session = expect_context::<AnalysisSession>();
    let handles: StoredValue<Option<MapHandles>, LocalStorage> = StoredValue::new_local(None);

    // Initialize Leaflet once the container div is in the DOM.
    Effect::new(move |_| {
        if handles.with_value(Option::is_some) {
            return;
        }

        let map = leaflet::new_map(MAP_CONTAINER_ID);
        map.set_view(
            &leaflet::lat_lng(config.initial_center.latitude, config.initial_center.longitude),
            config.initial_zoom,
        );

        let tile_options = to_js_options(&leaflet::TileLayerOptions {
            attribution: config.tile_attribution.clone(),
        });
        leaflet::new_tile_layer(&config.tile_url, &tile_options).add_to(&map);

        let overlay = leaflet::new_layer_group();
        overlay.add_to(&map);

        let on_click = Closure::<dyn FnMut(leaflet::LeafletMouseEvent)>::new(
            move |event: leaflet::LeafletMouseEvent| {
                let latlng = event.latlng();
                let location = Location::new(latlng.lat(), latlng.lng());
                session.select_location(location);
                // Auto-start when the staged dates already form a valid request.
                if let Ok(request) = draft.get_untracked().to_request(location) {
                    session.run_analysis(request);
                }
            },
        );
        map.on("click", on_click.as_ref().unchecked_ref());
        // The map lives for the whole page; leaking the handler is fine.
        on_click.forget();

        handles.set_value(Some(MapHandles { overlay }));
    });

    // Rebuild the overlay from session state.
    Effect::new(move |_| {
        let state = session.state().get();
        handles.with_value(|h| {
            let Some(h) = h else { return };
            h.overlay.clear_layers();

            if let Some(location) = state.selected_location {
                let pin = leaflet::new_marker(&leaflet::lat_lng(
                    location.latitude,
                    location.longitude,
                ));
                pin.bind_popup(&format!(
                    "Selected point<br>{:.4}, {:.4}",
                    location.latitude, location.longitude
                ));
                pin.add_to(&h.overlay);
            }

            if state.layer_visible(LAYER_BURN_SEVERITY) {
                if let Some(result) = &state.result {
                    for point in reduce(result.burn_severity_polygons.as_ref()) {
                        add_severity_marker(&h.overlay, &point);
                    }
                }
            }
        });
    });

    view! {
        <div class="map-wrap">
            <div id=MAP_CONTAINER_ID class="map-container"></div>
            <Show when=move || session.state().get().status == SessionStatus::Running>
                <div class="map-blocker">
                    <div class="spinner"></div>
                    <p>"Running burn-severity analysis…"</p>
                    <p class="hint">"Satellite processing can take several minutes"</p>
                </div>
            </Show>
        </div>
    }
}

fn add_severity_marker(overlay: &leaflet::LayerGroup, point: &DisplayPoint) {
    let options = to_js_options(&leaflet::CircleMarkerOptions {
        radius: 6.0,
        color: point.severity.color().to_string(),
        fill_color: point.severity.color().to_string(),
        fill_opacity: 0.7,
        weight: 1.0,
    });

    let marker = leaflet::new_circle_marker(
        &leaflet::lat_lng(point.position.latitude, point.position.longitude),
        &options,
    );
    let area = point
        .area
        .map(|a| format!("<br>{a:.2} km²"))
        .unwrap_or_default();
    marker.bind_popup(&format!("<b>{}</b>{}", point.severity.label(), area));
    marker.add_to(overlay);
}

/// Serialize an options struct for the JS boundary, degrading to
/// `undefined` (Leaflet's defaults) if serialization ever fails.
fn to_js_options<T: serde::Serialize>(options: &T) -> JsValue {
    serde_wasm_bindgen::to_value(options).unwrap_or_else(|e| {
        web_sys::console::warn_1(&format!("Could not build layer options: {e}").into());
        JsValue::UNDEFINED
    })
}
