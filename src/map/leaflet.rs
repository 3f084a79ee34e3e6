//! Minimal Leaflet bindings for the map view.
//!
//! Leaflet is loaded globally by `index.html`; these extern blocks expose
//! just the surface the client touches. Option objects cross the boundary
//! as serde structs, same as the rest of the JS interop.

use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `L.Map`
    pub type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn new_map(container_id: &str) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64);

    #[wasm_bindgen(method)]
    pub fn on(this: &LeafletMap, event: &str, handler: &js_sys::Function);
}

#[wasm_bindgen]
extern "C" {
    /// `L.TileLayer`
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn new_tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayer, map: &LeafletMap);
}

#[wasm_bindgen]
extern "C" {
    /// `L.LayerGroup` — the overlay holding all markers, cleared on redraw.
    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn new_layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &LayerGroup, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = clearLayers)]
    pub fn clear_layers(this: &LayerGroup);
}

#[wasm_bindgen]
extern "C" {
    /// `L.CircleMarker` — severity display points.
    pub type CircleMarker;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    pub fn new_circle_marker(latlng: &JsValue, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &CircleMarker, group: &LayerGroup);

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &CircleMarker, html: &str);
}

#[wasm_bindgen]
extern "C" {
    /// `L.Marker` — the selected-location pin.
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn new_marker(latlng: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Marker, group: &LayerGroup);

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, html: &str);
}

#[wasm_bindgen]
extern "C" {
    /// Click event payload.
    pub type LeafletMouseEvent;

    #[wasm_bindgen(method, getter)]
    pub fn latlng(this: &LeafletMouseEvent) -> LatLng;

    pub type LatLng;

    #[wasm_bindgen(method, getter)]
    pub fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn lng(this: &LatLng) -> f64;
}

/// Leaflet accepts `[lat, lng]` arrays wherever a LatLng is expected.
pub fn lat_lng(lat: f64, lng: f64) -> JsValue {
    let pair = js_sys::Array::new();
    pair.push(&JsValue::from_f64(lat));
    pair.push(&JsValue::from_f64(lng));
    pair.into()
}

/// Options for `L.tileLayer`.
#[derive(Debug, Serialize)]
pub struct TileLayerOptions {
    pub attribution: String,
}

/// Options for `L.circleMarker`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMarkerOptions {
    pub radius: f64,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub weight: f64,
}
