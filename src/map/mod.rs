//! Leaflet-backed map adapter.

mod leaflet;
mod view;

pub use view::MapView;
