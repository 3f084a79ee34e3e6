//! Core data types shared by the session, the analysis client and the map.
//!
//! Wire-facing structs serialize with camelCase keys to match the analysis
//! service contract; dates travel as `YYYY-MM-DD` strings via chrono.

use std::collections::HashMap;

use chrono::NaiveDate;
use geojson::GeoJson;
use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Buffer radius applied around the selected point when none is given.
pub const DEFAULT_BUFFER_KM: f64 = 5.0;

/// A geographic point in WGS84 decimal degrees.
///
/// Immutable value; a new selection replaces it wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in [-90, 90].
    pub latitude: f64,
    /// Longitude in [-180, 180].
    pub longitude: f64,
}

impl Location {
    /// Build a location from raw map coordinates.
    ///
    /// Latitude is clamped to [-90, 90]. Longitude is wrapped into
    /// [-180, 180) because panning across the antimeridian makes Leaflet
    /// report longitudes like 245 or -560.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let longitude = ((longitude + 180.0).rem_euclid(360.0)) - 180.0;
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude,
        }
    }
}

/// Parameters for one burn-severity analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub location: Location,
    pub pre_fire_date: NaiveDate,
    pub post_fire_date: NaiveDate,
    pub buffer_km: f64,
}

impl AnalysisRequest {
    pub fn new(location: Location, pre_fire_date: NaiveDate, post_fire_date: NaiveDate) -> Self {
        Self {
            location,
            pre_fire_date,
            post_fire_date,
            buffer_km: DEFAULT_BUFFER_KM,
        }
    }
}

/// Burned area per severity class, in km².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnSeverityStats {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
    pub very_high: f64,
    pub extreme: f64,
}

impl BurnSeverityStats {
    /// Sum of the five buckets; should agree with `total_burned_area`
    /// up to rounding done by the service.
    pub fn total(&self) -> f64 {
        self.low + self.moderate + self.high + self.very_high + self.extreme
    }

    /// Area attributed to one severity class; `Unknown` has no bucket.
    pub fn bucket(&self, class: Severity) -> f64 {
        match class {
            Severity::Low => self.low,
            Severity::Moderate => self.moderate,
            Severity::High => self.high,
            Severity::VeryHigh => self.very_high,
            Severity::Extreme => self.extreme,
            Severity::Unknown => 0.0,
        }
    }
}

/// Normalized Burn Ratio indices computed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NbrStats {
    pub pre_fire_avg: f64,
    pub post_fire_avg: f64,
    pub avg_delta: f64,
    pub max_delta: f64,
}

/// Immutable snapshot returned by the analysis service.
///
/// Owned by the session once received; never mutated, only replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub latitude: f64,
    pub longitude: f64,
    pub pre_fire_date: NaiveDate,
    pub post_fire_date: NaiveDate,
    /// Upstream imagery source label, e.g. "Sentinel-2 (COPERNICUS/S2_SR)".
    pub data_source: String,
    /// Total burned area in km², ≥ 0.
    pub total_burned_area: f64,
    pub burn_severity_stats: BurnSeverityStats,
    pub nbr_stats: NbrStats,
    /// Named opaque image locators (URLs or paths), displayed verbatim.
    #[serde(default)]
    pub images: HashMap<String, String>,
    /// Raw severity geometry, when the service includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_severity_polygons: Option<GeoJson>,
}

/// User-entered analysis parameters as staged in the UI.
///
/// Raw strings from the date and buffer inputs; converted to a typed
/// request once a location has been selected and the fields validate.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDraft {
    pub pre_fire_date: String,
    pub post_fire_date: String,
    pub buffer_km: String,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            pre_fire_date: String::from("2023-06-01"),
            post_fire_date: String::from("2023-08-01"),
            buffer_km: format!("{DEFAULT_BUFFER_KM}"),
        }
    }
}

impl RequestDraft {
    /// Validate the staged fields and build a request for `location`.
    ///
    /// Requires both dates to parse, the pre-fire date to precede the
    /// post-fire date, and a finite positive buffer. The error string is
    /// meant for direct display next to the inputs.
    pub fn to_request(&self, location: Location) -> Result<AnalysisRequest, String> {
        let pre_fire_date = parse_date(&self.pre_fire_date, "pre-fire date")?;
        let post_fire_date = parse_date(&self.post_fire_date, "post-fire date")?;
        if pre_fire_date >= post_fire_date {
            return Err(String::from(
                "The pre-fire date must be before the post-fire date",
            ));
        }

        let buffer_km: f64 = self
            .buffer_km
            .trim()
            .parse()
            .map_err(|_| format!("Invalid buffer radius: {}", self.buffer_km))?;
        if !buffer_km.is_finite() || buffer_km <= 0.0 {
            return Err(String::from("Buffer radius must be a positive number"));
        }

        Ok(AnalysisRequest {
            location,
            pre_fire_date,
            post_fire_date,
            buffer_km,
        })
    }
}

fn parse_date(raw: &str, label: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(format!("Missing {label}"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| format!("Invalid {label}: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_location_clamps_latitude() {
        let loc = Location::new(123.0, 10.0);
        assert_eq!(loc.latitude, 90.0);
        let loc = Location::new(-95.5, 10.0);
        assert_eq!(loc.latitude, -90.0);
    }

    #[test]
    fn test_location_wraps_longitude() {
        let loc = Location::new(0.0, 245.0);
        assert!((loc.longitude - -115.0).abs() < 1e-9, "got {}", loc.longitude);
        let loc = Location::new(0.0, -560.0);
        assert!((loc.longitude - 160.0).abs() < 1e-9, "got {}", loc.longitude);
        let loc = Location::new(0.0, -122.4194);
        assert!((loc.longitude - -122.4194).abs() < 1e-9);
    }

    #[test]
    fn test_request_serializes_to_wire_shape() {
        let request = AnalysisRequest::new(
            Location::new(37.7749, -122.4194),
            date("2023-06-01"),
            date("2023-08-01"),
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["latitude"], 37.7749);
        assert_eq!(json["longitude"], -122.4194);
        assert_eq!(json["preFireDate"], "2023-06-01");
        assert_eq!(json["postFireDate"], "2023-08-01");
        assert_eq!(json["bufferKm"], 5.0);
    }

    #[test]
    fn test_result_deserializes_without_optional_fields() {
        let json = r#"{
            "latitude": 37.7749,
            "longitude": -122.4194,
            "preFireDate": "2023-06-01",
            "postFireDate": "2023-08-01",
            "dataSource": "Sentinel-2 (COPERNICUS/S2_SR)",
            "totalBurnedArea": 42.75,
            "burnSeverityStats": {
                "low": 12.5, "moderate": 15.3, "high": 8.7,
                "veryHigh": 4.2, "extreme": 2.05
            },
            "nbrStats": {
                "preFireAvg": 0.41, "postFireAvg": 0.12,
                "avgDelta": 0.29, "maxDelta": 0.66
            }
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_burned_area, 42.75);
        assert!(result.images.is_empty());
        assert!(result.burn_severity_polygons.is_none());
        assert!((result.burn_severity_stats.total() - 42.75).abs() < 0.01);
    }

    #[test]
    fn test_bucket_lookup_matches_fields() {
        let stats = BurnSeverityStats {
            low: 1.0,
            moderate: 2.0,
            high: 3.0,
            very_high: 4.0,
            extreme: 5.0,
        };
        assert_eq!(stats.bucket(Severity::Low), 1.0);
        assert_eq!(stats.bucket(Severity::Extreme), 5.0);
        assert_eq!(stats.bucket(Severity::Unknown), 0.0);
        assert_eq!(stats.total(), 15.0);
    }

    #[test]
    fn test_draft_builds_request() {
        let draft = RequestDraft::default();
        let request = draft.to_request(Location::new(37.7749, -122.4194)).unwrap();
        assert_eq!(request.pre_fire_date, date("2023-06-01"));
        assert_eq!(request.post_fire_date, date("2023-08-01"));
        assert_eq!(request.buffer_km, DEFAULT_BUFFER_KM);
    }

    #[test]
    fn test_draft_rejects_reversed_dates() {
        let draft = RequestDraft {
            pre_fire_date: String::from("2023-08-01"),
            post_fire_date: String::from("2023-06-01"),
            buffer_km: String::from("5"),
        };
        let err = draft.to_request(Location::new(0.0, 0.0)).unwrap_err();
        assert!(err.contains("before"), "unexpected message: {err}");
    }

    #[test]
    fn test_draft_rejects_bad_inputs() {
        let mut draft = RequestDraft::default();
        draft.pre_fire_date = String::from("June 1st");
        assert!(draft.to_request(Location::new(0.0, 0.0)).is_err());

        let mut draft = RequestDraft::default();
        draft.post_fire_date = String::new();
        assert!(draft.to_request(Location::new(0.0, 0.0)).is_err());

        let mut draft = RequestDraft::default();
        draft.buffer_km = String::from("-3");
        assert!(draft.to_request(Location::new(0.0, 0.0)).is_err());
    }
}
