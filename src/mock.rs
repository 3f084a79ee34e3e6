//! Bundled sample analysis for demos and degraded operation.
//!
//! When the remote pipeline is unreachable (or for a first look at the UI)
//! the session can be fed this fixed result instead of a live response.

use chrono::NaiveDate;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};

use crate::model::{
    AnalysisRequest, AnalysisResult, BurnSeverityStats, Location, NbrStats,
};

/// Town of Paradise, CA — the 2018 Camp Fire area, a recognizable demo site.
const DEMO_LATITUDE: f64 = 39.7596;
const DEMO_LONGITUDE: f64 = -121.6219;

/// A ready-made request pointing at the demo site, used when the user asks
/// for sample data before picking a location.
pub fn sample_request() -> AnalysisRequest {
    AnalysisRequest::new(
        Location::new(DEMO_LATITUDE, DEMO_LONGITUDE),
        NaiveDate::from_ymd_opt(2023, 6, 1).expect("valid fixture date"),
        NaiveDate::from_ymd_opt(2023, 8, 1).expect("valid fixture date"),
    )
}

/// Build the sample result, echoing the request's location and dates so the
/// rendered markers land where the user is looking.
pub fn sample_result(request: &AnalysisRequest) -> AnalysisResult {
    let center = request.location;
    AnalysisResult {
        latitude: center.latitude,
        longitude: center.longitude,
        pre_fire_date: request.pre_fire_date,
        post_fire_date: request.post_fire_date,
        data_source: String::from("Sentinel-2 (COPERNICUS/S2_SR) — sample data"),
        total_burned_area: 42.75,
        burn_severity_stats: BurnSeverityStats {
            low: 12.5,
            moderate: 15.3,
            high: 8.7,
            very_high: 4.2,
            extreme: 2.05,
        },
        nbr_stats: NbrStats {
            pre_fire_avg: 0.41,
            post_fire_avg: 0.12,
            avg_delta: 0.29,
            max_delta: 0.66,
        },
        images: [
            ("preFire".to_string(), "assets/sample_pre_fire.png".to_string()),
            ("postFire".to_string(), "assets/sample_post_fire.png".to_string()),
        ]
        .into_iter()
        .collect(),
        burn_severity_polygons: Some(sample_polygons(center)),
    }
}

/// Three concentric severity rings around the center: extreme core, high
/// middle, moderate fringe. Enough vertices that ring sampling engages.
fn sample_polygons(center: Location) -> GeoJson {
    let features = vec![
        severity_ring(center, 0.010, 5, 2.05),
        severity_ring(center, 0.025, 3, 8.7),
        severity_ring(center, 0.045, 2, 15.3),
    ];
    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn severity_ring(center: Location, radius_deg: f64, severity: i64, area: f64) -> Feature {
    const VERTICES: usize = 24;
    let mut ring: Vec<Vec<f64>> = (0..VERTICES)
        .map(|i| {
            let angle = (i as f64) / (VERTICES as f64) * std::f64::consts::TAU;
            vec![
                center.longitude + radius_deg * angle.cos(),
                center.latitude + radius_deg * angle.sin(),
            ]
        })
        .collect();
    ring.push(ring[0].clone());

    let mut feature = Feature::from(Geometry::new(Value::Polygon(vec![ring])));
    feature.properties = Some(
        serde_json::json!({ "severity": severity, "area": area })
            .as_object()
            .expect("object literal")
            .clone(),
    );
    feature
}
