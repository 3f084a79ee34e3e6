//! Reduction of service geometry into a bounded set of map markers.
//!
//! The analysis service may return dense polygon boundaries; drawing every
//! vertex is excessive for a map client, so rings are sampled down to a
//! handful of evenly spaced points that still convey the severity
//! distribution. The output order is stable (feature, then ring, then
//! sample), which keeps snapshots and redraws deterministic.

use geojson::{Feature, GeoJson, Geometry, JsonObject, Value};

use crate::model::Location;
use crate::severity::Severity;

/// Upper bound on samples taken from a single ring.
const MAX_SAMPLES_PER_RING: usize = 10;

/// A single renderable marker derived from source geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPoint {
    pub position: Location,
    pub severity: Severity,
    /// Burned area in km² attributed to the source feature, when reported.
    pub area: Option<f64>,
}

/// Reduce arbitrary returned GeoJSON to an ordered sequence of display
/// points.
///
/// Accepts a feature collection, a single feature, or a bare geometry;
/// `None` and empty collections yield an empty sequence. `Point` features
/// emit one marker; `Polygon` and `MultiPolygon` rings are sampled at a
/// fixed stride of `max(1, len / 10)` starting at index 0 (no wrapping),
/// so rings of ten or fewer vertices are emitted in full. Unsupported
/// geometry types are skipped, not errors.
pub fn reduce(input: Option<&GeoJson>) -> Vec<DisplayPoint> {
    let mut points = Vec::new();
    match input {
        None => {}
        Some(GeoJson::FeatureCollection(collection)) => {
            for feature in &collection.features {
                reduce_feature(feature, &mut points);
            }
        }
        Some(GeoJson::Feature(feature)) => reduce_feature(feature, &mut points),
        Some(GeoJson::Geometry(geometry)) => {
            reduce_geometry(geometry, Severity::Unknown, None, &mut points);
        }
    }
    points
}

fn reduce_feature(feature: &Feature, out: &mut Vec<DisplayPoint>) {
    let severity = severity_property(feature.properties.as_ref());
    let area = feature
        .properties
        .as_ref()
        .and_then(|props| props.get("area"))
        .and_then(serde_json::Value::as_f64);

    if let Some(geometry) = &feature.geometry {
        reduce_geometry(geometry, severity, area, out);
    }
}

fn reduce_geometry(
    geometry: &Geometry,
    severity: Severity,
    area: Option<f64>,
    out: &mut Vec<DisplayPoint>,
) {
    match &geometry.value {
        Value::Point(coord) => push_coord(coord, severity, area, out),
        Value::Polygon(rings) => {
            for ring in rings {
                sample_ring(ring, severity, area, out);
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                for ring in rings {
                    sample_ring(ring, severity, area, out);
                }
            }
        }
        _ => {}
    }
}

/// Take every `stride`-th vertex of a ring, where the stride bounds the
/// sample count to roughly [`MAX_SAMPLES_PER_RING`].
fn sample_ring(ring: &[Vec<f64>], severity: Severity, area: Option<f64>, out: &mut Vec<DisplayPoint>) {
    let stride = (ring.len() / MAX_SAMPLES_PER_RING).max(1);
    for coord in ring.iter().step_by(stride) {
        push_coord(coord, severity, area, out);
    }
}

fn push_coord(coord: &[f64], severity: Severity, area: Option<f64>, out: &mut Vec<DisplayPoint>) {
    if coord.len() < 2 {
        return;
    }
    // GeoJSON positions are [longitude, latitude]; markers want the reverse.
    out.push(DisplayPoint {
        position: Location {
            latitude: coord[1],
            longitude: coord[0],
        },
        severity,
        area,
    });
}

/// Decode the loosely typed `severity` property: integers are taken as-is,
/// floats truncated, anything else (or nothing) is `Unknown`.
fn severity_property(properties: Option<&JsonObject>) -> Severity {
    properties
        .and_then(|props| props.get("severity"))
        .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)))
        .map(Severity::from_code)
        .unwrap_or(Severity::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Feature, FeatureCollection};

    fn parse(json: &str) -> GeoJson {
        json.parse().expect("test fixture must be valid GeoJSON")
    }

    /// A closed ring with `n` distinct vertices plus the closing coordinate.
    fn ring_of(n: usize) -> Vec<Vec<f64>> {
        let mut ring: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64 * 0.01, 40.0]).collect();
        ring.push(ring[0].clone());
        ring
    }

    fn polygon_feature(rings: Vec<Vec<Vec<f64>>>, severity: i64) -> Feature {
        let mut feature = Feature::from(Geometry::new(Value::Polygon(rings)));
        feature.properties = Some(
            serde_json::json!({ "severity": severity })
                .as_object()
                .unwrap()
                .clone(),
        );
        feature
    }

    #[test]
    fn test_none_and_empty_inputs_yield_nothing() {
        assert!(reduce(None).is_empty());

        let empty = GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        });
        assert!(reduce(Some(&empty)).is_empty());
    }

    #[test]
    fn test_point_feature_emits_single_marker_with_properties() {
        let gj = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
                    "properties": { "severity": 3, "area": 1.5 }
                }]
            }"#,
        );

        let points = reduce(Some(&gj));
        assert_eq!(points.len(), 1);
        // Axis swap: input is [lon, lat].
        assert_eq!(points[0].position.latitude, 20.0);
        assert_eq!(points[0].position.longitude, 10.0);
        assert_eq!(points[0].severity, Severity::High);
        assert_eq!(points[0].area, Some(1.5));
    }

    #[test]
    fn test_point_without_properties_is_unknown() {
        let gj = parse(
            r#"{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                "properties": null
            }"#,
        );

        let points = reduce(Some(&gj));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].severity, Severity::Unknown);
        assert_eq!(points[0].area, None);
    }

    #[test]
    fn test_short_ring_emits_every_vertex() {
        let feature = polygon_feature(vec![ring_of(4)], 2);
        let points = reduce(Some(&GeoJson::Feature(feature)));
        // 4 distinct vertices + closing coordinate = 5, all under the cap.
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.severity == Severity::Moderate));
    }

    #[test]
    fn test_long_ring_is_sampled_at_fixed_stride() {
        let ring = ring_of(99); // 100 coordinates including the closing one
        let feature = polygon_feature(vec![ring.clone()], 5);
        let points = reduce(Some(&GeoJson::Feature(feature)));

        // stride = 100 / 10 = 10 → indices 0, 10, ..., 90.
        assert_eq!(points.len(), 10);
        assert_eq!(points[0].position.longitude, ring[0][0]);
        assert_eq!(points[1].position.longitude, ring[10][0]);
        assert_eq!(points[9].position.longitude, ring[90][0]);
    }

    #[test]
    fn test_sample_count_never_exceeds_ring_length() {
        for n in [1usize, 3, 9, 10, 11, 25, 57, 200] {
            let ring: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64, 0.0]).collect();
            let feature = polygon_feature(vec![ring], 1);
            let count = reduce(Some(&GeoJson::Feature(feature))).len();
            assert!(count <= n, "n={n} emitted {count}");
            let stride = (n / MAX_SAMPLES_PER_RING).max(1);
            assert_eq!(count, n.div_ceil(stride), "n={n}");
        }
    }

    #[test]
    fn test_polygon_holes_are_sampled_separately() {
        let feature = polygon_feature(vec![ring_of(4), ring_of(3)], 1);
        let points = reduce(Some(&GeoJson::Feature(feature)));
        assert_eq!(points.len(), 5 + 4);
    }

    #[test]
    fn test_multipolygon_applies_rule_per_ring_in_order() {
        let multi = Geometry::new(Value::MultiPolygon(vec![
            vec![vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![1.0, 1.0]]],
            vec![vec![vec![5.0, 5.0], vec![6.0, 5.0], vec![5.0, 5.0]]],
        ]));
        let mut feature = Feature::from(multi);
        feature.properties = Some(
            serde_json::json!({ "severity": 4 })
                .as_object()
                .unwrap()
                .clone(),
        );

        let points = reduce(Some(&GeoJson::Feature(feature)));
        assert_eq!(points.len(), 6);
        // First polygon's samples come before the second's.
        assert_eq!(points[0].position.longitude, 1.0);
        assert_eq!(points[3].position.longitude, 5.0);
        assert!(points.iter().all(|p| p.severity == Severity::VeryHigh));
    }

    #[test]
    fn test_unsupported_geometry_is_skipped() {
        let gj = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": {
                            "type": "LineString",
                            "coordinates": [[0.0, 0.0], [1.0, 1.0]]
                        },
                        "properties": { "severity": 5 }
                    },
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [3.0, 4.0] },
                        "properties": { "severity": 1 }
                    }
                ]
            }"#,
        );

        let points = reduce(Some(&gj));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].severity, Severity::Low);
    }

    #[test]
    fn test_bare_geometry_input_is_unknown_severity() {
        let gj = GeoJson::Geometry(Geometry::new(Value::Point(vec![7.0, 8.0])));
        let points = reduce(Some(&gj));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].severity, Severity::Unknown);
    }

    #[test]
    fn test_reduction_is_deterministic() {
        let feature = polygon_feature(vec![ring_of(40)], 3);
        let gj = GeoJson::Feature(feature);
        let first = reduce(Some(&gj));
        let second = reduce(Some(&gj));
        assert_eq!(first, second);
    }

    #[test]
    fn test_float_severity_property_is_truncated() {
        let gj = parse(
            r#"{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                "properties": { "severity": 2.0 }
            }"#,
        );
        assert_eq!(reduce(Some(&gj))[0].severity, Severity::Moderate);
    }
}
