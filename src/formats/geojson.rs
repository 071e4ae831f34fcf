//! Geometry-text parser (.geojson/.json)
//!
//! Parses the upload as a generic structured document and recursively
//! collects every polygon ring from any geometry object found: a single
//! polygon, a multi-polygon, or a collection of features.

use crate::error::{Error, Result};
use crate::geometry::Ring;
use crate::types::Point;
use serde_json::Value;

/// Parses a geometry-text document into its flattened rings
pub fn parse_rings(text: &str) -> Result<Vec<Ring>> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| Error::Parse(format!("Cannot parse the boundary file as JSON: {}", e)))?;

    let mut rings = Vec::new();
    collect_rings(&document, &mut rings);

    if rings.is_empty() {
        return Err(Error::Parse(
            "No polygon geometry was found in the boundary file".to_string(),
        ));
    }

    Ok(rings)
}

/// Recursively collects rings from any geometry object in the document
fn collect_rings(value: &Value, rings: &mut Vec<Ring>) {
    let object = match value.as_object() {
        Some(object) => object,
        None => return,
    };

    match object.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {
            if let Some(features) = object.get("features").and_then(Value::as_array) {
                for feature in features {
                    collect_rings(feature, rings);
                }
            }
        }
        Some("Feature") => {
            if let Some(geometry) = object.get("geometry") {
                collect_rings(geometry, rings);
            }
        }
        Some("GeometryCollection") => {
            if let Some(geometries) = object.get("geometries").and_then(Value::as_array) {
                for geometry in geometries {
                    collect_rings(geometry, rings);
                }
            }
        }
        Some("Polygon") => {
            if let Some(coordinates) = object.get("coordinates").and_then(Value::as_array) {
                for ring in coordinates {
                    if let Some(ring) = parse_ring(ring) {
                        rings.push(ring);
                    }
                }
            }
        }
        Some("MultiPolygon") => {
            if let Some(polygons) = object.get("coordinates").and_then(Value::as_array) {
                for polygon in polygons.iter().filter_map(Value::as_array) {
                    for ring in polygon {
                        if let Some(ring) = parse_ring(ring) {
                            rings.push(ring);
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

/// Parses one coordinate array `[[x, y], ...]` into a ring
fn parse_ring(value: &Value) -> Option<Ring> {
    let positions = value.as_array()?;

    let points: Vec<Point> = positions
        .iter()
        .filter_map(|position| {
            let position = position.as_array()?;
            let x = position.first()?.as_f64()?;
            let y = position.get(1)?.as_f64()?;
            Some(Point::new(x, y))
        })
        .collect();

    if points.is_empty() {
        return None;
    }

    Some(Ring::new(points))
}
