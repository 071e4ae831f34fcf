//! Polygon area estimator
//!
//! Dispatches an uploaded boundary file by extension into one of four
//! sub-parsers, then feeds every collected ring through the shared
//! ring-combination core. This is the one estimate guaranteed to carry a
//! usable location.

use crate::archive;
use crate::error::{Error, Result};
use crate::formats::{dbf, geojson, shapefile, table};
use crate::geometry::{combine_rings, Ring, SurfaceContext};
use crate::types::{round_to, sq_meters_to_acres};
use serde::Serialize;

/// The input format a polygon estimate was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonSource {
    GeoJson,
    CoordinateTable,
    Shapefile,
    ShapefileArchive,
}

impl PolygonSource {
    /// Returns a short label for this source
    pub fn name(&self) -> &'static str {
        match self {
            PolygonSource::GeoJson => "geojson",
            PolygonSource::CoordinateTable => "coordinate table",
            PolygonSource::Shapefile => "shapefile",
            PolygonSource::ShapefileArchive => "shapefile archive",
        }
    }
}

/// Area estimate derived from a boundary upload
///
/// `area_sq_meters` is strictly positive; a zero-area outline is a
/// validation failure, not a valid answer.
#[derive(Debug, Clone, Serialize)]
pub struct PolygonAreaEstimate {
    pub area_sq_meters: f64,
    pub area_acres: f64,
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    pub ring_count: usize,
    pub point_count: usize,
    pub source: PolygonSource,
}

/// Estimates field area and centroid from a boundary upload
///
/// The filename extension gates the sub-parser; an unrecognized extension
/// fails before any byte of the payload is inspected.
pub fn estimate_polygon_area(filename: &str, data: &[u8]) -> Result<PolygonAreaEstimate> {
    match extension_of(filename).as_str() {
        "geojson" | "json" => {
            let rings = geojson::parse_rings(text_of(data)?)?;
            finish(rings, SurfaceContext::default(), PolygonSource::GeoJson)
        }
        "csv" | "tsv" | "txt" => {
            let ring = table::parse_ring(text_of(data)?)?;
            finish(
                vec![ring],
                SurfaceContext::default(),
                PolygonSource::CoordinateTable,
            )
        }
        "shp" => {
            let rings = shapefile::read_polygon_rings(data)?;
            finish(rings, SurfaceContext::default(), PolygonSource::Shapefile)
        }
        "zip" => estimate_from_archive(data),
        other => Err(Error::Parse(format!(
            "Unsupported file type: .{}; upload a .geojson/.json boundary, a .csv/.tsv/.txt \
             coordinate table, a .shp file, or a zipped shapefile",
            other
        ))),
    }
}

/// Unpacks a zipped shapefile bundle and parses its members
///
/// The single `.shp` member supplies the rings; a companion `.dbf` sharing
/// its base name may supply an authoritative centroid, and a companion
/// `.prj` supplies linear-unit hints for projected coordinates.
fn estimate_from_archive(data: &[u8]) -> Result<PolygonAreaEstimate> {
    let members = archive::read_members(data)?;

    let (shp_name, shp_bytes) = members
        .iter()
        .find(|(name, _)| name.ends_with(".shp"))
        .ok_or_else(|| {
            Error::Parse("The archive does not contain a .shp geometry member".to_string())
        })?;

    let rings = shapefile::read_polygon_rings(shp_bytes)?;

    let stem = shp_name.trim_end_matches(".shp");
    let context = SurfaceContext {
        unit_hint: members
            .get(&format!("{}.prj", stem))
            .map(|bytes| String::from_utf8_lossy(bytes).to_string()),
        companion_centroid: members
            .get(&format!("{}.dbf", stem))
            .and_then(|bytes| dbf::mean_lon_lat(bytes)),
    };

    finish(rings, context, PolygonSource::ShapefileArchive)
}

/// Runs the shared ring combination and rounds the reported values
fn finish(
    rings: Vec<Ring>,
    context: SurfaceContext,
    source: PolygonSource,
) -> Result<PolygonAreaEstimate> {
    let combined = combine_rings(rings, &context)?;

    Ok(PolygonAreaEstimate {
        area_sq_meters: round_to(combined.area_sq_meters, 2),
        area_acres: round_to(sq_meters_to_acres(combined.area_sq_meters), 2),
        centroid_lat: round_to(combined.centroid.lat, 6),
        centroid_lon: round_to(combined.centroid.lon, 6),
        ring_count: combined.ring_count,
        point_count: combined.point_count,
        source,
    })
}

/// Lowercased extension after the final dot
fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, extension)) => extension.to_lowercase(),
        None => String::new(),
    }
}

/// Decodes an upload expected to be text
fn text_of(data: &[u8]) -> Result<&str> {
    std::str::from_utf8(data)
        .map_err(|_| Error::Parse("The boundary file is not valid UTF-8 text".to_string()))
}
