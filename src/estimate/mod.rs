//! Field estimators and their orchestration

pub mod raster;
pub mod polygon;

pub use polygon::{estimate_polygon_area, PolygonAreaEstimate, PolygonSource};
pub use raster::{estimate_raster_area, RasterAreaEstimate};

use crate::error::Result;
use crate::types::LatLon;
use serde::Serialize;
use std::fmt;

/// Combined result of one field ingestion request
///
/// The polygon-derived area and centroid are the chosen field-level values:
/// the boundary file directly reflects a drawn or surveyed outline and is
/// the only source guaranteed to carry a usable location. The raster
/// estimate is reported alongside for comparison and validation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldEstimate {
    pub area_acres: f64,
    pub area_sq_meters: f64,
    pub centroid: LatLon,
    pub raster: RasterAreaEstimate,
    pub polygon: PolygonAreaEstimate,
}

/// Runs both estimators over one upload pair
///
/// The two estimators are independent pure functions over disjoint inputs;
/// a failure in either aborts the whole request with that estimator's
/// error surfaced verbatim. No partial results are returned.
pub fn estimate_field(
    raster_data: &[u8],
    boundary_filename: &str,
    boundary_data: &[u8],
) -> Result<FieldEstimate> {
    let raster = estimate_raster_area(raster_data)?;
    let polygon = estimate_polygon_area(boundary_filename, boundary_data)?;

    Ok(FieldEstimate {
        area_acres: polygon.area_acres,
        area_sq_meters: polygon.area_sq_meters,
        centroid: LatLon::new(polygon.centroid_lat, polygon.centroid_lon),
        raster,
        polygon,
    })
}

impl fmt::Display for FieldEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field Estimate:")?;
        writeln!(
            f,
            "  Chosen area: {} acres ({} m²)",
            self.area_acres, self.area_sq_meters
        )?;
        writeln!(
            f,
            "  Centroid: {}, {}",
            self.centroid.lat, self.centroid.lon
        )?;

        writeln!(f, "\nRaster estimate:")?;
        writeln!(
            f,
            "  {} x {} px @ {} x {} {}",
            self.raster.width,
            self.raster.height,
            self.raster.pixel_size_x,
            self.raster.pixel_size_y,
            self.raster.units
        )?;
        writeln!(
            f,
            "  Area: {} acres ({} m²)",
            self.raster.area_acres, self.raster.area_sq_meters
        )?;
        for warning in &self.raster.warnings {
            writeln!(f, "  Warning: {}", warning)?;
        }

        writeln!(f, "\nBoundary estimate ({}):", self.polygon.source.name())?;
        writeln!(
            f,
            "  {} rings, {} points",
            self.polygon.ring_count, self.polygon.point_count
        )?;
        writeln!(
            f,
            "  Area: {} acres ({} m²)",
            self.polygon.area_acres, self.polygon.area_sq_meters
        )?;

        Ok(())
    }
}
