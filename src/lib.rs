//! parcelkit - geospatial field-file ingestion for nitrogen risk estimates
//!
//! parcelkit extracts an area-and-location estimate from user-uploaded
//! field files without any third-party geospatial library: a raster area
//! estimator over single-image raster containers, a polygon area estimator
//! over vector boundary files (GeoJSON, coordinate tables, shapefiles, and
//! zipped shapefile bundles), and a thin orchestrator that merges both.
//!
//! # Examples
//!
//! ## Full ingestion
//!
//! ```no_run
//! let raster = std::fs::read("field.tif")?;
//! let boundary = std::fs::read("field.geojson")?;
//!
//! let estimate = parcelkit::estimate_field(&raster, "field.geojson", &boundary)?;
//! println!(
//!     "{} acres at ({}, {})",
//!     estimate.area_acres, estimate.centroid.lat, estimate.centroid.lon
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Single estimators
//!
//! ```no_run
//! use parcelkit::{estimate_polygon_area, estimate_raster_area};
//!
//! let raster = std::fs::read("field.tif")?;
//! let raster_estimate = estimate_raster_area(&raster)?;
//! println!("{} x {} px", raster_estimate.width, raster_estimate.height);
//!
//! let table = b"lon,lat\n-103.5,41.2\n-103.4,41.2\n-103.4,41.3\n";
//! let polygon_estimate = estimate_polygon_area("field.csv", table)?;
//! println!("{} rings", polygon_estimate.ring_count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod io;
pub mod error;
pub mod types;
pub mod formats;
pub mod archive;
pub mod geometry;
pub mod estimate;
pub mod api;

pub use error::{Error, Result};
pub use estimate::{
    estimate_field, estimate_polygon_area, estimate_raster_area, FieldEstimate,
    PolygonAreaEstimate, PolygonSource, RasterAreaEstimate,
};
pub use formats::tiff::{TiffReader, TIFF_MAGIC};
pub use geometry::{classify, CoordinateSystem, Ring};
pub use io::ByteOrder;
pub use types::{LatLon, Point};
