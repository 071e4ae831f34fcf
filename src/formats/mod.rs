//! Field-file format support

pub mod tiff;
pub mod shapefile;
pub mod dbf;
pub mod geojson;
pub mod table;
