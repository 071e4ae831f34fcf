//! Core data types for parcelkit

use serde::Serialize;

/// Square meters in one acre
pub const SQ_METERS_PER_ACRE: f64 = 4046.8564224;

/// International foot in meters
pub const FOOT_TO_METERS: f64 = 0.3048;

/// US survey foot in meters
pub const US_SURVEY_FOOT_TO_METERS: f64 = 0.3048006096012192;

/// A 2-D point in an arbitrary planar or geographic coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns whether this point lies within valid lon/lat degree ranges
    pub fn in_degree_range(&self) -> bool {
        (-180.0..=180.0).contains(&self.x) && (-90.0..=90.0).contains(&self.y)
    }
}

/// A geographic location in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Creates a new location
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns whether latitude and longitude are in valid ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Rounds a value to a fixed number of decimal places for presentation
/// stability
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Converts square meters to acres
pub fn sq_meters_to_acres(sq_meters: f64) -> f64 {
    sq_meters / SQ_METERS_PER_ACRE
}
