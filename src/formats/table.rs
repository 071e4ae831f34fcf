//! Delimited coordinate table reader (.csv/.tsv/.txt)
//!
//! The delimiter is sniffed from the header line, headers are matched
//! against longitude/latitude synonyms, and every row with two parseable
//! numeric values becomes one point. The whole table is exactly one ring.

use crate::error::{Error, Result};
use crate::geometry::Ring;
use crate::types::Point;

/// Longitude header synonyms, matched after normalization
const LONGITUDE_NAMES: [&str; 4] = ["longitude", "lon", "lng", "x"];

/// Latitude header synonyms, matched after normalization
const LATITUDE_NAMES: [&str; 3] = ["latitude", "lat", "y"];

/// Lowercases a header and strips whitespace, underscores, and hyphens
pub(crate) fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase()
}

/// Returns whether a header names a longitude column
pub(crate) fn is_longitude_header(name: &str) -> bool {
    LONGITUDE_NAMES.contains(&normalize_header(name).as_str())
}

/// Returns whether a header names a latitude column
pub(crate) fn is_latitude_header(name: &str) -> bool {
    LATITUDE_NAMES.contains(&normalize_header(name).as_str())
}

/// Sniffs the delimiter from the header line: tab, then semicolon, then
/// comma
fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains('\t') {
        b'\t'
    } else if header_line.contains(';') {
        b';'
    } else {
        b','
    }
}

/// Parses a delimited coordinate table into a single ring
pub fn parse_ring(text: &str) -> Result<Ring> {
    let header_line = text.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(header_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| Error::Parse(format!("Cannot read the coordinate table header: {}", e)))?
        .clone();

    let lon_index = headers.iter().position(is_longitude_header);
    let lat_index = headers.iter().position(is_latitude_header);

    let (lon_index, lat_index) = match (lon_index, lat_index) {
        (Some(lon), Some(lat)) => (lon, lat),
        _ => {
            return Err(Error::Parse(format!(
                "No longitude/latitude column pair found in the coordinate table \
                 (headers seen: {})",
                headers.iter().collect::<Vec<_>>().join(", ")
            )))
        }
    };

    let mut points = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(_) => continue,
        };

        let lon = record.get(lon_index).and_then(|v| v.trim().parse::<f64>().ok());
        let lat = record.get(lat_index).and_then(|v| v.trim().parse::<f64>().ok());

        if let (Some(lon), Some(lat)) = (lon, lat) {
            points.push(Point::new(lon, lat));
        }
    }

    Ok(Ring::new(points))
}
