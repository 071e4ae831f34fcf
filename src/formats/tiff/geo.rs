//! Geo key directory parsing and linear units

use super::tags::{geo_keys, unit_codes};
use crate::types::{FOOT_TO_METERS, US_SURVEY_FOOT_TO_METERS};

/// Geo keys retained from a raster's geo key directory
///
/// The directory is a flat u16 array: a four-element header whose element
/// [3] gives the key count, followed by one (key id, location, count,
/// value) group per key. Only keys stored inline (location 0, count 1)
/// are retained.
#[derive(Debug, Default)]
pub struct GeoKeys {
    /// Coordinate model class (2 = geographic lat/lon)
    pub model_type: Option<u16>,
    /// Linear unit code of the projected coordinate system
    pub linear_units: Option<u16>,
}

impl GeoKeys {
    /// Parses the retained keys out of a raw geo key directory
    pub fn parse(directory: &[u16]) -> Self {
        let mut keys = GeoKeys::default();

        if directory.len() < 4 {
            return keys;
        }

        let key_count = directory[3] as usize;
        for i in 0..key_count {
            let base = 4 + i * 4;
            if base + 3 >= directory.len() {
                break;
            }

            let key_id = directory[base];
            let location = directory[base + 1];
            let count = directory[base + 2];
            let value = directory[base + 3];

            if location != 0 || count != 1 {
                continue;
            }

            match key_id {
                geo_keys::MODEL_TYPE => keys.model_type = Some(value),
                geo_keys::LINEAR_UNITS => keys.linear_units = Some(value),
                _ => {}
            }
        }

        keys
    }

    /// Returns whether the raster declares a geographic coordinate model
    pub fn is_geographic(&self) -> bool {
        self.model_type == Some(geo_keys::MODEL_TYPE_GEOGRAPHIC)
    }
}

/// Resolves a linear unit code to a meters-per-unit factor and a label
///
/// Unknown codes fall back to meters with a warning naming the code; an
/// absent code means the raster is already in meters.
pub fn resolve_linear_units(code: Option<u16>) -> (f64, &'static str, Option<String>) {
    match code {
        None => (1.0, "meters", None),
        Some(unit_codes::METER) => (1.0, "meters", None),
        Some(unit_codes::FOOT) => (FOOT_TO_METERS, "feet", None),
        Some(unit_codes::US_SURVEY_FOOT) => (US_SURVEY_FOOT_TO_METERS, "US survey feet", None),
        Some(other) => (
            1.0,
            "meters",
            Some(format!(
                "Unrecognized linear unit code {}, assuming meters",
                other
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retains_inline_keys() {
        // Header (version, revision, minor, count) then two keys.
        let directory = vec![
            1, 1, 0, 2, //
            1024, 0, 1, 2, //
            3076, 0, 1, 9002,
        ];
        let keys = GeoKeys::parse(&directory);
        assert_eq!(keys.model_type, Some(2));
        assert_eq!(keys.linear_units, Some(9002));
        assert!(keys.is_geographic());
    }

    #[test]
    fn test_parse_skips_non_inline_keys() {
        // Second key stored in an external tag (location != 0).
        let directory = vec![
            1, 1, 0, 2, //
            1024, 0, 1, 1, //
            3076, 34736, 1, 0,
        ];
        let keys = GeoKeys::parse(&directory);
        assert_eq!(keys.model_type, Some(1));
        assert_eq!(keys.linear_units, None);
        assert!(!keys.is_geographic());
    }

    #[test]
    fn test_parse_truncated_directory() {
        let keys = GeoKeys::parse(&[1, 1]);
        assert_eq!(keys.model_type, None);

        // Count claims more keys than the array holds.
        let keys = GeoKeys::parse(&[1, 1, 0, 5, 1024, 0, 1, 2]);
        assert_eq!(keys.model_type, Some(2));
    }

    #[test]
    fn test_resolve_meters() {
        let (factor, label, warning) = resolve_linear_units(Some(9001));
        assert_eq!(factor, 1.0);
        assert_eq!(label, "meters");
        assert!(warning.is_none());
    }

    #[test]
    fn test_resolve_survey_feet() {
        let (factor, label, warning) = resolve_linear_units(Some(9003));
        assert_eq!(factor, 0.3048006096012192);
        assert_eq!(label, "US survey feet");
        assert!(warning.is_none());
    }

    #[test]
    fn test_resolve_unknown_code_warns() {
        let (factor, label, warning) = resolve_linear_units(Some(7777));
        assert_eq!(factor, 1.0);
        assert_eq!(label, "meters");
        assert!(warning.unwrap().contains("7777"));
    }

    #[test]
    fn test_resolve_absent_code() {
        let (factor, _, warning) = resolve_linear_units(None);
        assert_eq!(factor, 1.0);
        assert!(warning.is_none());
    }
}
