//! Raster tag and geo key constants

/// Image width in pixels
pub const IMAGE_WIDTH: u16 = 256;

/// Image height in pixels
pub const IMAGE_LENGTH: u16 = 257;

/// GeoTIFF ModelPixelScaleTag
pub const MODEL_PIXEL_SCALE: u16 = 33550;

/// GeoTIFF ModelTiepointTag
pub const MODEL_TIEPOINT: u16 = 33922;

/// GeoTIFF ModelTransformationTag
pub const MODEL_TRANSFORMATION: u16 = 34264;

/// GeoTIFF GeoKeyDirectoryTag
pub const GEO_KEY_DIRECTORY: u16 = 34735;

/// Returns the name of a tag
pub fn tag_name(tag: u16) -> &'static str {
    match tag {
        IMAGE_WIDTH => "ImageWidth",
        IMAGE_LENGTH => "ImageLength",
        MODEL_PIXEL_SCALE => "ModelPixelScale",
        MODEL_TIEPOINT => "ModelTiepoint",
        MODEL_TRANSFORMATION => "ModelTransformation",
        GEO_KEY_DIRECTORY => "GeoKeyDirectory",
        _ => "Unknown",
    }
}

/// Field type constants
pub mod field_types {
    /// BYTE (8-bit unsigned)
    pub const BYTE: u16 = 1;

    /// SHORT (16-bit unsigned)
    pub const SHORT: u16 = 3;

    /// LONG (32-bit unsigned)
    pub const LONG: u16 = 4;

    /// RATIONAL (two LONGs: numerator, denominator)
    pub const RATIONAL: u16 = 5;

    /// DOUBLE (64-bit IEEE float)
    pub const DOUBLE: u16 = 12;
}

/// Geo key identifiers stored inside the geo key directory
pub mod geo_keys {
    /// GTModelTypeGeoKey: coordinate model class
    pub const MODEL_TYPE: u16 = 1024;

    /// ProjLinearUnitsGeoKey: linear unit of the projected CRS
    pub const LINEAR_UNITS: u16 = 3076;

    /// Model type value for geographic (lat/lon) coordinates
    pub const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
}

/// Linear unit codes carried by the linear units geo key
pub mod unit_codes {
    /// Meter
    pub const METER: u16 = 9001;

    /// International foot
    pub const FOOT: u16 = 9002;

    /// US survey foot
    pub const US_SURVEY_FOOT: u16 = 9003;
}
