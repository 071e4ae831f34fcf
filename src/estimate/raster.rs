//! Raster area estimator
//!
//! Derives a pixel-area acreage, and when the raster is geographically
//! referenced an approximate centroid, from the tagged directory of a
//! single-image raster container.

use crate::error::{Error, Result};
use crate::formats::tiff::geo::{resolve_linear_units, GeoKeys};
use crate::formats::tiff::{tags, TiffReader, IFD};
use crate::types::{round_to, sq_meters_to_acres, LatLon};
use serde::Serialize;

/// Area estimate derived from a raster upload
///
/// Constructed once per upload and immutable afterwards. `centroid` is
/// present only when the raster declares a geographic coordinate model and
/// usable tie-point metadata; `warnings` carries ordered non-fatal notices
/// such as an unrecognized unit code.
#[derive(Debug, Clone, Serialize)]
pub struct RasterAreaEstimate {
    pub area_sq_meters: f64,
    pub area_acres: f64,
    pub width: u64,
    pub height: u64,
    pub pixel_size_x: f64,
    pub pixel_size_y: f64,
    pub units: String,
    pub centroid: Option<LatLon>,
    pub warnings: Vec<String>,
}

/// Estimates field area from a raster buffer
///
/// An unscaled or unreferenced raster is a hard failure, not a zero-area
/// result: downstream cost math would silently treat "unknown" as "no
/// risk".
pub fn estimate_raster_area(data: &[u8]) -> Result<RasterAreaEstimate> {
    let mut reader = TiffReader::new(data)?;
    let ifd = reader.read_directory()?;

    let width = required_dimension(&mut reader, &ifd, tags::IMAGE_WIDTH, "ImageWidth")?;
    let height = required_dimension(&mut reader, &ifd, tags::IMAGE_LENGTH, "ImageLength")?;

    let pixel_scale = read_pixel_scale(&mut reader, &ifd)?;
    let (pixel_size_x, pixel_size_y) = match pixel_scale {
        Some(scale) => scale,
        None => read_transform_scale(&mut reader, &ifd)?.ok_or_else(|| {
            Error::Format(
                "no usable pixel scale is present (neither a ModelPixelScale tag nor a \
                 ModelTransformation tag); refusing to guess acreage"
                    .to_string(),
            )
        })?,
    };

    let mut warnings = Vec::new();

    let geo_keys = match ifd.get_entry(tags::GEO_KEY_DIRECTORY) {
        Some(entry) => GeoKeys::parse(&reader.read_u16_values(entry)?),
        None => GeoKeys::default(),
    };

    let (unit_factor, units, unit_warning) = resolve_linear_units(geo_keys.linear_units);
    if let Some(warning) = unit_warning {
        warnings.push(warning);
    }

    let area_sq_meters =
        width as f64 * height as f64 * (pixel_size_x * unit_factor) * (pixel_size_y * unit_factor);

    let centroid = if geo_keys.is_geographic() && pixel_scale.is_some() {
        read_centroid(&mut reader, &ifd, width, height, pixel_size_x, pixel_size_y)?
    } else {
        None
    };

    Ok(RasterAreaEstimate {
        area_sq_meters: round_to(area_sq_meters, 2),
        area_acres: round_to(sq_meters_to_acres(area_sq_meters), 2),
        width,
        height,
        pixel_size_x: round_to(pixel_size_x, 4),
        pixel_size_y: round_to(pixel_size_y, 4),
        units: units.to_string(),
        centroid,
        warnings,
    })
}

/// Reads a required positive dimension tag
fn required_dimension(
    reader: &mut TiffReader,
    ifd: &IFD,
    tag: u16,
    name: &'static str,
) -> Result<u64> {
    let entry = ifd.get_entry(tag).ok_or(Error::MissingTag(name))?;
    let value = reader.read_values(entry)?.first().copied().unwrap_or(0.0);

    if value < 1.0 {
        return Err(Error::Format(format!(
            "{} must be a positive pixel count, found {}",
            name, value
        )));
    }

    Ok(value as u64)
}

/// Reads the direct pixel-scale tag (X, Y, optional Z)
fn read_pixel_scale(reader: &mut TiffReader, ifd: &IFD) -> Result<Option<(f64, f64)>> {
    let entry = match ifd.get_entry(tags::MODEL_PIXEL_SCALE) {
        Some(entry) => entry,
        None => return Ok(None),
    };

    let values = reader.read_values(entry)?;
    if values.len() < 2 || values[0] <= 0.0 || values[1] <= 0.0 {
        return Ok(None);
    }

    Ok(Some((values[0], values[1])))
}

/// Falls back to decomposing the affine transform tag
///
/// The first and sixth elements are the X/Y pixel sizes (the Y term is
/// negative for north-up rasters, so absolute values are taken).
fn read_transform_scale(reader: &mut TiffReader, ifd: &IFD) -> Result<Option<(f64, f64)>> {
    let entry = match ifd.get_entry(tags::MODEL_TRANSFORMATION) {
        Some(entry) => entry,
        None => return Ok(None),
    };

    let values = reader.read_values(entry)?;
    if values.len() < 6 {
        return Ok(None);
    }

    let size_x = values[0].abs();
    let size_y = values[5].abs();
    if size_x <= 0.0 || size_y <= 0.0 {
        return Ok(None);
    }

    Ok(Some((size_x, size_y)))
}

/// Projects the image-center pixel through the tie point and pixel scale
///
/// Only attempted for geographic rasters; the result is discarded when it
/// falls outside valid latitude/longitude ranges.
fn read_centroid(
    reader: &mut TiffReader,
    ifd: &IFD,
    width: u64,
    height: u64,
    pixel_size_x: f64,
    pixel_size_y: f64,
) -> Result<Option<LatLon>> {
    let entry = match ifd.get_entry(tags::MODEL_TIEPOINT) {
        Some(entry) => entry,
        None => return Ok(None),
    };

    let values = reader.read_values(entry)?;
    if values.len() < 6 {
        return Ok(None);
    }

    let (pixel_x, pixel_y) = (values[0], values[1]);
    let (geo_x, geo_y) = (values[3], values[4]);

    let center_col = width as f64 / 2.0;
    let center_row = height as f64 / 2.0;

    let lon = geo_x + (center_col - pixel_x) * pixel_size_x;
    let lat = geo_y - (center_row - pixel_y) * pixel_size_y;

    let centroid = LatLon::new(round_to(lat, 6), round_to(lon, 6));
    if centroid.is_valid() {
        Ok(Some(centroid))
    } else {
        Ok(None)
    }
}
