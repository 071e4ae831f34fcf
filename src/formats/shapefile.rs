//! Single binary geometry file reader (.shp)
//!
//! The format mixes byte orders: the file and record headers are
//! big-endian, record contents little-endian. Only polygon-class records
//! are decomposed into rings; every other record type is skipped.

use crate::error::{Error, Result};
use crate::geometry::Ring;
use crate::types::Point;

/// File code constant at offset 0
const FILE_CODE: u32 = 9994;

/// Fixed file header size in bytes
const FILE_HEADER_SIZE: usize = 100;

/// Polygon shape type
const SHAPE_POLYGON: u32 = 5;

/// Polygon with Z values
const SHAPE_POLYGON_Z: u32 = 15;

/// Polygon with measure values
const SHAPE_POLYGON_M: u32 = 25;

/// Reads every polygon ring out of a binary geometry buffer
///
/// Walks the fixed-size record headers from offset 100 and decomposes each
/// polygon-class record (basic, Z-valued, or measured) into one ring per
/// declared part using the part-index table and the flat point array.
pub fn read_polygon_rings(data: &[u8]) -> Result<Vec<Ring>> {
    if data.len() < FILE_HEADER_SIZE {
        return Err(Error::Format(format!(
            "geometry file of {} bytes is shorter than the {}-byte header",
            data.len(),
            FILE_HEADER_SIZE
        )));
    }

    let file_code = read_be_u32(data, 0)?;
    if file_code != FILE_CODE {
        return Err(Error::Format(format!(
            "geometry file code {} does not match the expected {}",
            file_code, FILE_CODE
        )));
    }

    let mut rings = Vec::new();
    let mut offset = FILE_HEADER_SIZE;

    // Record header: record number + content length, both big-endian,
    // content length counted in 16-bit words.
    while offset + 8 <= data.len() {
        let content_words = read_be_u32(data, offset + 4)? as usize;
        let content_offset = offset + 8;
        let content_len = content_words * 2;

        if content_offset + content_len > data.len() {
            return Err(Error::Format(format!(
                "geometry record at offset {} runs past the end of the buffer",
                offset
            )));
        }

        let shape_type = read_le_u32(data, content_offset)?;
        if matches!(shape_type, SHAPE_POLYGON | SHAPE_POLYGON_Z | SHAPE_POLYGON_M) {
            read_polygon_record(data, content_offset, &mut rings)?;
        }

        offset = content_offset + content_len;
    }

    Ok(rings)
}

/// Decomposes one polygon record into rings
///
/// Record content layout after the shape type: bounding box (4 doubles),
/// part count, point count, part-index table, then the flat (x, y) point
/// array. Z and M payloads trail the points and are ignored.
fn read_polygon_record(data: &[u8], content_offset: usize, rings: &mut Vec<Ring>) -> Result<()> {
    let num_parts = read_le_u32(data, content_offset + 36)? as usize;
    let num_points = read_le_u32(data, content_offset + 40)? as usize;

    let parts_offset = content_offset + 44;
    let points_offset = parts_offset + num_parts * 4;

    let mut part_starts = Vec::with_capacity(num_parts);
    for i in 0..num_parts {
        part_starts.push(read_le_u32(data, parts_offset + i * 4)? as usize);
    }

    for (i, &start) in part_starts.iter().enumerate() {
        let end = part_starts.get(i + 1).copied().unwrap_or(num_points);
        if start > end || end > num_points {
            return Err(Error::Format(format!(
                "polygon part table entry {} ({}..{}) is inconsistent with {} points",
                i, start, end, num_points
            )));
        }

        let mut points = Vec::with_capacity(end - start);
        for p in start..end {
            let base = points_offset + p * 16;
            let x = read_le_f64(data, base)?;
            let y = read_le_f64(data, base + 8)?;
            points.push(Point::new(x, y));
        }
        rings.push(Ring::new(points));
    }

    Ok(())
}

fn read_be_u32(data: &[u8], offset: usize) -> Result<u32> {
    let bytes = get(data, offset, 4)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_le_u32(data: &[u8], offset: usize) -> Result<u32> {
    let bytes = get(data, offset, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_le_f64(data: &[u8], offset: usize) -> Result<f64> {
    let bytes = get(data, offset, 8)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Ok(f64::from_le_bytes(buf))
}

fn get(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    data.get(offset..offset + len).ok_or_else(|| {
        Error::Format(format!(
            "geometry structure at offset {} runs past the end of the buffer",
            offset
        ))
    })
}
