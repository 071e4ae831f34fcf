//! Attribute table reader (.dbf)
//!
//! A minimal reader for the tabular-binary companion of a geometry
//! bundle. Only enough of the format is read to average longitude and
//! latitude columns: header counts, the field descriptor array, and the
//! text content of two columns across non-deleted records.

use super::table::{is_latitude_header, is_longitude_header};
use crate::types::LatLon;

/// Field descriptor array start offset
const DESCRIPTOR_OFFSET: usize = 32;

/// Size of one field descriptor
const DESCRIPTOR_SIZE: usize = 32;

/// Terminator byte after the descriptor array
const DESCRIPTOR_TERMINATOR: u8 = 0x0D;

/// Deletion marker in a record's first byte
const DELETED_MARKER: u8 = b'*';

/// One column's position inside a fixed-width record
#[derive(Debug, Clone, Copy)]
struct Column {
    offset: usize,
    length: usize,
}

/// Averages the longitude/latitude columns of an attribute table
///
/// Returns `None` when the table is unreadable, has no recognizable
/// longitude/latitude column pair, or holds no valid coordinate pairs —
/// the attribute table is auxiliary context, never a hard failure.
pub fn mean_lon_lat(data: &[u8]) -> Option<LatLon> {
    if data.len() < DESCRIPTOR_OFFSET {
        return None;
    }

    let record_count = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;
    let header_len = u16::from_le_bytes([data[8], data[9]]) as usize;
    let record_len = u16::from_le_bytes([data[10], data[11]]) as usize;

    if record_len == 0 {
        return None;
    }

    let mut lon_column: Option<Column> = None;
    let mut lat_column: Option<Column> = None;

    // Records start with the deletion flag; field data follows in
    // descriptor order.
    let mut field_offset = 1;
    let mut descriptor = DESCRIPTOR_OFFSET;

    while descriptor + DESCRIPTOR_SIZE <= data.len() {
        if data[descriptor] == DESCRIPTOR_TERMINATOR {
            break;
        }

        let name_bytes = &data[descriptor..descriptor + 11];
        let name_end = name_bytes.iter().position(|&b| b == 0).unwrap_or(11);
        let name = String::from_utf8_lossy(&name_bytes[..name_end]).to_string();
        let length = data[descriptor + 16] as usize;

        let column = Column {
            offset: field_offset,
            length,
        };
        if is_longitude_header(&name) {
            lon_column = Some(column);
        } else if is_latitude_header(&name) {
            lat_column = Some(column);
        }

        field_offset += length;
        descriptor += DESCRIPTOR_SIZE;
    }

    let (lon_column, lat_column) = (lon_column?, lat_column?);

    let mut lon_sum = 0.0;
    let mut lat_sum = 0.0;
    let mut count = 0usize;

    for i in 0..record_count {
        let base = header_len + i * record_len;
        if base + record_len > data.len() {
            break;
        }
        if data[base] == DELETED_MARKER {
            continue;
        }

        let lon = parse_field(data, base, lon_column);
        let lat = parse_field(data, base, lat_column);

        if let (Some(lon), Some(lat)) = (lon, lat) {
            let pair = LatLon::new(lat, lon);
            if pair.is_valid() {
                lon_sum += lon;
                lat_sum += lat;
                count += 1;
            }
        }
    }

    if count == 0 {
        return None;
    }

    Some(LatLon::new(lat_sum / count as f64, lon_sum / count as f64))
}

/// Parses one fixed-width column of one record as decimal text
fn parse_field(data: &[u8], record_base: usize, column: Column) -> Option<f64> {
    let start = record_base + column.offset;
    let bytes = data.get(start..start + column.length)?;
    std::str::from_utf8(bytes).ok()?.trim().parse::<f64>().ok()
}

#[cfg(test)]
pub mod test_util {
    /// Builds an attribute table with the given column names/widths and
    /// text rows; a leading `*` row marker emits a deleted record
    pub fn build_dbf(columns: &[(&str, usize)], rows: &[(&[&str], bool)]) -> Vec<u8> {
        let record_len: usize = 1 + columns.iter().map(|&(_, w)| w).sum::<usize>();
        let header_len = 32 + columns.len() * 32 + 1;

        let mut data = Vec::new();
        data.push(0x03); // version
        data.extend_from_slice(&[26, 8, 7]); // last update
        data.extend_from_slice(&(rows.len() as u32).to_le_bytes());
        data.extend_from_slice(&(header_len as u16).to_le_bytes());
        data.extend_from_slice(&(record_len as u16).to_le_bytes());
        data.extend_from_slice(&[0u8; 20]); // reserved

        for &(name, width) in columns {
            let mut descriptor = [0u8; 32];
            descriptor[..name.len().min(11)]
                .copy_from_slice(&name.as_bytes()[..name.len().min(11)]);
            descriptor[11] = b'N';
            descriptor[16] = width as u8;
            data.extend_from_slice(&descriptor);
        }
        data.push(0x0D);

        for &(values, deleted) in rows {
            data.push(if deleted { b'*' } else { b' ' });
            for (&(_, width), &value) in columns.iter().zip(values) {
                let mut field = vec![b' '; width];
                let bytes = value.as_bytes();
                field[..bytes.len().min(width)]
                    .copy_from_slice(&bytes[..bytes.len().min(width)]);
                data.extend_from_slice(&field);
            }
        }

        data
    }
}
