//! Minimal random-access reader for ZIP bundles
//!
//! Locates the end-of-central-directory record, walks the central
//! directory, and decompresses each readable member without extracting
//! the whole archive. Only the stored and raw-deflate methods are
//! supported; members using any other method are skipped so unrelated
//! auxiliary files cannot fail the bundle.

use crate::error::{Error, Result};
use flate2::read::DeflateDecoder;
use std::collections::HashMap;
use std::io::Read;

/// End-of-central-directory record magic number
const EOCD_MAGIC: u32 = 0x0605_4b50;

/// Central directory file header magic number
const CENTRAL_MAGIC: u32 = 0x0201_4b50;

/// Local file header magic number
const LOCAL_MAGIC: u32 = 0x0403_4b50;

/// Standard search window for the end record: max comment + record size
const EOCD_SEARCH_WINDOW: usize = 64 * 1024 + 22;

/// Stored (pass-through) compression method
const METHOD_STORED: u16 = 0;

/// Raw-deflate compression method
const METHOD_DEFLATE: u16 = 8;

/// Reads every supported member of a ZIP buffer
///
/// Returns a map from lowercased base filename (final path segment) to
/// decompressed payload.
pub fn read_members(data: &[u8]) -> Result<HashMap<String, Vec<u8>>> {
    let eocd = find_eocd(data)?;

    let entry_count = read_u16(data, eocd + 10)?;
    let directory_offset = read_u32(data, eocd + 16)? as usize;

    let mut members = HashMap::new();
    let mut offset = directory_offset;

    for _ in 0..entry_count {
        if read_u32(data, offset)? != CENTRAL_MAGIC {
            return Err(Error::Format(format!(
                "central directory entry at offset {} has a bad signature",
                offset
            )));
        }

        let method = read_u16(data, offset + 10)?;
        let compressed_size = read_u32(data, offset + 20)? as usize;
        let name_len = read_u16(data, offset + 28)? as usize;
        let extra_len = read_u16(data, offset + 30)? as usize;
        let comment_len = read_u16(data, offset + 32)? as usize;
        let local_offset = read_u32(data, offset + 42)? as usize;

        let name_bytes = slice(data, offset + 46, name_len)?;
        let name = String::from_utf8_lossy(name_bytes).to_string();

        offset += 46 + name_len + extra_len + comment_len;

        if let Some(bytes) = read_member(data, local_offset, method, compressed_size)? {
            members.insert(base_name(&name), bytes);
        }
    }

    Ok(members)
}

/// Scans backward from the end of the buffer for the end record
fn find_eocd(data: &[u8]) -> Result<usize> {
    if data.len() < 22 {
        return Err(Error::Format(
            "buffer is too short to hold an archive end record".to_string(),
        ));
    }

    let search_start = data.len().saturating_sub(EOCD_SEARCH_WINDOW);
    let mut position = data.len() - 22;

    loop {
        if read_u32(data, position)? == EOCD_MAGIC {
            return Ok(position);
        }
        if position == search_start {
            return Err(Error::Format(
                "no archive end-of-central-directory record found".to_string(),
            ));
        }
        position -= 1;
    }
}

/// Reads one member's payload via its local file header
///
/// Returns `None` for members using an unsupported compression method.
fn read_member(
    data: &[u8],
    local_offset: usize,
    method: u16,
    compressed_size: usize,
) -> Result<Option<Vec<u8>>> {
    if read_u32(data, local_offset)? != LOCAL_MAGIC {
        return Err(Error::Format(format!(
            "local file header at offset {} has a bad signature",
            local_offset
        )));
    }

    let name_len = read_u16(data, local_offset + 26)? as usize;
    let extra_len = read_u16(data, local_offset + 28)? as usize;
    let payload_offset = local_offset + 30 + name_len + extra_len;
    let payload = slice(data, payload_offset, compressed_size)?;

    match method {
        METHOD_STORED => Ok(Some(payload.to_vec())),
        METHOD_DEFLATE => {
            let mut decoder = DeflateDecoder::new(payload);
            let mut decompressed = Vec::new();
            decoder.read_to_end(&mut decompressed)?;
            Ok(Some(decompressed))
        }
        _ => Ok(None),
    }
}

/// Lowercased final path segment of a stored member name
fn base_name(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .to_lowercase()
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    let bytes = slice(data, offset, 2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    let bytes = slice(data, offset, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    data.get(offset..offset + len).ok_or_else(|| {
        Error::Format(format!(
            "archive structure points {} bytes past the end of the buffer",
            offset + len - data.len().min(offset + len)
        ))
    })
}


#[cfg(test)]
mod tests {
    use super::test_util::build_zip;
    use super::*;

    #[test]
    fn test_read_stored_member() {
        let zip = build_zip(&[("field.shp", b"shape bytes", 0)]);
        let members = read_members(&zip).unwrap();
        assert_eq!(members["field.shp"], b"shape bytes");
    }

    #[test]
    fn test_read_deflated_member() {
        let payload = b"deflate round trip payload for a boundary bundle".repeat(8);
        let zip = build_zip(&[("field.shp", &payload, 8)]);
        let members = read_members(&zip).unwrap();
        assert_eq!(members["field.shp"], payload);
    }

    #[test]
    fn test_member_names_lowercased_without_path() {
        let zip = build_zip(&[("Survey/Field.SHP", b"x", 0)]);
        let members = read_members(&zip).unwrap();
        assert!(members.contains_key("field.shp"));
    }

    #[test]
    fn test_unsupported_method_skipped() {
        let zip = build_zip(&[
            ("readme.txt", b"kept", 0),
            ("legacy.dat", b"implode-compressed", 6),
        ]);
        let members = read_members(&zip).unwrap();
        assert_eq!(members.len(), 1);
        assert!(members.contains_key("readme.txt"));
    }

    #[test]
    fn test_missing_end_record_fails() {
        let err = read_members(&[0u8; 128]).unwrap_err();
        assert!(err.to_string().contains("end-of-central-directory"));
    }

    #[test]
    fn test_truncated_buffer_fails() {
        let err = read_members(b"PK").unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_corrupt_local_header_fails() {
        let mut zip = build_zip(&[("field.shp", b"shape bytes", 0)]);
        zip[0] = 0xFF;
        assert!(read_members(&zip).is_err());
    }
}
