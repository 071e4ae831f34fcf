//! Raster directory reader over an in-memory buffer

use super::ifd::{IFDEntry, IFD};
use super::tags::field_types;
use super::{HEADER_SIZE, TIFF_MAGIC};
use crate::error::{Error, Result};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::{ByteOrder, SeekableReader};
use std::io::{Cursor, Read};

/// Reads the tagged-entry directory of a single-image raster container
///
/// The reader operates on a complete, already-buffered upload. Multi-byte
/// reads follow the byte order declared by the two-byte marker at the start
/// of the buffer.
#[derive(Debug)]
pub struct TiffReader<'a> {
    data: &'a [u8],
    cursor: Cursor<&'a [u8]>,
    byte_order: ByteOrder,
}

impl<'a> TiffReader<'a> {
    /// Validates the header and prepares a reader over the buffer
    ///
    /// Fails when the buffer is shorter than the 8-byte header, the byte
    /// order marker is unrecognized, or the magic number is not 42.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::Format(format!(
                "buffer of {} bytes is shorter than the {}-byte raster header",
                data.len(),
                HEADER_SIZE
            )));
        }

        let marker = [data[0], data[1]];
        let byte_order = ByteOrder::from_marker(marker)
            .ok_or_else(|| Error::InvalidByteOrder(u16::from_be_bytes(marker)))?;

        let mut cursor = Cursor::new(data);
        cursor.set_position(2);

        let handler = byte_order.handler();
        let magic = handler.read_u16(&mut cursor)?;
        if magic != TIFF_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        Ok(Self {
            data,
            cursor,
            byte_order,
        })
    }

    /// Returns the detected byte order
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Reads the first directory of tagged entries
    pub fn read_directory(&mut self) -> Result<IFD> {
        let handler = self.byte_order.handler();

        self.cursor.set_position(4);
        let offset = handler.read_u32(&mut self.cursor)?;
        self.check_offset(offset, "directory")?;

        self.cursor.set_position(offset as u64);
        let entry_count = handler.read_u16(&mut self.cursor)?;

        let mut ifd = IFD::new(offset);

        for _ in 0..entry_count {
            let tag = handler.read_u16(&mut self.cursor)?;
            let field_type = handler.read_u16(&mut self.cursor)?;
            let count = handler.read_u32(&mut self.cursor)?;

            let mut raw_value = [0u8; 4];
            self.cursor.read_exact(&mut raw_value)?;

            let mut value_cursor = Cursor::new(&raw_value[..]);
            let value_offset = handler.read_u32(&mut value_cursor)?;

            ifd.add_entry(IFDEntry::new(tag, field_type, count, value_offset, raw_value));
        }

        Ok(ifd)
    }

    /// Reads an entry's typed values decoded to f64
    ///
    /// Values whose total encoded size is 4 bytes or less live inline in the
    /// entry's trailing field and are decoded from its raw bytes; larger
    /// values are read at the entry's offset.
    pub fn read_values(&mut self, entry: &IFDEntry) -> Result<Vec<f64>> {
        let handler = self.byte_order.handler();

        if entry.is_inline() {
            let mut cursor = Cursor::new(&entry.raw_value[..]);
            decode_elements(&mut cursor, &*handler, entry)
        } else {
            self.check_offset(entry.value_offset, "tag value")?;
            self.cursor.set_position(entry.value_offset as u64);
            decode_elements(&mut self.cursor, &*handler, entry)
        }
    }

    /// Reads an entry's values as a u16 array (geo key directories)
    pub fn read_u16_values(&mut self, entry: &IFDEntry) -> Result<Vec<u16>> {
        if entry.field_type != field_types::SHORT {
            return Err(Error::Format(format!(
                "expected SHORT values for tag {}, found field type {}",
                entry.tag, entry.field_type
            )));
        }

        let handler = self.byte_order.handler();
        let mut values = Vec::with_capacity(entry.count as usize);

        if entry.is_inline() {
            let mut cursor = Cursor::new(&entry.raw_value[..]);
            for _ in 0..entry.count {
                values.push(handler.read_u16(&mut cursor)?);
            }
        } else {
            self.check_offset(entry.value_offset, "tag value")?;
            self.cursor.set_position(entry.value_offset as u64);
            for _ in 0..entry.count {
                values.push(handler.read_u16(&mut self.cursor)?);
            }
        }

        Ok(values)
    }

    fn check_offset(&self, offset: u32, what: &str) -> Result<()> {
        if offset as usize >= self.data.len() {
            return Err(Error::Format(format!(
                "{} offset {} is beyond the end of the {}-byte buffer",
                what,
                offset,
                self.data.len()
            )));
        }
        Ok(())
    }
}

fn decode_elements(
    reader: &mut dyn SeekableReader,
    handler: &dyn ByteOrderHandler,
    entry: &IFDEntry,
) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(entry.count as usize);

    for _ in 0..entry.count {
        let value = match entry.field_type {
            field_types::BYTE => {
                let mut buf = [0u8; 1];
                reader.read_exact(&mut buf)?;
                buf[0] as f64
            }
            field_types::SHORT => handler.read_u16(reader)? as f64,
            field_types::LONG => handler.read_u32(reader)? as f64,
            field_types::RATIONAL => {
                let numerator = handler.read_u32(reader)?;
                let denominator = handler.read_u32(reader)?;
                if denominator == 0 {
                    0.0
                } else {
                    numerator as f64 / denominator as f64
                }
            }
            field_types::DOUBLE => handler.read_f64(reader)?,
            other => {
                return Err(Error::Format(format!(
                    "unsupported field type {} for tag {}",
                    other, entry.tag
                )))
            }
        };
        values.push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::tiff::tags;

    /// Builds a little-endian raster buffer with the given directory entries
    /// and trailing value payload.
    pub fn build_tiff(entries: &[(u16, u16, u32, [u8; 4])], payload: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"II");
        data.extend_from_slice(&42u16.to_le_bytes());
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        for &(tag, field_type, count, raw) in entries {
            data.extend_from_slice(&tag.to_le_bytes());
            data.extend_from_slice(&field_type.to_le_bytes());
            data.extend_from_slice(&count.to_le_bytes());
            data.extend_from_slice(&raw);
        }
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_short_buffer_rejected() {
        let err = TiffReader::new(b"II*").unwrap_err();
        assert!(err.to_string().contains("shorter"));
    }

    #[test]
    fn test_bad_marker_rejected() {
        let data = build_tiff(&[], &[]);
        let mut bad = data.clone();
        bad[0] = b'X';
        bad[1] = b'X';
        assert!(matches!(
            TiffReader::new(&bad),
            Err(Error::InvalidByteOrder(_))
        ));
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut data = build_tiff(&[], &[]);
        data[2] = 43;
        assert!(matches!(TiffReader::new(&data), Err(Error::InvalidMagic(43))));
    }

    #[test]
    fn test_read_directory() {
        let data = build_tiff(
            &[
                (tags::IMAGE_WIDTH, field_types::LONG, 1, 640u32.to_le_bytes()),
                (tags::IMAGE_LENGTH, field_types::LONG, 1, 480u32.to_le_bytes()),
            ],
            &[],
        );

        let mut reader = TiffReader::new(&data).unwrap();
        let ifd = reader.read_directory().unwrap();
        assert_eq!(ifd.entry_count(), 2);
        assert_eq!(ifd.get_tag_value(tags::IMAGE_WIDTH), Some(640));
        assert_eq!(ifd.get_tag_value(tags::IMAGE_LENGTH), Some(480));
    }

    #[test]
    fn test_read_inline_short_values() {
        let mut raw = [0u8; 4];
        raw[..2].copy_from_slice(&7u16.to_le_bytes());
        raw[2..].copy_from_slice(&9u16.to_le_bytes());

        let data = build_tiff(&[(42, field_types::SHORT, 2, raw)], &[]);
        let mut reader = TiffReader::new(&data).unwrap();
        let ifd = reader.read_directory().unwrap();

        let entry = ifd.get_entry(42).unwrap();
        let values = reader.read_values(entry).unwrap();
        assert_eq!(values, vec![7.0, 9.0]);
    }

    #[test]
    fn test_read_offset_doubles() {
        // One directory entry; payload starts after 8 (header) + 2 (count)
        // + 12 (entry) + 4 (next-directory pointer) = offset 26.
        let payload_offset = 26u32;
        let mut payload = Vec::new();
        payload.extend_from_slice(&1.5f64.to_le_bytes());
        payload.extend_from_slice(&2.5f64.to_le_bytes());
        payload.extend_from_slice(&3.5f64.to_le_bytes());

        let data = build_tiff(
            &[(
                tags::MODEL_PIXEL_SCALE,
                field_types::DOUBLE,
                3,
                payload_offset.to_le_bytes(),
            )],
            &payload,
        );

        let mut reader = TiffReader::new(&data).unwrap();
        let ifd = reader.read_directory().unwrap();
        let entry = ifd.get_entry(tags::MODEL_PIXEL_SCALE).unwrap();
        let values = reader.read_values(entry).unwrap();
        assert_eq!(values, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_read_rational_with_zero_denominator() {
        let payload_offset = 26u32;
        let mut payload = Vec::new();
        payload.extend_from_slice(&300u32.to_le_bytes());
        payload.extend_from_slice(&0u32.to_le_bytes());

        let data = build_tiff(
            &[(282, field_types::RATIONAL, 1, payload_offset.to_le_bytes())],
            &payload,
        );

        let mut reader = TiffReader::new(&data).unwrap();
        let ifd = reader.read_directory().unwrap();
        let values = reader.read_values(ifd.get_entry(282).unwrap()).unwrap();
        assert_eq!(values, vec![0.0]);
    }

    #[test]
    fn test_big_endian_directory() {
        let mut data = Vec::new();
        data.extend_from_slice(b"MM");
        data.extend_from_slice(&42u16.to_be_bytes());
        data.extend_from_slice(&8u32.to_be_bytes());
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&tags::IMAGE_WIDTH.to_be_bytes());
        data.extend_from_slice(&field_types::SHORT.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        let mut raw = [0u8; 4];
        raw[..2].copy_from_slice(&640u16.to_be_bytes());
        data.extend_from_slice(&raw);
        data.extend_from_slice(&0u32.to_be_bytes());

        let mut reader = TiffReader::new(&data).unwrap();
        assert_eq!(reader.byte_order(), ByteOrder::BigEndian);

        let ifd = reader.read_directory().unwrap();
        let entry = ifd.get_entry(tags::IMAGE_WIDTH).unwrap();
        let values = reader.read_values(entry).unwrap();
        assert_eq!(values, vec![640.0]);
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        let data = build_tiff(
            &[(
                tags::MODEL_PIXEL_SCALE,
                field_types::DOUBLE,
                3,
                99999u32.to_le_bytes(),
            )],
            &[],
        );

        let mut reader = TiffReader::new(&data).unwrap();
        let ifd = reader.read_directory().unwrap();
        let entry = ifd.get_entry(tags::MODEL_PIXEL_SCALE).unwrap();
        assert!(reader.read_values(entry).is_err());
    }
}
