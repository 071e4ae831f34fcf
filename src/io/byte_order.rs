//! Byte order (endianness) handling
//!
//! Provides utilities for reading multi-byte values in different byte
//! orders. Raster containers declare their order with a two-byte marker;
//! all subsequent multi-byte reads follow it.

use crate::io::SeekableReader;
use std::io::{self, Result};

/// Represents the byte order (endianness) of binary data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (least significant byte first)
    LittleEndian,
    /// Big-endian byte order (most significant byte first)
    BigEndian,
}

impl ByteOrder {
    /// Detects byte order from the two marker bytes
    ///
    /// Raster files start with either "II" (0x4949) for little-endian
    /// or "MM" (0x4D4D) for big-endian.
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match &marker {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Reads and detects byte order from a reader
    pub fn detect<R: SeekableReader>(reader: &mut R) -> Result<Self> {
        let mut marker = [0u8; 2];
        reader.read_exact(&mut marker)?;

        Self::from_marker(marker).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid byte order marker bytes: {:02X}{:02X}",
                    marker[0], marker[1]
                ),
            )
        })
    }

    /// Creates a handler for this byte order
    pub fn handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndian),
            ByteOrder::BigEndian => Box::new(BigEndian),
        }
    }
}

/// Trait for reading typed values with a specific byte order
pub trait ByteOrderHandler: Send + Sync {
    /// Reads an unsigned 16-bit integer
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    /// Reads an unsigned 32-bit integer
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    /// Reads a 64-bit floating point number
    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64>;
}

struct LittleEndian;

impl ByteOrderHandler for LittleEndian {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }
}

struct BigEndian;

impl ByteOrderHandler for BigEndian {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(f64::from_be_bytes(buf))
    }
}
