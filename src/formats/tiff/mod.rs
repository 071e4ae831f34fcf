//! Single-image raster container support

pub mod tags;
pub mod ifd;
pub mod reader;
pub mod geo;

pub use ifd::{IFDEntry, IFD};
pub use reader::TiffReader;
pub use geo::GeoKeys;

/// TIFF magic number (42)
pub const TIFF_MAGIC: u16 = 42;

/// Minimum header size: marker + magic + first directory offset
pub const HEADER_SIZE: usize = 8;
