//! I/O utilities for parcelkit
//!
//! Provides core primitives for reading binary field-file formats from
//! in-memory buffers.

pub mod traits;
pub mod byte_order;

pub use traits::SeekableReader;
pub use byte_order::ByteOrder;
