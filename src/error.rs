//! Error types for parcelkit

use std::fmt;
use std::io;

/// Result type for parcelkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while ingesting field files
///
/// Two broad classes exist: structural violations of an expected binary
/// layout (`InvalidByteOrder`, `InvalidMagic`, `MissingTag`, `Format`) and
/// content that is structurally well-formed but semantically unusable
/// (`Parse`). Both are terminal for the request that triggered them.
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Invalid byte order marker
    InvalidByteOrder(u16),

    /// Invalid raster magic number
    InvalidMagic(u16),

    /// Missing required raster tag
    MissingTag(&'static str),

    /// Structural violation of an expected binary layout
    Format(String),

    /// Well-formed but semantically unusable content
    Parse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::InvalidByteOrder(value) => {
                write!(f, "Invalid byte order marker: 0x{:04X}", value)
            }
            Error::InvalidMagic(value) => write!(f, "Invalid raster magic number: {}", value),
            Error::MissingTag(name) => write!(f, "Missing required tag: {}", name),
            Error::Format(msg) => write!(f, "Invalid format: {}", msg),
            Error::Parse(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}
