//! Image File Directory (IFD) structures

use super::tags;
use std::collections::HashMap;

/// Represents an Image File Directory entry
///
/// Each entry is a fixed 12-byte record: tag id, field type, value count,
/// and a 4-byte field that holds either the values themselves (when they
/// fit) or an offset to them elsewhere in the buffer.
#[derive(Debug, Clone)]
pub struct IFDEntry {
    /// Tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u32,
    /// Offset to values when they do not fit inline
    pub value_offset: u32,
    /// Raw bytes of the value-or-offset field, in file order
    pub raw_value: [u8; 4],
}

impl IFDEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: u16, count: u32, value_offset: u32, raw_value: [u8; 4]) -> Self {
        Self {
            tag,
            field_type,
            count,
            value_offset,
            raw_value,
        }
    }

    /// Returns the size in bytes of one element of this field type
    pub fn field_type_size(&self) -> usize {
        use super::tags::field_types::*;
        match self.field_type {
            BYTE => 1,
            SHORT => 2,
            LONG => 4,
            RATIONAL | DOUBLE => 8,
            _ => 1,
        }
    }

    /// Returns whether the values are stored inline in the value-or-offset
    /// field itself (total encoded size of 4 bytes or less)
    pub fn is_inline(&self) -> bool {
        self.field_type_size() * self.count as usize <= 4
    }
}

/// Represents an Image File Directory
#[derive(Debug, Clone)]
pub struct IFD {
    /// Offset to this IFD in the buffer
    pub offset: u32,
    /// Entries in this IFD
    pub entries: Vec<IFDEntry>,
    /// Tag map for quick lookup
    tag_map: HashMap<u16, usize>,
}

impl IFD {
    /// Creates a new IFD
    pub fn new(offset: u32) -> Self {
        Self {
            offset,
            entries: Vec::new(),
            tag_map: HashMap::new(),
        }
    }

    /// Adds an entry to this IFD
    pub fn add_entry(&mut self, entry: IFDEntry) {
        let index = self.entries.len();
        self.tag_map.insert(entry.tag, index);
        self.entries.push(entry);
    }

    /// Gets an entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.tag_map.get(&tag).and_then(|&idx| self.entries.get(idx))
    }

    /// Gets the inline value of a tag as u32
    pub fn get_tag_value(&self, tag: u16) -> Option<u32> {
        self.get_entry(tag).map(|e| e.value_offset)
    }

    /// Returns number of entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Checks if this IFD carries geospatial tags
    pub fn is_georeferenced(&self) -> bool {
        self.get_entry(tags::MODEL_PIXEL_SCALE).is_some()
            || self.get_entry(tags::MODEL_TRANSFORMATION).is_some()
            || self.get_entry(tags::GEO_KEY_DIRECTORY).is_some()
    }
}
