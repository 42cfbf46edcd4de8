//! Shared constants for the zone record layout

/// Number of whitespace-separated fields in a zone record line
pub const RECORD_FIELD_COUNT: usize = 5;

/// Field holding the owner name
pub const NAME_FIELD: usize = 0;

/// Field holding the record type
pub const TYPE_FIELD: usize = 3;

/// Field holding the record data
pub const VALUE_FIELD: usize = 4;

/// Record type compared by default
pub const NS_RECORD_TYPE: &str = "ns";

/// Config value that disables record type filtering
pub const ANY_RECORD_TYPE: &str = "*";

/// Leading bytes of a gzip member
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
