//! Meter Frame Constants
//!
//! This module defines the byte values and field layout constants used when
//! scanning and decoding delimiter-framed OBIS meter telemetry.

/// Opening and closing flag of every frame
pub const FRAME_DELIMITER: u8 = 0x7E;

/// Buffers shorter than this cannot hold a frame (flag, payload byte, flag)
pub const MIN_FRAME_LEN: usize = 3;

/// Mask selecting the frame format nibble of the format byte
pub const FRAME_FORMAT_MASK: u8 = 0xF0;

/// Mask selecting the 12-bit declared message length from bytes 1 and 2
pub const FRAME_LENGTH_MASK: u16 = 0x0FFF;

/// The only frame format carrying decodable meter lists
pub const FRAME_FORMAT_TYPE_3: u8 = 0xA0;

/// Number of flag bytes not counted by the declared message length
pub const FRAME_FLAG_OVERHEAD: usize = 2;

// ----------------------------------------------------------------------------
// OBIS field layout
// ----------------------------------------------------------------------------

/// Data type tag of an octet string
pub const OBIS_TAG_OCTET_STRING: u8 = 0x09;

/// Length of an OBIS logical name
pub const OBIS_CODE_LEN: u8 = 0x06;

/// Prefix preceding every OBIS logical name in a meter list
pub const OBIS_TAG_PREFIX: [u8; 2] = [OBIS_TAG_OCTET_STRING, OBIS_CODE_LEN];

/// Full search tag length: prefix plus the six code bytes
pub const OBIS_SEARCH_TAG_LEN: usize = 8;

/// Type byte between the search tag and the encoded value
pub const OBIS_VALUE_TYPE_LEN: usize = 1;

// Data type tags used by the meters for the value that follows a code
pub const DATA_TYPE_DOUBLE_LONG_UNSIGNED: u8 = 0x06;
pub const DATA_TYPE_LONG_UNSIGNED: u8 = 0x12;

/// Scale between raw current values and amperes
pub const CURRENT_SCALE: f64 = 100.0;
