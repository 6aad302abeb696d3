//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used for frame dumps in debug logs and for loading captured
//! meter frames in tests.
//!
//! ## Usage
//!
//! ```rust
//! use mbus_meter::util::hex::{decode_hex, encode_hex, format_hex_compact};
//!
//! let frame = decode_hex("7E A0 07 7E").unwrap();
//! assert_eq!(frame, [0x7E, 0xA0, 0x07, 0x7E]);
//! assert_eq!(encode_hex(&frame), "7ea0077e");
//! assert_eq!(format_hex_compact(&frame), "7e a0 07 7e");
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Encode bytes to uppercase hex string, the form meter captures are usually quoted in
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is stripped, so captures copied from a serial monitor can be
/// pasted as-is.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "7e a0 07 7e" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Multi-line dump with offsets, `bytes_per_line` bytes per row
///
/// ```text
/// 0000: 7e a0 07 01 02 03 04 05
/// 0008: 7e
/// ```
pub fn pretty_hex(data: &[u8], bytes_per_line: usize) -> String {
    let bytes_per_line = bytes_per_line.max(1);
    data.chunks(bytes_per_line)
        .enumerate()
        .map(|(row, chunk)| format!("{:04x}: {}", row * bytes_per_line, format_hex_compact(chunk)))
        .collect::<Vec<_>>()
        .join("\n")
}
