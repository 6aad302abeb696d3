//! # Meter Error Handling
//!
//! This module defines the MeterError enum, which represents the different error
//! types that can occur while slicing and decoding meter frames.
//!
//! Absence of a reading is not an error: a missing OBIS code is reported as
//! [`FieldResult::Absent`](crate::payload::FieldResult::Absent).

use crate::util::hex::HexError;
use thiserror::Error;

/// Represents the different error types that can occur in the meter crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeterError {
    /// A view would extend past the end of the buffer it borrows.
    #[error("View out of range: offset {offset} + length {length} exceeds buffer of {buffer_len} bytes")]
    OutOfRange {
        offset: usize,
        length: usize,
        buffer_len: usize,
    },

    /// An OBIS code was found but its value runs past the end of the frame.
    #[error("Truncated field at position {position}: {width} value bytes exceed frame of {frame_len} bytes")]
    Truncated {
        position: usize,
        width: usize,
        frame_len: usize,
    },

    /// A field width outside of 2, 3 or 4 bytes was requested.
    #[error("Invalid field width: {0}")]
    InvalidWidth(u8),

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string: {0}")]
    InvalidHex(#[from] HexError),
}
