//! # mbus-meter - OBIS Meter Readings from Delimited Frames
//!
//! The mbus-meter crate extracts energy meter readings from raw receive
//! buffers of `0x7E`-delimited frames carrying OBIS-coded meter lists, as
//! pushed by electricity meters on their customer port.
//!
//! ## Features
//!
//! - Slice a raw buffer into frames, skipping noise and partial reads
//! - Locate OBIS-tagged fields and decode their big-endian values
//! - Decode active/reactive power, per-phase voltage and current into a [`MeterRecord`]
//! - Never read outside the buffer, whatever the input
//! - Support for logging and error handling
//!
//! Acquiring the buffer (serial port, socket, file) is left to the caller.
//!
//! ## Usage
//!
//! ```rust
//! use mbus_meter::{extract_frames, MeterRecordDecoder, QuantityId};
//!
//! let buffer = [
//!     0x00, 0x7E, 0xA0, 0x0D,
//!     0x09, 0x06, 0x01, 0x01, 0x20, 0x07, 0x00, 0xFF, 0x12, 0x00, 0xE6,
//!     0x7E, 0x00,
//! ];
//! let decoder = MeterRecordDecoder::new();
//! for frame in extract_frames(&buffer) {
//!     let record = decoder.decode(&frame);
//!     assert_eq!(record.get(QuantityId::VoltageL1).value(), Some(230));
//! }
//! ```

pub mod constants;
pub mod error;
pub mod logging;
pub mod mbus;
pub mod payload;
pub mod util;

pub use crate::error::MeterError;
pub use crate::logging::{init_logger, log_frame_hex};

// Frame scanning
pub use mbus::{extract_frames, find, FrameExtractor, FrameView};

// Field and record decoding
pub use payload::{
    decode_buffer, decode_field, decode_frame, is_no_value, try_decode_field, DecoderOptions,
    FieldResult, FieldWidth, FrameHeader, MeterRecord, MeterRecordDecoder, ObisCode, QuantityId,
    NO_VALUE,
};
