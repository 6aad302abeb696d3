//! # Utility Modules
//!
//! Common helpers shared by the frame scanner, the decoders and the tests.

pub mod hex;

// Re-export commonly used types and functions
pub use hex::{
    decode_hex, encode_hex, encode_hex_upper, format_hex_compact, pretty_hex, HexError,
};
