//! # OBIS Field Decoding
//!
//! Meter lists carry each reading as an OBIS logical name followed by a typed
//! value:
//!
//! ```text
//! 09 06  A B C D E F  tt  vv vv [vv vv]
//! ^^^^^  ^^^^^^^^^^^  ^^  ^^^^^^^^^^^^^
//! tag    OBIS code    type  big-endian value, 2/3/4 bytes
//! ```
//!
//! The decoder looks up the first `09 06 A..F` sequence in the frame, skips
//! the type byte and reads `width` bytes big-endian. The type byte is not
//! interpreted; the width comes from the quantity catalog.

use std::fmt;

use nom::{
    combinator::map,
    number::complete::{be_u16, be_u24, be_u32},
    IResult,
};
use serde::{Serialize, Serializer};

use crate::constants::{OBIS_SEARCH_TAG_LEN, OBIS_TAG_PREFIX, OBIS_VALUE_TYPE_LEN};
use crate::error::MeterError;
use crate::logging::log_warn;
use crate::mbus::frame::FrameView;
use crate::mbus::search::find;

/// A six-group OBIS identifier `A-B:C.D.E*F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObisCode([u8; 6]);

impl ObisCode {
    pub const fn new(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8) -> Self {
        Self([a, b, c, d, e, f])
    }

    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Value group C, which tells the quantities of this meter family apart.
    pub const fn group_c(&self) -> u8 {
        self.0[2]
    }

    /// The byte sequence identifying this code inside a frame.
    pub const fn search_tag(&self) -> [u8; OBIS_SEARCH_TAG_LEN] {
        let [a, b, c, d, e, f] = self.0;
        [OBIS_TAG_PREFIX[0], OBIS_TAG_PREFIX[1], a, b, c, d, e, f]
    }
}

impl From<[u8; 6]> for ObisCode {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ObisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a}-{b}:{c}.{d}.{e}*{g}")
    }
}

impl Serialize for ObisCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Encoded width of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldWidth {
    Two,
    Three,
    Four,
}

impl FieldWidth {
    pub const fn bytes(self) -> usize {
        match self {
            FieldWidth::Two => 2,
            FieldWidth::Three => 3,
            FieldWidth::Four => 4,
        }
    }
}

impl TryFrom<u8> for FieldWidth {
    type Error = MeterError;

    fn try_from(width: u8) -> Result<Self, Self::Error> {
        match width {
            2 => Ok(FieldWidth::Two),
            3 => Ok(FieldWidth::Three),
            4 => Ok(FieldWidth::Four),
            other => Err(MeterError::InvalidWidth(other)),
        }
    }
}

/// Outcome of looking up one field in one frame.
///
/// `Absent` is the ordinary result for a frame that does not carry the
/// quantity. Serializes as the raw number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum FieldResult {
    Present(u32),
    #[default]
    Absent,
}

impl FieldResult {
    pub const fn value(self) -> Option<u32> {
        match self {
            FieldResult::Present(raw) => Some(raw),
            FieldResult::Absent => None,
        }
    }

    pub const fn is_present(self) -> bool {
        matches!(self, FieldResult::Present(_))
    }
}

impl From<Option<u32>> for FieldResult {
    fn from(value: Option<u32>) -> Self {
        value.map_or(FieldResult::Absent, FieldResult::Present)
    }
}

fn parse_be_value(input: &[u8], width: FieldWidth) -> IResult<&[u8], u32> {
    match width {
        FieldWidth::Two => map(be_u16, u32::from)(input),
        FieldWidth::Three => be_u24(input),
        FieldWidth::Four => be_u32(input),
    }
}

/// Locates `code` in `frame` and decodes its value.
///
/// Returns `Ok(None)` when the code does not occur in the frame and
/// [`MeterError::Truncated`] when the value would extend past the frame end.
pub fn try_decode_field(
    frame: &FrameView<'_>,
    code: &ObisCode,
    width: FieldWidth,
) -> Result<Option<u32>, MeterError> {
    let Some(position) = find(frame, &code.search_tag()) else {
        return Ok(None);
    };

    let truncated = || MeterError::Truncated {
        position,
        width: width.bytes(),
        frame_len: frame.size(),
    };
    let start = position + OBIS_SEARCH_TAG_LEN + OBIS_VALUE_TYPE_LEN;
    let value = frame
        .as_bytes()
        .get(start..start + width.bytes())
        .ok_or_else(truncated)?;

    let (_, raw) = parse_be_value(value, width).map_err(|_| truncated())?;
    Ok(Some(raw))
}

/// Infallible form of [`try_decode_field`]: truncated fields are `Absent`.
pub fn decode_field(frame: &FrameView<'_>, code: &ObisCode, width: FieldWidth) -> FieldResult {
    match try_decode_field(frame, code, width) {
        Ok(raw) => raw.into(),
        Err(e) => {
            log_warn(&format!("OBIS {code} at frame offset {}: {e}", frame.offset()));
            FieldResult::Absent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DATA_TYPE_DOUBLE_LONG_UNSIGNED;
    use proptest::prelude::*;

    const POWER: ObisCode = ObisCode::new(1, 1, 1, 7, 0, 0xFF);

    fn frame_with_field(code: &ObisCode, value: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0x7E, 0xA0, 0x00, 0x01, 0x02];
        bytes.extend_from_slice(&code.search_tag());
        bytes.push(DATA_TYPE_DOUBLE_LONG_UNSIGNED);
        bytes.extend_from_slice(value);
        bytes.push(0x7E);
        bytes
    }

    #[test]
    fn test_display_notation() {
        assert_eq!(POWER.to_string(), "1-1:1.7.0*255");
    }

    #[test]
    fn test_search_tag_layout() {
        assert_eq!(POWER.search_tag(), [0x09, 0x06, 1, 1, 1, 7, 0, 0xFF]);
    }

    #[test]
    fn test_width_conversion() {
        assert_eq!(FieldWidth::try_from(3).unwrap().bytes(), 3);
        assert_eq!(FieldWidth::try_from(1), Err(MeterError::InvalidWidth(1)));
        assert_eq!(FieldWidth::try_from(8), Err(MeterError::InvalidWidth(8)));
    }

    #[test]
    fn test_three_byte_value() {
        let bytes = frame_with_field(&POWER, &[0x01, 0x02, 0x03]);
        let view = FrameView::new(&bytes, 0, bytes.len()).unwrap();
        assert_eq!(try_decode_field(&view, &POWER, FieldWidth::Three), Ok(Some(0x010203)));
    }

    #[test]
    fn test_value_ending_exactly_at_frame_end() {
        let mut bytes = vec![0x7E];
        bytes.extend_from_slice(&POWER.search_tag());
        bytes.extend_from_slice(&[0x12, 0x00, 0xE6]);
        let view = FrameView::new(&bytes, 0, bytes.len()).unwrap();
        assert_eq!(decode_field(&view, &POWER, FieldWidth::Two), FieldResult::Present(230));
    }

    #[test]
    fn test_field_result_from_option() {
        assert_eq!(FieldResult::from(Some(7)), FieldResult::Present(7));
        assert_eq!(FieldResult::from(None), FieldResult::Absent);
        assert_eq!(FieldResult::Present(7).value(), Some(7));
        assert!(!FieldResult::Absent.is_present());
    }

    proptest! {
        #[test]
        fn prop_decode_never_reads_past_frame(
            bytes in proptest::collection::vec(any::<u8>(), 0..64),
            cut in 0usize..64,
            width in 2u8..=4,
        ) {
            // Plant the tag so the lookup succeeds, then truncate anywhere.
            let mut planted = POWER.search_tag().to_vec();
            planted.extend(bytes);
            let bytes = planted;
            let len = cut.min(bytes.len());
            let view = FrameView::new(&bytes, 0, len).unwrap();
            let width = FieldWidth::try_from(width).unwrap();

            match try_decode_field(&view, &POWER, width) {
                Ok(Some(_)) => {
                    prop_assert!(OBIS_SEARCH_TAG_LEN + 1 + width.bytes() <= len);
                }
                Ok(None) => {
                    prop_assert!(len < OBIS_SEARCH_TAG_LEN);
                }
                Err(MeterError::Truncated { position, .. }) => {
                    prop_assert_eq!(position, 0);
                    prop_assert!(OBIS_SEARCH_TAG_LEN + 1 + width.bytes() > len);
                }
                Err(e) => {
                    prop_assert!(false, "unexpected error {}", e);
                }
            }
        }

        #[test]
        fn prop_round_trip_four_byte_value(value in any::<u32>()) {
            let bytes = frame_with_field(&POWER, &value.to_be_bytes());
            let view = FrameView::new(&bytes, 0, bytes.len()).unwrap();
            prop_assert_eq!(decode_field(&view, &POWER, FieldWidth::Four), FieldResult::Present(value));
        }
    }
}
