//! # Meter Record Decoding
//!
//! Turns one extracted frame into a [`MeterRecord`]. Decoding is permissive:
//! noise, unsupported frame formats and missing fields all produce a record
//! with absent readings rather than an error, so callers can feed every
//! region the extractor finds straight into the decoder.
//!
//! ```rust
//! use mbus_meter::payload::record::{decode_buffer, is_no_value};
//!
//! let buffer = [
//!     0x7E, 0xA0, 0x0F,
//!     0x09, 0x06, 0x01, 0x01, 0x01, 0x07, 0x00, 0xFF, 0x06, 0x00, 0x00, 0x03, 0xE8,
//!     0x7E,
//! ];
//! let records = decode_buffer(&buffer);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].active_power_plus.value(), Some(1000));
//! assert!(is_no_value(records[0].current_l1_amps));
//! ```

use log::debug;
use nom::{number::complete::{be_u16, be_u8}, IResult};
use serde::Serialize;

use crate::constants::{
    CURRENT_SCALE, FRAME_DELIMITER, FRAME_FLAG_OVERHEAD, FRAME_FORMAT_MASK, FRAME_FORMAT_TYPE_3,
    FRAME_LENGTH_MASK,
};
use crate::logging::{log_debug, log_frame_hex};
use crate::mbus::extract::FrameExtractor;
use crate::mbus::frame::FrameView;
use crate::payload::obis::{decode_field, FieldResult};
use crate::payload::quantity::QuantityId;

/// Current value used when the frame carries no reading for a phase.
pub const NO_VALUE: f64 = f64::NAN;

/// Whether a current reading is the [`NO_VALUE`] sentinel.
pub fn is_no_value(amps: f64) -> bool {
    amps.is_nan()
}

/// Format and declared length from the two bytes after the opening flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameHeader {
    /// Upper nibble of the format byte.
    pub format: u8,
    /// 12-bit message length; excludes the two flags.
    pub declared_length: u16,
}

impl FrameHeader {
    fn parse(input: &[u8]) -> IResult<&[u8], FrameHeader> {
        let (input, _flag) = be_u8(input)?;
        let (input, word) = be_u16(input)?;
        let format = (word >> 8) as u8 & FRAME_FORMAT_MASK;
        Ok((
            input,
            FrameHeader {
                format,
                declared_length: word & FRAME_LENGTH_MASK,
            },
        ))
    }

    /// Reads the header of `frame`, or `None` if the frame is under three bytes.
    pub fn from_frame(frame: &FrameView<'_>) -> Option<FrameHeader> {
        Self::parse(frame.as_bytes()).ok().map(|(_, header)| header)
    }

    /// Whether the declared length accounts for every byte of a frame of `frame_len` bytes.
    pub fn length_matches(&self, frame_len: usize) -> bool {
        usize::from(self.declared_length) + FRAME_FLAG_OVERHEAD == frame_len
    }
}

/// Readings decoded from one frame.
///
/// Every quantity is kept as a [`FieldResult`] with its raw value. The three
/// currents are also given in amperes, with [`NO_VALUE`] standing in for a
/// missing reading.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MeterRecord {
    pub header: Option<FrameHeader>,

    pub active_power_plus: FieldResult,
    pub active_power_minus: FieldResult,
    pub reactive_power_plus: FieldResult,
    pub reactive_power_minus: FieldResult,

    pub voltage_l1: FieldResult,
    pub voltage_l2: FieldResult,
    pub voltage_l3: FieldResult,

    pub current_l1: FieldResult,
    pub current_l2: FieldResult,
    pub current_l3: FieldResult,

    pub current_l1_amps: f64,
    pub current_l2_amps: f64,
    pub current_l3_amps: f64,
}

impl Default for MeterRecord {
    fn default() -> Self {
        Self::absent(None)
    }
}

impl MeterRecord {
    /// A record with no readings.
    pub fn absent(header: Option<FrameHeader>) -> Self {
        Self {
            header,
            active_power_plus: FieldResult::Absent,
            active_power_minus: FieldResult::Absent,
            reactive_power_plus: FieldResult::Absent,
            reactive_power_minus: FieldResult::Absent,
            voltage_l1: FieldResult::Absent,
            voltage_l2: FieldResult::Absent,
            voltage_l3: FieldResult::Absent,
            current_l1: FieldResult::Absent,
            current_l2: FieldResult::Absent,
            current_l3: FieldResult::Absent,
            current_l1_amps: NO_VALUE,
            current_l2_amps: NO_VALUE,
            current_l3_amps: NO_VALUE,
        }
    }

    /// Raw reading for `quantity`.
    pub fn get(&self, quantity: QuantityId) -> FieldResult {
        match quantity {
            QuantityId::ActivePowerPlus => self.active_power_plus,
            QuantityId::ActivePowerMinus => self.active_power_minus,
            QuantityId::ReactivePowerPlus => self.reactive_power_plus,
            QuantityId::ReactivePowerMinus => self.reactive_power_minus,
            QuantityId::VoltageL1 => self.voltage_l1,
            QuantityId::VoltageL2 => self.voltage_l2,
            QuantityId::VoltageL3 => self.voltage_l3,
            QuantityId::CurrentL1 => self.current_l1,
            QuantityId::CurrentL2 => self.current_l2,
            QuantityId::CurrentL3 => self.current_l3,
        }
    }

    fn field_mut(&mut self, quantity: QuantityId) -> &mut FieldResult {
        match quantity {
            QuantityId::ActivePowerPlus => &mut self.active_power_plus,
            QuantityId::ActivePowerMinus => &mut self.active_power_minus,
            QuantityId::ReactivePowerPlus => &mut self.reactive_power_plus,
            QuantityId::ReactivePowerMinus => &mut self.reactive_power_minus,
            QuantityId::VoltageL1 => &mut self.voltage_l1,
            QuantityId::VoltageL2 => &mut self.voltage_l2,
            QuantityId::VoltageL3 => &mut self.voltage_l3,
            QuantityId::CurrentL1 => &mut self.current_l1,
            QuantityId::CurrentL2 => &mut self.current_l2,
            QuantityId::CurrentL3 => &mut self.current_l3,
        }
    }

    /// True when no quantity was decoded.
    pub fn is_empty(&self) -> bool {
        QuantityId::ALL.iter().all(|q| !self.get(*q).is_present())
    }
}

fn to_amps(raw: FieldResult) -> f64 {
    raw.value()
        .map_or(NO_VALUE, |raw| f64::from(raw) / CURRENT_SCALE)
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Frame format (upper nibble of byte 1) accepted for decoding.
    pub frame_format: u8,
    /// Reject frames whose declared length disagrees with their size.
    /// When off, a mismatch is only logged.
    pub enforce_declared_length: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            frame_format: FRAME_FORMAT_TYPE_3,
            enforce_declared_length: false,
        }
    }
}

/// Decodes frames into [`MeterRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct MeterRecordDecoder {
    options: DecoderOptions,
}

impl MeterRecordDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decodes every cataloged quantity from `frame`.
    ///
    /// Frames with missing flags, an unsupported format or (when enforced)
    /// a wrong declared length give an all-absent record.
    pub fn decode(&self, frame: &FrameView<'_>) -> MeterRecord {
        let Some(header) = FrameHeader::from_frame(frame) else {
            log_debug(&format!("Frame at offset {} too short for a header", frame.offset()));
            return MeterRecord::absent(None);
        };
        let record = MeterRecord::absent(Some(header));

        if frame.front() != Some(FRAME_DELIMITER) || frame.back() != Some(FRAME_DELIMITER) {
            debug!("Frame at offset {} is not flag-delimited", frame.offset());
            return record;
        }

        if header.format != self.options.frame_format {
            debug!(
                "Frame at offset {}: unsupported format 0x{:02X}",
                frame.offset(),
                header.format
            );
            return record;
        }

        if !header.length_matches(frame.size()) {
            debug!(
                "Frame at offset {}: declared length {} but {} bytes between flags",
                frame.offset(),
                header.declared_length,
                frame.size().saturating_sub(FRAME_FLAG_OVERHEAD)
            );
            if self.options.enforce_declared_length {
                return record;
            }
        }

        log_frame_hex("Decoding frame", frame.as_bytes());
        Self::decode_fields(frame, record)
    }

    fn decode_fields(frame: &FrameView<'_>, mut record: MeterRecord) -> MeterRecord {
        for quantity in QuantityId::ALL {
            let entry = quantity.entry();
            *record.field_mut(quantity) = decode_field(frame, &entry.code, entry.width);
        }
        record.current_l1_amps = to_amps(record.current_l1);
        record.current_l2_amps = to_amps(record.current_l2);
        record.current_l3_amps = to_amps(record.current_l3);
        record
    }

    /// Extracts every frame in `buffer` and decodes each one, in order.
    pub fn decode_buffer(&self, buffer: &[u8]) -> Vec<MeterRecord> {
        FrameExtractor::new(buffer)
            .map(|frame| self.decode(&frame))
            .collect()
    }
}

/// Decodes `frame` with the default options.
pub fn decode_frame(frame: &FrameView<'_>) -> MeterRecord {
    MeterRecordDecoder::new().decode(frame)
}

/// Extracts and decodes every frame in `buffer` with the default options.
pub fn decode_buffer(buffer: &[u8]) -> Vec<MeterRecord> {
    MeterRecordDecoder::new().decode_buffer(buffer)
}
