//! The payload module decodes the contents of a frame: OBIS field lookup,
//! the quantity catalog and the per-frame meter record.

pub mod obis;
pub mod quantity;
pub mod record;

pub use obis::{decode_field, try_decode_field, FieldResult, FieldWidth, ObisCode};
pub use quantity::{CatalogEntry, QuantityId, QUANTITY_CATALOG};
pub use record::{
    decode_buffer, decode_frame, is_no_value, DecoderOptions, FrameHeader, MeterRecord,
    MeterRecordDecoder, NO_VALUE,
};
