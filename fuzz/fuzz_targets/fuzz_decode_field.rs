#![no_main]

use libfuzzer_sys::fuzz_target;
use mbus_meter::{try_decode_field, FieldWidth, FrameView, MeterError, QuantityId};

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = FrameView::new(data, 0, data.len()) else {
        return;
    };
    for quantity in QuantityId::ALL {
        let code = quantity.obis_code();
        for width in [FieldWidth::Two, FieldWidth::Three, FieldWidth::Four] {
            match try_decode_field(&frame, &code, width) {
                Ok(_) => {}
                Err(MeterError::Truncated { position, .. }) => {
                    assert!(position + 9 + width.bytes() > frame.size());
                }
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }
});
