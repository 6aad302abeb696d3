#![no_main]

use libfuzzer_sys::fuzz_target;
use mbus_meter::constants::FRAME_DELIMITER;
use mbus_meter::{decode_buffer, extract_frames};

fuzz_target!(|data: &[u8]| {
    // Arbitrary receive buffers must never panic or read out of bounds.
    let frames = extract_frames(data);
    let mut previous_end = 0;
    for frame in &frames {
        assert!(frame.size() > 2);
        assert_eq!(frame.front(), Some(FRAME_DELIMITER));
        assert_eq!(frame.back(), Some(FRAME_DELIMITER));
        assert!(frame.offset() >= previous_end);
        previous_end = frame.offset() + frame.size();
    }

    let records = decode_buffer(data);
    assert_eq!(records.len(), frames.len());

    // Same input framed as a format 0xA0 list to reach the field decoder.
    if data.len() > 2 {
        let mut framed = vec![FRAME_DELIMITER, 0xA0];
        framed.extend(data.iter().filter(|&&b| b != FRAME_DELIMITER));
        framed.push(FRAME_DELIMITER);
        let _ = decode_buffer(&framed);
    }
});
