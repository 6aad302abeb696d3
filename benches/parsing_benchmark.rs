use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mbus_meter::util::hex::decode_hex;
use mbus_meter::{decode_buffer, extract_frames};

const THREE_PHASE_LIST_HEX: &str = "7EA0E22B2113239AE6E7000F000000000C07E10A1405033A1EFF80000002190A0E4B616D73747275705F563030303109060101000005FF0A103537303635363732373433383937303209060101600101FF0A1236383431313231424E32343331303130343009060101010700FF06000005E309060101020700FF060000000009060101030700FF060000000009060101040700FF0600000144090601011F0700FF06000000E209060101330700FF060000008609060101470700FF060000013709060101200700FF1200E809060101340700FF1200E709060101480700FF1200E93C577E";

fn benchmark_decode_buffer(c: &mut Criterion) {
    let frame = decode_hex(THREE_PHASE_LIST_HEX).unwrap();
    // Ten seconds of a 2400 baud capture: frames with idle noise in between.
    let mut capture = Vec::new();
    for _ in 0..10 {
        capture.extend_from_slice(&[0x00, 0x13, 0x55]);
        capture.extend_from_slice(&frame);
    }

    c.bench_function("extract_frames", |b| {
        b.iter(|| {
            let frames = extract_frames(black_box(&capture));
            black_box(frames.len());
        })
    });

    c.bench_function("decode_buffer", |b| {
        b.iter(|| {
            let records = decode_buffer(black_box(&capture));
            black_box(records);
        })
    });
}

criterion_group!(benches, benchmark_decode_buffer);
criterion_main!(benches);
