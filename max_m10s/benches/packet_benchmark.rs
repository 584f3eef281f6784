use criterion::{criterion_group, criterion_main, Criterion};
use max_m10s::*;
use std::hint::black_box;

fn nav_pvt_frame() -> [u8; 100] {
    let mut frame = [0u8; 100];
    frame[..6].copy_from_slice(&[0xb5, 0x62, 0x01, 0x07, 92, 0]);
    for (i, b) in frame[6..98].iter_mut().enumerate() {
        *b = i as u8;
    }
    let (ck_a, ck_b) = ubx_checksum(&frame[2..98]);
    frame[98] = ck_a;
    frame[99] = ck_b;
    frame
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut buf = [0u8; BUFFER_CAPACITY];

    c.bench_function("prepare_command_nav_pvt", |b| {
        b.iter(|| prepare_command(black_box(&mut buf), 0x01, 0x07))
    });

    for val in [CfgVal::I2cOutProtUbx(true), CfgVal::RateMeas(100)] {
        c.bench_function(&format!("prepare_cfg_val_{:?}", val), |b| {
            b.iter(|| prepare_cfg_val(black_box(&mut buf), black_box(val)))
        });
    }

    let pvt = nav_pvt_frame();
    c.bench_function("validate_nav_pvt", |b| {
        b.iter(|| {
            let result = validate_packet(black_box(&pvt), 0x01, 0x07);
            assert!(result.is_ok());
        })
    });

    c.bench_function("decode_nav_pvt", |b| {
        b.iter(|| {
            let pvt = NavPvtRef::from_payload(black_box(&pvt[6..98])).unwrap();
            Position::from(&pvt)
        })
    });

    let ack = [0xb5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x8a, 0x98, 0xc1];
    c.bench_function("validate_ack", |b| {
        b.iter(|| validate_ack(black_box(&ack), 0x06, 0x8a))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
