//! A proptest generator for U-Blox NAV-PVT messages.

use byteorder::{LittleEndian, WriteBytesExt};
use proptest::prelude::*;
use max_m10s::{validate_packet, GnssFixType, NavPvtRef, UbxFrame};

const SYNC_CHAR_1: u8 = 0xB5;
const SYNC_CHAR_2: u8 = 0x62;

#[derive(Debug, Clone)]
pub struct NavPvtPayload {
    pub itow: u32,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
    pub valid: u8,
    pub fix_type: u8,
    pub flags: u8,
    pub num_sv: u8,
    pub lon: i32,
    pub lat: i32,
    pub h_msl: i32,
    pub g_speed: i32,
    pub head_mot: i32,
    pub p_dop: u16,
}

impl NavPvtPayload {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut wtr = Vec::with_capacity(92);
        wtr.write_u32::<LittleEndian>(self.itow).unwrap();
        wtr.write_u16::<LittleEndian>(self.year).unwrap();
        wtr.extend_from_slice(&[self.month, self.day, self.hour, self.min, self.sec, self.valid]);
        wtr.write_u32::<LittleEndian>(0).unwrap(); // tAcc
        wtr.write_i32::<LittleEndian>(0).unwrap(); // nano
        wtr.extend_from_slice(&[self.fix_type, self.flags, 0, self.num_sv]);
        wtr.write_i32::<LittleEndian>(self.lon).unwrap();
        wtr.write_i32::<LittleEndian>(self.lat).unwrap();
        wtr.write_i32::<LittleEndian>(0).unwrap(); // height
        wtr.write_i32::<LittleEndian>(self.h_msl).unwrap();
        wtr.extend_from_slice(&[0; 20]); // hAcc vAcc velN velE velD
        wtr.write_i32::<LittleEndian>(self.g_speed).unwrap();
        wtr.write_i32::<LittleEndian>(self.head_mot).unwrap();
        wtr.extend_from_slice(&[0; 8]); // sAcc headAcc
        wtr.write_u16::<LittleEndian>(self.p_dop).unwrap();
        wtr.extend_from_slice(&[0; 14]); // flags3 reserved headVeh magDec magAcc
        wtr
    }
}

fn nav_pvt_payload_strategy() -> impl Strategy<Value = NavPvtPayload> {
    (
        (
            any::<u32>(),
            2000u16..2100,
            1u8..=12,
            1u8..=28,
            0u8..24,
            0u8..60,
            0u8..60,
            any::<u8>(),
        ),
        (
            0u8..=5,
            any::<u8>(),
            0u8..64,
            -1_800_000_000i32..=1_800_000_000,
            -900_000_000i32..=900_000_000,
            any::<i32>(),
            0i32..100_000,
            0i32..36_000_000,
            any::<u16>(),
        ),
    )
        .prop_map(
            |(
                (itow, year, month, day, hour, min, sec, valid),
                (fix_type, flags, num_sv, lon, lat, h_msl, g_speed, head_mot, p_dop),
            )| NavPvtPayload {
                itow,
                year,
                month,
                day,
                hour,
                min,
                sec,
                valid,
                fix_type,
                flags,
                num_sv,
                lon,
                lat,
                h_msl,
                g_speed,
                head_mot,
                p_dop,
            },
        )
}

fn calculate_checksum(data: &[u8]) -> (u8, u8) {
    let mut ck_a: u8 = 0;
    let mut ck_b: u8 = 0;
    for byte in data {
        ck_a = ck_a.wrapping_add(*byte);
        ck_b = ck_b.wrapping_add(ck_a);
    }
    (ck_a, ck_b)
}

pub fn ubx_nav_pvt_frame_strategy() -> impl Strategy<Value = (NavPvtPayload, Vec<u8>)> {
    nav_pvt_payload_strategy().prop_map(|payload_data| {
        let payload = payload_data.to_bytes();

        let class_id = 0x01;
        let message_id = 0x07;
        let length = payload.len() as u16;

        let mut frame_core = Vec::with_capacity(4 + payload.len());
        frame_core.push(class_id);
        frame_core.push(message_id);
        frame_core.write_u16::<LittleEndian>(length).unwrap();
        frame_core.extend_from_slice(&payload);

        let (ck_a, ck_b) = calculate_checksum(&frame_core);

        let mut final_frame = Vec::with_capacity(8 + payload.len());
        final_frame.push(SYNC_CHAR_1);
        final_frame.push(SYNC_CHAR_2);
        final_frame.extend_from_slice(&frame_core);
        final_frame.push(ck_a);
        final_frame.push(ck_b);

        (payload_data, final_frame)
    })
}

proptest! {
    #[test]
    fn test_nav_pvt_frames((expected, frame) in ubx_nav_pvt_frame_strategy()) {
        prop_assert_eq!(frame.len(), 100);
        prop_assert!(validate_packet(&frame, 0x01, 0x07).is_ok());

        let view = UbxFrame::new(&frame).unwrap();
        let pvt = NavPvtRef::from_payload(view.payload().unwrap()).unwrap();

        prop_assert_eq!(pvt.itow(), expected.itow);
        prop_assert_eq!(pvt.year(), expected.year);
        prop_assert_eq!(pvt.month(), expected.month);
        prop_assert_eq!(pvt.day(), expected.day);
        prop_assert_eq!(pvt.hour(), expected.hour);
        prop_assert_eq!(pvt.min(), expected.min);
        prop_assert_eq!(pvt.sec(), expected.sec);
        prop_assert_eq!(pvt.valid().bits(), expected.valid & 0x0f);
        prop_assert_eq!(pvt.fix_type(), GnssFixType::from(expected.fix_type));
        prop_assert_eq!(pvt.num_satellites(), expected.num_sv);
        prop_assert_eq!(pvt.lon_raw(), expected.lon);
        prop_assert_eq!(pvt.lat_raw(), expected.lat);
        prop_assert!((pvt.longitude() - f64::from(expected.lon) * 1e-7).abs() < 1e-9);
        prop_assert!((pvt.height_msl() - f64::from(expected.h_msl) * 1e-3).abs() < 1e-9);
        prop_assert!((pvt.ground_speed_2d() - f64::from(expected.g_speed) * 1e-3).abs() < 1e-9);
        prop_assert!((pvt.heading_motion() - f64::from(expected.head_mot) * 1e-5).abs() < 1e-9);
        prop_assert!((pvt.pdop() - f64::from(expected.p_dop) * 1e-2).abs() < 1e-9);
    }

    #[test]
    fn test_nav_pvt_single_byte_corruption(
        (_, frame) in ubx_nav_pvt_frame_strategy(),
        idx in 2usize..98,
        flip in 1u8..=255,
    ) {
        let mut corrupted = frame.clone();
        corrupted[idx] ^= flip;
        prop_assert!(validate_packet(&corrupted, 0x01, 0x07).is_err());
    }
}
