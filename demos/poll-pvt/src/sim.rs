//! A stand-in MAX-M10S on an `embedded-hal` I2C bus.
//!
//! Answers CFG-VALSET with ACK-ACK and the NAV-PVT/NAV-STATUS polls with a
//! receiver that needs a few polls to get a 3D fix and then drifts north-east.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::{Datelike, Timelike, Utc};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use log::{debug, trace};
use max_m10s::{
    class, id, ubx_checksum, validate_packet, CfgKey, UbxFrame, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
};

const POLLS_BEFORE_FIX: u32 = 3;
const START_LAT: i32 = 455_152_000;
const START_LON: i32 = -1_226_784_000;
/// Idle byte the receiver clocks out when it has nothing queued
const IDLE: u8 = 0xff;

pub struct SimReceiver {
    address: u8,
    boot: Instant,
    pending: VecDeque<u8>,
    polls: u32,
    rate_ms: u16,
    fault_every: Option<u32>,
}

impl SimReceiver {
    /// `address` is the 7-bit address the receiver answers to
    pub fn new(address: u8) -> Self {
        Self {
            address,
            boot: Instant::now(),
            pending: VecDeque::new(),
            polls: 0,
            rate_ms: 1000,
            fault_every: None,
        }
    }

    /// Corrupt the checksum of every `n`th poll response
    pub fn with_fault_every(mut self, n: Option<u32>) -> Self {
        self.fault_every = n.filter(|n| *n > 0);
        self
    }

    fn uptime_ms(&self) -> u32 {
        u32::try_from(self.boot.elapsed().as_millis()).unwrap_or(u32::MAX)
    }

    fn has_fix(&self) -> bool {
        self.polls > POLLS_BEFORE_FIX
    }

    fn queue(&mut self, class: u8, msg_id: u8, payload: &[u8]) {
        let mut frame = Vec::with_capacity(payload.len() + 8);
        frame.extend_from_slice(&[UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2, class, msg_id]);
        frame.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        frame.extend_from_slice(payload);
        let (ck_a, ck_b) = ubx_checksum(&frame[2..]);
        frame.extend_from_slice(&[ck_a, ck_b]);
        self.pending.extend(frame);
    }

    fn queue_poll_response(&mut self, msg_id: u8, payload: &[u8]) {
        self.polls += 1;
        self.queue(class::NAV, msg_id, payload);
        if let Some(n) = self.fault_every {
            if self.polls % n == 0 {
                debug!("simulator: corrupting response #{}", self.polls);
                if let Some(last) = self.pending.back_mut() {
                    *last ^= 0x5a;
                }
            }
        }
    }

    fn on_write(&mut self, bytes: &[u8]) {
        let Ok(frame) = UbxFrame::new(bytes) else {
            return;
        };
        if validate_packet(bytes, frame.class(), frame.msg_id()).is_err() {
            debug!("simulator: dropping malformed frame {:02x?}", bytes);
            return;
        }
        let payload = frame.payload().unwrap_or_default();
        match (frame.class(), frame.msg_id()) {
            (class::CFG, id::CFG_VALSET) => self.on_valset(payload),
            (class::NAV, id::NAV_PVT) if payload.is_empty() => {
                let pvt = self.nav_pvt_payload();
                self.queue_poll_response(id::NAV_PVT, &pvt);
            },
            (class::NAV, id::NAV_STATUS) if payload.is_empty() => {
                let status = self.nav_status_payload();
                self.queue_poll_response(id::NAV_STATUS, &status);
            },
            (c, m) => self.queue(class::ACK, id::ACK_NAK, &[c, m]),
        }
    }

    fn on_valset(&mut self, payload: &[u8]) {
        let ack = [class::CFG, id::CFG_VALSET];
        let key = payload
            .get(4..8)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes);
        match key {
            Some(k) if k == CfgKey::RATE_MEAS.raw() && payload.len() == 10 => {
                self.rate_ms = u16::from_le_bytes([payload[8], payload[9]]);
                debug!("simulator: measurement rate {} ms", self.rate_ms);
                self.queue(class::ACK, id::ACK_ACK, &ack);
            },
            Some(k) if k == CfgKey::I2C_OUT_PROT_UBX.raw() || k == CfgKey::I2C_OUT_PROT_NMEA.raw() => {
                self.queue(class::ACK, id::ACK_ACK, &ack);
            },
            _ => self.queue(class::ACK, id::ACK_NAK, &ack),
        }
    }

    fn nav_pvt_payload(&self) -> [u8; 92] {
        let now = Utc::now();
        let mut p = [0u8; 92];
        let itow = (now.weekday().num_days_from_sunday() * 86_400 + now.num_seconds_from_midnight())
            * 1000
            + now.timestamp_subsec_millis();

        p[0..4].copy_from_slice(&itow.to_le_bytes());
        p[4..6].copy_from_slice(&(now.year() as u16).to_le_bytes());
        p[6] = now.month() as u8;
        p[7] = now.day() as u8;
        p[8] = now.hour() as u8;
        p[9] = now.minute() as u8;
        p[10] = now.second() as u8;
        p[11] = 0x07; // validDate | validTime | fullyResolved
        p[12..16].copy_from_slice(&25u32.to_le_bytes());

        if self.has_fix() {
            let drift = self.polls as i32 * 12;
            p[20] = 3;
            p[21] = 0x01; // gnssFixOK
            p[23] = 12;
            p[24..28].copy_from_slice(&(START_LON + drift).to_le_bytes());
            p[28..32].copy_from_slice(&(START_LAT + drift).to_le_bytes());
            p[32..36].copy_from_slice(&74_600i32.to_le_bytes());
            p[36..40].copy_from_slice(&52_700i32.to_le_bytes());
            p[40..44].copy_from_slice(&1_800u32.to_le_bytes());
            p[44..48].copy_from_slice(&2_600u32.to_le_bytes());
            p[60..64].copy_from_slice(&155i32.to_le_bytes());
            p[64..68].copy_from_slice(&4_500_000i32.to_le_bytes());
            p[76..78].copy_from_slice(&132u16.to_le_bytes());
        } else {
            p[23] = self.polls.min(4) as u8;
            p[76..78].copy_from_slice(&9_999u16.to_le_bytes());
        }
        p
    }

    fn nav_status_payload(&self) -> [u8; 16] {
        let uptime = self.uptime_ms();
        let mut p = [0u8; 16];
        p[0..4].copy_from_slice(&uptime.to_le_bytes());
        if self.has_fix() {
            p[4] = 3;
            p[5] = 0x0d; // gpsFixOk | wknSet | towSet
            p[8..12].copy_from_slice(&uptime.min(29_000).to_le_bytes());
        }
        p[12..16].copy_from_slice(&uptime.to_le_bytes());
        p
    }
}

impl ErrorType for SimReceiver {
    type Error = ErrorKind;
}

impl I2c for SimReceiver {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    trace!("simulator: write {} bytes", bytes.len());
                    self.on_write(bytes);
                },
                Operation::Read(buffer) => {
                    trace!("simulator: read {} bytes", buffer.len());
                    for b in buffer.iter_mut() {
                        *b = self.pending.pop_front().unwrap_or(IDLE);
                    }
                },
            }
        }
        Ok(())
    }
}
