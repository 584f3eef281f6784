//! Scripted transports and frame builders shared by the integration tests.

#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use byteorder::{LittleEndian, WriteBytesExt};
use max_m10s::{AsyncI2cTransport, I2cTransport, TransportError};

pub const SYNC_CHAR_1: u8 = 0xB5;
pub const SYNC_CHAR_2: u8 = 0x62;

/// What happened on the bus, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Transmit {
        address: u8,
        bytes: Vec<u8>,
        timeout_ms: Option<u32>,
    },
    Receive {
        address: u8,
        len: usize,
        timeout_ms: Option<u32>,
    },
    DelayMs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn calculate_checksum(data: &[u8]) -> (u8, u8) {
    let mut ck_a: u8 = 0;
    let mut ck_b: u8 = 0;
    for byte in data {
        ck_a = ck_a.wrapping_add(*byte);
        ck_b = ck_b.wrapping_add(ck_a);
    }
    (ck_a, ck_b)
}

pub fn frame(class: u8, id: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame_core = Vec::with_capacity(4 + payload.len());
    frame_core.push(class);
    frame_core.push(id);
    frame_core
        .write_u16::<LittleEndian>(payload.len() as u16)
        .unwrap();
    frame_core.extend_from_slice(payload);

    let (ck_a, ck_b) = calculate_checksum(&frame_core);

    let mut final_frame = Vec::with_capacity(8 + payload.len());
    final_frame.push(SYNC_CHAR_1);
    final_frame.push(SYNC_CHAR_2);
    final_frame.extend_from_slice(&frame_core);
    final_frame.push(ck_a);
    final_frame.push(ck_b);
    final_frame
}

pub fn ack_for(class: u8, id: u8) -> Vec<u8> {
    frame(0x05, 0x01, &[class, id])
}

pub fn nak_for(class: u8, id: u8) -> Vec<u8> {
    frame(0x05, 0x00, &[class, id])
}

pub fn valset_ack() -> Vec<u8> {
    ack_for(0x06, 0x8a)
}

/// NAV-PVT payload with a 3D fix over Portland, OR
pub fn nav_pvt_payload() -> Vec<u8> {
    let mut wtr = Vec::with_capacity(92);
    wtr.write_u32::<LittleEndian>(504_018_000).unwrap(); // itow
    wtr.write_u16::<LittleEndian>(2024).unwrap();
    wtr.extend_from_slice(&[6, 21, 20, 0, 18]); // month day hour min sec
    wtr.push(0x07); // valid
    wtr.write_u32::<LittleEndian>(25).unwrap(); // tAcc
    wtr.write_i32::<LittleEndian>(-12_345).unwrap(); // nano
    wtr.push(3); // fix type
    wtr.push(0x01); // flags
    wtr.push(0xe0); // flags2
    wtr.push(12); // numSV
    wtr.write_i32::<LittleEndian>(-1_226_784_000).unwrap(); // lon
    wtr.write_i32::<LittleEndian>(455_152_000).unwrap(); // lat
    wtr.write_i32::<LittleEndian>(31_200).unwrap(); // height
    wtr.write_i32::<LittleEndian>(52_700).unwrap(); // hMSL
    wtr.write_u32::<LittleEndian>(1_800).unwrap(); // hAcc
    wtr.write_u32::<LittleEndian>(2_900).unwrap(); // vAcc
    wtr.write_i32::<LittleEndian>(150).unwrap(); // velN
    wtr.write_i32::<LittleEndian>(-40).unwrap(); // velE
    wtr.write_i32::<LittleEndian>(10).unwrap(); // velD
    wtr.write_i32::<LittleEndian>(155).unwrap(); // gSpeed
    wtr.write_i32::<LittleEndian>(34_500_000).unwrap(); // headMot
    wtr.write_u32::<LittleEndian>(300).unwrap(); // sAcc
    wtr.write_u32::<LittleEndian>(4_000_000).unwrap(); // headAcc
    wtr.write_u16::<LittleEndian>(132).unwrap(); // pDOP
    wtr.write_u16::<LittleEndian>(0).unwrap(); // flags3
    wtr.extend_from_slice(&[0; 4]);
    wtr.write_i32::<LittleEndian>(34_500_000).unwrap(); // headVeh
    wtr.write_i16::<LittleEndian>(1_520).unwrap(); // magDec
    wtr.write_u16::<LittleEndian>(50).unwrap(); // magAcc
    assert_eq!(wtr.len(), 92);
    wtr
}

pub fn nav_pvt_frame() -> Vec<u8> {
    frame(0x01, 0x07, &nav_pvt_payload())
}

pub fn nav_status_frame() -> Vec<u8> {
    let mut wtr = Vec::with_capacity(16);
    wtr.write_u32::<LittleEndian>(504_018_000).unwrap();
    wtr.extend_from_slice(&[3, 0x0d, 0x00, 0x01]);
    wtr.write_u32::<LittleEndian>(31_000).unwrap();
    wtr.write_u32::<LittleEndian>(93_000).unwrap();
    frame(0x01, 0x03, &wtr)
}

/// Bus side of the mocks: scripted results, shared event log
#[derive(Default)]
struct Script {
    log: Log,
    transmit_results: VecDeque<Result<(), TransportError>>,
    responses: VecDeque<Result<Vec<u8>, TransportError>>,
}

impl Script {
    fn transmit(&mut self, address: u8, bytes: &[u8], timeout_ms: Option<u32>) -> Result<(), TransportError> {
        self.log.borrow_mut().push(Event::Transmit {
            address,
            bytes: bytes.to_vec(),
            timeout_ms,
        });
        self.transmit_results.pop_front().unwrap_or(Ok(()))
    }

    fn receive(&mut self, address: u8, buffer: &mut [u8], timeout_ms: Option<u32>) -> Result<(), TransportError> {
        self.log.borrow_mut().push(Event::Receive {
            address,
            len: buffer.len(),
            timeout_ms,
        });
        let response = self
            .responses
            .pop_front()
            .expect("receive without a scripted response")?;
        // Short responses leave the tail of the buffer untouched
        let n = response.len().min(buffer.len());
        buffer[..n].copy_from_slice(&response[..n]);
        Ok(())
    }
}

/// Blocking transport answering receives from a script
#[derive(Default)]
pub struct MockI2c {
    script: Script,
}

impl MockI2c {
    pub fn new(log: Log) -> Self {
        Self {
            script: Script {
                log,
                ..Script::default()
            },
        }
    }

    pub fn respond(mut self, bytes: Vec<u8>) -> Self {
        self.script.responses.push_back(Ok(bytes));
        self
    }

    pub fn fail_receive(mut self, err: TransportError) -> Self {
        self.script.responses.push_back(Err(err));
        self
    }

    pub fn fail_transmit(mut self, err: TransportError) -> Self {
        self.script.transmit_results.push_back(Err(err));
        self
    }

    pub fn succeed_transmit(mut self) -> Self {
        self.script.transmit_results.push_back(Ok(()));
        self
    }

    pub fn pending_responses(&self) -> usize {
        self.script.responses.len()
    }
}

impl I2cTransport for MockI2c {
    fn transmit(&mut self, address: u8, bytes: &[u8], timeout_ms: u32) -> Result<(), TransportError> {
        self.script.transmit(address, bytes, Some(timeout_ms))
    }

    fn receive(&mut self, address: u8, buffer: &mut [u8], timeout_ms: u32) -> Result<(), TransportError> {
        self.script.receive(address, buffer, Some(timeout_ms))
    }
}

/// Event-driven transport answering receives from a script
#[derive(Default)]
pub struct MockAsyncI2c {
    script: Script,
}

impl MockAsyncI2c {
    pub fn new(log: Log) -> Self {
        Self {
            script: Script {
                log,
                ..Script::default()
            },
        }
    }

    pub fn respond(mut self, bytes: Vec<u8>) -> Self {
        self.script.responses.push_back(Ok(bytes));
        self
    }

    pub fn fail_receive(mut self, err: TransportError) -> Self {
        self.script.responses.push_back(Err(err));
        self
    }

    pub fn fail_transmit(mut self, err: TransportError) -> Self {
        self.script.transmit_results.push_back(Err(err));
        self
    }
}

impl AsyncI2cTransport for MockAsyncI2c {
    async fn transmit(&mut self, address: u8, bytes: &[u8]) -> Result<(), TransportError> {
        self.script.transmit(address, bytes, None)
    }

    async fn receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), TransportError> {
        self.script.receive(address, buffer, None)
    }
}

/// Records requested delays instead of sleeping
pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn events(log: &Log) -> Vec<Event> {
    log.borrow().clone()
}
