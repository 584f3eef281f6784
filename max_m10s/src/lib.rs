//! # max_m10s
//!
//! Driver for the u-blox MAX-M10S GNSS receiver over I2C, speaking the UBX binary protocol.
//!
//! The crate has two layers. The codec builds and validates UBX frames in caller-provided
//! buffers and never touches the bus. The drivers own the buffers and sequence bus
//! transactions: the one-time handshake that switches the I2C port to UBX output, and the
//! command, read, validate cycle for navigation data.
//!
//! Building Frames
//! ===============
//!
//! ```
//! use max_m10s::{prepare_cfg_val, validate_packet, CfgVal, BUFFER_CAPACITY};
//!
//! let mut buf = [0u8; BUFFER_CAPACITY];
//! let size = prepare_cfg_val(&mut buf, CfgVal::I2cOutProtUbx(true)).unwrap();
//! assert_eq!(size, 17);
//! assert!(validate_packet(&buf[..size], 0x06, 0x8a).is_ok());
//! ```
//!
//! Talking to a Receiver
//! =====================
//!
//! Hand the driver anything that implements [`I2cTransport`] (blocking) or
//! [`AsyncI2cTransport`], plus a delay. [`HalI2c`] wraps any `embedded-hal` 1.0 I2C bus:
//!
//! ```no_run
//! # fn run<I: embedded_hal::i2c::I2c, D: embedded_hal::delay::DelayNs>(bus: I, delay: D) -> max_m10s::Result<()> {
//! use max_m10s::{Command, DeviceConfig, HalI2c, MaxM10s, Position};
//!
//! let mut gps = MaxM10s::new(HalI2c::new(bus), delay);
//! gps.init(DeviceConfig::default().with_address(0x42))?;
//!
//! gps.command(Command::NavPvt)?;
//! // give the receiver time to answer
//! gps.read()?;
//! gps.validate_response(Command::NavPvt)?;
//!
//! if let Some(pvt) = gps.nav_pvt() {
//!     let pos = Position::from(&pvt);
//!     log::info!("{} satellites, lat {} lon {}", pvt.num_satellites(), pos.lat, pos.lon);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Errors
//! ======
//!
//! Every operation returns [`Result`]. [`Error::status`] flattens an error onto the
//! [`Status`] taxonomy and its numeric codes.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    codec::{
        prepare_cfg_val, prepare_command, prepare_config_set, prepare_config_set_u16,
        prepare_config_set_u32, prepare_config_set_u8, validate_ack, validate_packet,
    },
    config::{DeviceConfig, DEFAULT_ADDRESS, DEFAULT_SETTLE_DELAY_MS, DEFAULT_TIMEOUT_MS},
    constants::{
        frame_len, BUFFER_CAPACITY, MAX_PAYLOAD_LEN, UBX_CHECKSUM_LEN, UBX_FRAME_OVERHEAD,
        UBX_HEADER_LEN, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
    },
    driver::{DeviceState, MaxM10s, MaxM10sAsync, Phase, State, ACK_FRAME_LEN},
    error::{DateTimeError, Error, ParamError, ProtocolError, Result, Status},
    parser::{ubx_checksum, UbxChecksumCalc, UbxFrame},
    transport::{AsyncI2cTransport, HalI2c, I2cTransport, TransportError},
    ubx_packets::*,
};

mod codec;
mod config;
mod constants;
mod driver;
mod error;
mod parser;
mod transport;
mod ubx_packets;
