pub mod ack;
pub mod cfg_valset;
pub mod nav_pvt;
pub mod nav_status;

pub use ack::{AckAck, AckNak, AckRef};
pub use cfg_valset::CfgValSet;
pub use nav_pvt::{NavPvt, NavPvtFlags, NavPvtFlags2, NavPvtFlags3, NavPvtRef, NavPvtValidFlags};
pub use nav_status::{NavStatus, NavStatusFlags, NavStatusRef};

use crate::error::{ProtocolError, Result};

/// GNSS fix type, shared by NAV-PVT and NAV-STATUS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GnssFixType {
    NoFix,
    DeadReckoningOnly,
    Fix2D,
    Fix3D,
    GPSPlusDeadReckoning,
    TimeOnlyFix,
    /// Values the protocol reserves
    Unknown(u8),
}

impl From<u8> for GnssFixType {
    fn from(raw: u8) -> Self {
        match raw {
            0 => GnssFixType::NoFix,
            1 => GnssFixType::DeadReckoningOnly,
            2 => GnssFixType::Fix2D,
            3 => GnssFixType::Fix3D,
            4 => GnssFixType::GPSPlusDeadReckoning,
            5 => GnssFixType::TimeOnlyFix,
            other => GnssFixType::Unknown(other),
        }
    }
}

/// Rejects a payload whose length differs from the fixed length of its message
pub(crate) fn check_fixed_len(payload: &[u8], expect: usize) -> Result<()> {
    if payload.len() != expect {
        return Err(ProtocolError::FrameLengthMismatch {
            expect,
            got: payload.len(),
        }
        .into());
    }
    Ok(())
}

macro_rules! le_field {
    ($payload:expr, $off:expr, u8) => {
        $payload[$off]
    };
    ($payload:expr, $off:expr, i16) => {
        i16::from_le_bytes([$payload[$off], $payload[$off + 1]])
    };
    ($payload:expr, $off:expr, u16) => {
        u16::from_le_bytes([$payload[$off], $payload[$off + 1]])
    };
    ($payload:expr, $off:expr, i32) => {
        i32::from_le_bytes([
            $payload[$off],
            $payload[$off + 1],
            $payload[$off + 2],
            $payload[$off + 3],
        ])
    };
    ($payload:expr, $off:expr, u32) => {
        u32::from_le_bytes([
            $payload[$off],
            $payload[$off + 1],
            $payload[$off + 2],
            $payload[$off + 3],
        ])
    };
}
pub(crate) use le_field;
