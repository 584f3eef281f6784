use bitflags::bitflags;

use super::{check_fixed_len, le_field, GnssFixType};
use crate::{
    error::Result,
    ubx_packets::{class, id, UbxPacketMeta},
};

///  Receiver Navigation Status
pub struct NavStatus;

impl NavStatus {
    pub const PAYLOAD_LEN: usize = 16;
}

impl UbxPacketMeta for NavStatus {
    const CLASS: u8 = class::NAV;
    const ID: u8 = id::NAV_STATUS;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(Self::PAYLOAD_LEN as u16);
    const MAX_PAYLOAD_LEN: u16 = Self::PAYLOAD_LEN as u16;
}

bitflags! {
    /// Navigation Status Flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavStatusFlags: u8 {
        /// position and velocity valid and within DOP and ACC Masks
        const GPS_FIX_OK = 1;
        /// DGPS used
        const DIFF_SOLN = 2;
        /// Week Number valid
        const WKN_SET = 4;
        /// Time of Week valid
        const TOW_SET = 8;
    }
}

/// Zero-copy view over a NAV-STATUS payload
#[derive(Clone, Copy)]
pub struct NavStatusRef<'a>(&'a [u8]);

impl<'a> NavStatusRef<'a> {
    pub fn from_payload(payload: &'a [u8]) -> Result<Self> {
        check_fixed_len(payload, NavStatus::PAYLOAD_LEN)?;
        Ok(Self(payload))
    }

    /// GPS Millisecond Time of Week
    pub fn itow(&self) -> u32 {
        le_field!(self.0, 0, u32)
    }

    /// GPS fix Type, this value does not qualify a fix as
    /// valid and within the limits
    pub fn fix_type(&self) -> GnssFixType {
        le_field!(self.0, 4, u8).into()
    }

    pub fn flags(&self) -> NavStatusFlags {
        NavStatusFlags::from_bits_truncate(le_field!(self.0, 5, u8))
    }

    /// Fix Status Information
    pub fn fix_stat_raw(&self) -> u8 {
        le_field!(self.0, 6, u8)
    }

    /// further information about navigation output
    pub fn flags2_raw(&self) -> u8 {
        le_field!(self.0, 7, u8)
    }

    /// Time to first fix (millisecond time tag)
    pub fn time_to_first_fix(&self) -> u32 {
        le_field!(self.0, 8, u32)
    }

    /// Milliseconds since Startup / Reset
    pub fn uptime_ms(&self) -> u32 {
        le_field!(self.0, 12, u32)
    }
}

impl core::fmt::Debug for NavStatusRef<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavStatus")
            .field("itow", &self.itow())
            .field("fix_type", &self.fix_type())
            .field("flags", &self.flags())
            .field("time_to_first_fix", &self.time_to_first_fix())
            .field("uptime_ms", &self.uptime_ms())
            .finish()
    }
}
