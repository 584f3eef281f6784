use bitflags::bitflags;

use super::{check_fixed_len, le_field, GnssFixType};
use crate::{
    error::Result,
    ubx_packets::{class, id, UbxPacketMeta},
};

/// Navigation Position Velocity Time Solution
pub struct NavPvt;

impl NavPvt {
    pub const PAYLOAD_LEN: usize = 92;
}

impl UbxPacketMeta for NavPvt {
    const CLASS: u8 = class::NAV;
    const ID: u8 = id::NAV_PVT;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(Self::PAYLOAD_LEN as u16);
    const MAX_PAYLOAD_LEN: u16 = Self::PAYLOAD_LEN as u16;
}

bitflags! {
    /// Fix status flags for `NavPvt`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtFlags: u8 {
        /// 1 = Position and velocity valid and within DOP and accuracy masks
        const GPS_FIX_OK = 1;
        /// 1 = Differential corrections were applied; DGPS used
        const DIFF_SOLN = 2;
        /// 1 = Heading of vehicle is valid, only set if the receiver is in sensor fusion mode
        const HEAD_VEH_VALID = 0x20;
        /// 1 = Carrier phase range solution with floating ambiguities
        const CARR_SOLN_FLOAT = 0x40;
        /// 1 = Carrier phase range solution with fixed ambiguities
        const CARR_SOLN_FIXED = 0x80;
    }
}

bitflags! {
    /// Additional flags for `NavPvt`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtFlags2: u8 {
        /// 1 = information about UTC Date and Time of Day validity confirmation
        /// is available
        const CONFIRMED_AVAI = 0x20;
        /// 1 = UTC Date validity could be confirmed
        const CONFIRMED_DATE = 0x40;
        /// 1 = UTC Time of Day could be confirmed
        const CONFIRMED_TIME = 0x80;
    }
}

bitflags! {
    /// Validity flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtValidFlags: u8 {
        /// 1 = valid UTC Date
        const VALID_DATE = 0x01;
        /// 1 = valid UTC time of day
        const VALID_TIME = 0x02;
        /// 1 = UTC time of day has been fully resolved (no seconds uncertainty).
        /// Cannot be used to check if time is completely solved.
        const FULLY_RESOLVED = 0x04;
        /// 1 = valid magnetic declination
        const VALID_MAG = 0x08;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavPvtFlags3 {
    invalid_llh: bool,
    last_correction_age: u8,
}

impl NavPvtFlags3 {
    /// 1 = Invalid lon, lat, height and hMSL
    pub fn invalid_llh(&self) -> bool {
        self.invalid_llh
    }

    /// Age of the most recently received differential correction
    ///
    /// Values:
    /// - `0`: Not available
    /// - `1`: Age between 0 and 1 second
    /// - `2`: Age between 1 (inclusive) and 2 seconds
    /// - `3`: Age between 2 (inclusive) and 5 seconds
    /// - `4`: Age between 5 (inclusive) and 10 seconds
    /// - `5`: Age between 10 (inclusive) and 15 seconds
    /// - `6`: Age between 15 (inclusive) and 20 seconds
    /// - `7`: Age between 20 (inclusive) and 30 seconds
    /// - `8`: Age between 30 (inclusive) and 45 seconds
    /// - `9`: Age between 45 (inclusive) and 60 seconds
    /// - `10`: Age between 60 (inclusive) and 90 seconds
    /// - `11`: Age between 90 (inclusive) and 120 seconds
    /// - `>=12`: Age greater or equal than 120 seconds
    pub fn last_correction_age(&self) -> u8 {
        self.last_correction_age
    }
}

impl From<u16> for NavPvtFlags3 {
    fn from(val: u16) -> Self {
        const LAST_CORRECTION_AGE_MASK: u16 = 0b0000_0000_0001_1110;
        let invalid_llh = val & 0x01 == 1;
        let last_correction_age = ((val & LAST_CORRECTION_AGE_MASK) >> 1) as u8; // bits 1–4
        Self {
            invalid_llh,
            last_correction_age,
        }
    }
}

/// Zero-copy view over a NAV-PVT payload
#[derive(Clone, Copy)]
pub struct NavPvtRef<'a>(&'a [u8]);

impl<'a> NavPvtRef<'a> {
    pub fn from_payload(payload: &'a [u8]) -> Result<Self> {
        check_fixed_len(payload, NavPvt::PAYLOAD_LEN)?;
        Ok(Self(payload))
    }

    /// GPS Millisecond time of week of the navigation epoch.
    ///
    /// Messages with the same iTOW value can be assumed to have come from the same navigation solution.
    pub fn itow(&self) -> u32 {
        le_field!(self.0, 0, u32)
    }

    /// Year (UTC)
    pub fn year(&self) -> u16 {
        le_field!(self.0, 4, u16)
    }

    /// Month, range 1..12 (UTC)
    pub fn month(&self) -> u8 {
        le_field!(self.0, 6, u8)
    }

    /// Day of month, range 1..31 (UTC)
    pub fn day(&self) -> u8 {
        le_field!(self.0, 7, u8)
    }

    /// Hour of day, range 0..23 (UTC)
    pub fn hour(&self) -> u8 {
        le_field!(self.0, 8, u8)
    }

    /// Minute of hour, range 0..59 (UTC)
    pub fn min(&self) -> u8 {
        le_field!(self.0, 9, u8)
    }

    /// Seconds of minute, range 0..60 (UTC)
    pub fn sec(&self) -> u8 {
        le_field!(self.0, 10, u8)
    }

    pub fn valid(&self) -> NavPvtValidFlags {
        NavPvtValidFlags::from_bits_truncate(le_field!(self.0, 11, u8))
    }

    /// Time accuracy estimate in nanoseconds (UTC)
    pub fn time_accuracy(&self) -> u32 {
        le_field!(self.0, 12, u32)
    }

    /// Fraction of second, range -1e9 .. 1e9 (UTC)
    pub fn nanosec(&self) -> i32 {
        le_field!(self.0, 16, i32)
    }

    pub fn fix_type(&self) -> GnssFixType {
        le_field!(self.0, 20, u8).into()
    }

    pub fn flags(&self) -> NavPvtFlags {
        NavPvtFlags::from_bits_truncate(le_field!(self.0, 21, u8))
    }

    pub fn flags2(&self) -> NavPvtFlags2 {
        NavPvtFlags2::from_bits_truncate(le_field!(self.0, 22, u8))
    }

    /// Number of satellites used in Nav Solution
    pub fn num_satellites(&self) -> u8 {
        le_field!(self.0, 23, u8)
    }

    pub fn lon_raw(&self) -> i32 {
        le_field!(self.0, 24, i32)
    }

    /// Longitude in \[deg\]
    pub fn longitude(&self) -> f64 {
        f64::from(self.lon_raw()) * 1e-7
    }

    pub fn lat_raw(&self) -> i32 {
        le_field!(self.0, 28, i32)
    }

    /// Latitude in \[deg\]
    pub fn latitude(&self) -> f64 {
        f64::from(self.lat_raw()) * 1e-7
    }

    /// Height above reference ellipsoid in \[m\]
    pub fn height_above_ellipsoid(&self) -> f64 {
        f64::from(le_field!(self.0, 32, i32)) * 1e-3
    }

    /// Height above Mean Sea Level in \[m\]
    pub fn height_msl(&self) -> f64 {
        f64::from(le_field!(self.0, 36, i32)) * 1e-3
    }

    /// Horizontal accuracy in \[m\]
    pub fn horizontal_accuracy(&self) -> f64 {
        f64::from(le_field!(self.0, 40, u32)) * 1e-3
    }

    /// Vertical accuracy in \[m\]
    pub fn vertical_accuracy(&self) -> f64 {
        f64::from(le_field!(self.0, 44, u32)) * 1e-3
    }

    /// Velocity North component \[m/s\]
    pub fn vel_north(&self) -> f64 {
        f64::from(le_field!(self.0, 48, i32)) * 1e-3
    }

    /// Velocity East component \[m/s\]
    pub fn vel_east(&self) -> f64 {
        f64::from(le_field!(self.0, 52, i32)) * 1e-3
    }

    /// Velocity Down component \[m/s\]
    pub fn vel_down(&self) -> f64 {
        f64::from(le_field!(self.0, 56, i32)) * 1e-3
    }

    /// Ground speed \[m/s\]
    pub fn ground_speed_2d(&self) -> f64 {
        f64::from(le_field!(self.0, 60, i32)) * 1e-3
    }

    /// Heading of motion 2-D \[deg\]
    pub fn heading_motion(&self) -> f64 {
        f64::from(le_field!(self.0, 64, i32)) * 1e-5
    }

    /// Speed Accuracy Estimate \[m/s\]
    pub fn speed_accuracy(&self) -> f64 {
        f64::from(le_field!(self.0, 68, u32)) * 1e-3
    }

    /// Heading accuracy estimate (for both vehicle and motion) \[deg\]
    pub fn heading_accuracy(&self) -> f64 {
        f64::from(le_field!(self.0, 72, u32)) * 1e-5
    }

    /// Position DOP
    pub fn pdop(&self) -> f64 {
        f64::from(le_field!(self.0, 76, u16)) * 1e-2
    }

    pub fn flags3(&self) -> NavPvtFlags3 {
        le_field!(self.0, 78, u16).into()
    }

    /// Heading of vehicle (2-D), this is only valid when [HEAD_VEH_VALID](NavPvtFlags::HEAD_VEH_VALID) is set,
    /// otherwise the output is set to the heading of motion
    pub fn heading_vehicle(&self) -> f64 {
        f64::from(le_field!(self.0, 84, i32)) * 1e-5
    }

    /// Magnetic declination \[deg\]
    pub fn magnetic_declination(&self) -> f64 {
        f64::from(le_field!(self.0, 88, i16)) * 1e-2
    }

    /// Magnetic declination accuracy \[deg\]
    pub fn magnetic_declination_accuracy(&self) -> f64 {
        f64::from(le_field!(self.0, 90, u16)) * 1e-2
    }
}

impl core::fmt::Debug for NavPvtRef<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavPvt")
            .field("itow", &self.itow())
            .field("fix_type", &self.fix_type())
            .field("flags", &self.flags())
            .field("num_satellites", &self.num_satellites())
            .field("longitude", &self.longitude())
            .field("latitude", &self.latitude())
            .field("height_msl", &self.height_msl())
            .field("ground_speed_2d", &self.ground_speed_2d())
            .field("heading_motion", &self.heading_motion())
            .finish()
    }
}
