use bitflags::bitflags;

/// 32-bit configuration key id, as used by CFG-VALSET.
///
/// Bits 28..30 encode the storage size of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfgKey(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageSize {
    OneBit,
    OneByte,
    TwoBytes,
    FourBytes,
    EightBytes,
}

impl StorageSize {
    pub const fn to_usize(self) -> usize {
        match self {
            Self::OneBit | Self::OneByte => 1,
            Self::TwoBytes => 2,
            Self::FourBytes => 4,
            Self::EightBytes => 8,
        }
    }
}

impl CfgKey {
    pub(crate) const SIZE: usize = 4;

    /// CFG-I2COUTPROT-UBX
    pub const I2C_OUT_PROT_UBX: Self = Self(0x1072_0001);
    /// CFG-I2COUTPROT-NMEA
    pub const I2C_OUT_PROT_NMEA: Self = Self(0x1072_0002);
    /// CFG-RATE-MEAS, nominal time between measurements in ms
    pub const RATE_MEAS: Self = Self(0x3021_0001);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Storage size encoded in the key, `None` for reserved encodings
    pub const fn value_size(self) -> Option<StorageSize> {
        match (self.0 >> 28) & 0b111 {
            1 => Some(StorageSize::OneBit),
            2 => Some(StorageSize::OneByte),
            3 => Some(StorageSize::TwoBytes),
            4 => Some(StorageSize::FourBytes),
            5 => Some(StorageSize::EightBytes),
            _ => None,
        }
    }

    pub const fn group_id(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn item_id(self) -> u8 {
        self.0 as u8
    }

    pub const fn to_le_bytes(self) -> [u8; Self::SIZE] {
        self.0.to_le_bytes()
    }
}

impl From<CfgKey> for u32 {
    fn from(key: CfgKey) -> Self {
        key.0
    }
}

/// Typed configuration item together with its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CfgVal {
    /// Enable UBX output on the I2C interface
    I2cOutProtUbx(bool),
    /// Enable NMEA output on the I2C interface
    I2cOutProtNmea(bool),
    /// Measurement period in ms
    RateMeas(u16),
}

impl CfgVal {
    /// Widest value any catalog entry carries
    pub const MAX_VALUE_LEN: usize = 2;

    pub const fn key(&self) -> CfgKey {
        match self {
            CfgVal::I2cOutProtUbx(_) => CfgKey::I2C_OUT_PROT_UBX,
            CfgVal::I2cOutProtNmea(_) => CfgKey::I2C_OUT_PROT_NMEA,
            CfgVal::RateMeas(_) => CfgKey::RATE_MEAS,
        }
    }

    /// Number of value bytes written on the wire
    pub const fn len(&self) -> usize {
        match self.key().value_size() {
            Some(size) => size.to_usize(),
            None => 0,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Little-endian value bytes, padded to [`Self::MAX_VALUE_LEN`]; only the
    /// first [`Self::len`] bytes are meaningful
    pub const fn value_bytes(&self) -> [u8; Self::MAX_VALUE_LEN] {
        match *self {
            CfgVal::I2cOutProtUbx(on) | CfgVal::I2cOutProtNmea(on) => [on as u8, 0],
            CfgVal::RateMeas(ms) => ms.to_le_bytes(),
        }
    }
}

bitflags! {
    /// Configuration layers a CFG-VALSET writes to
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CfgLayerSet: u8 {
        const RAM = 0x01;
        const BBR = 0x10;
    }
}

impl Default for CfgLayerSet {
    fn default() -> Self {
        Self::RAM | Self::BBR
    }
}
