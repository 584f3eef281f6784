use crate::error::{ParamError, Result};

/// Default 7-bit I2C address of u-blox receivers
pub const DEFAULT_ADDRESS: u8 = 0x42;
pub const DEFAULT_TIMEOUT_MS: u32 = 1000;
/// Wait between sending a CFG-VALSET and reading its acknowledgement.
///
/// Found empirically on the MAX-M10S.
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 1000;

/// Bus parameters of one receiver, fixed once the device is initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Bound handed to every blocking bus transaction
    pub timeout_ms: u32,
    pub settle_delay_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl DeviceConfig {
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u32) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.address > 0x7f {
            return Err(ParamError::DeviceAddress(self.address).into());
        }
        Ok(())
    }

    /// Address in the 8-bit form handed to the transport
    pub const fn bus_address(&self) -> u8 {
        self.address << 1
    }
}
