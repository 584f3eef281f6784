//! Bus capabilities the driver needs from the application.
//!
//! The driver only moves whole frames: one write of the prepared frame, one
//! read of a known number of bytes. Addresses handed to a transport are always
//! in 8-bit form (the 7-bit address shifted left by one); see
//! [`crate::DeviceConfig::bus_address`].

use core::fmt;

use embedded_hal::i2c::{Error as _, ErrorKind};

/// Failure reported by a transport, independent of frame content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportError {
    /// The transaction did not complete within the timeout
    Timeout,
    /// The receiver did not acknowledge its address or a data byte
    NoAcknowledge,
    /// Misplaced start or stop condition
    Bus,
    /// Another master won arbitration
    ArbitrationLoss,
    /// Data was lost because it was not read in time
    Overrun,
    Other,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TransportError::Timeout => "bus transaction timed out",
            TransportError::NoAcknowledge => "no acknowledge from the receiver",
            TransportError::Bus => "bus error",
            TransportError::ArbitrationLoss => "arbitration lost",
            TransportError::Overrun => "data overrun",
            TransportError::Other => "unspecified bus failure",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for TransportError {}

impl From<ErrorKind> for TransportError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => TransportError::Bus,
            ErrorKind::ArbitrationLoss => TransportError::ArbitrationLoss,
            ErrorKind::NoAcknowledge(_) => TransportError::NoAcknowledge,
            ErrorKind::Overrun => TransportError::Overrun,
            _ => TransportError::Other,
        }
    }
}

/// Blocking transport: calls return once the transaction completed or timed out
pub trait I2cTransport {
    fn transmit(&mut self, address: u8, bytes: &[u8], timeout_ms: u32)
        -> Result<(), TransportError>;

    /// Fill `buffer` completely from the device
    fn receive(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), TransportError>;
}

/// Event-driven transport: the returned future resolves when the peripheral
/// signals completion
#[allow(async_fn_in_trait)]
pub trait AsyncI2cTransport {
    async fn transmit(&mut self, address: u8, bytes: &[u8]) -> Result<(), TransportError>;

    /// Fill `buffer` completely from the device
    async fn receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), TransportError>;
}

/// Adapter from an `embedded-hal` I2C bus to the driver's transport traits.
///
/// Implements [`I2cTransport`] when `I` is an [`embedded_hal::i2c::I2c`] and
/// [`AsyncI2cTransport`] when `I` is an [`embedded_hal_async::i2c::I2c`].
/// `embedded-hal` buses carry their own timeout configuration, so the
/// per-call `timeout_ms` is not forwarded.
#[derive(Debug)]
pub struct HalI2c<I> {
    bus: I,
}

impl<I> HalI2c<I> {
    pub fn new(bus: I) -> Self {
        Self { bus }
    }

    pub fn bus(&mut self) -> &mut I {
        &mut self.bus
    }

    pub fn into_inner(self) -> I {
        self.bus
    }
}

/// 8-bit bus form back to the 7-bit address `embedded-hal` expects
const fn seven_bit(address: u8) -> u8 {
    address >> 1
}

impl<I: embedded_hal::i2c::I2c> I2cTransport for HalI2c<I> {
    fn transmit(
        &mut self,
        address: u8,
        bytes: &[u8],
        _timeout_ms: u32,
    ) -> Result<(), TransportError> {
        embedded_hal::i2c::I2c::write(&mut self.bus, seven_bit(address), bytes)
            .map_err(|e| e.kind().into())
    }

    fn receive(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        _timeout_ms: u32,
    ) -> Result<(), TransportError> {
        embedded_hal::i2c::I2c::read(&mut self.bus, seven_bit(address), buffer)
            .map_err(|e| e.kind().into())
    }
}

impl<I: embedded_hal_async::i2c::I2c> AsyncI2cTransport for HalI2c<I> {
    async fn transmit(&mut self, address: u8, bytes: &[u8]) -> Result<(), TransportError> {
        embedded_hal_async::i2c::I2c::write(&mut self.bus, seven_bit(address), bytes)
            .await
            .map_err(|e| e.kind().into())
    }

    async fn receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), TransportError> {
        embedded_hal_async::i2c::I2c::read(&mut self.bus, seven_bit(address), buffer)
            .await
            .map_err(|e| e.kind().into())
    }
}
