use core::fmt;

use crate::transport::TransportError;

pub type Result<T> = core::result::Result<T, Error>;

/// Error returned by every fallible codec and driver operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The frame is structurally wrong, or the receiver refused the command
    Protocol(ProtocolError),
    /// An argument was missing or out of range, or the device was in the wrong state
    InvalidParam(ParamError),
    /// A bus transaction did not finish within its configured bound
    Timeout,
    /// The frame structure is sound but its checksum does not match
    InvalidChecksum { expect: u16, got: u16 },
    /// The bus reported a failure unrelated to frame content
    Transport(TransportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    InvalidSync,
    UnexpectedMessage {
        class: u8,
        id: u8,
    },
    PayloadTooLong {
        len: u16,
        max: usize,
    },
    FrameLengthMismatch {
        expect: usize,
        got: usize,
    },
    /// The receiver answered with UBX-ACK-NAK
    Nack,
    /// An ACK arrived, but for another command than the one pending
    AckMismatch {
        class: u8,
        id: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    FrameTooShort { len: usize },
    BufferTooSmall { need: usize, got: usize },
    ValueWidth(usize),
    DeviceAddress(u8),
    NotInitialized,
    NoPendingCommand,
    UnsupportedCommand,
}

/// A NAV-PVT date or time that does not form a valid UTC timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
    InvalidNanoseconds,
}

/// Flat status taxonomy, with the numeric codes used on the wire and in logs
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Ok = 0x00,
    Error = 0x01,
    InvalidParam = 0x02,
    Timeout = 0x03,
    ChecksumError = 0x04,
    TransportError = 0x05,
}

impl Status {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        }
    }
}

impl Error {
    pub const fn status(&self) -> Status {
        match self {
            Error::Protocol(_) => Status::Error,
            Error::InvalidParam(_) => Status::InvalidParam,
            Error::Timeout => Status::Timeout,
            Error::InvalidChecksum { .. } => Status::ChecksumError,
            Error::Transport(_) => Status::TransportError,
        }
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Error::Protocol(e)
    }
}

impl From<ParamError> for Error {
    fn from(e: ParamError) -> Self {
        Error::InvalidParam(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Timeout => Error::Timeout,
            other => Error::Transport(other),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Protocol(e) => write!(f, "Protocol error: {}", e),
            Error::InvalidParam(e) => write!(f, "Invalid parameter: {}", e),
            Error::Timeout => f.write_str("Timed out waiting for the bus"),
            Error::InvalidChecksum { expect, got } => write!(
                f,
                "Not valid packet's checksum, expect {:x}, got {:x}",
                expect, got
            ),
            Error::Transport(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidSync => f.write_str("missing UBX sync chars"),
            ProtocolError::UnexpectedMessage { class, id } => {
                write!(f, "unexpected message class 0x{:02x} id 0x{:02x}", class, id)
            },
            ProtocolError::PayloadTooLong { len, max } => {
                write!(f, "payload length {} exceeds {}", len, max)
            },
            ProtocolError::FrameLengthMismatch { expect, got } => {
                write!(f, "frame length, expect {}, got {}", expect, got)
            },
            ProtocolError::Nack => f.write_str("command not acknowledged"),
            ProtocolError::AckMismatch { class, id } => write!(
                f,
                "acknowledgement for class 0x{:02x} id 0x{:02x} does not match the command",
                class, id
            ),
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::FrameTooShort { len } => write!(f, "frame of {} bytes is too short", len),
            ParamError::BufferTooSmall { need, got } => {
                write!(f, "buffer too small, need {}, got {}", need, got)
            },
            ParamError::ValueWidth(width) => write!(f, "unsupported value width {}", width),
            ParamError::DeviceAddress(addr) => {
                write!(f, "0x{:02x} is not a 7-bit device address", addr)
            },
            ParamError::NotInitialized => f.write_str("device is not initialized"),
            ParamError::NoPendingCommand => f.write_str("no command is pending"),
            ParamError::UnsupportedCommand => f.write_str("command is not supported"),
        }
    }
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
            DateTimeError::InvalidNanoseconds => f.write_str("invalid nanoseconds"),
        }
    }
}

impl core::error::Error for Error {}
impl core::error::Error for ProtocolError {}
impl core::error::Error for ParamError {}
impl core::error::Error for DateTimeError {}
