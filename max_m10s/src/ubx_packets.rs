pub mod cfg_val;
pub mod packets;
mod types;

pub use cfg_val::{CfgKey, CfgLayerSet, CfgVal, StorageSize};
pub use packets::*;
pub use types::{Position, Velocity};

use crate::error::{ParamError, Result};

/// Message classes used by the driver
pub mod class {
    /// Navigation results: position, speed, time
    pub const NAV: u8 = 0x01;
    /// Ack/Nak messages
    pub const ACK: u8 = 0x05;
    /// Configuration input messages
    pub const CFG: u8 = 0x06;
}

/// Message ids, grouped by class
pub mod id {
    /// NAV: receiver navigation status
    pub const NAV_STATUS: u8 = 0x03;
    /// NAV: navigation position velocity time solution
    pub const NAV_PVT: u8 = 0x07;
    /// CFG: set configuration item values
    pub const CFG_VALSET: u8 = 0x8a;
    /// ACK: message not acknowledged
    pub const ACK_NAK: u8 = 0x00;
    /// ACK: message acknowledged
    pub const ACK_ACK: u8 = 0x01;
}

/// Information about a concrete UBX message
pub trait UbxPacketMeta {
    const CLASS: u8;
    const ID: u8;
    const FIXED_PAYLOAD_LEN: Option<u16>;
    const MAX_PAYLOAD_LEN: u16;
}

/// Zero-payload poll requests the driver knows how to issue and size the answer for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Command {
    /// Poll UBX-NAV-PVT
    NavPvt,
    /// Poll UBX-NAV-STATUS
    NavStatus,
}

impl Command {
    /// The command whose response carries `class` and `msg_id`
    pub fn from_raw(class: u8, msg_id: u8) -> Result<Self> {
        [Command::NavPvt, Command::NavStatus]
            .into_iter()
            .find(|cmd| cmd.class() == class && cmd.msg_id() == msg_id)
            .ok_or_else(|| ParamError::UnsupportedCommand.into())
    }

    pub const fn class(self) -> u8 {
        match self {
            Command::NavPvt => NavPvt::CLASS,
            Command::NavStatus => NavStatus::CLASS,
        }
    }

    pub const fn msg_id(self) -> u8 {
        match self {
            Command::NavPvt => NavPvt::ID,
            Command::NavStatus => NavStatus::ID,
        }
    }

    /// Payload length of the answer the receiver sends for this poll
    pub const fn response_payload_len(self) -> usize {
        match self {
            Command::NavPvt => NavPvt::PAYLOAD_LEN,
            Command::NavStatus => NavStatus::PAYLOAD_LEN,
        }
    }

    /// Total size of the answer on the bus
    pub const fn response_len(self) -> usize {
        crate::constants::frame_len(self.response_payload_len())
    }
}
