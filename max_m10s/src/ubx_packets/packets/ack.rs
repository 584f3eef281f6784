use super::check_fixed_len;
use crate::{
    error::Result,
    ubx_packets::{class, id, UbxPacketMeta},
};

/// Message acknowledged
pub struct AckAck;

/// Message not acknowledged
pub struct AckNak;

impl AckAck {
    pub const PAYLOAD_LEN: usize = 2;
}

impl AckNak {
    pub const PAYLOAD_LEN: usize = 2;
}

impl UbxPacketMeta for AckAck {
    const CLASS: u8 = class::ACK;
    const ID: u8 = id::ACK_ACK;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(Self::PAYLOAD_LEN as u16);
    const MAX_PAYLOAD_LEN: u16 = Self::PAYLOAD_LEN as u16;
}

impl UbxPacketMeta for AckNak {
    const CLASS: u8 = class::ACK;
    const ID: u8 = id::ACK_NAK;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(Self::PAYLOAD_LEN as u16);
    const MAX_PAYLOAD_LEN: u16 = Self::PAYLOAD_LEN as u16;
}

/// Payload of an ACK-ACK or ACK-NAK: the class and id being answered
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AckRef<'a>(&'a [u8]);

impl<'a> AckRef<'a> {
    pub fn from_payload(payload: &'a [u8]) -> Result<Self> {
        check_fixed_len(payload, AckAck::PAYLOAD_LEN)?;
        Ok(Self(payload))
    }

    /// Class ID of the Acknowledged Message
    pub fn class(&self) -> u8 {
        self.0[0]
    }

    /// Message ID of the Acknowledged Message
    pub fn msg_id(&self) -> u8 {
        self.0[1]
    }

    pub fn is_ack_for<T: UbxPacketMeta>(&self) -> bool {
        self.is_ack_for_raw(T::CLASS, T::ID)
    }

    pub fn is_ack_for_raw(&self, class: u8, msg_id: u8) -> bool {
        self.class() == class && self.msg_id() == msg_id
    }
}

impl core::fmt::Debug for AckRef<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AckRef")
            .field("class", &self.class())
            .field("msg_id", &self.msg_id())
            .finish()
    }
}
