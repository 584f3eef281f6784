mod checksum;

pub use checksum::{ubx_checksum, UbxChecksumCalc};

use crate::{
    constants::{
        UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_HEADER_LEN, UBX_LENGTH_OFFSET, UBX_MSG_ID_OFFSET,
        UBX_PAYLOAD_OFFSET, UBX_SYNC_1_OFFSET, UBX_SYNC_2_OFFSET, UBX_SYNC_CHAR_1,
        UBX_SYNC_CHAR_2,
    },
    error::{ParamError, Result},
};

/// Read-only view of the fixed header fields of a frame held in a byte slice.
///
/// Construction only checks that the six header bytes and the two checksum
/// bytes can be addressed. Nothing about the declared length is trusted here;
/// see [`crate::validate_packet`] for the full structural check.
#[derive(Clone, Copy)]
pub struct UbxFrame<'a> {
    bytes: &'a [u8],
}

impl<'a> UbxFrame<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < UBX_HEADER_LEN + UBX_CHECKSUM_LEN {
            return Err(ParamError::FrameTooShort { len: bytes.len() }.into());
        }
        Ok(Self { bytes })
    }

    pub fn has_sync(&self) -> bool {
        self.bytes[UBX_SYNC_1_OFFSET] == UBX_SYNC_CHAR_1
            && self.bytes[UBX_SYNC_2_OFFSET] == UBX_SYNC_CHAR_2
    }

    pub fn class(&self) -> u8 {
        self.bytes[UBX_CLASS_OFFSET]
    }

    pub fn msg_id(&self) -> u8 {
        self.bytes[UBX_MSG_ID_OFFSET]
    }

    /// Payload length as declared by the length field
    pub fn declared_len(&self) -> u16 {
        u16::from_le_bytes([
            self.bytes[UBX_LENGTH_OFFSET],
            self.bytes[UBX_LENGTH_OFFSET + 1],
        ])
    }

    /// Number of bytes the view covers
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The two trailing bytes of the view
    pub fn trailing_checksum(&self) -> (u8, u8) {
        let len = self.bytes.len();
        (self.bytes[len - 2], self.bytes[len - 1])
    }

    /// Payload bytes, if the declared length fits inside the view
    pub fn payload(&self) -> Option<&'a [u8]> {
        let end = UBX_PAYLOAD_OFFSET + usize::from(self.declared_len());
        if end + UBX_CHECKSUM_LEN > self.bytes.len() {
            return None;
        }
        Some(&self.bytes[UBX_PAYLOAD_OFFSET..end])
    }

    /// Class, id, length and payload: the region the checksum covers
    pub(crate) fn checksummed_region(&self) -> Option<&'a [u8]> {
        let end = UBX_PAYLOAD_OFFSET + usize::from(self.declared_len());
        if end > self.bytes.len() {
            return None;
        }
        Some(&self.bytes[UBX_CLASS_OFFSET..end])
    }
}

impl core::fmt::Debug for UbxFrame<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UbxFrame")
            .field("class", &self.class())
            .field("msg_id", &self.msg_id())
            .field("declared_len", &self.declared_len())
            .field("len", &self.len())
            .finish()
    }
}
