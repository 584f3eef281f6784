//! Fixed layout of a UBX frame as it sits in the device buffers.
//!
//! ```text
//! offset 0          sync1 = 0xB5
//! offset 1          sync2 = 0x62
//! offset 2          class
//! offset 3          id
//! offset 4..6       payload length, little endian
//! offset 6..6+len   payload
//! offset 6+len      checksum A
//! offset 7+len      checksum B
//! ```

pub const UBX_SYNC_CHAR_1: u8 = 0xb5;
pub const UBX_SYNC_CHAR_2: u8 = 0x62;
pub(crate) const UBX_SYNC_SIZE: usize = 2;
pub(crate) const UBX_PAYLOAD_SIZE_LEN: usize = 2;
pub(crate) const UBX_CLASS_LEN: usize = 1;
pub(crate) const UBX_ID_LEN: usize = 1;

/// Sync chars, class, id and the length field.
pub const UBX_HEADER_LEN: usize =
    UBX_SYNC_SIZE + UBX_CLASS_LEN + UBX_ID_LEN + UBX_PAYLOAD_SIZE_LEN;
pub const UBX_CHECKSUM_LEN: usize = 2;

/// Bytes a frame occupies beyond its payload.
pub const UBX_FRAME_OVERHEAD: usize = UBX_HEADER_LEN + UBX_CHECKSUM_LEN;

pub(crate) const UBX_SYNC_1_OFFSET: usize = 0;
pub(crate) const UBX_SYNC_2_OFFSET: usize = 1;
pub(crate) const UBX_CLASS_OFFSET: usize = 2; // After SYNC_CHAR_1, SYNC_CHAR_2
pub(crate) const UBX_MSG_ID_OFFSET: usize = 3; // After CLASS
pub(crate) const UBX_LENGTH_OFFSET: usize = 4; // After MSG_ID
pub(crate) const UBX_PAYLOAD_OFFSET: usize = UBX_HEADER_LEN;

/// Capacity of each of the transmit and receive buffers owned by a device.
pub const BUFFER_CAPACITY: usize = 128;

/// Largest payload that still fits a frame into [`BUFFER_CAPACITY`].
pub const MAX_PAYLOAD_LEN: usize = BUFFER_CAPACITY - UBX_FRAME_OVERHEAD;

/// Total frame size for a given payload length.
pub const fn frame_len(payload_len: usize) -> usize {
    UBX_HEADER_LEN + payload_len + UBX_CHECKSUM_LEN
}

const _: () = {
    assert!(UBX_SYNC_1_OFFSET == 0);
    assert!(UBX_SYNC_2_OFFSET == 1);
    assert!(UBX_CLASS_OFFSET == UBX_SYNC_SIZE);
    assert!(UBX_MSG_ID_OFFSET == UBX_CLASS_OFFSET + UBX_CLASS_LEN);
    assert!(UBX_LENGTH_OFFSET == UBX_MSG_ID_OFFSET + UBX_ID_LEN);
    assert!(UBX_PAYLOAD_OFFSET == UBX_LENGTH_OFFSET + UBX_PAYLOAD_SIZE_LEN);
    assert!(UBX_HEADER_LEN == 6);
    assert!(frame_len(MAX_PAYLOAD_LEN) == BUFFER_CAPACITY);
    assert!(MAX_PAYLOAD_LEN <= u16::MAX as usize);
};
