//! Stateless UBX codec.
//!
//! Every function works on a caller-provided buffer and returns either the
//! number of bytes written or whether the bytes form the expected frame. No
//! state survives a call and nothing here touches the bus.

use log::{debug, trace, warn};

use crate::{
    constants::{
        frame_len, MAX_PAYLOAD_LEN, UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_HEADER_LEN,
        UBX_LENGTH_OFFSET, UBX_MSG_ID_OFFSET, UBX_PAYLOAD_OFFSET, UBX_SYNC_1_OFFSET,
        UBX_SYNC_2_OFFSET, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
    },
    error::{ParamError, ProtocolError, Result},
    parser::{ubx_checksum, UbxChecksumCalc, UbxFrame},
    ubx_packets::{AckAck, AckNak, AckRef, CfgKey, CfgLayerSet, CfgVal, CfgValSet, UbxPacketMeta},
};

fn ensure_capacity(buffer: &[u8], need: usize) -> Result<()> {
    if buffer.len() < need {
        return Err(ParamError::BufferTooSmall {
            need,
            got: buffer.len(),
        }
        .into());
    }
    Ok(())
}

/// Writes sync chars, class, id, length and checksum around a payload that is
/// already in place at the payload offset. Returns the frame size.
fn seal_frame(buffer: &mut [u8], class: u8, msg_id: u8, payload_len: usize) -> usize {
    buffer[UBX_SYNC_1_OFFSET] = UBX_SYNC_CHAR_1;
    buffer[UBX_SYNC_2_OFFSET] = UBX_SYNC_CHAR_2;
    buffer[UBX_CLASS_OFFSET] = class;
    buffer[UBX_MSG_ID_OFFSET] = msg_id;
    buffer[UBX_LENGTH_OFFSET..UBX_PAYLOAD_OFFSET]
        .copy_from_slice(&(payload_len as u16).to_le_bytes());

    let end = UBX_PAYLOAD_OFFSET + payload_len;
    let (ck_a, ck_b) = ubx_checksum(&buffer[UBX_CLASS_OFFSET..end]);
    buffer[end] = ck_a;
    buffer[end + 1] = ck_b;

    frame_len(payload_len)
}

/// Writes a zero-payload frame, the form every poll request takes.
///
/// Returns the frame size, always 8.
pub fn prepare_command(buffer: &mut [u8], class: u8, msg_id: u8) -> Result<usize> {
    ensure_capacity(buffer, frame_len(0))?;
    Ok(seal_frame(buffer, class, msg_id, 0))
}

/// Writes a CFG-VALSET frame setting `key` to the little-endian `value` in
/// the RAM and battery-backed layers.
///
/// `value` must be 1, 2 or 4 bytes wide. Returns the frame size,
/// `6 + 8 + value.len() + 2`.
pub fn prepare_config_set(buffer: &mut [u8], key: CfgKey, value: &[u8]) -> Result<usize> {
    if !matches!(value.len(), 1 | 2 | 4) {
        return Err(ParamError::ValueWidth(value.len()).into());
    }
    let payload_len = CfgValSet::HEADER_LEN + value.len();
    ensure_capacity(buffer, frame_len(payload_len))?;

    let payload = &mut buffer[UBX_PAYLOAD_OFFSET..UBX_PAYLOAD_OFFSET + payload_len];
    payload[0..4].copy_from_slice(&CfgValSet::header(CfgLayerSet::default()));
    payload[4..CfgValSet::HEADER_LEN].copy_from_slice(&key.to_le_bytes());
    payload[CfgValSet::HEADER_LEN..].copy_from_slice(value);

    let size = seal_frame(buffer, CfgValSet::CLASS, CfgValSet::ID, payload_len);
    trace!("CFG-VALSET key 0x{:08x}, {} bytes", key.raw(), size);
    Ok(size)
}

pub fn prepare_config_set_u8(buffer: &mut [u8], key: CfgKey, value: u8) -> Result<usize> {
    prepare_config_set(buffer, key, &[value])
}

pub fn prepare_config_set_u16(buffer: &mut [u8], key: CfgKey, value: u16) -> Result<usize> {
    prepare_config_set(buffer, key, &value.to_le_bytes())
}

pub fn prepare_config_set_u32(buffer: &mut [u8], key: CfgKey, value: u32) -> Result<usize> {
    prepare_config_set(buffer, key, &value.to_le_bytes())
}

/// Writes a CFG-VALSET frame for a typed value, using the width its key declares
pub fn prepare_cfg_val(buffer: &mut [u8], val: CfgVal) -> Result<usize> {
    let bytes = val.value_bytes();
    prepare_config_set(buffer, val.key(), &bytes[..val.len()])
}

/// Checks that `frame` is exactly one well-formed frame of the expected class and id.
///
/// Structural checks run first, in this order: minimum size, sync chars,
/// class and id, payload length bound, total size. The checksum is only
/// recomputed once the structure is trusted.
pub fn validate_packet(frame: &[u8], class: u8, msg_id: u8) -> Result<()> {
    let view = UbxFrame::new(frame)?;

    if !view.has_sync() {
        return Err(ProtocolError::InvalidSync.into());
    }

    if view.class() != class || view.msg_id() != msg_id {
        return Err(ProtocolError::UnexpectedMessage {
            class: view.class(),
            id: view.msg_id(),
        }
        .into());
    }

    let len = view.declared_len();
    if usize::from(len) > MAX_PAYLOAD_LEN {
        return Err(ProtocolError::PayloadTooLong {
            len,
            max: MAX_PAYLOAD_LEN,
        }
        .into());
    }

    let expect = UBX_HEADER_LEN + usize::from(len) + UBX_CHECKSUM_LEN;
    if frame.len() != expect {
        return Err(ProtocolError::FrameLengthMismatch {
            expect,
            got: frame.len(),
        }
        .into());
    }

    let region = view
        .checksummed_region()
        .ok_or(ProtocolError::FrameLengthMismatch {
            expect,
            got: frame.len(),
        })?;
    let mut calc = UbxChecksumCalc::new();
    calc.update(region);
    let (ck_a, ck_b) = view.trailing_checksum();
    calc.validate_result(ck_a, ck_b)
}

/// Checks that `frame` acknowledges the command with `class` and `msg_id`.
///
/// A well-formed ACK-NAK is reported as [`ProtocolError::Nack`]. Any other
/// frame that is not a valid ACK-ACK keeps its validation error. A valid
/// ACK-ACK for a different command is [`ProtocolError::AckMismatch`].
pub fn validate_ack(frame: &[u8], class: u8, msg_id: u8) -> Result<()> {
    if let Err(e) = validate_packet(frame, AckAck::CLASS, AckAck::ID) {
        if validate_packet(frame, AckNak::CLASS, AckNak::ID).is_ok() {
            match AckRef::from_payload(&frame[UBX_PAYLOAD_OFFSET..frame.len() - UBX_CHECKSUM_LEN]) {
                Ok(nak) => debug!(
                    "NACK for class 0x{:02x} id 0x{:02x}",
                    nak.class(),
                    nak.msg_id()
                ),
                Err(_) => debug!("NACK without message reference"),
            }
            return Err(ProtocolError::Nack.into());
        }
        debug!("invalid acknowledgement: {}", e);
        return Err(e);
    }

    let ack = AckRef::from_payload(&frame[UBX_PAYLOAD_OFFSET..frame.len() - UBX_CHECKSUM_LEN])?;
    if !ack.is_ack_for_raw(class, msg_id) {
        warn!(
            "ACK for class 0x{:02x} id 0x{:02x}, expected class 0x{:02x} id 0x{:02x}",
            ack.class(),
            ack.msg_id(),
            class,
            msg_id
        );
        return Err(ProtocolError::AckMismatch {
            class: ack.class(),
            id: ack.msg_id(),
        }
        .into());
    }
    debug!("ACK for class 0x{:02x} id 0x{:02x}", class, msg_id);
    Ok(())
}
