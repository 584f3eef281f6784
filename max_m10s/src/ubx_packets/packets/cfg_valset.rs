use crate::ubx_packets::{class, id, CfgKey, CfgLayerSet, UbxPacketMeta};

/// Set configuration item values, one key per message.
///
/// ```text
/// byte 0      version = 0x00
/// byte 1      layers, see [`CfgLayerSet`]
/// bytes 2-3   reserved
/// bytes 4-7   key id, little endian
/// bytes 8..   value, little endian, 1, 2 or 4 bytes
/// ```
pub struct CfgValSet;

impl CfgValSet {
    pub const VERSION: u8 = 0x00;
    /// Version, layers, reserved and key
    pub const HEADER_LEN: usize = 4 + CfgKey::SIZE;
    pub const MAX_VALUE_LEN: usize = 4;

    /// First four payload bytes for a message writing to `layers`
    pub const fn header(layers: CfgLayerSet) -> [u8; 4] {
        [Self::VERSION, layers.bits(), 0, 0]
    }
}

impl UbxPacketMeta for CfgValSet {
    const CLASS: u8 = class::CFG;
    const ID: u8 = id::CFG_VALSET;
    const FIXED_PAYLOAD_LEN: Option<u16> = None;
    const MAX_PAYLOAD_LEN: u16 = (Self::HEADER_LEN + Self::MAX_VALUE_LEN) as u16;
}
