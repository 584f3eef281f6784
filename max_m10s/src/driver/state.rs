use log::{debug, trace};

use crate::{
    codec,
    config::DeviceConfig,
    constants::{frame_len, BUFFER_CAPACITY, UBX_CHECKSUM_LEN, UBX_PAYLOAD_OFFSET},
    error::{ParamError, Result},
    ubx_packets::{AckAck, CfgVal, CfgValSet, Command, NavPvtRef, NavStatusRef, UbxPacketMeta},
};

/// Size of an ACK-ACK or ACK-NAK on the bus
pub const ACK_FRAME_LEN: usize = frame_len(AckAck::PAYLOAD_LEN);

/// Device lifecycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    #[default]
    Uninitialized,
    /// The UBX-enable and NMEA-disable handshake is running
    Initializing,
    Ready,
}

/// Where a [`State::Ready`] device is in its command cycle.
///
/// Informational only: operations are gated on [`State`] and on the pending
/// command, never on the phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    CommandSent,
    Received,
}

/// Buffers and bookkeeping shared by the blocking and async drivers.
///
/// Both buffers are reused by every transaction. `tx_size` and `rx_size` are
/// the number of bytes the last transaction used.
pub struct DeviceState {
    config: DeviceConfig,
    state: State,
    phase: Phase,
    current_command: Option<Command>,
    validated: Option<Command>,
    tx_buffer: [u8; BUFFER_CAPACITY],
    tx_size: usize,
    rx_buffer: [u8; BUFFER_CAPACITY],
    rx_size: usize,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    pub const fn new() -> Self {
        Self {
            config: DeviceConfig {
                address: crate::config::DEFAULT_ADDRESS,
                timeout_ms: crate::config::DEFAULT_TIMEOUT_MS,
                settle_delay_ms: crate::config::DEFAULT_SETTLE_DELAY_MS,
            },
            state: State::Uninitialized,
            phase: Phase::Idle,
            current_command: None,
            validated: None,
            tx_buffer: [0; BUFFER_CAPACITY],
            tx_size: 0,
            rx_buffer: [0; BUFFER_CAPACITY],
            rx_size: 0,
        }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.state == State::Ready
    }

    pub fn current_command(&self) -> Option<Command> {
        self.current_command
    }

    /// The frame written by the last transaction
    pub fn tx_frame(&self) -> &[u8] {
        &self.tx_buffer[..self.tx_size]
    }

    /// The bytes received by the last transaction
    pub fn rx_frame(&self) -> &[u8] {
        &self.rx_buffer[..self.rx_size]
    }

    /// NAV-PVT solution, once a NAV-PVT response passed validation
    pub fn nav_pvt(&self) -> Option<NavPvtRef<'_>> {
        match self.validated {
            Some(Command::NavPvt) => NavPvtRef::from_payload(self.rx_payload()).ok(),
            _ => None,
        }
    }

    /// NAV-STATUS, once a NAV-STATUS response passed validation
    pub fn nav_status(&self) -> Option<NavStatusRef<'_>> {
        match self.validated {
            Some(Command::NavStatus) => NavStatusRef::from_payload(self.rx_payload()).ok(),
            _ => None,
        }
    }

    fn rx_payload(&self) -> &[u8] {
        let end = self.rx_size.saturating_sub(UBX_CHECKSUM_LEN);
        self.rx_buffer
            .get(UBX_PAYLOAD_OFFSET..end)
            .unwrap_or_default()
    }

    pub(crate) fn bus_address(&self) -> u8 {
        self.config.bus_address()
    }

    /// Zeroes everything for a fresh handshake with an already validated `config`
    pub(crate) fn begin_init(&mut self, config: DeviceConfig) {
        *self = Self {
            config,
            state: State::Initializing,
            ..Self::new()
        };
        debug!(
            "initializing receiver at 0x{:02x}, bus address 0x{:02x}",
            config.address,
            config.bus_address()
        );
    }

    pub(crate) fn finish_init(&mut self, result: &Result<()>) {
        match result {
            Ok(()) => {
                self.state = State::Ready;
                debug!("receiver ready");
            },
            Err(e) => {
                self.state = State::Uninitialized;
                debug!("init failed: {}", e);
            },
        }
    }

    pub(crate) fn ensure_ready(&self) -> Result<()> {
        if self.state != State::Ready {
            return Err(ParamError::NotInitialized.into());
        }
        Ok(())
    }

    /// Writes a CFG-VALSET into the transmit buffer and returns the frame
    pub(crate) fn prepare_cfg_val(&mut self, val: CfgVal) -> Result<&[u8]> {
        self.tx_size = codec::prepare_cfg_val(&mut self.tx_buffer, val)?;
        trace!("{:?}: {} bytes", val, self.tx_size);
        Ok(self.tx_frame())
    }

    /// Receive slot for the acknowledgement of a CFG-VALSET
    pub(crate) fn ack_slot(&mut self) -> &mut [u8] {
        self.validated = None;
        self.rx_size = ACK_FRAME_LEN;
        &mut self.rx_buffer[..ACK_FRAME_LEN]
    }

    pub(crate) fn check_cfg_ack(&self) -> Result<()> {
        codec::validate_ack(self.rx_frame(), CfgValSet::CLASS, CfgValSet::ID)
    }

    /// Writes the poll frame for `cmd` and records it as pending
    pub(crate) fn prepare_command(&mut self, cmd: Command) -> Result<&[u8]> {
        self.tx_size = codec::prepare_command(&mut self.tx_buffer, cmd.class(), cmd.msg_id())?;
        self.current_command = Some(cmd);
        self.validated = None;
        debug!("command {:?}", cmd);
        Ok(self.tx_frame())
    }

    pub(crate) fn command_sent(&mut self) {
        self.phase = Phase::CommandSent;
    }

    /// Receive slot sized for the response to the pending command
    pub(crate) fn response_slot(&mut self) -> Result<&mut [u8]> {
        let cmd = self.current_command.ok_or(ParamError::NoPendingCommand)?;
        let len = cmd.response_len();
        self.validated = None;
        self.rx_size = len;
        trace!("reading {} bytes for {:?}", len, cmd);
        Ok(&mut self.rx_buffer[..len])
    }

    pub(crate) fn response_received(&mut self) {
        self.phase = Phase::Received;
    }

    pub(crate) fn validate_response(&mut self, cmd: Command) -> Result<()> {
        codec::validate_packet(self.rx_frame(), cmd.class(), cmd.msg_id())?;
        self.validated = Some(cmd);
        self.phase = Phase::Idle;
        Ok(())
    }
}

impl core::fmt::Debug for DeviceState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceState")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("current_command", &self.current_command)
            .field("tx_size", &self.tx_size)
            .field("rx_size", &self.rx_size)
            .finish()
    }
}
