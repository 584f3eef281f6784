use embedded_hal::delay::DelayNs;

use super::state::{DeviceState, Phase, State};
use crate::{
    config::DeviceConfig,
    error::Result,
    transport::I2cTransport,
    ubx_packets::{CfgVal, Command, NavPvtRef, NavStatusRef},
};

/// MAX-M10S driver over a blocking transport.
///
/// Every bus call returns once the transaction completed or timed out, so
/// each method leaves the bus idle.
///
/// ```no_run
/// # fn poll<T: max_m10s::I2cTransport, D: embedded_hal::delay::DelayNs>(i2c: T, delay: D) -> max_m10s::Result<()> {
/// use max_m10s::{Command, DeviceConfig, MaxM10s};
///
/// let mut gps = MaxM10s::new(i2c, delay);
/// gps.init(DeviceConfig::default())?;
///
/// gps.command(Command::NavPvt)?;
/// gps.read()?;
/// gps.validate_response(Command::NavPvt)?;
/// if let Some(pvt) = gps.nav_pvt() {
///     let _fix = pvt.fix_type();
/// }
/// # Ok(())
/// # }
/// ```
pub struct MaxM10s<T, D> {
    transport: T,
    delay: D,
    state: DeviceState,
}

impl<T, D> MaxM10s<T, D>
where
    T: I2cTransport,
    D: DelayNs,
{
    pub fn new(transport: T, delay: D) -> Self {
        Self {
            transport,
            delay,
            state: DeviceState::new(),
        }
    }

    /// Switches the I2C port to UBX output and turns NMEA output off.
    ///
    /// Each step sends a CFG-VALSET, waits the settle delay and checks the
    /// acknowledgement before the next one starts. The device is
    /// [`State::Ready`] only if both steps were acknowledged. A `config` that
    /// fails [`DeviceConfig::validate`] is rejected before the bus or the
    /// current state are touched.
    pub fn init(&mut self, config: DeviceConfig) -> Result<()> {
        config.validate()?;
        let result = self.run_init(config);
        self.state.finish_init(&result);
        result
    }

    fn run_init(&mut self, config: DeviceConfig) -> Result<()> {
        self.state.begin_init(config);
        self.configure(CfgVal::I2cOutProtUbx(true))?;
        self.configure(CfgVal::I2cOutProtNmea(false))
    }

    /// Sets the nominal time between GNSS measurements, e.g. 100 for 10 Hz
    pub fn config_meas_rate(&mut self, rate_ms: u16) -> Result<()> {
        self.state.ensure_ready()?;
        self.configure(CfgVal::RateMeas(rate_ms))
    }

    fn configure(&mut self, val: CfgVal) -> Result<()> {
        let address = self.state.bus_address();
        let DeviceConfig {
            timeout_ms,
            settle_delay_ms,
            ..
        } = *self.state.config();

        let frame = self.state.prepare_cfg_val(val)?;
        self.transport.transmit(address, frame, timeout_ms)?;

        self.delay.delay_ms(settle_delay_ms);

        self.transport
            .receive(address, self.state.ack_slot(), timeout_ms)?;
        self.state.check_cfg_ack()
    }

    /// Sends the poll request for `cmd` and remembers it for [`Self::read`]
    pub fn command(&mut self, cmd: Command) -> Result<()> {
        self.state.ensure_ready()?;
        let address = self.state.bus_address();
        let timeout_ms = self.state.config().timeout_ms;

        let frame = self.state.prepare_command(cmd)?;
        self.transport.transmit(address, frame, timeout_ms)?;
        self.state.command_sent();
        Ok(())
    }

    /// Reads exactly as many bytes as the response to the pending command takes
    pub fn read(&mut self) -> Result<()> {
        self.state.ensure_ready()?;
        let address = self.state.bus_address();
        let timeout_ms = self.state.config().timeout_ms;

        let slot = self.state.response_slot()?;
        self.transport.receive(address, slot, timeout_ms)?;
        self.state.response_received();
        Ok(())
    }

    /// Checks the bytes captured by [`Self::read`] against the message `cmd` expects
    pub fn validate_response(&mut self, cmd: Command) -> Result<()> {
        self.state.validate_response(cmd)
    }

    pub fn nav_pvt(&self) -> Option<NavPvtRef<'_>> {
        self.state.nav_pvt()
    }

    pub fn nav_status(&self) -> Option<NavStatusRef<'_>> {
        self.state.nav_status()
    }

    pub fn state(&self) -> State {
        self.state.state()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    pub fn current_command(&self) -> Option<Command> {
        self.state.current_command()
    }

    pub fn config(&self) -> &DeviceConfig {
        self.state.config()
    }

    pub fn tx_frame(&self) -> &[u8] {
        self.state.tx_frame()
    }

    pub fn rx_frame(&self) -> &[u8] {
        self.state.rx_frame()
    }

    /// Gives back the transport and the delay
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }
}
