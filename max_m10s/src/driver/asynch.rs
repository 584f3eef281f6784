use embedded_hal_async::delay::DelayNs;

use super::state::{DeviceState, Phase, State};
use crate::{
    config::DeviceConfig,
    error::Result,
    transport::AsyncI2cTransport,
    ubx_packets::{CfgVal, Command, NavPvtRef, NavStatusRef},
};

/// MAX-M10S driver over an event-driven transport.
///
/// Bus transactions complete when their futures resolve, and the settle
/// delay between a CFG-VALSET and its acknowledgement is awaited rather than
/// polled. Timeouts are the transport's business here: [`DeviceConfig::timeout_ms`]
/// only applies to blocking transports.
pub struct MaxM10sAsync<T, D> {
    transport: T,
    delay: D,
    state: DeviceState,
}

impl<T, D> MaxM10sAsync<T, D>
where
    T: AsyncI2cTransport,
    D: DelayNs,
{
    pub fn new(transport: T, delay: D) -> Self {
        Self {
            transport,
            delay,
            state: DeviceState::new(),
        }
    }

    /// See [`crate::MaxM10s::init`]
    pub async fn init(&mut self, config: DeviceConfig) -> Result<()> {
        config.validate()?;
        let result = self.run_init(config).await;
        self.state.finish_init(&result);
        result
    }

    async fn run_init(&mut self, config: DeviceConfig) -> Result<()> {
        self.state.begin_init(config);
        self.configure(CfgVal::I2cOutProtUbx(true)).await?;
        self.configure(CfgVal::I2cOutProtNmea(false)).await
    }

    pub async fn config_meas_rate(&mut self, rate_ms: u16) -> Result<()> {
        self.state.ensure_ready()?;
        self.configure(CfgVal::RateMeas(rate_ms)).await
    }

    async fn configure(&mut self, val: CfgVal) -> Result<()> {
        let address = self.state.bus_address();
        let settle_delay_ms = self.state.config().settle_delay_ms;

        let frame = self.state.prepare_cfg_val(val)?;
        self.transport.transmit(address, frame).await?;

        self.delay.delay_ms(settle_delay_ms).await;

        self.transport
            .receive(address, self.state.ack_slot())
            .await?;
        self.state.check_cfg_ack()
    }

    pub async fn command(&mut self, cmd: Command) -> Result<()> {
        self.state.ensure_ready()?;
        let address = self.state.bus_address();

        let frame = self.state.prepare_command(cmd)?;
        self.transport.transmit(address, frame).await?;
        self.state.command_sent();
        Ok(())
    }

    pub async fn read(&mut self) -> Result<()> {
        self.state.ensure_ready()?;
        let address = self.state.bus_address();

        let slot = self.state.response_slot()?;
        self.transport.receive(address, slot).await?;
        self.state.response_received();
        Ok(())
    }

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

    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }
}
