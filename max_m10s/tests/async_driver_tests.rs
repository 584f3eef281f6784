mod common;

use common::*;
use futures::executor::block_on;
use max_m10s::{
    Command, DeviceConfig, Error, MaxM10sAsync, ParamError, Phase, ProtocolError, State,
    TransportError,
};

fn initialized_bus(log: &Log) -> MockAsyncI2c {
    MockAsyncI2c::new(log.clone())
        .respond(valset_ack())
        .respond(valset_ack())
}

#[test]
fn init_awaits_settle_delay_between_steps() {
    let log = new_log();
    let mut gps = MaxM10sAsync::new(initialized_bus(&log), MockDelay::new(log.clone()));

    block_on(gps.init(DeviceConfig::default().with_settle_delay_ms(500))).unwrap();
    assert_eq!(gps.state(), State::Ready);

    let events = events(&log);
    assert_eq!(events.len(), 6);
    assert!(matches!(
        &events[0],
        Event::Transmit { address: 0x84, bytes, timeout_ms: None } if bytes.len() == 17
    ));
    assert_eq!(events[1], Event::DelayMs(500));
    assert_eq!(
        events[2],
        Event::Receive {
            address: 0x84,
            len: 10,
            timeout_ms: None
        }
    );
    assert!(matches!(&events[3], Event::Transmit { bytes, .. } if bytes[14] == 0x00));
    assert_eq!(events[4], Event::DelayMs(500));
}

#[test]
fn init_failure_returns_to_uninitialized() {
    let log = new_log();
    let bus = MockAsyncI2c::new(log.clone())
        .respond(valset_ack())
        .respond(nak_for(0x06, 0x8a));
    let mut gps = MaxM10sAsync::new(bus, MockDelay::new(log.clone()));

    assert_eq!(
        block_on(gps.init(DeviceConfig::default())),
        Err(ProtocolError::Nack.into())
    );
    assert_eq!(gps.state(), State::Uninitialized);
    assert_eq!(
        block_on(gps.command(Command::NavPvt)),
        Err(Error::InvalidParam(ParamError::NotInitialized))
    );
}

#[test]
fn rejected_reinit_keeps_ready_device_online() {
    let log = new_log();
    let mut gps = MaxM10sAsync::new(initialized_bus(&log), MockDelay::new(log.clone()));
    block_on(gps.init(DeviceConfig::default())).unwrap();
    log.borrow_mut().clear();

    let err = block_on(gps.init(DeviceConfig::default().with_address(0x90))).unwrap_err();
    assert_eq!(err, Error::InvalidParam(ParamError::DeviceAddress(0x90)));
    assert_eq!(gps.state(), State::Ready);
    assert!(events(&log).is_empty());
}

#[test]
fn receive_failure() {
    let log = new_log();
    let bus = MockAsyncI2c::new(log.clone()).fail_receive(TransportError::ArbitrationLoss);
    let mut gps = MaxM10sAsync::new(bus, MockDelay::new(log.clone()));
    assert_eq!(
        block_on(gps.init(DeviceConfig::default())),
        Err(Error::Transport(TransportError::ArbitrationLoss))
    );
}

#[test]
fn transmit_failure() {
    let log = new_log();
    let bus = MockAsyncI2c::new(log.clone()).fail_transmit(TransportError::Timeout);
    let mut gps = MaxM10sAsync::new(bus, MockDelay::new(log.clone()));
    assert_eq!(block_on(gps.init(DeviceConfig::default())), Err(Error::Timeout));
    assert_eq!(events(&log).len(), 1);
}

#[test]
fn command_read_validate() {
    let log = new_log();
    let bus = initialized_bus(&log).respond(nav_pvt_frame());
    let mut gps = MaxM10sAsync::new(bus, MockDelay::new(log.clone()));

    block_on(async {
        gps.init(DeviceConfig::default()).await?;
        assert_eq!(gps.read().await, Err(ParamError::NoPendingCommand.into()));
        gps.command(Command::NavPvt).await?;
        assert_eq!(gps.phase(), Phase::CommandSent);
        gps.read().await?;
        assert_eq!(gps.phase(), Phase::Received);
        gps.validate_response(Command::NavPvt)
    })
    .unwrap();

    assert_eq!(gps.phase(), Phase::Idle);
    assert_eq!(gps.rx_frame().len(), 100);
    let pvt = gps.nav_pvt().unwrap();
    assert_eq!(pvt.itow(), 504_018_000);
    assert_eq!(pvt.year(), 2024);
}

#[test]
fn config_meas_rate() {
    let log = new_log();
    let bus = initialized_bus(&log).respond(valset_ack());
    let mut gps = MaxM10sAsync::new(bus, MockDelay::new(log.clone()));

    block_on(gps.init(DeviceConfig::default())).unwrap();
    log.borrow_mut().clear();
    block_on(gps.config_meas_rate(200)).unwrap();

    let events = events(&log);
    assert!(matches!(
        &events[0],
        Event::Transmit { bytes, .. } if bytes[14..16] == [0xc8, 0x00]
    ));
    assert_eq!(events[1], Event::DelayMs(1000));
    assert_eq!(gps.tx_frame().len(), 18);
}
