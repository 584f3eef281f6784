use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{value_parser, Arg, Command as CliCommand};
use embedded_hal::delay::DelayNs;
use log::{error, info, warn};
use max_m10s::{
    Command, DeviceConfig, GnssFixType, HalI2c, I2cTransport, MaxM10s, Position, Result, Status,
    Velocity, DEFAULT_ADDRESS,
};

mod sim;

/// Thread-sleeping delay for hosted targets
struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

fn cli() -> CliCommand {
    CliCommand::new(clap::crate_name!())
        .about(clap::crate_description!())
        .version(clap::crate_version!())
        .arg(
            Arg::new("address")
                .long("address")
                .value_parser(value_parser!(u8))
                .default_value("66")
                .help("7-bit I2C address of the receiver"),
        )
        .arg(
            Arg::new("rate")
                .long("rate")
                .value_parser(value_parser!(u16).range(25..))
                .help("Measurement period in milliseconds to configure after init"),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_parser(value_parser!(u64))
                .default_value("1000")
                .help("Milliseconds between polls"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .value_parser(value_parser!(u32))
                .help("Stop after this many polls, run forever when absent"),
        )
        .arg(
            Arg::new("settle")
                .long("settle")
                .value_parser(value_parser!(u32))
                .help("Milliseconds to wait for each configuration acknowledgement"),
        )
        .arg(
            Arg::new("fault-every")
                .long("fault-every")
                .value_parser(value_parser!(u32))
                .help("Have the simulated receiver corrupt every Nth response"),
        )
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .format_timestamp(None)
        .format_target(false)
        .filter_level(log::LevelFilter::Info)
        .parse_env("LOG_LEVEL")
        .init();

    let matches = cli().get_matches();
    let address = matches
        .get_one::<u8>("address")
        .copied()
        .unwrap_or(DEFAULT_ADDRESS);
    let interval = Duration::from_millis(*matches.get_one::<u64>("interval").unwrap_or(&1000));
    let count = matches.get_one::<u32>("count").copied();

    let mut config = DeviceConfig::default().with_address(address);
    if let Some(settle) = matches.get_one::<u32>("settle") {
        config = config.with_settle_delay_ms(*settle);
    }

    let bus = sim::SimReceiver::new(DEFAULT_ADDRESS)
        .with_fault_every(matches.get_one::<u32>("fault-every").copied());
    let mut gps = MaxM10s::new(HalI2c::new(bus), StdDelay);

    info!("Initializing receiver at 0x{:02x}...", address);
    let init = gps.init(config);
    if let Err(e) = &init {
        error!("Init failed: {} (status 0x{:02x})", e, Status::from_result(&init).code());
    }
    init.context("receiver did not accept the UBX configuration")?;
    info!("Receiver is in UBX mode, NMEA output disabled");

    if let Some(rate) = matches.get_one::<u16>("rate") {
        match gps.config_meas_rate(*rate) {
            Ok(()) => info!("Measurement rate set to {} ms", rate),
            Err(e) => warn!(
                "Measurement rate not applied: {} (status 0x{:02x})",
                e,
                e.status().code()
            ),
        }
    }

    let mut polls = 0u32;
    loop {
        let pvt = poll(&mut gps, Command::NavPvt);
        report(&gps, Command::NavPvt, &pvt);

        let status = poll(&mut gps, Command::NavStatus);
        report(&gps, Command::NavStatus, &status);

        polls += 1;
        if count.is_some_and(|n| polls >= n) {
            break;
        }
        thread::sleep(interval);
    }
    Ok(())
}

/// One command, read and validate cycle
fn poll<T: I2cTransport, D: DelayNs>(gps: &mut MaxM10s<T, D>, cmd: Command) -> Result<()> {
    gps.command(cmd)?;
    gps.read()?;
    gps.validate_response(cmd)
}

fn report<T: I2cTransport, D: DelayNs>(gps: &MaxM10s<T, D>, cmd: Command, result: &Result<()>) {
    let status = Status::from_result(result);
    if let Err(e) = result {
        error!("{:?} poll failed: {} (status 0x{:02x})", cmd, e, status.code());
        return;
    }

    match cmd {
        Command::NavPvt => {
            let Some(pvt) = gps.nav_pvt() else { return };
            let fix = pvt.fix_type();
            if matches!(fix, GnssFixType::Fix3D | GnssFixType::GPSPlusDeadReckoning) {
                let pos = Position::from(&pvt);
                let vel = Velocity::from(&pvt);
                info!(
                    "Latitude: {:.5} Longitude: {:.5} Altitude: {:.2}m, {} satellites",
                    pos.lat,
                    pos.lon,
                    pos.alt,
                    pvt.num_satellites()
                );
                info!("Speed: {:.2} m/s Heading: {:.2} degrees", vel.speed, vel.heading);
            } else {
                info!("Waiting for fix ({:?}, {} satellites)", fix, pvt.num_satellites());
            }
            if let Ok(time) = DateTime::<Utc>::try_from(&pvt) {
                info!("Time: {}", time);
            }
        },
        Command::NavStatus => {
            let Some(nav) = gps.nav_status() else { return };
            info!(
                "Status: {:?}, {:?}, TTFF {} ms, up {} ms",
                nav.fix_type(),
                nav.flags(),
                nav.time_to_first_fix(),
                nav.uptime_ms()
            );
        },
        _ => info!("{:?} validated", cmd),
    }
}
