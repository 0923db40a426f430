use clap::{Parser, ValueEnum};
use ds18b20::{Ds18b20, Resolution, WaitCondition};
use onewire_uart::UartOneWireBuilder;
use std::time::Duration;

mod tty;

/// How to wait for each conversion
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Wait {
    /// Do not wait; the interval alone spaces the reads
    None,
    /// Poll the bus until the sensor reports completion
    Data,
    /// Sleep for the conversion time of the resolution
    Delay,
}

impl From<Wait> for WaitCondition {
    fn from(value: Wait) -> Self {
        match value {
            Wait::None => WaitCondition::None,
            Wait::Data => WaitCondition::Data,
            Wait::Delay => WaitCondition::Delay,
        }
    }
}

/// Read a DS18B20 over a serial port emulating a 1-Wire master
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the serial port (e.g., /dev/ttyUSB0)
    #[arg(short, long)]
    path: String,
    /// Conversion resolution in bits
    #[arg(short, long, default_value_t = 12, value_parser = clap::value_parser!(u8).range(9..=12))]
    resolution: u8,
    /// Conversion wait strategy
    #[arg(short, long, value_enum, default_value_t = Wait::Delay)]
    wait: Wait,
    /// Pause between measurements in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    interval_ms: u64,
    /// Number of measurements, 0 to run forever
    #[arg(short, long, default_value_t = 0)]
    count: u64,
    /// Read the full scratchpad and check its CRC
    #[arg(long)]
    crc: bool,
}

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    let resolution =
        Resolution::from_bit_count(args.resolution).expect("Resolution out of range");
    // Open the serial port
    let uart = tty::Tty::open(&args.path).expect("Failed to open serial port");
    let mut delay = linux_embedded_hal::Delay;
    // Create the 1-Wire master
    let mut bus = UartOneWireBuilder::default()
        .build(uart)
        .expect("Failed to configure serial port");
    let mut sensor = Ds18b20::new().with_crc(args.crc);
    sensor
        .initialize(&mut bus)
        .expect("Failed to initialize DS18B20");
    log::info!("Found DS18B20, serial number {:02x?}", sensor.serial_number());
    match sensor.read_power_supply(&mut bus) {
        Ok(power) => log::info!("Power supply: {power:?}"),
        Err(e) => log::warn!("Failed to read power supply: {e:?}"),
    }
    // Keep the stored alarm limits, change only the resolution
    sensor
        .read_scratchpad(&mut bus)
        .expect("Failed to read scratchpad");
    sensor
        .set_resolution(&mut bus, resolution)
        .expect("Failed to set resolution");
    log::info!(
        "Resolution {} bits, alarm limits {}..{}",
        resolution.bits(),
        sensor.t_low() as i8,
        sensor.t_high() as i8
    );

    let mut taken = 0;
    loop {
        match sensor.measure(&mut bus, &mut delay, args.wait.into()) {
            Ok(temp) => log::info!("Temperature: {temp} °C"),
            Err(e) => log::warn!("Measurement failed: {e:?}"),
        }
        taken += 1;
        if args.count != 0 && taken >= args.count {
            break;
        }
        std::thread::sleep(Duration::from_millis(args.interval_ms));
    }
}
