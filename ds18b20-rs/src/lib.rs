#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
//! # DS18B20
//!
//! Driver for a single DS18B20 temperature sensor on a 1-Wire bus, written against the
//! [OneWire] trait so that any bus master (for example a UART running `onewire-uart`) can carry
//! it.
//!
//! The driver keeps the last known sensor state (ROM, alarm limits, configuration, reading) but
//! never owns the bus: every operation borrows it for exactly one command round-trip. Several
//! sensors sharing a bus are served by handing each of them the same `&mut` bus in turn.

use embedded_hal::delay::DelayNs;
use embedded_onewire::{OneWire, OneWireCrc, OneWireError};
use fixed::types::I12F4;
use log::{debug, warn};

mod command;
mod error;
mod scratchpad;
mod wait;

pub use command::Command;
pub use error::{DecodeError, Ds18b20Error};
pub use scratchpad::{
    ConfigRegister, Resolution, SCRATCHPAD_LEN, SCRATCHPAD_MIN_LEN, SIGN_MASK, Scratchpad, T_STEP,
};
pub use wait::{POLL_INTERVAL_MS, WaitCondition, wait_for_conversion};

#[cfg(test)]
mod sim;

/// Temperature in °C, with the sensor's 1/16 °C step as the fractional resolution.
pub type Temperature = I12F4;

/// Results of DS18B20 driver calls.
pub type Ds18b20Result<T, E> = Result<T, Ds18b20Error<E>>;

/// Length of the serial number inside the ROM code.
pub const SERIAL_NUMBER_LEN: usize = 6;
const SERIAL_NUMBER_OFFSET: usize = 1;

/// How the sensor is powered, as reported by Read-Power-Supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSupply {
    /// Powered through V_DD.
    External,
    /// Powered from the data line.
    Parasite,
}

/// A DS18B20 sensor and its last known state.
#[derive(Debug)]
pub struct Ds18b20 {
    initialized: bool,
    connected: bool,
    family: u8,
    serial_number: [u8; SERIAL_NUMBER_LEN],
    t_high: u8,
    t_low: u8,
    config: ConfigRegister,
    temperature: Temperature,
    crc: bool,
}

impl Default for Ds18b20 {
    fn default() -> Self {
        Self::new()
    }
}

impl Ds18b20 {
    /// Family code of the DS18B20.
    #[inline]
    pub const fn family_code() -> u8 {
        0x28
    }

    /// Creates a session assuming the power-on configuration (12-bit resolution).
    pub fn new() -> Self {
        Self {
            initialized: false,
            connected: false,
            family: 0,
            serial_number: [0; SERIAL_NUMBER_LEN],
            t_high: 0,
            t_low: 0,
            config: Resolution::Bits12.into(),
            temperature: Temperature::ZERO,
            crc: false,
        }
    }

    /// Read the whole scratchpad and check its CRC on every [read_scratchpad](Ds18b20::read_scratchpad).
    pub fn with_crc(mut self, crc: bool) -> Self {
        self.crc = crc;
        self
    }

    /// Whether the last [initialize](Ds18b20::initialize) succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the last reset issued by this session saw a presence pulse.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Family code from the last ROM read.
    pub fn family(&self) -> u8 {
        self.family
    }

    /// Serial number from the last ROM read.
    pub fn serial_number(&self) -> &[u8; SERIAL_NUMBER_LEN] {
        &self.serial_number
    }

    /// Cached high alarm register.
    pub fn t_high(&self) -> u8 {
        self.t_high
    }

    /// Cached low alarm register.
    pub fn t_low(&self) -> u8 {
        self.t_low
    }

    /// Cached configuration register.
    pub fn config(&self) -> ConfigRegister {
        self.config
    }

    /// Resolution selected by the cached configuration register.
    pub fn resolution(&self) -> Option<Resolution> {
        self.config.resolution()
    }

    /// Last decoded temperature.
    ///
    /// Only meaningful after a conversion followed by [read_scratchpad](Ds18b20::read_scratchpad).
    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Keep `connected` in line with what the bus reset just reported.
    fn track<T, E>(&mut self, result: Ds18b20Result<T, E>) -> Ds18b20Result<T, E> {
        match &result {
            Ok(_) => self.connected = true,
            Err(e) if e.is_disconnected() => self.connected = false,
            Err(_) => {}
        }
        result
    }

    /// Reset the bus, then send Skip ROM so the next function command reaches the only sensor.
    pub fn skip_rom<O: OneWire>(&mut self, bus: &mut O) -> Ds18b20Result<(), O::BusError> {
        let result = Command::SKIP_ROM.execute(bus, &[], &mut []);
        self.track(result)
    }

    /// Read the ROM code, and store its family code and serial number.
    ///
    /// The ROM is only stored when its CRC checks out.
    pub fn read_rom<O: OneWire>(
        &mut self,
        bus: &mut O,
    ) -> Ds18b20Result<[u8; SERIAL_NUMBER_LEN], O::BusError> {
        let mut rom = [0; Command::READ_ROM.rx_bytes as usize];
        let result = Command::READ_ROM.execute(bus, &[], &mut rom);
        self.track(result)?;
        if !OneWireCrc::validate(&rom) {
            return Err(Ds18b20Error::Bus(OneWireError::InvalidCrc));
        }
        if rom[0] != Self::family_code() {
            warn!("unexpected family code {:#04x}", rom[0]);
        }
        self.family = rom[0];
        self.serial_number.copy_from_slice(
            &rom[SERIAL_NUMBER_OFFSET..SERIAL_NUMBER_OFFSET + SERIAL_NUMBER_LEN],
        );
        debug!("ROM {:02x?}", rom);
        Ok(self.serial_number)
    }

    /// Detect the sensor and read its ROM.
    ///
    /// Without a presence pulse the session is marked disconnected and the ROM is not read.
    pub fn initialize<O: OneWire>(&mut self, bus: &mut O) -> Ds18b20Result<(), O::BusError> {
        self.initialized = false;
        match self.read_rom(bus) {
            Ok(_) => {
                self.initialized = true;
                Ok(())
            }
            Err(e) => {
                if e.is_disconnected() {
                    warn!("DS18B20 not found");
                }
                Err(e)
            }
        }
    }

    /// Start a temperature conversion and wait for it as requested.
    ///
    /// [WaitCondition::Delay] sleeps for the conversion time of the cached configuration, so
    /// the configuration should be known (read or written) beforehand.
    pub fn convert_temperature<O: OneWire, D: DelayNs>(
        &mut self,
        bus: &mut O,
        delay: &mut D,
        wait: WaitCondition,
    ) -> Ds18b20Result<(), O::BusError> {
        self.skip_rom(bus)?;
        Command::CONVERT_T.transfer(bus, &[], &mut [])?;
        wait_for_conversion(bus, delay, wait, self.config)
    }

    /// Read the scratchpad and update the cached reading, limits and configuration.
    ///
    /// Nothing is updated when the response fails its CRC or cannot be decoded.
    pub fn read_scratchpad<O: OneWire>(
        &mut self,
        bus: &mut O,
    ) -> Ds18b20Result<Temperature, O::BusError> {
        let mut buf = [0; SCRATCHPAD_LEN];
        let cmd = if self.crc {
            Command::READ_SCRATCHPAD_CRC
        } else {
            Command::READ_SCRATCHPAD
        };
        let response = &mut buf[..cmd.rx_bytes as usize];
        self.skip_rom(bus)?;
        cmd.transfer(bus, &[], response)?;
        if self.crc && !OneWireCrc::validate(response) {
            return Err(Ds18b20Error::Bus(OneWireError::InvalidCrc));
        }
        self.apply(response)
    }

    /// Decode a scratchpad block into the cached state.
    fn apply<E>(&mut self, bytes: &[u8]) -> Ds18b20Result<Temperature, E> {
        let pad = Scratchpad::decode(bytes)?;
        self.temperature = pad.temperature;
        self.t_high = pad.t_high;
        self.t_low = pad.t_low;
        self.config = pad.config;
        debug!("raw {:#06x} -> {} °C", pad.raw, pad.temperature);
        Ok(pad.temperature)
    }

    /// Write the alarm limits and configuration byte.
    ///
    /// `config` is sent as given; choosing one of the four resolution patterns is up to the
    /// caller. The cached values follow the write, so a later [WaitCondition::Delay] uses the
    /// new resolution.
    pub fn write_scratchpad<O: OneWire>(
        &mut self,
        bus: &mut O,
        t_high: u8,
        t_low: u8,
        config: u8,
    ) -> Ds18b20Result<(), O::BusError> {
        self.skip_rom(bus)?;
        let payload = Scratchpad::encode(t_high, t_low, config);
        Command::WRITE_SCRATCHPAD.transfer(bus, &payload, &mut [])?;
        self.t_high = t_high;
        self.t_low = t_low;
        self.config = ConfigRegister::from_bits(config);
        Ok(())
    }

    /// Change the resolution, keeping the cached alarm limits.
    pub fn set_resolution<O: OneWire>(
        &mut self,
        bus: &mut O,
        resolution: Resolution,
    ) -> Ds18b20Result<(), O::BusError> {
        self.write_scratchpad(bus, self.t_high, self.t_low, resolution.config_byte())
    }

    /// Ask the sensor whether it runs on parasite power.
    pub fn read_power_supply<O: OneWire>(
        &mut self,
        bus: &mut O,
    ) -> Ds18b20Result<PowerSupply, O::BusError> {
        self.skip_rom(bus)?;
        Command::READ_POWER_SUPPLY.transfer(bus, &[], &mut [])?;
        Ok(if bus.read_bit()? {
            PowerSupply::External
        } else {
            PowerSupply::Parasite
        })
    }

    /// Convert, wait, and read the new temperature.
    pub fn measure<O: OneWire, D: DelayNs>(
        &mut self,
        bus: &mut O,
        delay: &mut D,
        wait: WaitCondition,
    ) -> Ds18b20Result<Temperature, O::BusError> {
        self.convert_temperature(bus, delay, wait)?;
        self.read_scratchpad(bus)
    }
}
