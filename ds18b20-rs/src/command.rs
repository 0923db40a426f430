//! DS18B20 command table and the reset/transmit/receive round-trip.

use crate::Ds18b20Error;
use embedded_onewire::{
    ONEWIRE_READ_ROM_CMD, ONEWIRE_ROM_LEN, ONEWIRE_SKIP_ROM_CMD, OneWire, OneWireError,
    OneWireStatus,
};
use log::{debug, warn};

/// A DS18B20 command: its opcode, and how many bytes follow it in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Command byte.
    pub opcode: u8,
    /// Bytes read back after the opcode (and payload).
    pub rx_bytes: u8,
    /// Payload bytes written after the opcode.
    pub tx_bytes: u8,
}

impl Command {
    /// Start a temperature conversion.
    pub const CONVERT_T: Command = Command::new(0x44, 0, 0);
    /// Read temperature, alarm limits and configuration.
    pub const READ_SCRATCHPAD: Command = Command::new(0xbe, 5, 0);
    /// Read the whole scratchpad, CRC included.
    pub const READ_SCRATCHPAD_CRC: Command = Command::new(0xbe, 9, 0);
    /// Write T_H, T_L and configuration.
    pub const WRITE_SCRATCHPAD: Command = Command::new(0x4e, 0, 3);
    /// Read the 64-bit ROM code.
    pub const READ_ROM: Command = Command::new(ONEWIRE_READ_ROM_CMD, ONEWIRE_ROM_LEN as u8, 0);
    /// Address the only device on the bus.
    pub const SKIP_ROM: Command = Command::new(ONEWIRE_SKIP_ROM_CMD, 0, 0);
    /// Ask whether the device runs on parasite power. The answer is a single read slot.
    pub const READ_POWER_SUPPLY: Command = Command::new(0xb4, 0, 0);

    /// Creates a command descriptor.
    pub const fn new(opcode: u8, rx_bytes: u8, tx_bytes: u8) -> Self {
        Command {
            opcode,
            rx_bytes,
            tx_bytes,
        }
    }

    fn check<E>(&self, payload: &[u8], response: &[u8]) -> Result<(), Ds18b20Error<E>> {
        if payload.len() != self.tx_bytes as usize {
            return Err(Ds18b20Error::PayloadLength {
                expected: self.tx_bytes as usize,
                actual: payload.len(),
            });
        }
        if response.len() != self.rx_bytes as usize {
            return Err(Ds18b20Error::PayloadLength {
                expected: self.rx_bytes as usize,
                actual: response.len(),
            });
        }
        Ok(())
    }

    /// Run the full round-trip: bus reset, opcode, payload, response.
    ///
    /// Nothing is transmitted when the reset sees no presence pulse. `payload`
    /// and `response` must match [tx_bytes](Command::tx_bytes) and
    /// [rx_bytes](Command::rx_bytes); a mismatch fails before the bus is touched.
    pub fn execute<O: OneWire>(
        &self,
        bus: &mut O,
        payload: &[u8],
        response: &mut [u8],
    ) -> Result<(), Ds18b20Error<O::BusError>> {
        self.check::<O::BusError>(payload, response)?;
        let status = bus.reset()?;
        if status.shortcircuit() {
            warn!("1-Wire line is shorted");
            return Err(Ds18b20Error::Bus(OneWireError::ShortCircuit));
        }
        if !status.presence() {
            warn!("No presence pulse on the 1-Wire bus");
            return Err(Ds18b20Error::Bus(OneWireError::NoDevicePresent));
        }
        self.exchange(bus, payload, response)
    }

    /// Send the opcode and payload, then read the response, inside the current reset window.
    ///
    /// Function commands follow a ROM command without a reset in between, since a reset
    /// drops the addressing.
    pub fn transfer<O: OneWire>(
        &self,
        bus: &mut O,
        payload: &[u8],
        response: &mut [u8],
    ) -> Result<(), Ds18b20Error<O::BusError>> {
        self.check::<O::BusError>(payload, response)?;
        self.exchange(bus, payload, response)
    }

    fn exchange<O: OneWire>(
        &self,
        bus: &mut O,
        payload: &[u8],
        response: &mut [u8],
    ) -> Result<(), Ds18b20Error<O::BusError>> {
        bus.write_byte(self.opcode)?;
        if !payload.is_empty() {
            bus.write_bytes(payload)?;
        }
        if !response.is_empty() {
            bus.read_bytes(response)?;
        }
        debug!(
            "command {:#04x}: sent {:02x?}, received {:02x?}",
            self.opcode, payload, response
        );
        Ok(())
    }
}
