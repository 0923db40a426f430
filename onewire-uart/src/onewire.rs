use crate::{
    ResetStatus, SetBaudRate, UartError, UartOneWire, UartResult, status::RESET_CHAR,
};
use embedded_io::{Read, Write};
use embedded_onewire::{OneWire, OneWireResult};
use log::trace;

// startbit + 8 low bits = 9 * 1/115200 = 78 us low pulse
pub(crate) const LOGIC_0_CHAR: u8 = 0x00;
// startbit only = 1/115200 = 8.7 us low pulse, line released for the rest
pub(crate) const LOGIC_1_CHAR: u8 = 0xff;

/// The eight slot characters of a byte, least significant bit first.
pub(crate) fn encode_slots(byte: u8) -> [u8; 8] {
    let mut slots = [LOGIC_0_CHAR; 8];
    for (pos, slot) in slots.iter_mut().enumerate() {
        if (byte >> pos) & 0x1 == 0x1 {
            *slot = LOGIC_1_CHAR;
        }
    }
    slots
}

/// Rebuild a byte from the echoes of its eight slots.
///
/// Only an untouched `0xFF` echo is a 1: any device holding the line low
/// past the start bit clears some of the data bits.
pub(crate) fn decode_slots(echoes: &[u8; 8]) -> u8 {
    echoes
        .iter()
        .enumerate()
        .filter(|(_, echo)| **echo == LOGIC_1_CHAR)
        .fold(0, |byte, (pos, _)| byte | (1 << pos))
}

impl<U: Read + Write + SetBaudRate> UartOneWire<U> {
    /// Send `tx` and collect exactly as many echo characters into `rx`.
    fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> UartResult<(), U::Error> {
        self.uart.write_all(tx).map_err(UartError::Uart)?;
        self.uart.flush().map_err(UartError::Uart)?;
        self.uart.read_exact(rx)?;
        Ok(())
    }

    fn reset_pulse(&mut self) -> UartResult<u8, U::Error> {
        self.uart
            .set_baud_rate(self.reset_baud)
            .map_err(UartError::Uart)?;
        let mut echo = [0; 1];
        self.exchange(&[RESET_CHAR], &mut echo)?;
        Ok(echo[0])
    }

    /// Send a byte as eight slots and return the byte seen on the line.
    pub fn write_read_byte(&mut self, byte: u8) -> UartResult<u8, U::Error> {
        let mut echoes = [0; 8];
        self.exchange(&encode_slots(byte), &mut echoes)?;
        Ok(decode_slots(&echoes))
    }
}

impl<U: Read + Write + SetBaudRate> OneWire for UartOneWire<U> {
    type Status = ResetStatus;

    type BusError = UartError<U::Error>;

    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError> {
        let pulse = self.reset_pulse();
        // The data rate is the resting state, even after a failed pulse
        let restore = self
            .uart
            .set_baud_rate(self.data_baud)
            .map_err(UartError::Uart);
        let echo = pulse?;
        restore?;
        trace!("1-Wire reset echo {echo:#04x}");
        Ok(ResetStatus::new(echo))
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError> {
        let slot = if bit { LOGIC_1_CHAR } else { LOGIC_0_CHAR };
        let mut echo = [0; 1];
        self.exchange(&[slot], &mut echo)?;
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError> {
        let mut echo = [0; 1];
        self.exchange(&[LOGIC_1_CHAR], &mut echo)?;
        Ok(echo[0] == LOGIC_1_CHAR)
    }

    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        self.write_read_byte(byte)?;
        Ok(())
    }

    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        Ok(self.write_read_byte(0xff)?)
    }
}
