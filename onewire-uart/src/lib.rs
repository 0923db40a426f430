#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

/*! # onewire-uart
 *
 * A 1-Wire master built from a UART whose TX and RX pins are tied together
 * on an open-drain line. Every 1-Wire time slot is one UART character:
 *
 * - reset: `0xF0` at 9600 baud holds the line low for the start bit and
 *   four data bits (about 520 µs). A device answering with a presence pulse
 *   pulls some of the upper bits low, so the echo differs from `0xF0`.
 * - write 0: `0x00` at 115200 baud (about 78 µs low).
 * - write 1 / read: `0xFF` at 115200 baud, only the start bit is low
 *   (about 8.7 µs). A device sending a 0 stretches the low phase, which
 *   shows up as a cleared bit in the echo.
 */

pub use embedded_onewire::{OneWire, OneWireError, OneWireResult};
mod error;
mod onewire;
mod status;
mod traits;

pub use error::UartError;
pub use status::ResetStatus;
pub use traits::SetBaudRate;

/// Results of UART transceiver calls.
pub type UartResult<T, E> = Result<T, UartError<E>>;

/// Baud rate whose bit period gives the 1-Wire reset pulse.
pub const RESET_BAUD_RATE: u32 = 9600;
/// Baud rate whose bit period gives the 1-Wire data slots.
pub const DATA_BAUD_RATE: u32 = 115_200;

/// A 1-Wire master emulated on a UART.
///
/// Takes ownership of a UART implementing [`Read`](embedded_io::Read),
/// [`Write`](embedded_io::Write) and [`SetBaudRate`]. Between calls the UART
/// is always left at the data baud rate.
pub struct UartOneWire<U> {
    pub(crate) uart: U,
    pub(crate) reset_baud: u32,
    pub(crate) data_baud: u32,
}

/// Builder for creating a [`UartOneWire`] instance with custom baud rates.
pub struct UartOneWireBuilder {
    reset_baud: u32,
    data_baud: u32,
}

impl Default for UartOneWireBuilder {
    fn default() -> Self {
        UartOneWireBuilder {
            reset_baud: RESET_BAUD_RATE,
            data_baud: DATA_BAUD_RATE,
        }
    }
}

impl UartOneWireBuilder {
    /// Sets the baud rate used for the reset pulse.
    ///
    /// The `0xF0` reset character must keep the line low for at least
    /// 480 µs, so five bit periods must add up to that.
    pub fn with_reset_baud_rate(mut self, baud: u32) -> Self {
        self.reset_baud = baud;
        self
    }

    /// Sets the baud rate used for bit slots.
    pub fn with_data_baud_rate(mut self, baud: u32) -> Self {
        self.data_baud = baud;
        self
    }

    /// Builds a new [`UartOneWire`] and programs the data baud rate.
    pub fn build<U: SetBaudRate>(self, mut uart: U) -> UartResult<UartOneWire<U>, U::Error> {
        uart.set_baud_rate(self.data_baud).map_err(UartError::Uart)?;
        Ok(UartOneWire {
            uart,
            reset_baud: self.reset_baud,
            data_baud: self.data_baud,
        })
    }
}

impl<U: SetBaudRate> UartOneWire<U> {
    /// Creates a new instance with the default baud rates.
    pub fn new(uart: U) -> UartResult<Self, U::Error> {
        UartOneWireBuilder::default().build(uart)
    }
}

impl<U> UartOneWire<U> {
    /// Releases the UART.
    pub fn release(self) -> U {
        self.uart
    }

    /// Baud rate used for the reset pulse.
    pub fn reset_baud_rate(&self) -> u32 {
        self.reset_baud
    }

    /// Baud rate used for bit slots.
    pub fn data_baud_rate(&self) -> u32 {
        self.data_baud
    }
}

#[cfg(test)]
pub(crate) mod loopback;
