//! Serial TTY as the UART of the 1-Wire master.
//!
//! The adapter's TX and RX must both be wired to the 1-Wire data line (TX through
//! an open-drain buffer or a Schottky diode), with a pull-up to V_DD.

use embedded_io::{ErrorKind, ErrorType, Read, Write};
use onewire_uart::{DATA_BAUD_RATE, SetBaudRate};
use serialport::{ClearBuffer, SerialPort};
use std::time::Duration;

/// Longest wait for the echo of a slot. Even the reset character takes about 1 ms.
const ECHO_TIMEOUT: Duration = Duration::from_millis(50);

pub struct Tty {
    port: Box<dyn SerialPort>,
}

impl Tty {
    pub fn open(path: &str) -> serialport::Result<Self> {
        let port = serialport::new(path, DATA_BAUD_RATE)
            .timeout(ECHO_TIMEOUT)
            .open()?;
        Ok(Self { port })
    }
}

fn kind(err: std::io::Error) -> ErrorKind {
    match err.kind() {
        std::io::ErrorKind::TimedOut => ErrorKind::TimedOut,
        _ => ErrorKind::Other,
    }
}

impl ErrorType for Tty {
    type Error = ErrorKind;
}

impl Read for Tty {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(&mut self.port, buf).map_err(kind)
    }
}

impl Write for Tty {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.port, buf).map_err(kind)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(&mut self.port).map_err(kind)
    }
}

impl SetBaudRate for Tty {
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        self.port.set_baud_rate(baud).map_err(|e| {
            log::error!("Failed to set baud rate {baud}: {e}");
            ErrorKind::Other
        })?;
        self.port
            .clear(ClearBuffer::Input)
            .map_err(|_| ErrorKind::Other)
    }
}
