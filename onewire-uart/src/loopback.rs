//! Open-drain UART loopback with an optional simulated device on the line.

use crate::SetBaudRate;
use embedded_io::{ErrorKind, ErrorType, Read, Write};
use std::collections::VecDeque;
use std::vec::Vec;

/// Rates below this are treated as the reset rate.
const SLOW_RATE_LIMIT: u32 = 20_000;

#[derive(Default)]
pub(crate) struct Loopback {
    pub baud: u32,
    pub bauds: Vec<u32>,
    pub written: Vec<u8>,
    pub writes: usize,
    /// Read slots in which the device holds the line low.
    pub pulls: VecDeque<bool>,
    pub presence: bool,
    pub fail_writes: bool,
    /// Drop every echo, as if RX were not wired to the line.
    pub mute: bool,
    rx: VecDeque<u8>,
}

impl Loopback {
    pub fn present() -> Self {
        Self {
            presence: true,
            ..Default::default()
        }
    }

    fn echo(&mut self, ch: u8) -> u8 {
        if self.baud < SLOW_RATE_LIMIT {
            return if self.presence { 0xe0 } else { ch };
        }
        match (ch, self.pulls.pop_front()) {
            (0xff, Some(true)) => 0xf8,
            _ => ch,
        }
    }
}

impl ErrorType for Loopback {
    type Error = ErrorKind;
}

impl Write for Loopback {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(ErrorKind::Other);
        }
        self.writes += 1;
        for &ch in buf {
            self.written.push(ch);
            let echo = self.echo(ch);
            if !self.mute {
                self.rx.push_back(echo);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Read for Loopback {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.rx.pop_front() {
                Some(ch) => buf[n] = ch,
                None => break,
            }
            n += 1;
        }
        Ok(n)
    }
}

impl SetBaudRate for Loopback {
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        self.baud = baud;
        self.bauds.push(baud);
        self.rx.clear();
        Ok(())
    }
}
