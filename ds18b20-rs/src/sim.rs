//! Bit-level DS18B20 model used by the unit tests.

use embedded_hal::delay::DelayNs;
use embedded_onewire::{OneWire, OneWireCrc, OneWireError, OneWireResult, OneWireStatus};
use std::collections::VecDeque;
use std::vec::Vec;

pub(crate) const SIM_ROM: [u8; 8] = [0x28, 0xff, 0x64, 0x1e, 0x0f, 0x2f, 0x73, 0xf7];

pub(crate) struct SimStatus {
    presence: bool,
    short: bool,
}

impl OneWireStatus for SimStatus {
    fn presence(&self) -> bool {
        self.presence
    }

    fn shortcircuit(&self) -> bool {
        self.short
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Not listening until the next reset.
    Idle,
    Rom,
    Function,
    WriteScratchpad(usize),
    Converting,
}

pub(crate) struct SimSensor {
    pub present: bool,
    pub shorted: bool,
    pub parasite: bool,
    pub fail_reads: bool,
    pub rom: [u8; 8],
    pub scratchpad: [u8; 9],
    /// Read slots answered with 0 after Convert-T.
    pub conversion_slots: usize,
    pub resets: usize,
    pub slots_written: usize,
    pub slots_read: usize,
    /// Every complete byte the sensor received.
    pub received: Vec<u8>,
    state: State,
    shift: u8,
    nbits: u8,
    out: VecDeque<bool>,
    busy: usize,
}

impl Default for SimSensor {
    fn default() -> Self {
        let mut sensor = Self {
            present: true,
            shorted: false,
            parasite: false,
            fail_reads: false,
            rom: SIM_ROM,
            scratchpad: [0x91, 0x01, 0x4b, 0x46, 0x7f, 0xff, 0x0c, 0x10, 0x00],
            conversion_slots: 0,
            resets: 0,
            slots_written: 0,
            slots_read: 0,
            received: Vec::new(),
            state: State::Idle,
            shift: 0,
            nbits: 0,
            out: VecDeque::new(),
            busy: 0,
        };
        sensor.refresh_crc();
        sensor
    }
}

impl SimSensor {
    pub fn absent() -> Self {
        Self {
            present: false,
            ..Default::default()
        }
    }

    pub fn set_reading(&mut self, raw: u16) {
        self.scratchpad[..2].copy_from_slice(&raw.to_le_bytes());
        self.refresh_crc();
    }

    pub fn set_config(&mut self, config: u8) {
        self.scratchpad[4] = config;
        self.refresh_crc();
    }

    pub fn start_conversion(&mut self, busy: usize) {
        self.state = State::Converting;
        self.busy = busy;
    }

    fn refresh_crc(&mut self) {
        self.scratchpad[8] = OneWireCrc::checksum(&self.scratchpad[..8]);
    }

    fn queue(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.out.extend((0..8).map(|pos| (byte >> pos) & 0x1 == 0x1));
        }
    }

    fn on_byte(&mut self, byte: u8) {
        self.received.push(byte);
        let state = self.state;
        self.state = match state {
            State::Rom => match byte {
                0x33 => {
                    let rom = self.rom;
                    self.queue(&rom);
                    State::Function
                }
                0xcc => State::Function,
                _ => State::Idle,
            },
            State::Function => match byte {
                0x44 => {
                    self.busy = self.conversion_slots;
                    State::Converting
                }
                0xbe => {
                    let pad = self.scratchpad;
                    self.queue(&pad);
                    State::Idle
                }
                0x4e => State::WriteScratchpad(0),
                0xb4 => {
                    self.out.push_back(!self.parasite);
                    State::Idle
                }
                _ => State::Idle,
            },
            State::WriteScratchpad(n) => {
                self.scratchpad[2 + n] = byte;
                if n == 2 {
                    self.refresh_crc();
                    State::Idle
                } else {
                    State::WriteScratchpad(n + 1)
                }
            }
            state => state,
        };
    }
}

impl OneWire for SimSensor {
    type Status = SimStatus;
    type BusError = ();

    fn reset(&mut self) -> OneWireResult<SimStatus, ()> {
        self.resets += 1;
        self.out.clear();
        self.shift = 0;
        self.nbits = 0;
        let answering = self.present && !self.shorted;
        self.state = if answering { State::Rom } else { State::Idle };
        Ok(SimStatus {
            presence: answering,
            short: self.shorted,
        })
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), ()> {
        self.slots_written += 1;
        if self.state == State::Idle {
            return Ok(());
        }
        if bit {
            self.shift |= 1 << self.nbits;
        }
        self.nbits += 1;
        if self.nbits == 8 {
            let byte = self.shift;
            self.shift = 0;
            self.nbits = 0;
            self.on_byte(byte);
        }
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, ()> {
        if self.fail_reads {
            return Err(OneWireError::Other(()));
        }
        self.slots_read += 1;
        if self.state == State::Converting {
            if self.busy > 0 {
                self.busy -= 1;
                return Ok(false);
            }
            return Ok(true);
        }
        Ok(self.out.pop_front().unwrap_or(true))
    }
}

/// Records every millisecond delay.
#[derive(Default)]
pub(crate) struct RecordingDelay {
    pub ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}
