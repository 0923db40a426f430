//! Scratchpad layout, configuration register and temperature decoding.

use crate::{DecodeError, Temperature};
use bitfield_struct::bitfield;

pub(crate) const T_LSB_IDX: usize = 0;
pub(crate) const T_MSB_IDX: usize = 1;
pub(crate) const T_HIGH_IDX: usize = 2;
pub(crate) const T_LOW_IDX: usize = 3;
pub(crate) const CONFIG_IDX: usize = 4;

/// Bytes needed to decode temperature, alarm limits and configuration.
pub const SCRATCHPAD_MIN_LEN: usize = 5;
/// Full scratchpad length, the last byte being the CRC of the first eight.
pub const SCRATCHPAD_LEN: usize = 9;

/// Bits of the raw reading that carry the sign (two's complement, sign-extended).
pub const SIGN_MASK: u16 = 0xf800;

/// One LSB of the raw reading, 0.0625 °C.
pub const T_STEP: Temperature = Temperature::from_bits(1);

/// Conversion resolution, stored as the full configuration byte.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Resolution {
    /// 0.5 °C steps.
    Bits9 = 0x1f,
    /// 0.25 °C steps.
    Bits10 = 0x3f,
    /// 0.125 °C steps.
    Bits11 = 0x5f,
    /// 0.0625 °C steps, the power-on default.
    #[default]
    Bits12 = 0x7f,
}

impl Resolution {
    /// Significant bits of a reading.
    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Bits9 => 9,
            Resolution::Bits10 => 10,
            Resolution::Bits11 => 11,
            Resolution::Bits12 => 12,
        }
    }

    /// The resolution with `bits` significant bits, if the sensor supports it.
    pub const fn from_bit_count(bits: u8) -> Option<Self> {
        match bits {
            9 => Some(Resolution::Bits9),
            10 => Some(Resolution::Bits10),
            11 => Some(Resolution::Bits11),
            12 => Some(Resolution::Bits12),
            _ => None,
        }
    }

    /// The configuration register byte selecting this resolution.
    pub const fn config_byte(self) -> u8 {
        self as u8
    }

    /// Bits of the raw reading that are defined at this resolution, sign excluded.
    pub const fn data_mask(self) -> u16 {
        match self {
            Resolution::Bits9 => 0x7f8,
            Resolution::Bits10 => 0x7fc,
            Resolution::Bits11 => 0x7fe,
            Resolution::Bits12 => 0x7ff,
        }
    }

    /// Worst-case conversion time in milliseconds.
    pub const fn conversion_time_ms(self) -> u32 {
        match self {
            Resolution::Bits9 => 94,
            Resolution::Bits10 => 188,
            Resolution::Bits11 => 375,
            Resolution::Bits12 => 750,
        }
    }

    /// Decode a raw `T_MSB << 8 | T_LSB` reading.
    ///
    /// Bits below the resolution are undefined and dropped. A set sign field
    /// makes the reading negative.
    pub const fn temperature(self, raw: u16) -> Temperature {
        let mut value = raw & self.data_mask();
        if raw & SIGN_MASK != 0 {
            value |= SIGN_MASK;
        }
        Temperature::from_bits(value as i16)
    }
}

impl TryFrom<u8> for Resolution {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ConfigRegister::from_bits(value)
            .resolution()
            .ok_or(DecodeError::UnknownResolution(value))
    }
}

/// Configuration register (scratchpad byte 4).
///
/// Only bits 5 and 6 (R0, R1) are writable; bits 0-4 read as ones and bit 7
/// as zero. A byte that breaks this layout selects no resolution.
#[bitfield(u8)]
pub struct ConfigRegister {
    #[bits(5, default = 0x1f)]
    reserved_low: u8,
    /// R0 and R1.
    #[bits(2, default = 3)]
    resolution_bits: u8,
    reserved_high: bool,
}

impl ConfigRegister {
    /// The resolution this byte selects, if it is one of the four valid patterns.
    pub fn resolution(&self) -> Option<Resolution> {
        if self.reserved_low() != 0x1f || self.reserved_high() {
            return None;
        }
        Some(match self.resolution_bits() {
            0 => Resolution::Bits9,
            1 => Resolution::Bits10,
            2 => Resolution::Bits11,
            _ => Resolution::Bits12,
        })
    }
}

impl From<Resolution> for ConfigRegister {
    fn from(value: Resolution) -> Self {
        ConfigRegister::from_bits(0)
            .with_reserved_low(0x1f)
            .with_resolution_bits((value.config_byte() >> 5) & 0x3)
            .with_reserved_high(false)
    }
}

/// Decoded scratchpad contents.
#[derive(Debug, Clone, Copy)]
pub struct Scratchpad {
    /// Raw `T_MSB << 8 | T_LSB` reading.
    pub raw: u16,
    /// Calibrated reading at the configured resolution.
    pub temperature: Temperature,
    /// High alarm register (T_H).
    pub t_high: u8,
    /// Low alarm register (T_L).
    pub t_low: u8,
    /// Configuration register.
    pub config: ConfigRegister,
}

impl Scratchpad {
    /// Decode the leading bytes of a Read-Scratchpad response.
    ///
    /// At least [SCRATCHPAD_MIN_LEN] bytes are needed; extra bytes are ignored.
    /// The configuration byte must select a known resolution, since it decides
    /// which bits of the reading are meaningful.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < SCRATCHPAD_MIN_LEN {
            return Err(DecodeError::TooShort { len: bytes.len() });
        }
        let resolution = Resolution::try_from(bytes[CONFIG_IDX])?;
        let raw = u16::from_le_bytes([bytes[T_LSB_IDX], bytes[T_MSB_IDX]]);
        Ok(Scratchpad {
            raw,
            temperature: resolution.temperature(raw),
            t_high: bytes[T_HIGH_IDX],
            t_low: bytes[T_LOW_IDX],
            config: ConfigRegister::from_bits(bytes[CONFIG_IDX]),
        })
    }

    /// Write-Scratchpad payload, in wire order T_H, T_L, config.
    ///
    /// The configuration byte is sent as given; the sensor ignores writes to
    /// its reserved bits.
    pub const fn encode(t_high: u8, t_low: u8, config: u8) -> [u8; 3] {
        [t_high, t_low, config]
    }
}
