use embedded_onewire::OneWireError;

/// Reasons a scratchpad block could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes than the five needed for temperature, limits and config.
    TooShort {
        /// Number of bytes received.
        len: usize,
    },
    /// The configuration byte is not one of the four resolution patterns.
    UnknownResolution(u8),
}

/// DS18B20 driver errors.
#[derive(Debug, PartialEq, Eq)]
pub enum Ds18b20Error<E> {
    /// 1-Wire bus errors: transfer failures, missing presence pulse, CRC mismatch, timeout.
    Bus(OneWireError<E>),
    /// The scratchpad response could not be decoded.
    Decode(DecodeError),
    /// A conversion delay was requested while the cached configuration byte is unknown.
    UnknownResolution(u8),
    /// The payload or response buffer does not match the command descriptor.
    PayloadLength {
        /// Bytes the command descriptor calls for.
        expected: usize,
        /// Bytes the caller supplied.
        actual: usize,
    },
}

impl<E> From<OneWireError<E>> for Ds18b20Error<E> {
    fn from(value: OneWireError<E>) -> Self {
        Self::Bus(value)
    }
}

impl<E> From<DecodeError> for Ds18b20Error<E> {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl<E> Ds18b20Error<E> {
    /// Whether the error means the reset saw no presence pulse, because nothing
    /// answered or the line is shorted.
    pub fn is_disconnected(&self) -> bool {
        matches!(
            self,
            Self::Bus(OneWireError::NoDevicePresent | OneWireError::ShortCircuit)
        )
    }
}
