/// One wire communication error type.
#[derive(Debug, PartialEq, Eq)]
pub enum OneWireError<E> {
    /// Encapsulates the error type from the underlying hardware.
    Other(E),
    /// Indicates that no device answered the reset with a presence pulse.
    NoDevicePresent,
    /// Indicates that the line stayed low through the whole reset cycle.
    ShortCircuit,
    /// Computed CRC of the received data is invalid.
    InvalidCrc,
    /// A device did not finish the requested operation in time.
    Timeout,
}

impl<E> From<E> for OneWireError<E> {
    fn from(other: E) -> Self {
        Self::Other(other)
    }
}
