use crate::OneWireResult;

/// Outcome of a bus reset.
pub trait OneWireStatus {
    /// Whether a device answered the reset with a presence pulse.
    fn presence(&self) -> bool;

    /// Whether the line was found shorted to ground during the reset cycle.
    fn shortcircuit(&self) -> bool;
}

/// Trait for 1-Wire communication.
///
/// This trait defines the primitives of a 1-Wire master: resetting the bus, and writing and
/// reading single bit slots. Byte operations default to eight bit slots, least significant bit
/// first, which is the wire order of every 1-Wire device.
///
/// Implementations must leave the bus idle between calls, so that callers can chain bit and byte
/// operations freely after a reset.
pub trait OneWire {
    /// The status type returned by the reset operation.
    /// This type must implement the [OneWireStatus] trait.
    type Status: OneWireStatus;
    /// The error type returned by the operations of this trait.
    /// This type is used to indicate errors in the underlying hardware or communication.
    type BusError;

    /// Resets the 1-Wire bus and returns the status of the bus.
    ///
    /// A missing presence pulse is reported through [OneWireStatus::presence], not as an error.
    ///
    /// # Errors
    /// This method returns an error if the underlying hardware fails.
    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError>;

    /// Writes a single bit slot.
    ///
    /// # Errors
    /// This method returns an error if the write operation fails.
    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError>;

    /// Reads a single bit slot.
    ///
    /// # Errors
    /// This method returns an error if the read operation fails.
    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError>;

    /// Writes a byte, least significant bit first.
    ///
    /// # Errors
    /// This method returns an error if the write operation fails.
    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        for pos in 0..8 {
            self.write_bit((byte >> pos) & 0x1 == 0x1)?;
        }
        Ok(())
    }

    /// Reads a byte, least significant bit first.
    ///
    /// # Errors
    /// This method returns an error if the read operation fails.
    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        let mut byte = 0;
        for pos in 0..8 {
            if self.read_bit()? {
                byte |= 1 << pos;
            }
        }
        Ok(byte)
    }

    /// Writes all bytes of `bytes` in order.
    ///
    /// # Errors
    /// This method returns an error if any write operation fails.
    fn write_bytes(&mut self, bytes: &[u8]) -> OneWireResult<(), Self::BusError> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Fills `bytes` from the bus in order.
    ///
    /// # Errors
    /// This method returns an error if any read operation fails.
    fn read_bytes(&mut self, bytes: &mut [u8]) -> OneWireResult<(), Self::BusError> {
        for byte in bytes.iter_mut() {
            *byte = self.read_byte()?;
        }
        Ok(())
    }
}

impl<T: OneWire + ?Sized> OneWire for &mut T {
    type Status = T::Status;
    type BusError = T::BusError;

    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError> {
        T::reset(self)
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError> {
        T::write_bit(self, bit)
    }

    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError> {
        T::read_bit(self)
    }

    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        T::write_byte(self, byte)
    }

    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        T::read_byte(self)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> OneWireResult<(), Self::BusError> {
        T::write_bytes(self, bytes)
    }

    fn read_bytes(&mut self, bytes: &mut [u8]) -> OneWireResult<(), Self::BusError> {
        T::read_bytes(self, bytes)
    }
}
