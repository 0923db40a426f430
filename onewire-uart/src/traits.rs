use embedded_io::ErrorType;

/// A UART whose baud rate can be changed at runtime.
///
/// Implementations should discard characters still pending in the receive
/// buffer when the rate changes, since they were sampled at the old rate.
pub trait SetBaudRate: ErrorType {
    /// Reprogram the UART to `baud` bits per second.
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error>;
}

impl<T: SetBaudRate + ?Sized> SetBaudRate for &mut T {
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        T::set_baud_rate(self, baud)
    }
}
