#[derive(Debug, PartialEq, Eq)]
/// UART transceiver errors
pub enum UartError<E> {
    /// Errors reported by the UART.
    Uart(E),
    /// The UART returned fewer echo characters than were sent.
    UnexpectedEof,
}

impl<E> From<embedded_io::ReadExactError<E>> for UartError<E> {
    fn from(value: embedded_io::ReadExactError<E>) -> Self {
        match value {
            embedded_io::ReadExactError::UnexpectedEof => Self::UnexpectedEof,
            embedded_io::ReadExactError::Other(e) => Self::Uart(e),
        }
    }
}
