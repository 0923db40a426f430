use embedded_onewire::OneWireStatus;

/// The reset character, sent at the reset baud rate.
pub(crate) const RESET_CHAR: u8 = 0xf0;

/// Echo of the reset character as seen on the line.
///
/// The UART transmits `0xF0` with the low nibble (and the start bit) driving
/// the line low. When nothing is connected, the echo is unchanged. A device
/// answering with a presence pulse pulls part of the high nibble low. An echo
/// of `0x00` means the line never came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetStatus {
    echo: u8,
}

impl ResetStatus {
    pub(crate) fn new(echo: u8) -> Self {
        Self { echo }
    }

    /// The raw character read back during the reset cycle.
    pub fn echo(&self) -> u8 {
        self.echo
    }
}

impl OneWireStatus for ResetStatus {
    fn presence(&self) -> bool {
        self.echo != RESET_CHAR && !self.shortcircuit()
    }

    fn shortcircuit(&self) -> bool {
        self.echo == 0x00
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_echo_means_empty_bus() {
        let status = ResetStatus::new(RESET_CHAR);
        assert!(!status.presence());
        assert!(!status.shortcircuit());
    }

    #[test]
    fn pulled_high_nibble_means_presence() {
        for echo in [0xe0, 0xc0, 0x80, 0x90] {
            let status = ResetStatus::new(echo);
            assert!(status.presence(), "echo {echo:#04x}");
            assert!(!status.shortcircuit());
        }
    }

    #[test]
    fn zero_echo_is_a_short() {
        let status = ResetStatus::new(0x00);
        assert!(status.shortcircuit());
        assert!(!status.presence());
    }
}
