/// Dallas/Maxim CRC-8 (polynomial `x^8 + x^5 + x^4 + 1`, reflected) used by 1-Wire devices.
#[derive(Debug, Default, Clone, Copy)]
pub struct OneWireCrc(u8);

impl OneWireCrc {
    /// Get the current CRC value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Update the CRC with the incoming byte.
    pub fn update(&mut self, byte: u8) {
        let mut crc = self.0 ^ byte;
        for _ in 0..8 {
            crc = if crc & 0x1 == 0x1 {
                (crc >> 1) ^ 0x8c
            } else {
                crc >> 1
            };
        }
        self.0 = crc;
    }

    /// Compute the CRC of `data`.
    pub fn checksum(data: &[u8]) -> u8 {
        let mut crc = OneWireCrc::default();
        data.iter().for_each(|&byte| crc.update(byte));
        crc.value()
    }

    /// Validate a sequence of bytes where the last byte is the CRC of the previous bytes.
    ///
    /// Running the CRC over data followed by its own CRC always yields zero. An empty
    /// sequence is rejected.
    pub fn validate(sequence: &[u8]) -> bool {
        !sequence.is_empty() && Self::checksum(sequence) == 0
    }
}
