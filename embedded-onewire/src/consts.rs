//! ROM command constants for 1-Wire communication.

/// Read the 64-bit ROM code of the only device on the bus.
///
/// The device answers with its family code, the 48-bit serial number and the
/// CRC-8 of the first seven bytes. With more than one device on the bus the
/// answer is the wired-AND of all codes and will fail the CRC check.
pub const ONEWIRE_READ_ROM_CMD: u8 = 0x33;

/// Address every device on the bus without sending a ROM code.
///
/// On a single-drop bus this saves the 64 bits of a Match ROM sequence.
pub const ONEWIRE_SKIP_ROM_CMD: u8 = 0xcc;

/// Address the device whose 64-bit ROM code follows the command.
pub const ONEWIRE_MATCH_ROM_CMD: u8 = 0x55;

/// Length of a ROM code in bytes.
pub const ONEWIRE_ROM_LEN: usize = 8;
