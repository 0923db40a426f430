#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
//! # embedded-onewire
//! A no-std abstraction of the 1-Wire bus.
//!
//! The [OneWire] trait exposes the three primitives every 1-Wire master provides: a bus reset
//! with presence detection, writing a bit slot and reading a bit slot. Byte transfers are
//! assembled from bit slots (least significant bit first) unless the backend provides a faster
//! batched implementation.
//!
//! Device drivers are written against [OneWire] only, so the electrical backend (UART baud-rate
//! emulation, GPIO bit-banging, a bridge IC) can be swapped without touching them.

mod consts;
mod error;
mod traits;
mod utils;
pub use consts::*;
pub use error::OneWireError;
pub use traits::{OneWire, OneWireStatus};
pub use utils::OneWireCrc;

/// Result type for 1-Wire operations.
pub type OneWireResult<T, E> = Result<T, OneWireError<E>>;
