//! RP2040 support for the Cadence watch
//!
//! Implements the `cadence-hal` traits on top of embassy-rp:
//!
//! - GPIO input and output adapters
//! - Millisecond clock backed by the embassy time driver
//! - Flash storage driver (implements `cadence_hal::FlashStorage`)

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod flash;
pub mod gpio;

pub use clock::EmbassyClock;
pub use flash::Rp2040FlashStorage;
pub use gpio::{RpInput, RpOutput};
