//! Cadence Hardware Abstraction Layer
//!
//! This crate defines the traits the tick loop samples and drives. Board
//! crates implement them for real peripherals; tests implement them with
//! plain structs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (cadence-watch graph)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-io (signal adapters)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  board support (cadence-firmware)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`clock::Clock`] - Monotonic millisecond time
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::AnalogInput`] - Pin I/O
//! - [`ble::Characteristic`] - BLE GATT characteristic values
//! - [`display::DisplayBackend`] - Drawing surface
//! - [`flash::FlashStorage`] - Persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod ble;
pub mod clock;
pub mod display;
pub mod flash;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use ble::{BleError, Characteristic};
pub use clock::Clock;
pub use display::{DisplayBackend, DisplayError, Rgb565};
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{AnalogInput, InputPin, OutputPin, PinState};
