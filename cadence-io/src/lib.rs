//! Signal adapters for the Cadence tick loop
//!
//! Sources turn one hardware sample into this tick's [`Signal`]; sinks run a
//! side effect only on ticks where their input is active. Stateful adapters
//! keep what they need between ticks in a [`cadence_core::Shared`] cell that
//! the caller allocates while wiring the graph.
//!
//! [`Signal`]: cadence_core::Signal

#![no_std]
#![deny(unsafe_code)]

pub mod ble;
pub mod button;
pub mod draw;
pub mod pin;
pub mod time;

pub use button::{debounce, debounce_delay, Debounce, DEFAULT_DEBOUNCE_MS};
pub use pin::Edge;
