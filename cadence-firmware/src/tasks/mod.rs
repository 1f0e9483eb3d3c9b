//! Firmware loops

pub mod tick;

pub use tick::{run, TICK_INTERVAL_MS};
