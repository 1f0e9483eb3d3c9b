//! Cadence watch application
//!
//! - [`config`] - Settings and their flash persistence
//! - [`app`] - The tick graph: heartbeat, button, time sync and watch face
//!
//! Everything here is board independent. The firmware crate supplies the
//! hardware through the `cadence-hal` traits and calls
//! [`app::WatchGraph::tick`] from its tick loop.

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod face;

pub use app::{Peripherals, TickReport, WatchGraph};
pub use config::{ConfigError, WatchConfig, WatchStorage};
pub use face::Face;
