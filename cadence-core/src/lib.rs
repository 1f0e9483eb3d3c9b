//! Board-agnostic reactive runtime for the Cadence watch firmware
//!
//! This crate contains the building blocks every tick graph is made of.
//! None of them depend on hardware:
//!
//! - Discriminated values (tagged unions with checked access)
//! - Shared cells (reference-counted state that outlives a tick)
//! - Closure combinators (composition without allocation)
//! - Bounded sequences (fixed capacity, saturating mutation)
//! - Signals and the combinators that thread them through a tick
//!
//! # Tick model
//!
//! ```text
//! ┌────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌────────┐
//! │ sample │──▶│ Signal<T>│──▶│ map/fold │──▶│ Signal<U>│──▶│  sink  │
//! │ inputs │   └──────────┘   │  latch.. │   └──────────┘   │ (I/O)  │
//! └────────┘                  └────┬─────┘                  └────────┘
//!                                  │
//!                             Shared<S> state
//! ```
//!
//! The graph is wired once at boot. Each tick runs to completion in wiring
//! order; state that must survive between ticks lives in [`cell::Shared`].

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod cell;
pub mod func;
pub mod seq;
pub mod signal;
pub mod variant;

pub use cell::Shared;
pub use seq::Seq;
pub use signal::Signal;
pub use variant::{
    Either, Tagged10, Tagged11, Tagged12, Tagged2, Tagged3, Tagged4, Tagged5, Tagged6, Tagged7,
    Tagged8, Tagged9,
};
