//! BLE payload layouts for the Cadence watch
//!
//! The companion phone app sets the watch clock by writing two fixed-length
//! characteristic values, with no framing around them:
//!
//! ```text
//! Day Date Time (9 bytes)
//! ┌───────┬─────┬──────────────┬──────┬────────┬────────┐
//! │ MONTH │ DAY │ YEAR (BE)    │ HOUR │ MINUTE │ SECOND │
//! │ 1B    │ 1B  │ 4B           │ 1B   │ 1B     │ 1B     │
//! └───────┴─────┴──────────────┴──────┴────────┴────────┘
//!
//! Day of Week (1 byte)
//! ┌─────────┐
//! │ WEEKDAY │  0 = Sunday … 6 = Saturday
//! └─────────┘
//! ```
//!
//! The phone writes Day Date Time first and Day of Week only after the first
//! write is acknowledged. A full `Seq<u8, LEN>` is the exact wire image of a
//! payload.

#![no_std]
#![deny(unsafe_code)]

pub mod payload;
pub mod time;

pub use payload::{decode_seq, encode_seq, Payload, PayloadError};
pub use time::{DayDateTime, DayOfWeek, DAY_DATE_TIME_LEN, DAY_OF_WEEK_LEN};
