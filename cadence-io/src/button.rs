//! Button debouncing
//!
//! Mechanical contacts bounce for a few milliseconds when pressed or
//! released. A raw change is accepted only if the input had been quiet for
//! the configured delay before it; a change that closely follows another one
//! is held back until the input settles. Time comes from the clock sample of
//! the same tick.

use cadence_core::signal::zip;
use cadence_core::{Shared, Signal};
use cadence_hal::PinState;

/// Delay used by [`debounce`]
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Debouncer state carried between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debounce {
    accepted: PinState,
    raw: PinState,
    changed_at: u32,
}

impl Debounce {
    /// Start out settled at `level`, as of time 0
    pub const fn new(level: PinState) -> Self {
        Self {
            accepted: level,
            raw: level,
            changed_at: 0,
        }
    }

    /// Level currently reported downstream
    pub fn accepted(&self) -> PinState {
        self.accepted
    }

    /// Feed one raw sample taken at `now`
    ///
    /// A sample that disagrees with the accepted level is taken over when
    /// the raw input had not changed for at least `delay_ms` before it.
    /// Returns the accepted level after the sample.
    pub fn step(&mut self, raw: PinState, now: u32, delay_ms: u32) -> PinState {
        let quiet_for = now.wrapping_sub(self.changed_at);
        if raw != self.accepted && quiet_for >= delay_ms {
            self.accepted = raw;
        }
        if raw != self.raw {
            self.raw = raw;
            self.changed_at = now;
        }
        self.accepted
    }
}

/// Debounce `level` with a custom delay
///
/// Active on ticks where both `level` and `now` are active, carrying the
/// accepted level. Feed the output to [`crate::pin::edge`] to get one
/// event per accepted transition.
pub fn debounce_delay(
    delay_ms: u32,
    state: &Shared<Debounce>,
    level: Signal<PinState>,
    now: Signal<u32>,
) -> Signal<PinState> {
    zip(level, now).map(|(raw, time)| state.with_mut(|s| s.step(raw, time, delay_ms)))
}

/// Debounce `level` with [`DEFAULT_DEBOUNCE_MS`]
pub fn debounce(
    state: &Shared<Debounce>,
    level: Signal<PinState>,
    now: Signal<u32>,
) -> Signal<PinState> {
    debounce_delay(DEFAULT_DEBOUNCE_MS, state, level, now)
}
