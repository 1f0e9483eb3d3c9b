//! Clock sources

use cadence_core::{Shared, Signal};
use cadence_hal::Clock;

/// Current time in milliseconds, active every tick
pub fn now<C: Clock>(clock: &C) -> Signal<u32> {
    Signal::of(clock.now_ms())
}

/// Fire once per `interval_ms` window of `now`
///
/// Time is cut into windows starting at multiples of the interval. The
/// output carries the sampled time on the first tick that lands in a new
/// window and is empty otherwise. `window` holds the start of the last
/// window that fired; seed it with 0 so the first firing happens one full
/// interval after boot. An interval of zero fires on every tick whose time
/// differs from the previous firing.
///
/// Windows are compared for equality rather than order so the timer keeps
/// running across the `u32` wrap.
pub fn every(interval_ms: u32, window: &Shared<u32>, now: Signal<u32>) -> Signal<u32> {
    let Some(time) = now.into_option() else {
        return Signal::empty();
    };

    let start = match interval_ms {
        0 => time,
        interval => time - time % interval,
    };

    if start == window.get() {
        return Signal::empty();
    }
    window.set(start);
    Signal::of(time)
}
