//! Pin sources, sinks and edge detection

use cadence_core::signal::{drop_repeats, filter, to_unit, unmeta};
use cadence_core::{Shared, Signal};
use cadence_hal::{AnalogInput, InputPin, OutputPin, PinState};

/// Level change of a digital signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

impl Edge {
    /// The edge that ends at `level`
    pub fn from_level(level: PinState) -> Self {
        match level {
            PinState::High => Edge::Rising,
            PinState::Low => Edge::Falling,
        }
    }
}

/// Sample a digital input, active every tick
pub fn dig_read<P: InputPin>(pin: &P) -> Signal<PinState> {
    Signal::of(pin.state())
}

/// Sample an analog input, active every tick
pub fn ana_read<A: AnalogInput>(pin: &mut A) -> Signal<u16> {
    Signal::of(pin.read_raw())
}

/// Drive an output on ticks where `level` is active
///
/// On empty ticks the pin keeps its previous level.
pub fn dig_write<P: OutputPin>(pin: &mut P, level: Signal<PinState>) {
    level.sink(|state| pin.set_state(state));
}

/// Report level changes
///
/// `last` holds the previously seen level. Seeded with `None`, the first
/// sample only primes it; seeded with `Some(level)`, a first sample that
/// differs is reported as an edge.
pub fn edge(last: &Shared<Option<PinState>>, level: Signal<PinState>) -> Signal<Edge> {
    let primed = last.with(Option::is_some);
    let changed = drop_repeats(last, level);
    unmeta(changed.map(|level| primed.then(|| Edge::from_level(level))))
}

/// Unit pulse on every low to high change
pub fn rising_edge(last: &Shared<Option<PinState>>, level: Signal<PinState>) -> Signal<()> {
    to_unit(filter(|e| *e == Edge::Rising, edge(last, level)))
}

/// Unit pulse on every high to low change
pub fn falling_edge(last: &Shared<Option<PinState>>, level: Signal<PinState>) -> Signal<()> {
    to_unit(filter(|e| *e == Edge::Falling, edge(last, level)))
}
