//! GPIO adapters for embassy-rp pins

use cadence_hal::{InputPin, OutputPin};
use embassy_rp::gpio::{Input, Level, Output};

/// Digital input, optionally active low
pub struct RpInput<'d> {
    pin: Input<'d>,
    inverted: bool,
}

impl<'d> RpInput<'d> {
    /// Wrap an input; `inverted` reports a low pin as high
    pub fn new(pin: Input<'d>, inverted: bool) -> Self {
        Self { pin, inverted }
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high() != self.inverted
    }
}

/// Digital output
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_level(Level::High);
    }

    fn set_low(&mut self) {
        self.pin.set_level(Level::Low);
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
