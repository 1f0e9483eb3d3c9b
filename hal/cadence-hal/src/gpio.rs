//! GPIO pin abstractions
//!
//! Provides traits for digital and analog pins that can be implemented
//! by board support code.

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl PinState {
    /// Level for a boolean, `true` being high
    pub fn from_high(high: bool) -> Self {
        if high {
            PinState::High
        } else {
            PinState::Low
        }
    }

    /// Check if the level is high
    pub fn is_high(self) -> bool {
        self == PinState::High
    }

    /// The opposite level
    pub fn inverted(self) -> Self {
        match self {
            PinState::Low => PinState::High,
            PinState::High => PinState::Low,
        }
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, state: PinState) {
        match state {
            PinState::High => self.set_high(),
            PinState::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Current level
    fn state(&self) -> PinState {
        PinState::from_high(self.is_high())
    }
}

/// Analog input (ADC channel)
pub trait AnalogInput {
    /// Read the raw conversion result
    ///
    /// The resolution is board specific; a 12-bit ADC returns `0..=4095`.
    fn read_raw(&mut self) -> u16;
}
