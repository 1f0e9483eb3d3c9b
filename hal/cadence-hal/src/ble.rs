//! BLE characteristic abstraction
//!
//! The radio stack runs outside the tick loop. Between ticks it may receive
//! writes from a connected central; the loop sees each write as a flag that
//! is raised once and cleared when taken.

/// Errors from characteristic access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Buffer too small for the characteristic value
    BufferTooSmall,
    /// Value length does not match the characteristic
    InvalidLength,
    /// No central is connected
    NotConnected,
    /// Radio stack reported a failure
    Radio,
}

/// A GATT characteristic hosted by this device
pub trait Characteristic {
    /// Return `true` once for every write received since the last call
    fn take_written(&mut self) -> bool;

    /// Copy the current value into `buffer`
    ///
    /// Returns the number of bytes written.
    fn read(&self, buffer: &mut [u8]) -> Result<usize, BleError>;

    /// Replace the current value (and notify subscribers if the stack does)
    fn write(&mut self, data: &[u8]) -> Result<(), BleError>;
}
