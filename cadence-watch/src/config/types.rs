//! Configuration type definitions

use cadence_hal::FlashError;
use cadence_protocol::PayloadError;
use heapless::String;
use serde::{Deserialize, Serialize};

/// Current layout version of [`WatchConfig`]
pub const CONFIG_VERSION: u8 = 1;

/// Maximum advertised name length
pub const MAX_NAME_LEN: usize = 16;

/// Number of button presses the graph remembers
pub const HISTORY_CAPACITY: usize = 8;

// The face reports recent presses as a u8
const _: () = assert!(HISTORY_CAPACITY <= u8::MAX as usize);

/// Name advertised when none is configured
pub const DEFAULT_DEVICE_NAME: &str = "CWatch";

/// Setting that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigField {
    DeviceName,
    DebounceDelay,
    BlinkInterval,
    HistoryDepth,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// Stored bytes are not a valid config
    Deserialize,
    /// Config does not fit the buffer
    Serialize,
    /// Config written by a different layout version
    VersionMismatch,
    /// A setting is outside its allowed range
    InvalidValue(ConfigField),
    /// Stored time record is malformed
    Payload(PayloadError),
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

impl From<PayloadError> for ConfigError {
    fn from(e: PayloadError) -> Self {
        ConfigError::Payload(e)
    }
}

/// User-adjustable watch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchConfig {
    /// Layout version, see [`CONFIG_VERSION`]
    pub version: u8,
    /// Name advertised over BLE
    pub device_name: String<MAX_NAME_LEN>,
    /// How long the button must be quiet before a change is accepted (ms)
    pub debounce_ms: u32,
    /// Heartbeat LED half period (ms)
    pub blink_interval_ms: u32,
    /// Presses counted on the watch face, newest first
    pub history_depth: u8,
}

impl Default for WatchConfig {
    fn default() -> Self {
        let mut device_name = String::new();
        // DEFAULT_DEVICE_NAME is shorter than MAX_NAME_LEN
        let _ = device_name.push_str(DEFAULT_DEVICE_NAME);
        Self {
            version: CONFIG_VERSION,
            device_name,
            debounce_ms: 50,
            blink_interval_ms: 500,
            history_depth: 4,
        }
    }
}

impl WatchConfig {
    /// Check every setting against its range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name_ok = !self.device_name.is_empty()
            && self.device_name.bytes().all(|b| b.is_ascii_graphic() || b == b' ');
        if !name_ok {
            return Err(ConfigError::InvalidValue(ConfigField::DeviceName));
        }
        if !(1..=1000).contains(&self.debounce_ms) {
            return Err(ConfigError::InvalidValue(ConfigField::DebounceDelay));
        }
        if !(10..=60_000).contains(&self.blink_interval_ms) {
            return Err(ConfigError::InvalidValue(ConfigField::BlinkInterval));
        }
        if self.history_depth == 0 || usize::from(self.history_depth) > HISTORY_CAPACITY {
            return Err(ConfigError::InvalidValue(ConfigField::HistoryDepth));
        }
        Ok(())
    }

    /// Replace the advertised name
    ///
    /// Fails without changing anything if `name` is longer than
    /// [`MAX_NAME_LEN`] bytes.
    pub fn set_device_name(&mut self, name: &str) -> Result<(), ConfigError> {
        let mut next = String::new();
        next.push_str(name)
            .map_err(|_| ConfigError::InvalidValue(ConfigField::DeviceName))?;
        self.device_name = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WatchConfig::default();
        assert_eq!(config.device_name.as_str(), "CWatch");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let mut config = WatchConfig::default();
        config.debounce_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue(ConfigField::DebounceDelay))
        );

        let mut config = WatchConfig::default();
        config.blink_interval_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue(ConfigField::BlinkInterval))
        );
    }

    #[test]
    fn test_history_depth_bounded_by_capacity() {
        let mut config = WatchConfig::default();
        config.history_depth = HISTORY_CAPACITY as u8;
        assert!(config.validate().is_ok());
        config.history_depth += 1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue(ConfigField::HistoryDepth))
        );
    }

    #[test]
    fn test_device_name() {
        let mut config = WatchConfig::default();
        config.set_device_name("Wrist 2").unwrap();
        assert!(config.validate().is_ok());

        assert!(config.set_device_name("a name that is far too long").is_err());
        assert_eq!(config.device_name.as_str(), "Wrist 2");

        config.set_device_name("").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue(ConfigField::DeviceName))
        );
    }

    #[test]
    fn test_postcard_roundtrip() {
        let mut buffer = [0u8; 64];
        let config = WatchConfig::default();
        let used = postcard::to_slice(&config, &mut buffer).unwrap();
        let back: WatchConfig = postcard::from_bytes(used).unwrap();
        assert_eq!(back, config);
    }
}
