//! Configuration persistence
//!
//! Loads and stores settings and the last synced time through any
//! [`FlashStorage`]. Falls back to defaults if flash holds no settings.

use cadence_hal::{FlashError, FlashStorage, StorageKey};
use cadence_protocol::{DayDateTime, DayOfWeek, Payload, DAY_DATE_TIME_LEN, DAY_OF_WEEK_LEN};

use super::types::{ConfigError, WatchConfig, CONFIG_VERSION};

/// Maximum serialized config size (binary)
pub const MAX_CONFIG_SIZE: usize = 64;

/// Stored sync record: both payloads back to back in wire layout
const TIME_RECORD_LEN: usize = DAY_DATE_TIME_LEN + DAY_OF_WEEK_LEN;

/// Persistence manager for watch settings
pub struct WatchStorage<S> {
    storage: S,
}

impl<S: FlashStorage> WatchStorage<S> {
    /// Create a new persistence manager
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Return the underlying storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Load settings from flash
    ///
    /// Returns the defaults if nothing was stored yet. Stored settings that
    /// fail to parse or validate are reported, not replaced.
    pub async fn load_config(&mut self) -> Result<WatchConfig, ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = match self.storage.read(StorageKey::WatchConfig, &mut buffer).await {
            Ok(len) => len,
            Err(FlashError::NotFound) => return Ok(WatchConfig::default()),
            Err(e) => return Err(e.into()),
        };

        let config: WatchConfig =
            postcard::from_bytes(&buffer[..len]).map_err(|_| ConfigError::Deserialize)?;

        if config.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate and store settings
    pub async fn store_config(&mut self, config: &WatchConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let used = postcard::to_slice(config, &mut buffer).map_err(|_| ConfigError::Serialize)?;
        self.storage.write(StorageKey::WatchConfig, used).await?;
        Ok(())
    }

    /// Load the last time received from the phone, if any
    pub async fn load_time(&mut self) -> Result<Option<(DayDateTime, DayOfWeek)>, ConfigError> {
        let mut buffer = [0u8; TIME_RECORD_LEN];
        let len = match self.storage.read(StorageKey::LastSyncedTime, &mut buffer).await {
            Ok(len) => len,
            Err(FlashError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record = buffer.get(..len).filter(|r| r.len() == TIME_RECORD_LEN);
        let (date_time, weekday) = record
            .ok_or(ConfigError::Payload(cadence_protocol::PayloadError::InvalidLength))?
            .split_at(DAY_DATE_TIME_LEN);
        Ok(Some((DayDateTime::decode(date_time)?, DayOfWeek::decode(weekday)?)))
    }

    /// Store a time received from the phone, in its wire layout
    pub async fn store_time(
        &mut self,
        date_time: &DayDateTime,
        weekday: DayOfWeek,
    ) -> Result<(), ConfigError> {
        let mut buffer = [0u8; TIME_RECORD_LEN];
        let (head, tail) = buffer.split_at_mut(DAY_DATE_TIME_LEN);
        date_time.encode(head)?;
        weekday.encode(tail)?;
        self.storage.write(StorageKey::LastSyncedTime, &buffer).await?;
        Ok(())
    }

    /// Forget everything stored
    pub async fn reset(&mut self) -> Result<(), ConfigError> {
        self.storage.erase_all().await?;
        Ok(())
    }
}
