//! Watch settings
//!
//! Settings are stored in flash as postcard-serialized binary data under
//! [`cadence_hal::StorageKey::WatchConfig`]. A watch that never stored any
//! runs on [`WatchConfig::default`].

mod storage;
mod types;

pub use storage::{WatchStorage, MAX_CONFIG_SIZE};
pub use types::{
    ConfigError, ConfigField, WatchConfig, CONFIG_VERSION, DEFAULT_DEVICE_NAME, HISTORY_CAPACITY,
    MAX_NAME_LEN,
};
