//! Front-end configuration.
//!
//! Loaded from JSON; every field has a default so a partial (or empty)
//! document is valid.
//!
//! ```json
//! {
//!   "rescan_timeout_ms": 60000,
//!   "api_key_preference": "api_key",
//!   "log_filter": "info,comixed_frontend=debug"
//! }
//! ```

use crate::error::ConfigError;
use comixed_runtime::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Timeout sent with every rescan request.
    ///
    /// Default: 60 000 ms
    #[serde(rename = "rescan_timeout_ms", with = "duration_millis")]
    pub rescan_timeout: Duration,

    /// Timeout sent with every library update poll.
    ///
    /// Default: 60 000 ms
    #[serde(rename = "updates_timeout_ms", with = "duration_millis")]
    pub updates_timeout: Duration,

    /// Preference holding the metadata source key.
    ///
    /// Default: `api_key`
    pub api_key_preference: String,

    /// Actions buffered for each action observer.
    ///
    /// Default: 64
    pub broadcast_capacity: usize,

    /// How long shutdown waits for running effects.
    ///
    /// Default: 5 000 ms
    #[serde(rename = "shutdown_timeout_ms", with = "duration_millis")]
    pub shutdown_timeout: Duration,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl FrontendConfig {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "broadcast_capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.api_key_preference.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api_key_preference",
                reason: "must not be empty".to_string(),
            });
        }
        let timeouts = [
            ("rescan_timeout_ms", self.rescan_timeout),
            ("updates_timeout_ms", self.updates_timeout),
            ("shutdown_timeout_ms", self.shutdown_timeout),
        ];
        if let Some((field, _)) = timeouts.into_iter().find(|(_, timeout)| timeout.is_zero()) {
            return Err(ConfigError::Invalid {
                field,
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Runtime settings derived from this configuration.
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.broadcast_capacity, self.shutdown_timeout)
    }

    /// Set the rescan timeout.
    #[must_use]
    pub const fn with_rescan_timeout(mut self, timeout: Duration) -> Self {
        self.rescan_timeout = timeout;
        self
    }

    /// Set the update poll timeout.
    #[must_use]
    pub const fn with_updates_timeout(mut self, timeout: Duration) -> Self {
        self.updates_timeout = timeout;
        self
    }

    /// Set the preference name holding the metadata source key.
    #[must_use]
    pub fn with_api_key_preference(mut self, name: impl Into<String>) -> Self {
        self.api_key_preference = name.into();
        self
    }

    /// Set the action broadcast capacity.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the shutdown timeout.
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Set the default log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            rescan_timeout: Duration::from_millis(60_000),
            updates_timeout: Duration::from_millis(60_000),
            api_key_preference: "api_key".to_string(),
            broadcast_capacity: 64,
            shutdown_timeout: Duration::from_millis(5_000),
            log_filter: "info,comixed_frontend=debug".to_string(),
        }
    }
}

/// Serialize a `Duration` as whole milliseconds.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
