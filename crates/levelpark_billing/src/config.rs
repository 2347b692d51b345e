//! # Garage Configuration
//!
//! Construction-time options, loaded once at startup from TOML:
//!
//! ```toml
//! pool_count = 3
//! slots_per_pool = 12
//! hourly_rate = 5
//! midnight_policy = "clamp-to-zero"   # or "raw", "wrap"
//! session_shards = 16
//! ```
//!
//! Missing keys take their defaults. There is no runtime reconfiguration.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::ledger::DEFAULT_SESSION_SHARDS;
use crate::tariff::{MidnightPolicy, Tariff};

/// Options for building a [`SessionLedger`](crate::SessionLedger).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GarageConfig {
    /// Number of pools (floors).
    pub pool_count: usize,
    /// Slots in every pool.
    pub slots_per_pool: usize,
    /// Charge per elapsed hour.
    pub hourly_rate: u32,
    /// Billing of sessions that span midnight.
    pub midnight_policy: MidnightPolicy,
    /// Number of session-map shards. More shards, less lock contention.
    pub session_shards: usize,
}

impl Default for GarageConfig {
    fn default() -> Self {
        Self {
            pool_count: 1,
            slots_per_pool: 10,
            hourly_rate: 5,
            midnight_policy: MidnightPolicy::default(),
            session_shards: DEFAULT_SESSION_SHARDS,
        }
    }
}

impl GarageConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on bad syntax or unknown keys, and
    /// [`ConfigError::Invalid`] on out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`GarageConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), ?config, "loaded garage config");
        Ok(config)
    }

    /// Checks that every count is at least one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("pool_count", self.pool_count),
            ("slots_per_pool", self.slots_per_pool),
            ("hourly_rate", self.hourly_rate as usize),
            ("session_shards", self.session_shards),
        ];
        match checks.iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ConfigError::Invalid(format!("{field} must be at least 1"))),
            None => Ok(()),
        }
    }

    /// The tariff described by this config.
    #[must_use]
    pub const fn tariff(&self) -> Tariff {
        Tariff {
            hourly_rate: self.hourly_rate,
            midnight_policy: self.midnight_policy,
        }
    }
}
