//! Runtime settings read from `PIZZERIA_*` environment variables.
//!
//! | Variable                    | Default          |
//! |-----------------------------|------------------|
//! | `PIZZERIA_DATABASE_URL`     | `sqlite::memory:` |
//! | `PIZZERIA_MAX_CONNECTIONS`  | `5`              |
//! | `PIZZERIA_CHANNEL_CAPACITY` | `32`             |
//! | `PIZZERIA_SEED`             | `false`          |
//!
//! A missing variable falls back to its default; a malformed one is a [`ConfigError`].

use std::{env, fmt::Display, str::FromStr};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub database_url: String,
    /// Ignored for in-memory databases, which always use a single connection.
    pub max_connections: u32,
    /// Mailbox size of each actor.
    pub channel_capacity: usize,
    /// Load the demo catalog at startup.
    pub seed_demo_data: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            channel_capacity: 32,
            seed_demo_data: false,
        }
    }
}

impl AppSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key/value source, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let settings = Self {
            database_url: try_load(&lookup, "PIZZERIA_DATABASE_URL", DEFAULT_DATABASE_URL)?,
            max_connections: try_load(&lookup, "PIZZERIA_MAX_CONNECTIONS", "5")?,
            channel_capacity: try_load(&lookup, "PIZZERIA_CHANNEL_CAPACITY", "32")?,
            seed_demo_data: try_load(&lookup, "PIZZERIA_SEED", "false")?,
        };

        if settings.max_connections == 0 {
            return Err(positive("PIZZERIA_MAX_CONNECTIONS"));
        }
        if settings.channel_capacity == 0 {
            return Err(positive("PIZZERIA_CHANNEL_CAPACITY"));
        }
        Ok(settings)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    match raw.parse() {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("Invalid {key} value: {e}");
            Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value: raw,
            })
        }
    }
}

fn positive(key: &'static str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: "0".to_string(),
        reason: "must be greater than zero".to_string(),
    }
}
