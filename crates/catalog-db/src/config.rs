//! Catalog configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                  | Default                         |
//! |---------------------------|---------------------------------|
//! | `DATABASE_URI`            | `sqlite://catalog.db?mode=rwc`  |
//! | `DB_MAX_CONNECTIONS`      | `5`                             |
//! | `DB_CONNECT_TIMEOUT_SECS` | `30`                            |

use std::env;
use std::time::Duration;

use crate::pool::DbConfig;

/// Default connection string when `DATABASE_URI` is unset.
pub const DEFAULT_DATABASE_URI: &str = "sqlite://catalog.db?mode=rwc";

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// SQLite connection string
    pub database_uri: String,

    /// Pool size
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    pub connect_timeout_secs: u64,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// `load` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = CatalogConfig {
            database_uri: lookup("DATABASE_URI")
                .unwrap_or_else(|| DEFAULT_DATABASE_URI.to_string()),

            max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            connect_timeout_secs: lookup("DB_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_CONNECT_TIMEOUT_SECS".to_string()))?,
        };

        if config.database_uri.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_URI".to_string()));
        }

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Builds the pool configuration for [`crate::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_uri.clone())
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
