//! Application settings, loaded once at startup.
//!
//! All configuration lives in one explicit struct that is passed into the
//! application state; nothing reads the environment after startup. Secrets
//! come from the environment (usually via a `.env` file loaded in `main`).

use crate::errors::{Error, Result};
use std::env;
use tracing::info;

/// Default rollover lookahead window, in days.
pub const DEFAULT_ROLLOVER_WINDOW_DAYS: u32 = 7;

/// Default lifetime of issued session tokens, in seconds (30 days).
const DEFAULT_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SeaORM database URL, e.g. `sqlite://data/duocash.sqlite`
    pub database_url: String,
    /// Address the HTTP server binds to, e.g. `127.0.0.1:3000`
    pub bind_addr: String,
    /// Secret used to sign session tokens and salt-pepper passwords
    pub token_secret: String,
    /// Shared secret guarding the rollover trigger endpoint
    pub cron_secret: String,
    /// Lifetime of issued session tokens, in seconds
    pub token_ttl_secs: i64,
    /// Rollover lookahead window, in days
    pub rollover_window_days: u32,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// `DUOCASH_TOKEN_SECRET` and `DUOCASH_CRON_SECRET` are required; the
    /// rest have development defaults.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when a required secret is missing.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data/duocash.sqlite?mode=rwc".to_string());
        let bind_addr = env::var("DUOCASH_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        let token_secret = env::var("DUOCASH_TOKEN_SECRET").map_err(|_| Error::Config {
            message: "DUOCASH_TOKEN_SECRET must be set".to_string(),
        })?;
        let cron_secret = env::var("DUOCASH_CRON_SECRET").map_err(|_| Error::Config {
            message: "DUOCASH_CRON_SECRET must be set".to_string(),
        })?;

        let token_ttl_secs = match env::var("DUOCASH_TOKEN_TTL_SECS") {
            Ok(raw) => raw.parse().map_err(|_| Error::Config {
                message: format!("DUOCASH_TOKEN_TTL_SECS is not an integer: {raw}"),
            })?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        info!(%database_url, %bind_addr, "loaded application configuration");

        Ok(Self {
            database_url,
            bind_addr,
            token_secret,
            cron_secret,
            token_ttl_secs,
            rollover_window_days: DEFAULT_ROLLOVER_WINDOW_DAYS,
        })
    }

    /// A fixed configuration for tests; no environment access.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            token_secret: "test-token-secret".to_string(),
            cron_secret: "test-cron-secret".to_string(),
            token_ttl_secs: 3600,
            rollover_window_days: DEFAULT_ROLLOVER_WINDOW_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_tests_config() {
        let config = AppConfig::for_tests();
        assert_eq!(config.rollover_window_days, 7);
        assert!(config.token_ttl_secs > 0);
    }
}
