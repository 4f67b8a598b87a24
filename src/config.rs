//! Configuration Module
//!
//! Handles loading and managing store connection settings from environment
//! variables.

use std::env;
use std::time::Duration;

/// Store connection parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store address as `host:port`
    pub addr: String,
    /// Authentication credential, empty for none
    pub password: String,
    /// Logical database selector
    pub db: i64,
    /// Per-call operation timeout in milliseconds
    pub op_timeout_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDSTATE_ADDR` - Store address (default: 127.0.0.1:6379)
    /// - `REDSTATE_PASSWORD` - Authentication credential (default: empty)
    /// - `REDSTATE_DB` - Logical database index (default: 0)
    /// - `REDSTATE_TIMEOUT_MS` - Per-call timeout in milliseconds (default: 5000)
    pub fn from_env() -> Self {
        Self {
            addr: env::var("REDSTATE_ADDR").unwrap_or_else(|_| "127.0.0.1:6379".to_string()),
            password: env::var("REDSTATE_PASSWORD").unwrap_or_default(),
            db: env::var("REDSTATE_DB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            op_timeout_ms: env::var("REDSTATE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        }
    }

    /// Per-call operation timeout as a [`Duration`].
    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:6379".to_string(),
            password: String::new(),
            db: 0,
            op_timeout_ms: 5000,
        }
    }
}
