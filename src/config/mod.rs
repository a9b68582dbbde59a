//! Configuration module for the Bistro backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default upper bound for a single stored record, in bytes of JSON.
pub const DEFAULT_MAX_RECORD_BYTES: usize = 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Largest serialized record the stores will accept
    pub max_record_bytes: usize,
}

/// A configuration value that could not be parsed.
#[derive(Debug)]
pub enum ConfigError {
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { var, value, reason } => {
                write!(f, "Invalid {} value {:?}: {}", var, value, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("BISTRO_DB_PATH")
            .unwrap_or_else(|_| "./data/bistro.sqlite".to_string())
            .into();

        let bind_addr = parse_var("BISTRO_BIND_ADDR", "127.0.0.1:8080")?;

        let log_level = env::var("BISTRO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let max_record_bytes = parse_var(
            "BISTRO_MAX_RECORD_BYTES",
            &DEFAULT_MAX_RECORD_BYTES.to_string(),
        )?;

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            max_record_bytes,
        })
    }
}

fn parse_var<T>(var: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let value = env::var(var).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}
