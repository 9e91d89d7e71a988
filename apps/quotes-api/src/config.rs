//! Quotes API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Which quote store the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Process-local map seeded with the sample quotes.
    Memory,
    /// SQLite database with an author table.
    Sqlite,
}

impl FromStr for Backend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(()),
        }
    }
}

/// Quotes API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: IpAddr,

    /// Listen port
    pub port: u16,

    /// Storage backend
    pub backend: Backend,

    /// SQLite file path (sqlite backend only)
    pub db_path: PathBuf,

    /// SQLite pool size (sqlite backend only)
    pub db_max_connections: u32,

    /// Load the sample quotes into an empty SQLite database
    pub seed: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key → value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(ApiConfig {
            bind_addr: parse(&var("QUOTES_BIND_ADDR", "127.0.0.1"), "QUOTES_BIND_ADDR")?,

            port: parse(&var("QUOTES_PORT", "5000"), "QUOTES_PORT")?,

            backend: parse(&var("QUOTES_BACKEND", "sqlite"), "QUOTES_BACKEND")?,

            db_path: PathBuf::from(var("QUOTES_DB_PATH", "quotes.db")),

            db_max_connections: match parse(
                &var("QUOTES_DB_MAX_CONNECTIONS", "5"),
                "QUOTES_DB_MAX_CONNECTIONS",
            )? {
                0 => return Err(ConfigError::InvalidValue("QUOTES_DB_MAX_CONNECTIONS".to_string())),
                n => n,
            },

            seed: parse(&var("QUOTES_SEED", "false"), "QUOTES_SEED")?,
        })
    }
}

fn parse<T: FromStr>(raw: &str, key: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
