//! Server configuration.
//!
//! Loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP server listens on (`RECEIPT_BIND_ADDR`)
    pub bind_addr: SocketAddr,

    /// Largest accepted request body (`RECEIPT_MAX_BODY_BYTES`)
    pub max_body_bytes: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration value for {0}")]
    InvalidValue(String),
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(ServerConfig {
            bind_addr: lookup("RECEIPT_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RECEIPT_BIND_ADDR".to_string()))?,

            max_body_bytes: lookup("RECEIPT_MAX_BODY_BYTES")
                .unwrap_or_else(|| DEFAULT_MAX_BODY_BYTES.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RECEIPT_MAX_BODY_BYTES".to_string()))?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
