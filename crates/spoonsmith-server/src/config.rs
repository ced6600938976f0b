//! Server configuration parsed from environment variables.

use spoonsmith_core::{ComposerConfig, SpecError};
use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:3030";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {var}: {value:?}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error(transparent)]
    Composer(#[from] SpecError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub composer: ComposerConfig,
}

impl ServerConfig {
    /// Build the config from environment variables.
    ///
    /// Optional:
    /// - `SPOONSMITH_ADDR`: listen address, default `0.0.0.0:3030`
    /// - `SPOONSMITH_COMPOSER_CONFIG`: path to a composer JSON file
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = var("SPOONSMITH_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr { var: "SPOONSMITH_ADDR", value: raw_addr.clone() })?;

        let composer = match var("SPOONSMITH_COMPOSER_CONFIG") {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::Read { path: path.clone(), message: e.to_string() })?;
                ComposerConfig::from_json(&json)?
            }
            None => ComposerConfig::default(),
        };

        Ok(Self { addr, composer })
    }
}
