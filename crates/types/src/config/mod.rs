// Path: crates/types/src/config/mod.rs

//! Client-side configuration for transaction assembly.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults applied to every transaction a client builds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The 32-byte network id as hex. Signing is refused until one is set.
    #[serde(default)]
    pub chain_id: Option<String>,
    /// Seconds from now until a new transaction expires.
    #[serde(default = "default_expiration_secs")]
    pub expiration_secs: u32,
    /// Net bandwidth limit in 8-byte words; 0 leaves it to the account's limit.
    #[serde(default)]
    pub max_net_usage_words: u32,
    /// CPU limit in milliseconds; 0 leaves it to the account's limit.
    #[serde(default)]
    pub max_cpu_usage_ms: u8,
    /// Seconds the transaction is delayed before execution.
    #[serde(default)]
    pub delay_sec: u32,
}

fn default_expiration_secs() -> u32 {
    60
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chain_id: None,
            expiration_secs: default_expiration_secs(),
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
        }
    }
}

impl ClientConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml_from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(chain_id) = &self.chain_id {
            let bytes = hex::decode(chain_id).map_err(|e| ConfigError::Invalid {
                field: "chain_id",
                reason: e.to_string(),
            })?;
            if bytes.len() != 32 {
                return Err(ConfigError::Invalid {
                    field: "chain_id",
                    reason: format!("expected 32 bytes, got {}", bytes.len()),
                });
            }
        }
        if self.expiration_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "expiration_secs",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

fn toml_from_str<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
}
