//! Engine configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tessera_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration of a [`MintEngine`](crate::MintEngine).
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Treasury credited by admin mints and paid by public mints.
    #[serde(default = "default_payee")]
    pub payee: Address,

    /// Prefix of every token URI; the record's metadata reference is appended.
    #[serde(default)]
    pub base_uri: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_payee() -> Address {
    Address::new("tsr_treasury")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_payee(mut self, payee: Address) -> Self {
        self.payee = payee;
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            payee: default_payee(),
            base_uri: String::new(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = EngineConfig::default().with_base_uri("ipfs://collection/");
        let toml_str = config.to_toml_string().unwrap();
        let parsed = EngineConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.payee, Address::new("tsr_treasury"));
        assert_eq!(config.base_uri, "");
        assert_eq!(config.log_format, "human");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            payee = "tsr_studio"
            base_uri = "https://meta.example/"
        "#;
        let config = EngineConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.payee, Address::new("tsr_studio"));
        assert_eq!(config.base_uri, "https://meta.example/");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn malformed_payee_is_a_parse_error() {
        let err = EngineConfig::from_toml_str(r#"payee = "studio""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_returns_io_error() {
        let err = EngineConfig::from_toml_file("/nonexistent/tessera.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
