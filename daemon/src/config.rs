//! Daemon configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("config error: {0}")]
pub struct ConfigError(pub String);

/// Configuration for the ArtChain backend.
///
/// Can be loaded from a TOML file via [`Config::from_toml_file`] or built
/// programmatically (e.g. for tests). CLI flags override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint of the ledger node.
    #[serde(default = "default_ledger_endpoint")]
    pub ledger_endpoint: String,

    /// Address of the legacy validation contract.
    #[serde(default = "default_legacy_contract")]
    pub legacy_contract: String,

    /// Address of the extended (content-addressed) validation contract.
    /// Unset means "legacy only" — no probe is attempted.
    #[serde(default)]
    pub extended_contract: Option<String>,

    /// The account this service submits and auto-votes from.
    #[serde(default = "default_backend_identity")]
    pub backend_identity: String,

    /// Data directory for the local cache.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// HTTP API port.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Confirmations required before a ledger write counts as committed.
    #[serde(default = "default_confirmation_depth")]
    pub confirmation_depth: u64,

    /// Upper bound on one confirmation wait, in seconds.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,

    /// Receipt polling cadence, in milliseconds.
    #[serde(default = "default_confirmation_poll_ms")]
    pub confirmation_poll_ms: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_ledger_endpoint() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_legacy_contract() -> String {
    "0xb0990384c19159883cfe65f1ae056ce15a489dd2".to_string()
}

fn default_backend_identity() -> String {
    "0x14791697260e4c9a71f18484c9f997b308e59325".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./artchain_data")
}

fn default_http_port() -> u16 {
    3001
}

fn default_confirmation_depth() -> u64 {
    1
}

fn default_confirmation_timeout_secs() -> u64 {
    90
}

fn default_confirmation_poll_ms() -> u64 {
    2000
}

fn default_log_format() -> String {
    "human".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("Config is always serializable to TOML")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_endpoint: default_ledger_endpoint(),
            legacy_contract: default_legacy_contract(),
            extended_contract: None,
            backend_identity: default_backend_identity(),
            data_dir: default_data_dir(),
            http_port: default_http_port(),
            confirmation_depth: default_confirmation_depth(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            confirmation_poll_ms: default_confirmation_poll_ms(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = config.to_toml_string();
        let parsed = Config::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.http_port, config.http_port);
        assert_eq!(parsed.ledger_endpoint, config.ledger_endpoint);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = Config::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.http_port, 3001);
        assert_eq!(config.confirmation_depth, 1);
        assert!(config.extended_contract.is_none());
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            http_port = 9090
            extended_contract = "0x5bf9f5f8d02a6efc12e5ae79d6f99e7cb0b577af"
        "#;
        let config = Config::from_toml_str(toml).expect("should parse");
        assert_eq!(config.http_port, 9090);
        assert_eq!(
            config.extended_contract.as_deref(),
            Some("0x5bf9f5f8d02a6efc12e5ae79d6f99e7cb0b577af")
        );
        assert_eq!(config.confirmation_timeout_secs, 90); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = Config::from_toml_file(std::path::Path::new("/nonexistent/artchain.toml"));
        assert!(result.is_err());
    }
}
