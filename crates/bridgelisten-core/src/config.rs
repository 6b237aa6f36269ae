//! Listener configuration, loaded once from TOML and immutable afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ListenError;

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub log: LogConfig,
    pub neo: NeoListenConfig,
}

impl ListenConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ListenError> {
        let mut config: Self =
            toml::from_str(s).map_err(|e| ListenError::Config(e.to_string()))?;
        config.neo = config.neo.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ListenError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ListenError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level for every target.
    #[serde(default = "default_level")]
    pub level: String,
    /// Per-crate overrides, e.g. `bridgelisten-rpc = "warn"`.
    #[serde(default)]
    pub components: HashMap<String, String>,
    /// One JSON object per line instead of text.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: HashMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Filter directives, e.g. `"info,bridgelisten_neo=debug"`.
    pub fn directives(&self) -> String {
        let mut components: Vec<_> = self.components.iter().collect();
        components.sort();
        let mut directives = self.level.clone();
        for (component, level) in components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }
}

/// Node RPC client tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Retry attempts after the first failed request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Initial backoff in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_max_retries() -> u32 { 3 }
fn default_backoff_ms() -> u64 { 100 }
fn default_timeout_secs() -> u64 { 30 }

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_backoff_ms(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration of the Neo listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeoListenConfig {
    /// Poly network id of this chain.
    pub chain_id: u64,
    pub chain_name: String,
    /// Node JSON-RPC endpoint.
    pub rest_url: String,
    /// Explorer endpoint returning `{"last_block_height": "..."}`.
    pub extend_node_url: String,
    /// Script hash of the wrapper contract (hex, optional `0x`).
    pub wrapper_contract: String,
    /// Script hash of the lock proxy contract (hex, optional `0x`).
    pub proxy_contract: String,
    #[serde(default = "default_backward")]
    pub backward_block_number: u64,
    /// Polling interval in seconds.
    #[serde(default = "default_slot")]
    pub listen_slot: u64,
    #[serde(default)]
    pub rpc: RpcConfig,
}

fn default_backward() -> u64 { 1 }
fn default_slot() -> u64 { 15 }

impl NeoListenConfig {
    /// Check required fields and normalize contract hashes to bare lowercase hex.
    pub fn validate(mut self) -> Result<Self, ListenError> {
        for (name, value) in [
            ("chain_name", &self.chain_name),
            ("rest_url", &self.rest_url),
            ("extend_node_url", &self.extend_node_url),
            ("wrapper_contract", &self.wrapper_contract),
            ("proxy_contract", &self.proxy_contract),
        ] {
            if value.trim().is_empty() {
                return Err(ListenError::Config(format!("neo.{name} must not be empty")));
            }
        }
        self.wrapper_contract = normalize_hash(&self.wrapper_contract);
        self.proxy_contract = normalize_hash(&self.proxy_contract);
        Ok(self)
    }
}

/// Strip an optional `0x` prefix and lowercase.
pub fn normalize_hash(s: &str) -> String {
    let s = s.trim();
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
        .to_ascii_lowercase()
}
