use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ATTEMPT_TIMEOUT_MS, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS, DEVNET_RPC_URL,
};
use crate::data::{default_token_configs, CollectionConfig, ShipConfig, TokenConfig};
use crate::submit::RetryPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub rpc_url: String,
    /// Cluster name or RPC URL used for explorer links.
    pub cluster: String,
    pub keypair_path: String,
    pub keys_path: String,
    pub require_token_mint: bool,
    pub ship_count: usize,
    pub log_level: String,
    pub retry: RetrySettings,
    pub upload: UploadSettings,
    pub collection: CollectionConfig,
    pub ships: ShipConfig,
    pub tokens: Vec<TokenConfig>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_string(),
            cluster: "devnet".to_string(),
            keypair_path: "payer.json".to_string(),
            keys_path: ".local_keys/keys.json".to_string(),
            require_token_mint: true,
            ship_count: 32,
            log_level: "info".to_string(),
            retry: RetrySettings::default(),
            upload: UploadSettings::default(),
            collection: CollectionConfig::default(),
            ships: ShipConfig::default(),
            tokens: default_token_configs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub delay_ms: u64,
    pub attempt_timeout_ms: Option<u64>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay_ms: DEFAULT_RETRY_DELAY_MS,
            attempt_timeout_ms: Some(DEFAULT_ATTEMPT_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub endpoint: String,
    pub gateway: String,
    pub auth_token: Option<String>,
    pub timeout_ms: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/upload".to_string(),
            gateway: "https://arweave.net".to_string(),
            auth_token: None,
            timeout_ms: 60_000,
        }
    }
}

impl FleetConfig {
    /// Read `path` if it exists, then apply `SEVEN_SEAS__*` environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("SEVEN_SEAS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry.max_retries,
            delay: Duration::from_millis(self.retry.delay_ms),
            attempt_timeout: self.retry.attempt_timeout_ms.map(Duration::from_millis),
        }
    }
}
