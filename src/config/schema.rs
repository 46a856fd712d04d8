//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the faucet
//! client. All types derive Serde traits for deserialization from config
//! files, and every section has working defaults so an empty file is a
//! valid mainnet configuration.

use serde::{Deserialize, Serialize};

use crate::wallet::PostConditionMode;

/// Root configuration for the faucet client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FaucetConfig {
    /// Chain API endpoints and parameters.
    pub network: NetworkConfig,

    /// Faucet contract identity and function names.
    pub contract: ContractConfig,

    /// Snapshot polling cadence.
    pub polling: PollingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chain API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Base URL of the Stacks blockchain API.
    pub api_url: String,

    /// Base URL of the transaction explorer, for settled-transaction links.
    pub explorer_url: String,

    /// Chain name appended to explorer links (e.g. "mainnet").
    pub chain: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Block-to-time ratio used for human cooldown estimates.
    pub blocks_per_hour: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.hiro.so".to_string(),
            explorer_url: "https://explorer.hiro.so".to_string(),
            chain: "mainnet".to_string(),
            request_timeout_secs: 10,
            blocks_per_hour: 6,
        }
    }
}

/// Faucet contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Contract deployer address.
    pub address: String,

    /// Contract name.
    pub name: String,

    /// Public function that pays out the drip. Takes no arguments.
    pub claim_function: String,

    /// Public function that tops up the faucet. Takes one uint argument
    /// (micro-STX).
    pub fund_function: String,

    /// Read-only function returning the caller's remaining cooldown.
    pub cooldown_function: String,

    /// Full cooldown window in blocks, used when the probe only answers
    /// yes/no.
    pub cooldown_window_blocks: u64,

    /// Post-condition mode for submitted transactions.
    pub post_condition_mode: PostConditionMode,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: "SP267C6MQJHPR7297033Z8VSKTJM7M62V375BRHHP".to_string(),
            name: "stxfaucet".to_string(),
            claim_function: "claim-stx".to_string(),
            fund_function: "fund-faucet".to_string(),
            cooldown_function: "get-blocks-until-claim".to_string(),
            cooldown_window_blocks: 144,
            post_condition_mode: PostConditionMode::Deny,
        }
    }
}

impl ContractConfig {
    /// Fully qualified contract identifier, `ADDRESS.name`.
    pub fn contract_id(&self) -> String {
        format!("{}.{}", self.address, self.name)
    }
}

/// Snapshot polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Fixed polling interval in seconds.
    pub interval_secs: u64,

    /// Delay between a settled transaction and the follow-up snapshot
    /// refresh, allowing the ledger to propagate.
    pub settle_delay_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            settle_delay_secs: 5,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter when RUST_LOG is unset.
    pub log_filter: String,

    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Bind address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "stx_faucet=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9184".to_string(),
        }
    }
}
