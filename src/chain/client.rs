//! Chain state reader over the Stacks blockchain API.
//!
//! # Responsibilities
//! - Fetch the faucet account's STX balance
//! - Evaluate the read-only cooldown probe for a given sender
//! - Handle timeouts and network errors gracefully
//! - Provide a health check for API connectivity
//!
//! Reads are idempotent and never retried here; the polling cadence is the
//! retry policy (next tick).

use std::time::Duration;

use crate::chain::clarity::ClarityValue;
use crate::chain::types::{
    BalancesResponse, CallReadResponse, ChainError, ChainResult, ChainSnapshot,
};
use crate::config::{ContractConfig, NetworkConfig};
use crate::observability::metrics;

/// Read-only client for the two endpoints the faucet needs.
#[derive(Clone)]
pub struct ChainReader {
    http: reqwest::Client,
    network: NetworkConfig,
    contract: ContractConfig,
}

impl ChainReader {
    /// Create a new reader.
    pub fn new(network: NetworkConfig, contract: ContractConfig) -> ChainResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(network.request_timeout_secs))
            .build()
            .map_err(|e| ChainError::Http(e.to_string()))?;

        tracing::info!(
            api_url = %network.api_url,
            contract = %contract.contract_id(),
            "Chain reader initialized"
        );

        Ok(Self {
            http,
            network,
            contract,
        })
    }

    /// Current balance of the faucet contract's account, in micro-STX.
    pub async fn faucet_balance(&self) -> ChainResult<u64> {
        let url = format!(
            "{}/extended/v1/address/{}/balances",
            self.network.api_url.trim_end_matches('/'),
            self.contract.contract_id()
        );

        let result = self.get_balances(&url).await;
        metrics::record_chain_read("balance", result.is_ok());
        if let Ok(balance) = result {
            metrics::record_faucet_balance(balance);
        }
        result
    }

    async fn get_balances(&self, url: &str) -> ChainResult<u64> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            return Err(ChainError::Api(format!(
                "balances returned {}",
                response.status()
            )));
        }

        let body: BalancesResponse = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(e.to_string()))?;

        body.stx
            .balance
            .parse::<u64>()
            .map_err(|_| ChainError::InvalidResponse(format!("balance '{}'", body.stx.balance)))
    }

    /// Blocks until `sender` may claim again. Zero means eligible now.
    ///
    /// The probe is evaluated with `sender` as tx-sender, so it takes no
    /// arguments. Contracts that answer `(err …)` or `none` for an address
    /// with no claim history read as eligible.
    pub async fn cooldown_blocks(&self, sender: &str) -> ChainResult<u64> {
        let url = format!(
            "{}/v2/contracts/call-read/{}/{}/{}",
            self.network.api_url.trim_end_matches('/'),
            self.contract.address,
            self.contract.name,
            self.contract.cooldown_function
        );

        let result = self.call_read(&url, sender).await;
        metrics::record_chain_read("cooldown", result.is_ok());
        result
    }

    async fn call_read(&self, url: &str, sender: &str) -> ChainResult<u64> {
        let body = serde_json::json!({
            "sender": sender,
            "arguments": [],
        });

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            return Err(ChainError::Api(format!(
                "call-read returned {}",
                response.status()
            )));
        }

        let body: CallReadResponse = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(e.to_string()))?;

        if !body.okay {
            return Err(ChainError::Api(
                body.cause.unwrap_or_else(|| "call-read not okay".to_string()),
            ));
        }

        let hex = body
            .result
            .ok_or_else(|| ChainError::InvalidResponse("okay but no result".to_string()))?;

        let value = ClarityValue::from_hex(&hex)?;
        self.normalize_cooldown(&value)
    }

    /// Map a probe result onto a block count.
    ///
    /// Deployed faucet variants disagree on the return type: a uint of
    /// blocks remaining, a bare eligibility bool, either wrapped in
    /// `(ok …)`/`(some …)`, or `none`/`(err …)` for first-time claimants.
    fn normalize_cooldown(&self, value: &ClarityValue) -> ChainResult<u64> {
        if let ClarityValue::ResponseErr(inner) = value {
            // No claim record for this principal: first-time claim allowed.
            tracing::debug!(err = ?inner, "cooldown probe returned err, treating as eligible");
            return Ok(0);
        }

        match value.unwrap_ok_some() {
            ClarityValue::UInt(n) => Ok((*n).min(u64::MAX as u128) as u64),
            ClarityValue::Int(n) => Ok((*n).max(0).min(u64::MAX as i128) as u64),
            ClarityValue::Bool(true) => Ok(0),
            ClarityValue::Bool(false) => Ok(self.contract.cooldown_window_blocks),
            ClarityValue::OptionalNone => Ok(0),
            other => Err(ChainError::InvalidResponse(format!(
                "cooldown probe returned {:?}",
                other
            ))),
        }
    }

    /// Fetch both reads as one snapshot. Fails if either read fails; the
    /// view-model applies its own fail-open policy per read instead.
    pub async fn snapshot(&self, sender: &str) -> ChainResult<ChainSnapshot> {
        let (balance, cooldown) =
            tokio::try_join!(self.faucet_balance(), self.cooldown_blocks(sender))?;
        Ok(ChainSnapshot {
            faucet_balance_micro: balance,
            cooldown_blocks: cooldown,
        })
    }

    /// Check if the chain API is reachable.
    pub async fn is_healthy(&self) -> bool {
        self.faucet_balance().await.is_ok()
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Get the contract configuration.
    pub fn contract(&self) -> &ContractConfig {
        &self.contract
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ChainError {
        if e.is_timeout() {
            ChainError::Timeout(self.network.request_timeout_secs)
        } else {
            ChainError::Http(e.to_string())
        }
    }
}

impl std::fmt::Debug for ChainReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainReader")
            .field("api_url", &self.network.api_url)
            .field("contract", &self.contract.contract_id())
            .field("timeout_secs", &self.network.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_reader() -> ChainReader {
        ChainReader::new(NetworkConfig::default(), ContractConfig::default()).unwrap()
    }

    #[test]
    fn test_normalize_uint_probe() {
        let reader = test_reader();
        assert_eq!(
            reader.normalize_cooldown(&ClarityValue::UInt(12)).unwrap(),
            12
        );
        assert_eq!(reader.normalize_cooldown(&ClarityValue::UInt(0)).unwrap(), 0);
    }

    #[test]
    fn test_normalize_ok_wrapped() {
        let reader = test_reader();
        let value = ClarityValue::ResponseOk(Box::new(ClarityValue::UInt(6)));
        assert_eq!(reader.normalize_cooldown(&value).unwrap(), 6);
    }

    #[test]
    fn test_normalize_bool_probe() {
        let reader = test_reader();
        assert_eq!(
            reader.normalize_cooldown(&ClarityValue::Bool(true)).unwrap(),
            0
        );
        // A bare "not eligible" maps to the full window.
        assert_eq!(
            reader
                .normalize_cooldown(&ClarityValue::Bool(false))
                .unwrap(),
            144
        );
    }

    #[test]
    fn test_normalize_no_history() {
        let reader = test_reader();
        assert_eq!(
            reader
                .normalize_cooldown(&ClarityValue::OptionalNone)
                .unwrap(),
            0
        );
        let err = ClarityValue::ResponseErr(Box::new(ClarityValue::UInt(404)));
        assert_eq!(reader.normalize_cooldown(&err).unwrap(), 0);
    }

    #[test]
    fn test_normalize_negative_int_clamped() {
        let reader = test_reader();
        assert_eq!(
            reader.normalize_cooldown(&ClarityValue::Int(-3)).unwrap(),
            0
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let reader = test_reader();
        let value = ClarityValue::Buffer(vec![1, 2, 3]);
        assert!(reader.normalize_cooldown(&value).is_err());
    }
}
