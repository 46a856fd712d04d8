//! Chain read types and error definitions.

use serde::Deserialize;
use thiserror::Error;

use crate::chain::clarity::DecodeError;

/// One consistent read of the two values the faucet UI needs.
///
/// A snapshot is only meaningful for the session it was fetched under;
/// the view-model discards snapshots from a stale session epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSnapshot {
    /// Faucet account balance in micro-STX.
    pub faucet_balance_micro: u64,
    /// Blocks until the connected address may claim again. Zero means
    /// eligible now.
    pub cooldown_blocks: u64,
}

impl ChainSnapshot {
    /// Whether the connected address can claim right now.
    pub fn is_eligible(&self) -> bool {
        self.cooldown_blocks == 0
    }
}

/// Errors that can occur while reading chain state.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out.
    #[error("chain read timed out after {0} seconds")]
    Timeout(u64),

    /// The API answered with a non-success status or an error body.
    #[error("API error: {0}")]
    Api(String),

    /// The API answered 200 but the body did not have the expected shape.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    /// The read-only call result failed to deserialize.
    #[error("clarity decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Result type for chain reads.
pub type ChainResult<T> = Result<T, ChainError>;

/// Wire shape of `GET /extended/v1/address/{principal}/balances`.
#[derive(Debug, Deserialize)]
pub struct BalancesResponse {
    pub stx: StxBalance,
}

/// STX portion of the balances response. The API encodes the integer
/// micro-STX amount as a string.
#[derive(Debug, Deserialize)]
pub struct StxBalance {
    pub balance: String,
}

/// Wire shape of `POST /v2/contracts/call-read/...`.
#[derive(Debug, Deserialize)]
pub struct CallReadResponse {
    pub okay: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub cause: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_eligibility() {
        let snapshot = ChainSnapshot {
            faucet_balance_micro: 50_000_000,
            cooldown_blocks: 0,
        };
        assert!(snapshot.is_eligible());

        let blocked = ChainSnapshot {
            cooldown_blocks: 1,
            ..snapshot
        };
        assert!(!blocked.is_eligible());
    }

    #[test]
    fn test_balances_response_parsing() {
        let body = r#"{"stx":{"balance":"50000000","total_sent":"0"},"fungible_tokens":{}}"#;
        let parsed: BalancesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.stx.balance, "50000000");
    }

    #[test]
    fn test_call_read_error_body() {
        let body = r#"{"okay":false,"cause":"NoSuchContract"}"#;
        let parsed: CallReadResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.okay);
        assert_eq!(parsed.cause.as_deref(), Some("NoSuchContract"));
        assert!(parsed.result.is_none());
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::Timeout(10);
        assert_eq!(err.to_string(), "chain read timed out after 10 seconds");
    }
}
