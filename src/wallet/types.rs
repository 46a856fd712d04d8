//! Wallet-facing types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::clarity::ClarityValue;

/// Identifier of a broadcast transaction, as reported by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub String);

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One address exposed by a connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAddress {
    /// Asset symbol the address belongs to (e.g. "STX", "BTC").
    pub symbol: String,
    /// The address itself.
    pub address: String,
}

/// Post-condition mode attached to a contract call.
///
/// Under `deny`, any asset transfer not covered by an explicit
/// post-condition aborts the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostConditionMode {
    Allow,
    Deny,
}

/// A contract call handed to the wallet for signing and broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
    /// Fully qualified contract identifier, `ADDRESS.name`.
    pub contract_id: String,
    /// Public function to invoke.
    pub function: String,
    /// Function arguments.
    pub args: Vec<ClarityValue>,
    /// Post-condition mode for the transaction.
    pub post_condition_mode: PostConditionMode,
}

/// Errors reported by a wallet adapter.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The wallet was unreachable or the user declined the connection.
    #[error("wallet connection failed: {0}")]
    ConnectionFailed(String),

    /// The user dismissed the signing prompt.
    #[error("signing request cancelled")]
    Cancelled,

    /// The wallet accepted the request but broadcast failed.
    #[error("submission failed: {0}")]
    Submission(String),
}
