//! Read-only session stand-in.
//!
//! Lets the CLI (and embedders without a wallet) run the view-model
//! against a fixed address. It holds no keys: connecting reports the
//! configured address and every submission is refused.

use futures_util::future::BoxFuture;

use crate::wallet::adapter::WalletAdapter;
use crate::wallet::types::{ContractCall, TxId, WalletAddress, WalletError};

/// An adapter that observes a fixed address and cannot sign.
#[derive(Debug, Clone)]
pub struct ReadOnlyWallet {
    address: String,
}

impl ReadOnlyWallet {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl WalletAdapter for ReadOnlyWallet {
    fn connect(&self) -> BoxFuture<'_, Result<Vec<WalletAddress>, WalletError>> {
        Box::pin(async move {
            Ok(vec![WalletAddress {
                symbol: "STX".to_string(),
                address: self.address.clone(),
            }])
        })
    }

    fn disconnect(&self) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }

    fn submit(&self, _call: ContractCall) -> BoxFuture<'_, Result<TxId, WalletError>> {
        Box::pin(async {
            Err(WalletError::Submission(
                "read-only session cannot sign".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::adapter::pick_stx_address;

    #[tokio::test]
    async fn test_connect_reports_fixed_address() {
        let wallet = ReadOnlyWallet::new("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");
        let addresses = wallet.connect().await.unwrap();
        assert_eq!(
            pick_stx_address(&addresses),
            Some("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7")
        );
    }

    #[tokio::test]
    async fn test_submit_refused() {
        let wallet = ReadOnlyWallet::new("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");
        let call = ContractCall {
            contract_id: "SP000.faucet".to_string(),
            function: "claim-stx".to_string(),
            args: Vec::new(),
            post_condition_mode: crate::wallet::PostConditionMode::Deny,
        };
        assert!(wallet.submit(call).await.is_err());
    }
}
