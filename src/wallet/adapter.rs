//! Wallet session adapter.
//!
//! The wallet itself lives outside this crate: a browser extension, a
//! hardware signer bridge, or a scripted stand-in under test. The adapter
//! trait is the seam: the view-model drives connect/disconnect/submit
//! through it and never sees keys or signing.

use futures_util::future::BoxFuture;

use crate::wallet::types::{ContractCall, TxId, WalletAddress, WalletError};

/// Asynchronous interface to an external wallet.
///
/// All methods resolve exactly once. `submit` resolves when the wallet has
/// accepted the transaction for broadcast (or refused it); acceptance is
/// not on-chain confirmation.
pub trait WalletAdapter: Send + Sync {
    /// Request a session. Resolves with every address the wallet exposes.
    fn connect(&self) -> BoxFuture<'_, Result<Vec<WalletAddress>, WalletError>>;

    /// Tear down the session. Idempotent.
    fn disconnect(&self) -> BoxFuture<'_, ()>;

    /// Ask the wallet to sign and broadcast a contract call.
    ///
    /// `Err(WalletError::Cancelled)` means the user dismissed the prompt.
    fn submit(&self, call: ContractCall) -> BoxFuture<'_, Result<TxId, WalletError>>;
}

/// Pick the STX account out of a wallet's address list.
///
/// Wallets report one entry per asset; the STX entry is matched by symbol,
/// falling back to the mainnet address prefix for wallets that omit it.
pub fn pick_stx_address(addresses: &[WalletAddress]) -> Option<&str> {
    addresses
        .iter()
        .find(|a| a.symbol == "STX" || a.address.starts_with("SP"))
        .map(|a| a.address.as_str())
}
