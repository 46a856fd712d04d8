//! Wallet integration subsystem.
//!
//! # Security Constraints
//! - No keys in this crate; signing happens in the external wallet
//! - The adapter reports addresses and transaction ids, nothing more
//! - Every submission resolves exactly once: txid, cancelled, or failed

pub mod adapter;
pub mod readonly;
pub mod types;

pub use adapter::{pick_stx_address, WalletAdapter};
pub use readonly::ReadOnlyWallet;
pub use types::{ContractCall, PostConditionMode, TxId, WalletAddress, WalletError};
