//! Chain read subsystem.
//!
//! # Data Flow
//! ```text
//! Stacks blockchain API
//!     → client.rs (balances GET, call-read POST, timeouts)
//!     → clarity.rs (hex wire codec for call-read values)
//!     → types.rs (ChainSnapshot consumed by the view-model)
//! ```
//!
//! Everything here is read-only; writes go through the wallet adapter.

pub mod clarity;
pub mod client;
pub mod types;

pub use clarity::ClarityValue;
pub use client::ChainReader;
pub use types::{ChainError, ChainResult, ChainSnapshot};
