//! Headless Stacks Faucet Client Library
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                FAUCET CLIENT                  │
//!                    │                                               │
//!   External wallet  │  ┌─────────┐        ┌──────────────────┐     │
//!   ─────────────────┼─▶│ wallet  │───────▶│      faucet       │     │
//!                    │  │ adapter │        │   view-model      │     │
//!                    │  └─────────┘        │  (state machine)  │     │
//!                    │                     └────────┬─────────┘     │
//!   Stacks API       │  ┌─────────┐                 │               │
//!   ─────────────────┼─▶│  chain  │─────snapshots───┘               │
//!                    │  │ reader  │                                  │
//!                    │  └─────────┘                                  │
//!                    │                                               │
//!                    │  ┌────────────────────────────────────────┐  │
//!                    │  │         Cross-Cutting Concerns          │  │
//!                    │  │  config │ observability │ lifecycle     │  │
//!                    │  └────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

pub mod chain;
pub mod config;
pub mod faucet;
pub mod lifecycle;
pub mod observability;
pub mod wallet;

pub use config::FaucetConfig;
pub use faucet::{FaucetContext, FaucetViewModel, SnapshotPoller};
pub use lifecycle::Shutdown;
