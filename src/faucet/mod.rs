//! Faucet view-model subsystem.
//!
//! # Data Flow
//! ```text
//! wallet adapter ──connect/submit──┐
//!                                  ▼
//! chain reader ──snapshots──▶ view_model.rs ──▶ state.rs (derived display)
//!                                  ▲                      │
//! poller.rs (fixed interval) ──────┘          format.rs (display strings)
//! ```
//!
//! The view-model is the only stateful unit; everything it renders is
//! re-derived from session + snapshot + pending transaction.

pub mod format;
pub mod poller;
pub mod state;
pub mod view_model;

pub use poller::SnapshotPoller;
pub use state::{Action, DisplayState, Session, TxKind, TxOutcome};
pub use view_model::{FaucetContext, FaucetError, FaucetViewModel};
