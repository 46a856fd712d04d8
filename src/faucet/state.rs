//! Faucet presentation state.
//!
//! # States
//! - Disconnected: no wallet session
//! - Syncing: session up, first snapshot not yet landed
//! - Eligible / Cooldown: snapshot present, claim allowed or blocked
//! - Submitting: a transaction is with the wallet, unresolved
//! - Settled / Rejected: the most recent resolution
//!
//! # Design Decisions
//! - Display state is derived on demand, never stored
//! - A rejection is a banner: the underlying eligibility still governs
//!   which actions are enabled
//! - Derivation precedence is fixed; see `VmState::display_state`

use std::time::Instant;

use uuid::Uuid;

use crate::chain::ChainSnapshot;
use crate::wallet::TxId;

/// A connected wallet session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The connected STX address.
    pub address: String,
}

/// Which faucet transaction a submission is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Claim,
    Fund,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Claim => "claim",
            TxKind::Fund => "fund",
        }
    }
}

/// A transaction handed to the wallet, not yet resolved.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    /// Correlation id for log lines; not a chain identifier.
    pub correlation: Uuid,
    pub kind: TxKind,
    pub submitted_at: Instant,
}

/// Resolution of the most recent submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    /// The wallet accepted the transaction for broadcast. "Sent", not
    /// confirmed.
    Settled { txid: TxId },
    /// The user cancelled signing or the broadcast failed.
    Rejected { reason: String },
}

/// What the presentation layer should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Disconnected,
    Syncing,
    Eligible,
    Cooldown { blocks_remaining: u64 },
    Submitting { kind: TxKind },
    Settled { txid: TxId },
    Rejected { reason: String },
}

/// User actions the current state permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Disconnect,
    Claim,
    Fund,
}

/// The view-model's owned state. One instance per mounted view.
#[derive(Debug, Default)]
pub(crate) struct VmState {
    pub session: Option<Session>,
    pub snapshot: Option<ChainSnapshot>,
    pub pending: Option<PendingTransaction>,
    pub outcome: Option<TxOutcome>,
    /// Kept for the explorer link after the outcome banner clears.
    pub last_txid: Option<TxId>,
    /// Bumped on every session change. In-flight work captures the epoch
    /// it started under and is dropped if the epoch has moved on.
    pub epoch: u64,
    /// A connect request is with the wallet; further ones are ignored.
    pub connecting: bool,
}

impl VmState {
    /// Derive the display state. First match wins.
    pub fn display_state(&self) -> DisplayState {
        if self.session.is_none() {
            return DisplayState::Disconnected;
        }
        if let Some(pending) = &self.pending {
            return DisplayState::Submitting { kind: pending.kind };
        }
        match &self.outcome {
            Some(TxOutcome::Settled { txid }) => {
                return DisplayState::Settled { txid: txid.clone() }
            }
            Some(TxOutcome::Rejected { reason }) => {
                return DisplayState::Rejected {
                    reason: reason.clone(),
                }
            }
            None => {}
        }
        match self.snapshot {
            None => DisplayState::Syncing,
            Some(snapshot) if snapshot.is_eligible() => DisplayState::Eligible,
            Some(snapshot) => DisplayState::Cooldown {
                blocks_remaining: snapshot.cooldown_blocks,
            },
        }
    }

    /// Actions enabled for the current state.
    pub fn allowed_actions(&self) -> Vec<Action> {
        match self.display_state() {
            DisplayState::Disconnected => vec![Action::Connect],
            DisplayState::Syncing | DisplayState::Submitting { .. } => Vec::new(),
            DisplayState::Eligible => vec![Action::Claim, Action::Fund, Action::Disconnect],
            DisplayState::Cooldown { .. } => vec![Action::Fund, Action::Disconnect],
            DisplayState::Settled { .. } => vec![Action::Disconnect],
            // The rejection banner does not lock anything: the underlying
            // eligibility decides.
            DisplayState::Rejected { .. } => match self.snapshot {
                Some(s) if s.is_eligible() => {
                    vec![Action::Claim, Action::Fund, Action::Disconnect]
                }
                Some(_) => vec![Action::Fund, Action::Disconnect],
                None => vec![Action::Disconnect],
            },
        }
    }

    /// Record a submission handed to the wallet, clearing any stale
    /// banner. Returns the epoch and correlation id the resolution must
    /// present to be applied.
    pub fn begin_submission(&mut self, kind: TxKind) -> (u64, Uuid) {
        let correlation = Uuid::new_v4();
        self.outcome = None;
        self.pending = Some(PendingTransaction {
            correlation,
            kind,
            submitted_at: Instant::now(),
        });
        (self.epoch, correlation)
    }

    /// Clear everything tied to the current session and bump the epoch.
    pub fn reset_session(&mut self) {
        self.session = None;
        self.snapshot = None;
        self.pending = None;
        self.outcome = None;
        self.last_txid = None;
        self.connecting = false;
        self.epoch += 1;
    }
}
