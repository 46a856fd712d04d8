//! The faucet view-model.
//!
//! # Responsibilities
//! - Own the session, snapshot and pending-transaction state
//! - Drive connect/disconnect through the wallet adapter
//! - Merge chain reads into snapshots, dropping stale responses
//! - Run the claim/fund submission flow with its guards
//!
//! All I/O happens outside the state lock; interleavings that the lock
//! cannot order are resolved by the session epoch: work started under an
//! old epoch discards its result instead of applying it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::chain::{ChainReader, ChainResult, ChainSnapshot, ClarityValue};
use crate::config::FaucetConfig;
use crate::faucet::format::{self, AmountError};
use crate::faucet::state::{Action, DisplayState, Session, TxKind, TxOutcome, VmState};
use crate::observability::metrics;
use crate::wallet::{pick_stx_address, ContractCall, WalletAdapter, WalletError};

/// Errors surfaced by view-model actions. All of them are recoverable:
/// the state machine is back in a valid state when the error returns.
#[derive(Debug, Error)]
pub enum FaucetError {
    /// Wallet unreachable or the user declined the connection.
    #[error("wallet connection failed: {0}")]
    ConnectionFailed(String),

    /// One or both chain reads failed. The snapshot was still applied
    /// fail-open; retry happens on the next poll tick.
    #[error("chain read failed: {0}")]
    ReadFailed(String),

    /// The user cancelled the signing prompt.
    #[error("submission rejected by user")]
    SubmissionRejected,

    /// The wallet accepted the request but could not broadcast it.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// The fund amount did not parse.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
}

/// Everything the view-model needs from the outside world, passed in
/// explicitly instead of living in process-wide singletons.
pub struct FaucetContext {
    pub config: FaucetConfig,
    pub chain: ChainReader,
    pub wallet: Arc<dyn WalletAdapter>,
}

impl FaucetContext {
    /// Build a context from configuration and a wallet adapter.
    pub fn new(config: FaucetConfig, wallet: Arc<dyn WalletAdapter>) -> ChainResult<Self> {
        let chain = ChainReader::new(config.network.clone(), config.contract.clone())?;
        Ok(Self {
            config,
            chain,
            wallet,
        })
    }
}

/// The faucet presentation state machine. One instance per mounted view.
pub struct FaucetViewModel {
    ctx: FaucetContext,
    state: Mutex<VmState>,
}

impl FaucetViewModel {
    pub fn new(ctx: FaucetContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(VmState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, VmState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current derived display state.
    pub fn display_state(&self) -> DisplayState {
        self.state().display_state()
    }

    /// Actions enabled right now.
    pub fn allowed_actions(&self) -> Vec<Action> {
        self.state().allowed_actions()
    }

    /// The connected STX address, if any.
    pub fn session_address(&self) -> Option<String> {
        self.state().session.as_ref().map(|s| s.address.clone())
    }

    /// The last applied snapshot, if any.
    pub fn snapshot(&self) -> Option<ChainSnapshot> {
        self.state().snapshot
    }

    /// Faucet balance formatted for display.
    pub fn balance_display(&self) -> Option<String> {
        self.state()
            .snapshot
            .map(|s| format::format_stx(s.faucet_balance_micro))
    }

    /// Human cooldown estimate, present only while blocked.
    pub fn cooldown_display(&self) -> Option<String> {
        let blocks = self.state().snapshot.map(|s| s.cooldown_blocks)?;
        if blocks == 0 {
            return None;
        }
        Some(format::format_cooldown(
            blocks,
            self.ctx.config.network.blocks_per_hour,
        ))
    }

    /// Explorer link for the most recently sent transaction.
    pub fn explorer_link(&self) -> Option<String> {
        let txid = self.state().last_txid.clone()?;
        let network = &self.ctx.config.network;
        Some(format::explorer_link(
            &network.explorer_url,
            &network.chain,
            &txid.0,
        ))
    }

    /// Connect the wallet and load the first snapshot.
    ///
    /// No-op if a session exists or a connect is already with the wallet.
    /// On failure the state stays `Disconnected`; the user re-initiates.
    pub async fn connect(self: &Arc<Self>) -> Result<(), FaucetError> {
        {
            let mut s = self.state();
            if s.session.is_some() || s.connecting {
                return Ok(());
            }
            s.connecting = true;
        }

        let result = self.do_connect().await;
        self.state().connecting = false;

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Wallet connection failed");
        }
        result
    }

    async fn do_connect(self: &Arc<Self>) -> Result<(), FaucetError> {
        let addresses = self
            .ctx
            .wallet
            .connect()
            .await
            .map_err(|e| FaucetError::ConnectionFailed(e.to_string()))?;

        let address = pick_stx_address(&addresses)
            .ok_or_else(|| FaucetError::ConnectionFailed("wallet exposed no STX address".into()))?
            .to_string();

        {
            let mut s = self.state();
            s.reset_session();
            s.session = Some(Session {
                address: address.clone(),
            });
        }
        tracing::info!(address = %address, "Wallet connected");

        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Initial snapshot is degraded");
        }
        Ok(())
    }

    /// Tear down the session. Idempotent; safe during `Submitting`: the
    /// late wallet resolution will find a newer epoch and do nothing.
    pub async fn disconnect(&self) {
        self.ctx.wallet.disconnect().await;
        let mut s = self.state();
        let had_session = s.session.is_some();
        s.reset_session();
        drop(s);
        if had_session {
            tracing::info!("Wallet disconnected");
        }
    }

    /// Fetch both chain reads and apply them as a snapshot.
    ///
    /// Read failures do not block the UI: a failed eligibility probe
    /// fails open (claim enabled), a failed balance read keeps the last
    /// value. Either failure is reported as `ReadFailed` after the
    /// fail-open snapshot is applied, and is retried on the next tick
    /// only. A response that lands after the session changed is dropped.
    pub async fn refresh(&self) -> Result<(), FaucetError> {
        let (address, epoch, prev_balance) = {
            let s = self.state();
            match &s.session {
                Some(session) => (
                    session.address.clone(),
                    s.epoch,
                    s.snapshot.map(|snap| snap.faucet_balance_micro),
                ),
                None => return Ok(()),
            }
        };

        let (balance_res, cooldown_res) = tokio::join!(
            self.ctx.chain.faucet_balance(),
            self.ctx.chain.cooldown_blocks(&address),
        );

        let mut failures: Vec<String> = Vec::new();
        let balance = balance_res.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Balance read failed, keeping previous value");
            failures.push(e.to_string());
            prev_balance.unwrap_or(0)
        });
        let cooldown = cooldown_res.unwrap_or_else(|e| {
            // An outage must not read as a cooldown.
            tracing::warn!(error = %e, "Eligibility read failed, failing open");
            failures.push(e.to_string());
            0
        });

        let mut s = self.state();
        if s.epoch != epoch {
            tracing::debug!("Dropping snapshot fetched under a stale session");
            return Ok(());
        }
        s.snapshot = Some(ChainSnapshot {
            faucet_balance_micro: balance,
            cooldown_blocks: cooldown,
        });
        // Fresh data clears the settled/rejected banner.
        s.outcome = None;
        drop(s);

        if failures.is_empty() {
            Ok(())
        } else {
            Err(FaucetError::ReadFailed(failures.join("; ")))
        }
    }

    /// Submit the claim transaction. No-op unless the state is `Eligible`.
    pub async fn claim(self: &Arc<Self>) -> Result<(), FaucetError> {
        let (epoch, correlation) = {
            let mut s = self.state();
            if s.display_state() != DisplayState::Eligible {
                tracing::debug!("Claim ignored: not eligible");
                return Ok(());
            }
            s.begin_submission(TxKind::Claim)
        };

        let contract = &self.ctx.config.contract;
        let call = ContractCall {
            contract_id: contract.contract_id(),
            function: contract.claim_function.clone(),
            args: Vec::new(),
            post_condition_mode: contract.post_condition_mode,
        };
        self.submit(TxKind::Claim, call, epoch, correlation).await
    }

    /// Submit a fund transaction for a user-entered STX amount.
    pub async fn fund(self: &Arc<Self>, amount: &str) -> Result<(), FaucetError> {
        let micro = format::parse_stx_amount(amount)?;
        let (epoch, correlation) = {
            let mut s = self.state();
            if !s.allowed_actions().contains(&Action::Fund) {
                tracing::debug!("Fund ignored: not available in current state");
                return Ok(());
            }
            s.begin_submission(TxKind::Fund)
        };

        let contract = &self.ctx.config.contract;
        let call = ContractCall {
            contract_id: contract.contract_id(),
            function: contract.fund_function.clone(),
            args: vec![ClarityValue::UInt(micro as u128)],
            post_condition_mode: contract.post_condition_mode,
        };
        self.submit(TxKind::Fund, call, epoch, correlation).await
    }

    async fn submit(
        self: &Arc<Self>,
        kind: TxKind,
        call: ContractCall,
        epoch: u64,
        correlation: Uuid,
    ) -> Result<(), FaucetError> {
        metrics::record_submission(kind.as_str());
        tracing::info!(
            correlation = %correlation,
            kind = kind.as_str(),
            function = %call.function,
            "Submitting transaction to wallet"
        );

        let result = self.ctx.wallet.submit(call).await;

        let mut s = self.state();
        if s.epoch != epoch {
            tracing::debug!(correlation = %correlation, "Resolution after session change ignored");
            return Ok(());
        }
        s.pending = None;

        match result {
            Ok(txid) => {
                s.outcome = Some(TxOutcome::Settled { txid: txid.clone() });
                s.last_txid = Some(txid.clone());
                drop(s);
                metrics::record_resolution("settled");
                tracing::info!(correlation = %correlation, txid = %txid, "Transaction sent");
                // Re-read only after the ledger has had a moment; an
                // immediate read would show the pre-transaction state.
                self.schedule_settle_refresh(epoch);
                Ok(())
            }
            Err(WalletError::Cancelled) => {
                s.outcome = Some(TxOutcome::Rejected {
                    reason: "signing request cancelled".to_string(),
                });
                drop(s);
                metrics::record_resolution("cancelled");
                tracing::info!(correlation = %correlation, "Submission cancelled by user");
                Err(FaucetError::SubmissionRejected)
            }
            Err(e) => {
                s.outcome = Some(TxOutcome::Rejected {
                    reason: e.to_string(),
                });
                drop(s);
                metrics::record_resolution("failed");
                tracing::warn!(correlation = %correlation, error = %e, "Submission failed");
                Err(FaucetError::SubmissionFailed(e.to_string()))
            }
        }
    }

    fn schedule_settle_refresh(self: &Arc<Self>, epoch: u64) {
        let vm = Arc::clone(self);
        let delay = Duration::from_secs(self.ctx.config.polling.settle_delay_secs);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if vm.state().epoch != epoch {
                return;
            }
            if let Err(e) = vm.refresh().await {
                tracing::warn!(error = %e, "Post-settle snapshot refresh degraded");
            }
        });
    }
}

impl std::fmt::Debug for FaucetViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaucetViewModel")
            .field("state", &self.display_state())
            .field("address", &self.session_address())
            .finish()
    }
}
