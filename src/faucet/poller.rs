//! Snapshot polling service.
//!
//! Drives `FaucetViewModel::refresh` on a fixed interval. The poller is
//! the only long-lived task in the system; it must be started when the
//! view mounts and stopped through the shutdown channel when the view
//! goes away, so no refresh ever lands on a dead view. Session changes
//! need no re-registration: every tick reads the current session and
//! no-ops when there is none.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::faucet::view_model::FaucetViewModel;

/// Service that keeps the view-model's snapshot fresh.
pub struct SnapshotPoller {
    vm: Arc<FaucetViewModel>,
    interval: Duration,
    shutdown: broadcast::Receiver<()>,
}

impl SnapshotPoller {
    /// Create a new poller.
    pub fn new(
        vm: Arc<FaucetViewModel>,
        interval: Duration,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            vm,
            interval,
            shutdown,
        }
    }

    /// Run until the shutdown signal fires.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        tracing::info!(interval_secs = self.interval.as_secs(), "Snapshot poller started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.vm.refresh().await {
                        // Degraded, not fatal: the next tick retries.
                        tracing::warn!(error = %e, "Snapshot poll degraded");
                    }
                }
                _ = self.shutdown.recv() => {
                    tracing::info!("Snapshot poller stopped");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaucetConfig;
    use crate::faucet::view_model::FaucetContext;
    use crate::lifecycle::Shutdown;
    use crate::wallet::{ContractCall, TxId, WalletAddress, WalletAdapter, WalletError};
    use futures_util::future::BoxFuture;

    struct NoWallet;

    impl WalletAdapter for NoWallet {
        fn connect(&self) -> BoxFuture<'_, Result<Vec<WalletAddress>, WalletError>> {
            Box::pin(async { Err(WalletError::ConnectionFailed("no wallet".into())) })
        }
        fn disconnect(&self) -> BoxFuture<'_, ()> {
            Box::pin(async {})
        }
        fn submit(&self, _call: ContractCall) -> BoxFuture<'_, Result<TxId, WalletError>> {
            Box::pin(async { Err(WalletError::Submission("no wallet".into())) })
        }
    }

    #[tokio::test]
    async fn test_poller_exits_on_shutdown() {
        let mut config = FaucetConfig::default();
        config.network.api_url = "http://127.0.0.1:9".to_string();
        let ctx = FaucetContext::new(config, std::sync::Arc::new(NoWallet)).unwrap();
        let vm = Arc::new(FaucetViewModel::new(ctx));

        let shutdown = Shutdown::new();
        let poller = SnapshotPoller::new(vm, Duration::from_secs(30), shutdown.subscribe());
        let handle = tokio::spawn(poller.run());

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("poller did not stop on shutdown")
            .unwrap();
    }
}
