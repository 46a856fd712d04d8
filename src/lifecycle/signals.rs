//! OS signal handling.
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Ctrl-C translates to the internal shutdown broadcast

use crate::lifecycle::shutdown::Shutdown;

/// Wait for ctrl-c, then trigger shutdown.
pub async fn handle_signals(shutdown: &Shutdown) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        return;
    }
    tracing::info!("Shutdown signal received");
    shutdown.trigger();
}
