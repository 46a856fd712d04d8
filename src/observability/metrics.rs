//! Metrics collection and exposition.
//!
//! # Metrics
//! - `faucet_chain_reads_total` (counter): reads by endpoint, outcome
//! - `faucet_balance_microstx` (gauge): last fetched faucet balance
//! - `faucet_submissions_total` (counter): submissions by kind
//! - `faucet_resolutions_total` (counter): wallet resolutions by outcome
//!
//! # Design Decisions
//! - Recording is cheap and always on; exposition is opt-in
//! - The Prometheus exporter binds its own listener when enabled

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count a chain read attempt.
pub fn record_chain_read(endpoint: &'static str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("faucet_chain_reads_total", "endpoint" => endpoint, "outcome" => outcome)
        .increment(1);
}

/// Record the last fetched faucet balance.
pub fn record_faucet_balance(micro_stx: u64) {
    gauge!("faucet_balance_microstx").set(micro_stx as f64);
}

/// Count a transaction handed to the wallet.
pub fn record_submission(kind: &'static str) {
    counter!("faucet_submissions_total", "kind" => kind).increment(1);
}

/// Count a wallet resolution ("settled", "rejected", "failed").
pub fn record_resolution(outcome: &'static str) {
    counter!("faucet_resolutions_total", "outcome" => outcome).increment(1);
}
