//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - RUST_LOG wins; the configured filter is the fallback
//! - Initialized once at process start, before any subsystem logs

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `default_filter` applies when `RUST_LOG` is not set.
pub fn init(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
