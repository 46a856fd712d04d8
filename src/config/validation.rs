//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check URL and principal formats before any request is made
//! - Validate value ranges (intervals > 0, timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure: FaucetConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::FaucetConfig;

/// A single semantic configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &FaucetConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "network.api_url", &config.network.api_url);
    check_url(&mut errors, "network.explorer_url", &config.network.explorer_url);

    if config.network.request_timeout_secs == 0 {
        push(&mut errors, "network.request_timeout_secs", "must be greater than zero");
    }
    if config.network.blocks_per_hour == 0 {
        push(&mut errors, "network.blocks_per_hour", "must be greater than zero");
    }

    // Mainnet principals start with SP, testnet with ST.
    let address = &config.contract.address;
    if !(address.starts_with("SP") || address.starts_with("ST")) || address.len() < 28 {
        push(&mut errors, "contract.address", "not a Stacks principal");
    }
    if config.contract.name.is_empty() {
        push(&mut errors, "contract.name", "must not be empty");
    }
    for (field, value) in [
        ("contract.claim_function", &config.contract.claim_function),
        ("contract.fund_function", &config.contract.fund_function),
        ("contract.cooldown_function", &config.contract.cooldown_function),
    ] {
        if value.is_empty() {
            push(&mut errors, field, "must not be empty");
        }
    }

    if config.polling.interval_secs == 0 {
        push(&mut errors, "polling.interval_secs", "must be greater than zero");
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        push(&mut errors, "observability.metrics_address", "not a socket address");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => push(errors, field, &format!("unsupported scheme '{}'", url.scheme())),
        Err(e) => push(errors, field, &format!("invalid URL: {}", e)),
    }
}

fn push(errors: &mut Vec<ValidationError>, field: &str, message: &str) {
    errors.push(ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    });
}
