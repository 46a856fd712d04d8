//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! faucet.toml (optional; defaults describe the mainnet faucet)
//!     → loader.rs (read, parse)
//!     → validation.rs (semantic checks, all errors reported)
//!     → schema.rs types consumed by the rest of the system
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, ConfigError};
pub use schema::{
    ContractConfig, FaucetConfig, NetworkConfig, ObservabilityConfig, PollingConfig,
};
pub use validation::{validate_config, ValidationError};
