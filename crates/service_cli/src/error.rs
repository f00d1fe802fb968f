//! CLI error types.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `lattice` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// A flag or argument value was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The pricing engine rejected the contract.
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON output could not be produced.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
