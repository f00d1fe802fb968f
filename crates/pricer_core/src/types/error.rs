//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from contract construction, tag parsing and
//!   lattice pricing

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure is surfaced synchronously to the caller. Pricing is
/// deterministic, so an identical retry fails identically and nothing is
/// retried or recovered internally.
///
/// # Variants
/// - `InvalidArgument`: Unknown option tag, zero steps or ill-formed inputs
/// - `ResourceExhausted`: A fixed-capacity arena cannot hold the lattice
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidArgument("steps must be >= 1".to_string());
/// assert_eq!(format!("{}", err), "Invalid argument: steps must be >= 1");
///
/// let err = PricingError::ResourceExhausted { required: 303, available: 30 };
/// assert!(format!("{}", err).contains("303"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Arena capacity is insufficient and growth is disallowed.
    #[error("Resource exhausted: arena requires {required} slots but only {available} are available")]
    ResourceExhausted {
        /// Number of `f64` slots the call needs (`3 * (steps + 1)`)
        required: usize,
        /// Number of `f64` slots the arena can provide
        available: usize,
    },
}

impl PricingError {
    /// Shorthand for an [`PricingError::InvalidArgument`] built from anything printable.
    pub fn invalid(msg: impl Into<String>) -> Self {
        PricingError::InvalidArgument(msg.into())
    }

    /// Returns whether this error stems from caller input.
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PricingError::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = PricingError::invalid("unknown option type 'straddle'");
        assert_eq!(
            err.to_string(),
            "Invalid argument: unknown option type 'straddle'"
        );
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_resource_exhausted_names_both_capacities() {
        let err = PricingError::ResourceExhausted {
            required: 15_003,
            available: 3_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("15003"));
        assert!(msg.contains("3000"));
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(PricingError::invalid("x"));
        assert!(err.to_string().starts_with("Invalid argument"));
    }
}
