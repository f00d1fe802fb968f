//! Contract, dividend and error types.
//!
//! This module provides:
//! - `option`: Closed `OptionType` / `ExerciseStyle` tags with boundary parsing
//! - `dividend`: Discrete cash `Dividend` values
//! - `spec`: The validated `OptionSpec` contract and its builder
//! - `error`: The `PricingError` type shared by every pricing crate
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod dividend;
pub mod error;
pub mod option;
pub mod spec;

pub use dividend::Dividend;
pub use error::PricingError;
pub use option::{ExerciseStyle, OptionType};
pub use spec::{OptionSpec, OptionSpecBuilder};
