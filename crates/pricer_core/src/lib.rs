//! # pricer_core: Contract Foundation for the Lattice Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Option tags: `OptionType`, `ExerciseStyle` (`types::option`)
//! - Discrete cash dividends: `Dividend` (`types::dividend`)
//! - The validated contract: `OptionSpec` (`types::spec`)
//! - Error types: `PricingError` (`types::error`)
//! - Normal distribution helpers (`math::distributions`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{Dividend, ExerciseStyle, OptionSpec, OptionType};
//!
//! let spec = OptionSpec::builder()
//!     .option_type("put".parse::<OptionType>().unwrap())
//!     .exercise(ExerciseStyle::American)
//!     .spot(235.50)
//!     .rate(0.0042)
//!     .time_to_expiry(0.5)
//!     .volatility(0.25)
//!     .strike(235.0)
//!     .steps(1000)
//!     .build()
//!     .unwrap();
//!
//! let dividends = vec![Dividend::new(0.25, 0.25).unwrap()];
//! assert!(dividends[0].is_before(spec.time_to_expiry()));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for tags, dividends and specs

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
