//! # Pricer Engine (Layer 3: Lattice Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing prices vanilla equity options on a Cox-Ross-Rubinstein
//! binomial lattice:
//! - American and European calls and puts
//! - Discrete cash dividends under the escrowed dividend model
//! - Caller-owned scratch arenas so repeated pricing does not allocate
//! - Strike sweeps (sequential and Rayon parallel) and convergence ladders
//! - Closed-form escrowed Black-Scholes for verification
//!
//! Contract types and errors live in Layer 1 (`pricer_core`).
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{Dividend, ExerciseStyle, OptionSpec, OptionType};
//! use pricer_pricing::lattice::BinomialPricer;
//!
//! let spec = OptionSpec::builder()
//!     .option_type(OptionType::Put)
//!     .exercise(ExerciseStyle::American)
//!     .spot(52.0)
//!     .rate(0.10)
//!     .time_to_expiry(2.5)
//!     .volatility(0.40)
//!     .strike(50.0)
//!     .steps(2000)
//!     .build()
//!     .unwrap();
//! let dividends = [Dividend::new(2.06, 3.5 / 12.0).unwrap()];
//!
//! let mut pricer = BinomialPricer::new();
//! let american = pricer.price(&spec, &dividends).unwrap();
//! assert!((american - 7.946).abs() < 1e-2);
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events only: `debug` for arena growth and
//! per-call summaries, `warn` when the risk-neutral probability leaves
//! (0, 1). Installing a subscriber is left to the binary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

// Binomial lattice: parameters, dividend schedule, arena and engine
pub mod lattice;

// Closed-form reference prices
pub mod analytical;

// Batch drivers: strike sweeps and convergence ladders
pub mod sweep;

// Re-export commonly used items for convenience
pub use analytical::escrowed_black_scholes;
pub use lattice::{price, price_with_arena, ArenaPolicy, BinomialPricer, LatticeArena};
pub use sweep::{convergence_ladder, par_price_strikes, price_strikes, ConvergencePoint};
