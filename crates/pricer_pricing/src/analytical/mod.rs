//! Closed-form reference prices.
//!
//! The European lattice converges to these formulas as the step count grows,
//! so they anchor the convergence tests and the `lattice check` command.
//!
//! # Usage
//!
//! ```rust
//! use pricer_core::types::{Dividend, OptionType};
//! use pricer_pricing::analytical::escrowed_black_scholes;
//!
//! let dividends = [Dividend::new(0.25, 0.25).unwrap()];
//! let call = escrowed_black_scholes(
//!     OptionType::Call,
//!     235.50,  // spot
//!     0.0042,  // rate
//!     0.5,     // time to expiry
//!     &dividends,
//!     0.25,    // volatility
//!     235.0,   // strike
//! )
//! .unwrap();
//! assert!(call > 0.0);
//! ```

pub mod escrowed;

pub use escrowed::{escrowed_black_scholes, escrowed_dividend_pv};
