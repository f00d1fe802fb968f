//! Cox-Ross-Rubinstein binomial lattice.
//!
//! - [`params`]: per-step up/down factors and risk-neutral probabilities
//! - [`schedule`]: escrowed dividend discount schedule
//! - [`arena`]: reusable scratch memory for the three per-call windows
//! - [`engine`]: terminal payoff, backward induction and early exercise
//!
//! # Memory model
//!
//! A call with `n` steps needs three windows of `n + 1` doubles. They are
//! carved from a [`LatticeArena`] owned by the caller, so repeated pricing
//! performs no allocation once the arena is large enough. An arena is
//! single-owner: parallel drivers hold one per worker.

pub mod arena;
pub mod engine;
pub mod params;
pub mod schedule;

pub use arena::{ArenaPolicy, ArenaStats, LatticeArena, LatticeWindows};
pub use engine::{price, price_with_arena, BinomialPricer};
pub use params::LatticeParams;
pub use schedule::DividendSchedule;
