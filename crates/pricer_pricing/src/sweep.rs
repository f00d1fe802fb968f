//! Batch drivers over the lattice engine.
//!
//! - [`price_strikes`]: one arena, strikes priced back to back
//! - [`par_price_strikes`]: Rayon parallel, one arena per worker
//! - [`convergence_ladder`]: the same contract at increasing step counts,
//!   with wall-clock latency per entry
//!
//! Arenas are never shared between threads. [`par_price_strikes`] relies on
//! `map_init`, which hands each Rayon job split its own arena.

use std::time::{Duration, Instant};

use pricer_core::types::{Dividend, OptionSpec, PricingError};
use rayon::prelude::*;
use tracing::debug;

use crate::lattice::{price_with_arena, LatticeArena};

/// Price and latency of one rung of a convergence ladder.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConvergencePoint {
    /// Lattice steps used.
    pub steps: usize,
    /// Lattice price.
    pub price: f64,
    /// Wall-clock time spent pricing.
    pub elapsed: Duration,
}

impl ConvergencePoint {
    /// Elapsed time in microseconds.
    #[inline]
    pub fn elapsed_micros(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e6
    }
}

/// Prices `spec` once per strike, reusing `arena`.
///
/// # Errors
///
/// The first error encountered, e.g. an invalid strike or an exhausted
/// fixed arena.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionSpec, OptionType};
/// use pricer_pricing::lattice::LatticeArena;
/// use pricer_pricing::sweep::price_strikes;
///
/// let spec = OptionSpec::builder()
///     .option_type(OptionType::Call)
///     .spot(100.0)
///     .rate(0.05)
///     .time_to_expiry(1.0)
///     .volatility(0.2)
///     .strike(100.0)
///     .steps(100)
///     .build()
///     .unwrap();
///
/// let mut arena = LatticeArena::with_capacity(100);
/// let prices = price_strikes(&mut arena, &spec, &[], &[90.0, 100.0, 110.0]).unwrap();
/// assert!(prices[0] > prices[1] && prices[1] > prices[2]);
/// assert_eq!(arena.stats().growths, 0);
/// ```
pub fn price_strikes(
    arena: &mut LatticeArena,
    spec: &OptionSpec,
    dividends: &[Dividend],
    strikes: &[f64],
) -> Result<Vec<f64>, PricingError> {
    strikes
        .iter()
        .map(|&strike| price_with_arena(arena, &spec.with_strike(strike)?, dividends))
        .collect()
}

/// Prices `spec` once per strike in parallel.
///
/// Results are returned in the order of `strikes` and are bit-identical to
/// [`price_strikes`].
///
/// # Errors
///
/// An error from one of the strikes; which one is unspecified when several
/// fail.
pub fn par_price_strikes(
    spec: &OptionSpec,
    dividends: &[Dividend],
    strikes: &[f64],
) -> Result<Vec<f64>, PricingError> {
    let steps = spec.steps();
    strikes
        .par_iter()
        .map_init(
            || LatticeArena::with_capacity(steps),
            |arena, &strike| price_with_arena(arena, &spec.with_strike(strike)?, dividends),
        )
        .collect()
}

/// Prices `spec` at each step count in `steps`, timing every call.
///
/// The arena is reused across rungs and grows to the largest count.
///
/// # Errors
///
/// The first error encountered, e.g. a zero step count.
pub fn convergence_ladder(
    arena: &mut LatticeArena,
    spec: &OptionSpec,
    dividends: &[Dividend],
    steps: &[usize],
) -> Result<Vec<ConvergencePoint>, PricingError> {
    steps
        .iter()
        .map(|&n| {
            let rung = spec.with_steps(n)?;
            let start = Instant::now();
            let price = price_with_arena(arena, &rung, dividends)?;
            let elapsed = start.elapsed();
            debug!(steps = n, price, elapsed_us = elapsed.as_micros() as u64, "ladder rung");
            Ok(ConvergencePoint {
                steps: n,
                price,
                elapsed,
            })
        })
        .collect()
}
