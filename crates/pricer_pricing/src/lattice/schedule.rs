//! Escrowed dividend discount schedule.
//!
//! For each lattice step `k ∈ [0, n]` the schedule holds the present value,
//! as of `k Δt`, of every dividend that is still to be paid:
//!
//! ```text
//! schedule[k] = Σ  amount · exp(-r (t_ex - k Δt))
//!              t_ex < T, k <= floor(t_ex / Δt)
//! ```
//!
//! Dividends going ex on or after expiry are ignored. The schedule is never
//! negative and is zero past every ex-date, but it is not monotone in `k`:
//! between payments it grows at the risk-free rate.
//!
//! The lattice engine reads three kinds of entries:
//! - `schedule[0]`, subtracted from spot to get the dividend-free process
//! - `schedule[n]`, added back to terminal nodes
//! - `schedule[i]`, added back when testing early exercise at level `i`

use pricer_core::types::{Dividend, PricingError};

use super::params::LatticeParams;

/// Read-only view of a filled schedule window.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::Dividend;
/// use pricer_pricing::lattice::{DividendSchedule, LatticeParams};
///
/// let params = LatticeParams::new(0.25, 1.0, 4, 0.0).unwrap();
/// let dividends = [Dividend::new(1.0, 0.6).unwrap()];
/// let mut window = [0.0; 5];
///
/// let schedule = DividendSchedule::fill(&mut window, &dividends, &params, 0.0, 1.0).unwrap();
/// // Paid after step 2 (0.6 / 0.25 = 2.4), so steps 0..=2 escrow it
/// assert_eq!(schedule.as_slice(), &[1.0, 1.0, 1.0, 0.0, 0.0]);
/// assert_eq!(schedule.initial(), 1.0);
/// assert_eq!(schedule.terminal(), 0.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DividendSchedule<'a> {
    values: &'a [f64],
}

impl<'a> DividendSchedule<'a> {
    /// Fills `window` with the schedule and returns a view of it.
    ///
    /// Every entry of `window` is overwritten, so stale data from an earlier
    /// call never leaks into this one.
    ///
    /// # Arguments
    ///
    /// * `window` - Output slice of length `steps + 1`
    /// * `dividends` - Discrete dividends (may be empty)
    /// * `params` - Lattice parameters for this contract
    /// * `rate` - Continuously compounded discount rate
    /// * `time_to_expiry` - Option expiry; dividends at or after it are ignored
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidArgument`] if `window` is empty.
    pub fn fill(
        window: &'a mut [f64],
        dividends: &[Dividend],
        params: &LatticeParams,
        rate: f64,
        time_to_expiry: f64,
    ) -> Result<Self, PricingError> {
        if window.is_empty() {
            return Err(PricingError::invalid(
                "dividend schedule window must hold at least one step",
            ));
        }
        let last_index = window.len() - 1;

        window.fill(0.0);

        for dividend in dividends.iter().filter(|d| d.is_before(time_to_expiry)) {
            let last_step_before_ex = ((dividend.time_to_ex_div() / params.delta_t) as usize)
                .min(last_index);

            for (k, slot) in window[..=last_step_before_ex].iter_mut().enumerate() {
                *slot += dividend.discounted_to(k as f64 * params.delta_t, rate);
            }
        }

        Ok(Self { values: window })
    }

    /// Total escrowed value at step `k`.
    #[inline(always)]
    pub fn escrowed(&self, k: usize) -> f64 {
        self.values[k]
    }

    /// Escrowed value at time zero.
    #[inline]
    pub fn initial(&self) -> f64 {
        self.values[0]
    }

    /// Escrowed value at expiry; zero whenever all ex-dates precede it.
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Number of steps covered (`len - 1`).
    #[inline]
    pub fn steps(&self) -> usize {
        self.values.len() - 1
    }

    /// Returns the underlying values.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.values
    }
}
