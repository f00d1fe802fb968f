//! Per-step CRR lattice parameters.
//!
//! ```text
//! Δt = T / n
//! u  = exp(σ √Δt),  d = 1 / u
//! a  = exp(r Δt)                  (per-step growth, 1 / discount factor)
//! pu = (a - d) / (u - d),  pd = 1 - pu
//! ```
//!
//! A well-posed lattice needs `d < a < u`, i.e. `pu ∈ (0, 1)`. That is a
//! caller precondition on `(σ, r, Δt)`; it is reported through
//! [`LatticeParams::is_arbitrage_free`] and a `tracing` warning, not rejected.

use pricer_core::types::{OptionSpec, PricingError};

/// Up/down multipliers and risk-neutral probabilities for one lattice step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeParams {
    /// Step length Δt = T / n.
    pub delta_t: f64,
    /// Up multiplier u.
    pub up: f64,
    /// Down multiplier d = 1 / u.
    pub down: f64,
    /// Per-step growth factor a = exp(r Δt).
    pub growth: f64,
    /// Risk-neutral up probability.
    pub prob_up: f64,
    /// Risk-neutral down probability.
    pub prob_down: f64,
}

impl LatticeParams {
    /// Derives lattice parameters.
    ///
    /// # Arguments
    ///
    /// * `volatility` - Annualised volatility σ
    /// * `time_to_expiry` - Time to expiry T in years
    /// * `steps` - Number of lattice steps n (>= 1)
    /// * `rate` - Continuously compounded rate r
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidArgument`] when `steps` is 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::lattice::LatticeParams;
    ///
    /// let p = LatticeParams::new(0.2, 1.0, 4, 0.05).unwrap();
    /// assert_eq!(p.delta_t, 0.25);
    /// assert!((p.up * p.down - 1.0).abs() < 1e-15);
    /// assert!(p.is_arbitrage_free());
    /// ```
    pub fn new(
        volatility: f64,
        time_to_expiry: f64,
        steps: usize,
        rate: f64,
    ) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(PricingError::invalid("steps must be >= 1"));
        }

        let delta_t = time_to_expiry / steps as f64;
        let up = (volatility * delta_t.sqrt()).exp();
        let down = 1.0 / up;
        let growth = (rate * delta_t).exp();
        let prob_up = (growth - down) / (up - down);

        Ok(Self {
            delta_t,
            up,
            down,
            growth,
            prob_up,
            prob_down: 1.0 - prob_up,
        })
    }

    /// Derives the parameters of a validated contract.
    pub fn from_spec(spec: &OptionSpec) -> Result<Self, PricingError> {
        Self::new(
            spec.volatility(),
            spec.time_to_expiry(),
            spec.steps(),
            spec.rate(),
        )
    }

    /// Returns whether `d < a < u`, i.e. both probabilities lie in (0, 1).
    #[inline]
    pub fn is_arbitrage_free(&self) -> bool {
        self.prob_up > 0.0 && self.prob_up < 1.0
    }

    /// Up probability pre-multiplied by the one-step discount factor `1 / a`.
    #[inline]
    pub fn discounted_prob_up(&self) -> f64 {
        self.prob_up / self.growth
    }

    /// Down probability pre-multiplied by the one-step discount factor `1 / a`.
    #[inline]
    pub fn discounted_prob_down(&self) -> f64 {
        self.prob_down / self.growth
    }
}
