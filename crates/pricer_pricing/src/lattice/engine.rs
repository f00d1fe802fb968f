//! CRR lattice engine with escrowed dividends and early exercise.
//!
//! # Algorithm
//!
//! Only the active slice of the recombining tree is stored. Index 0 holds the
//! highest underlying value of a level, index `i` the lowest:
//!
//! ```text
//!                                         s[0]
//!                       s[0]
//!    s[0]   ---->               ---->     s[1]
//!                       s[1]
//!                                         s[2]
//! ```
//!
//! 1. **Terminal layer**: `s[j] = (S - schedule[0]) u^(n - 2j)`, payoff on
//!    `s[j] + schedule[n]`.
//! 2. **Backward induction** for `i = n-1 … 0`, `j = 0 … i`:
//!    - `o[j] = o[j] pu/a + o[j+1] pd/a`
//!    - American only: `s[j] = s[j] d` (node `(i, j)` is one down-move from
//!      `(i+1, j)`), then `o[j] = max(o[j], payoff(s[j] + schedule[i]))`
//!
//! `o[0]` after level 0 is the price.

use pricer_core::types::{Dividend, ExerciseStyle, OptionSpec, OptionType, PricingError};
use tracing::{debug, warn};

use super::arena::{LatticeArena, LatticeWindows};
use super::params::LatticeParams;
use super::schedule::DividendSchedule;

/// Prices `spec` on the caller's arena.
///
/// Every window slot read during the call is written first, so reusing the
/// arena across calls yields bit-identical results for identical inputs.
///
/// # Errors
///
/// - [`PricingError::ResourceExhausted`] if a fixed arena is too small
/// - [`PricingError::InvalidArgument`] propagated from lattice setup, or if
///   the present value of the dividends is at least the spot
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{Dividend, ExerciseStyle, OptionSpec, OptionType};
/// use pricer_pricing::lattice::{price_with_arena, LatticeArena};
///
/// let spec = OptionSpec::builder()
///     .option_type(OptionType::Put)
///     .exercise(ExerciseStyle::American)
///     .spot(52.0)
///     .rate(0.10)
///     .time_to_expiry(2.5)
///     .volatility(0.40)
///     .strike(50.0)
///     .steps(500)
///     .build()
///     .unwrap();
/// let dividends = [Dividend::new(2.06, 3.5 / 12.0).unwrap()];
///
/// let mut arena = LatticeArena::new();
/// let first = price_with_arena(&mut arena, &spec, &dividends).unwrap();
/// let second = price_with_arena(&mut arena, &spec, &dividends).unwrap();
/// assert_eq!(first.to_bits(), second.to_bits());
/// ```
pub fn price_with_arena(
    arena: &mut LatticeArena,
    spec: &OptionSpec,
    dividends: &[Dividend],
) -> Result<f64, PricingError> {
    let params = LatticeParams::from_spec(spec)?;
    if !params.is_arbitrage_free() {
        warn!(
            prob_up = params.prob_up,
            steps = spec.steps(),
            "risk-neutral probability outside (0, 1); lattice is not arbitrage-free"
        );
    }

    let n = spec.steps();
    let LatticeWindows {
        underlying,
        option_values,
        dividend_schedule,
    } = arena.acquire(n)?;

    let schedule = DividendSchedule::fill(
        dividend_schedule,
        dividends,
        &params,
        spec.rate(),
        spec.time_to_expiry(),
    )?;

    let dividend_free_spot = spec.spot() - schedule.initial();
    if dividend_free_spot.is_nan() || dividend_free_spot <= 0.0 {
        return Err(PricingError::invalid(format!(
            "escrowed dividends {} consume the whole spot {}",
            schedule.initial(),
            spec.spot()
        )));
    }

    fill_terminal_layer(
        underlying,
        option_values,
        &params,
        dividend_free_spot,
        schedule.terminal(),
        spec.option_type(),
        spec.strike(),
    );

    roll_back(
        underlying,
        option_values,
        &params,
        &schedule,
        spec.option_type(),
        spec.exercise(),
        spec.strike(),
    );

    let price = option_values[0];
    debug!(
        option_type = %spec.option_type(),
        exercise = %spec.exercise(),
        steps = n,
        escrowed = schedule.initial(),
        price,
        "priced on lattice"
    );
    Ok(price)
}

fn fill_terminal_layer(
    underlying: &mut [f64],
    option_values: &mut [f64],
    params: &LatticeParams,
    dividend_free_spot: f64,
    terminal_escrow: f64,
    option_type: OptionType,
    strike: f64,
) {
    let n = (underlying.len() - 1) as f64;
    for (j, (s, o)) in underlying
        .iter_mut()
        .zip(option_values.iter_mut())
        .enumerate()
    {
        // Closed form, not accumulated d² products
        *s = dividend_free_spot * params.up.powf(n - 2.0 * j as f64);
        *o = option_type.intrinsic(*s + terminal_escrow, strike);
    }
}

fn roll_back(
    underlying: &mut [f64],
    option_values: &mut [f64],
    params: &LatticeParams,
    schedule: &DividendSchedule<'_>,
    option_type: OptionType,
    exercise: ExerciseStyle,
    strike: f64,
) {
    let disc_up = params.discounted_prob_up();
    let disc_down = params.discounted_prob_down();
    let down = params.down;
    // Loop-invariant
    let early_exercise = exercise.is_american();

    for i in (0..schedule.steps()).rev() {
        let escrowed = schedule.escrowed(i);
        for j in 0..=i {
            let continuation = option_values[j] * disc_up + option_values[j + 1] * disc_down;
            option_values[j] = if early_exercise {
                underlying[j] *= down;
                continuation.max(option_type.intrinsic(underlying[j] + escrowed, strike))
            } else {
                continuation
            };
        }
    }
}

/// Lattice pricer that owns its arena.
///
/// Convenient for single-threaded drivers (calibration loops, benchmark
/// harnesses) that price many contracts back to back. For parallel work
/// give each worker its own pricer or arena.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionSpec, OptionType};
/// use pricer_pricing::lattice::BinomialPricer;
///
/// let mut pricer = BinomialPricer::new();
/// let spec = OptionSpec::builder()
///     .option_type(OptionType::Call)
///     .spot(100.0)
///     .rate(0.05)
///     .time_to_expiry(1.0)
///     .volatility(0.2)
///     .strike(100.0)
///     .steps(200)
///     .build()
///     .unwrap();
///
/// let price = pricer.price(&spec, &[]).unwrap();
/// assert!(price > 10.0 && price < 11.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BinomialPricer {
    arena: LatticeArena,
}

impl BinomialPricer {
    /// Creates a pricer with an empty growing arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pricer around an existing arena.
    pub fn with_arena(arena: LatticeArena) -> Self {
        Self { arena }
    }

    /// Prices one contract, reusing the owned arena.
    pub fn price(&mut self, spec: &OptionSpec, dividends: &[Dividend]) -> Result<f64, PricingError> {
        price_with_arena(&mut self.arena, spec, dividends)
    }

    /// Returns the owned arena.
    #[inline]
    pub fn arena(&self) -> &LatticeArena {
        &self.arena
    }

    /// Returns the owned arena mutably, e.g. to resize it between sweeps.
    #[inline]
    pub fn arena_mut(&mut self) -> &mut LatticeArena {
        &mut self.arena
    }

    /// Releases the arena's memory between sweeps.
    pub fn reset_arena(&mut self) {
        self.arena.reset();
    }

    /// Consumes the pricer, returning its arena.
    pub fn into_arena(self) -> LatticeArena {
        self.arena
    }
}

/// Prices a vanilla option in one call.
///
/// Validates the inputs, allocates an arena sized for `steps` and runs the
/// lattice. Drivers pricing many contracts should keep a [`BinomialPricer`]
/// or [`LatticeArena`] instead.
///
/// # Errors
///
/// [`PricingError::InvalidArgument`] for `steps < 1` or ill-formed inputs.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{Dividend, ExerciseStyle, OptionType};
/// use pricer_pricing::lattice::price;
///
/// let dividends = [Dividend::new(2.06, 3.5 / 12.0).unwrap()];
/// let value = price(
///     OptionType::Put,
///     ExerciseStyle::European,
///     52.0,
///     0.10,
///     2.5,
///     &dividends,
///     0.40,
///     50.0,
///     1000,
/// )
/// .unwrap();
/// assert!((value - 6.324).abs() < 1e-2);
///
/// assert!(price(OptionType::Put, ExerciseStyle::European, 52.0, 0.1, 2.5, &[], 0.4, 50.0, 0).is_err());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn price(
    option_type: OptionType,
    exercise: ExerciseStyle,
    spot: f64,
    rate: f64,
    time_to_expiry: f64,
    dividends: &[Dividend],
    volatility: f64,
    strike: f64,
    steps: usize,
) -> Result<f64, PricingError> {
    let spec = OptionSpec::builder()
        .option_type(option_type)
        .exercise(exercise)
        .spot(spot)
        .rate(rate)
        .time_to_expiry(time_to_expiry)
        .volatility(volatility)
        .strike(strike)
        .steps(steps)
        .build()?;

    let mut arena = LatticeArena::with_capacity(steps);
    price_with_arena(&mut arena, &spec, dividends)
}
