//! Vanilla option contract specification.
//!
//! [`OptionSpec`] bundles everything a lattice pricer needs besides the
//! dividend list. Use [`OptionSpecBuilder`] to construct instances; the
//! builder validates at build time so an `OptionSpec` in hand is always
//! well-formed.

use super::error::PricingError;
use super::option::{ExerciseStyle, OptionType};

/// Vanilla option on a single underlying.
///
/// Immutable once built. Derive variants (other strikes, other step
/// counts) with [`with_strike`](Self::with_strike) and
/// [`with_steps`](Self::with_steps).
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{ExerciseStyle, OptionSpec, OptionType};
///
/// let spec = OptionSpec::builder()
///     .option_type(OptionType::Put)
///     .exercise(ExerciseStyle::American)
///     .spot(52.0)
///     .rate(0.10)
///     .time_to_expiry(2.5)
///     .volatility(0.40)
///     .strike(50.0)
///     .steps(5100)
///     .build()
///     .expect("valid contract");
///
/// assert_eq!(spec.steps(), 5100);
/// assert!(spec.exercise().is_american());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionSpec {
    option_type: OptionType,
    exercise: ExerciseStyle,
    spot: f64,
    rate: f64,
    time_to_expiry: f64,
    volatility: f64,
    strike: f64,
    steps: usize,
}

impl OptionSpec {
    /// Creates a new specification builder.
    #[inline]
    pub fn builder() -> OptionSpecBuilder {
        OptionSpecBuilder::default()
    }

    /// Returns call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the exercise style.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Returns the spot price of the underlying (dividends included).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the continuously compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the number of lattice steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns a copy with a different strike.
    ///
    /// # Errors
    /// [`PricingError::InvalidArgument`] if the strike is negative or not finite.
    pub fn with_strike(&self, strike: f64) -> Result<Self, PricingError> {
        let spec = Self { strike, ..*self };
        spec.validate()?;
        Ok(spec)
    }

    /// Returns a copy with a different exercise style.
    pub fn with_exercise(&self, exercise: ExerciseStyle) -> Self {
        Self { exercise, ..*self }
    }

    /// Returns a copy with a different step count.
    ///
    /// # Errors
    /// [`PricingError::InvalidArgument`] if `steps` is zero.
    pub fn with_steps(&self, steps: usize) -> Result<Self, PricingError> {
        let spec = Self { steps, ..*self };
        spec.validate()?;
        Ok(spec)
    }

    /// Validates the specification.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidArgument`] if:
    /// - `steps` is 0 (the step size `T / n` would be infinite)
    /// - `spot`, `time_to_expiry` or `volatility` is not finite and positive
    /// - `rate` is not finite
    /// - `strike` is not finite or is negative
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.steps == 0 {
            return Err(PricingError::invalid("steps must be >= 1"));
        }
        positive("spot", self.spot)?;
        positive("time_to_expiry", self.time_to_expiry)?;
        positive("volatility", self.volatility)?;
        if !self.rate.is_finite() {
            return Err(PricingError::invalid(format!(
                "rate must be finite, got {}",
                self.rate
            )));
        }
        if !self.strike.is_finite() || self.strike < 0.0 {
            return Err(PricingError::invalid(format!(
                "strike must be finite and >= 0, got {}",
                self.strike
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(format!(
            "{} must be finite and > 0, got {}",
            name, value
        )))
    }
}

/// Builder for [`OptionSpec`].
///
/// `option_type`, `spot`, `time_to_expiry`, `volatility`, `strike` and
/// `steps` are mandatory. `exercise` defaults to European and `rate` to 0.
#[derive(Clone, Debug, Default)]
pub struct OptionSpecBuilder {
    option_type: Option<OptionType>,
    exercise: ExerciseStyle,
    spot: Option<f64>,
    rate: f64,
    time_to_expiry: Option<f64>,
    volatility: Option<f64>,
    strike: Option<f64>,
    steps: Option<usize>,
}

impl OptionSpecBuilder {
    /// Sets call or put.
    #[inline]
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// Sets the exercise style.
    #[inline]
    pub fn exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = exercise;
        self
    }

    /// Sets the spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the continuously compounded rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the time to expiry in years.
    #[inline]
    pub fn time_to_expiry(mut self, time_to_expiry: f64) -> Self {
        self.time_to_expiry = Some(time_to_expiry);
        self
    }

    /// Sets the annualised volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the strike.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the number of lattice steps.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Builds the specification.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidArgument`] if a mandatory field is
    /// missing or [`OptionSpec::validate`] rejects a value.
    pub fn build(self) -> Result<OptionSpec, PricingError> {
        let spec = OptionSpec {
            option_type: required("option_type", self.option_type)?,
            exercise: self.exercise,
            spot: required("spot", self.spot)?,
            rate: self.rate,
            time_to_expiry: required("time_to_expiry", self.time_to_expiry)?,
            volatility: required("volatility", self.volatility)?,
            strike: required("strike", self.strike)?,
            steps: required("steps", self.steps)?,
        };
        spec.validate()?;
        Ok(spec)
    }
}

fn required<V>(name: &str, value: Option<V>) -> Result<V, PricingError> {
    value.ok_or_else(|| PricingError::invalid(format!("{} must be specified", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> OptionSpecBuilder {
        OptionSpec::builder()
            .option_type(OptionType::Call)
            .spot(100.0)
            .rate(0.05)
            .time_to_expiry(1.0)
            .volatility(0.2)
            .strike(100.0)
            .steps(100)
    }

    #[test]
    fn test_builder_valid() {
        let spec = base().build().unwrap();
        assert_eq!(spec.option_type(), OptionType::Call);
        assert_eq!(spec.exercise(), ExerciseStyle::European);
        assert_eq!(spec.spot(), 100.0);
        assert_eq!(spec.rate(), 0.05);
        assert_eq!(spec.steps(), 100);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = base().steps(0).build().unwrap_err();
        assert_eq!(err, PricingError::invalid("steps must be >= 1"));
    }

    #[test]
    fn test_missing_field_rejected() {
        let result = OptionSpec::builder()
            .option_type(OptionType::Put)
            .spot(100.0)
            .time_to_expiry(1.0)
            .volatility(0.2)
            .steps(10)
            .build();
        match result {
            Err(PricingError::InvalidArgument(msg)) => assert!(msg.contains("strike")),
            other => panic!("expected missing strike, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_inputs_rejected() {
        assert!(base().spot(0.0).build().is_err());
        assert!(base().volatility(-0.2).build().is_err());
        assert!(base().time_to_expiry(0.0).build().is_err());
        assert!(base().strike(-1.0).build().is_err());
        assert!(base().rate(f64::NAN).build().is_err());
    }

    #[test]
    fn test_negative_rate_and_zero_strike_allowed() {
        assert!(base().rate(-0.01).build().is_ok());
        assert!(base().strike(0.0).build().is_ok());
    }

    #[test]
    fn test_with_strike_and_steps() {
        let spec = base().build().unwrap();
        let other = spec.with_strike(90.0).unwrap();
        assert_eq!(other.strike(), 90.0);
        assert_eq!(other.spot(), spec.spot());

        assert_eq!(spec.with_steps(7).unwrap().steps(), 7);
        assert!(spec.with_steps(0).is_err());
        assert!(spec.with_strike(f64::INFINITY).is_err());

        let american = spec.with_exercise(ExerciseStyle::American);
        assert!(american.exercise().is_american());
        assert_eq!(american.strike(), spec.strike());
    }
}
