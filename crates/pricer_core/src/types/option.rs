//! Option type and exercise style tags.
//!
//! Both tags are closed enums, so an unrecognised combination cannot be
//! constructed in Rust code. String input (CLI flags, config files) is
//! validated once at the boundary through [`FromStr`], which rejects unknown
//! tags with [`PricingError::InvalidArgument`].

use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
///
/// let put: OptionType = "put".parse().unwrap();
/// assert_eq!(put, OptionType::Put);
/// assert_eq!(put.intrinsic(90.0, 100.0), 10.0);
/// assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
///
/// assert!("straddle".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Exercise value `max(S - K, 0)` for a call, `max(K - S, 0)` for a put.
    #[inline(always)]
    pub fn intrinsic(self, underlying: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (underlying - strike).max(0.0),
            OptionType::Put => (strike - underlying).max(0.0),
        }
    }

    /// Lowercase tag used in config files and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(PricingError::invalid(format!(
                "must be call or put, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When the holder may exercise.
///
/// Only the two styles the lattice engine supports are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    #[default]
    European,
    /// Exercise at any lattice node up to expiry.
    American,
}

impl ExerciseStyle {
    /// Returns whether early exercise is checked during backward induction.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Lowercase tag used in config files and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "european",
            ExerciseStyle::American => "american",
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "european" | "eu" => Ok(ExerciseStyle::European),
            "american" | "am" => Ok(ExerciseStyle::American),
            other => Err(PricingError::invalid(format!(
                "must be European or American, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
