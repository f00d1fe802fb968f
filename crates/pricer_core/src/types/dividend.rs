//! Discrete cash dividends.
//!
//! A [`Dividend`] is an immutable `(amount, ex-dividend time)` pair owned by
//! the caller. Pricers only read dividends for the duration of one call.

use super::error::PricingError;

/// Discrete cash dividend with a known ex-dividend time.
///
/// Times share the unit of the option's time to expiry (years throughout
/// this workspace).
///
/// # Examples
/// ```
/// use pricer_core::types::Dividend;
///
/// let div = Dividend::new(2.06, 3.5 / 12.0).unwrap();
/// assert_eq!(div.amount(), 2.06);
/// assert!(div.is_before(2.5));
///
/// // Amount must be strictly positive
/// assert!(Dividend::new(0.0, 0.25).is_err());
/// // Ex-dividend time must not be negative
/// assert!(Dividend::new(1.0, -0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "DividendRecord", into = "DividendRecord")
)]
pub struct Dividend {
    amount: f64,
    time_to_ex_div: f64,
}

impl Dividend {
    /// Creates a validated dividend.
    ///
    /// # Arguments
    /// * `amount` - Cash amount (finite, strictly positive)
    /// * `time_to_ex_div` - Time until the underlying goes ex-dividend (finite, >= 0)
    ///
    /// # Errors
    /// [`PricingError::InvalidArgument`] if either field is out of range.
    pub fn new(amount: f64, time_to_ex_div: f64) -> Result<Self, PricingError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PricingError::invalid(format!(
                "dividend amount must be finite and > 0, got {}",
                amount
            )));
        }
        if !time_to_ex_div.is_finite() || time_to_ex_div < 0.0 {
            return Err(PricingError::invalid(format!(
                "time to ex-dividend must be finite and >= 0, got {}",
                time_to_ex_div
            )));
        }
        Ok(Self {
            amount,
            time_to_ex_div,
        })
    }

    /// Returns the cash amount.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the time to the ex-dividend date.
    #[inline]
    pub fn time_to_ex_div(&self) -> f64 {
        self.time_to_ex_div
    }

    /// Returns whether the stock goes ex strictly before `time_to_expiry`.
    ///
    /// Dividends going ex on or after expiry do not affect the price path
    /// during the option's life under the escrowed model.
    #[inline]
    pub fn is_before(&self, time_to_expiry: f64) -> bool {
        self.time_to_ex_div < time_to_expiry
    }

    /// Value of the dividend discounted from its ex-date back to `time`.
    #[inline]
    pub fn discounted_to(&self, time: f64, rate: f64) -> f64 {
        self.amount * (-rate * (self.time_to_ex_div - time)).exp()
    }
}

/// Unvalidated wire form of [`Dividend`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct DividendRecord {
    amount: f64,
    time_to_ex_div: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<DividendRecord> for Dividend {
    type Error = PricingError;

    fn try_from(record: DividendRecord) -> Result<Self, Self::Error> {
        Dividend::new(record.amount, record.time_to_ex_div)
    }
}

#[cfg(feature = "serde")]
impl From<Dividend> for DividendRecord {
    fn from(div: Dividend) -> Self {
        DividendRecord {
            amount: div.amount,
            time_to_ex_div: div.time_to_ex_div,
        }
    }
}
