//! Black-Scholes under the escrowed dividend model.
//!
//! The European limit of the lattice: discount every dividend going ex
//! before expiry back to today, subtract it from spot and apply the plain
//! Black-Scholes formula to the remainder.
//!
//! ```text
//! S* = S - Σ D_i exp(-r t_i)        (t_i < T)
//! d₁ = (ln(S*/K) + (r + σ²/2)T) / (σ√T),  d₂ = d₁ - σ√T
//! C  = S* N(d₁) - K e^(-rT) N(d₂)
//! P  = K e^(-rT) N(-d₂) - S* N(-d₁)
//! ```

use num_traits::Float;
use pricer_core::math::norm_cdf;
use pricer_core::types::{Dividend, OptionType, PricingError};

fn lift<T: Float>(value: f64, name: &str) -> Result<T, PricingError> {
    T::from(value)
        .ok_or_else(|| PricingError::invalid(format!("{name} is not representable: {value}")))
}

fn require_positive<T: Float>(value: T, name: &str) -> Result<(), PricingError> {
    if value.is_finite() && value > T::zero() {
        Ok(())
    } else {
        Err(PricingError::invalid(format!(
            "{name} must be finite and > 0, got {}",
            value.to_f64().unwrap_or(f64::NAN)
        )))
    }
}

/// Present value at time zero of the dividends going ex before `time_to_expiry`.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::Dividend;
/// use pricer_pricing::analytical::escrowed_dividend_pv;
///
/// let divs = [Dividend::new(2.0, 0.5).unwrap(), Dividend::new(2.0, 1.5).unwrap()];
/// let pv: f64 = escrowed_dividend_pv(0.0, 1.0, &divs).unwrap();
/// assert_eq!(pv, 2.0);
/// ```
pub fn escrowed_dividend_pv<T: Float>(
    rate: T,
    time_to_expiry: T,
    dividends: &[Dividend],
) -> Result<T, PricingError> {
    let expiry = time_to_expiry.to_f64().unwrap_or(f64::NAN);
    dividends
        .iter()
        .filter(|d| d.is_before(expiry))
        .try_fold(T::zero(), |acc, d| {
            let amount: T = lift(d.amount(), "dividend amount")?;
            let t_ex: T = lift(d.time_to_ex_div(), "ex-dividend time")?;
            Ok(acc + amount * (-rate * t_ex).exp())
        })
}

/// Prices a European option under the escrowed dividend model.
///
/// Used as the continuous-time reference the lattice converges to.
///
/// # Errors
///
/// [`PricingError::InvalidArgument`] if spot, expiry or volatility is not
/// finite and positive, if the strike is negative, or if the dividends'
/// present value consumes the whole spot.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{Dividend, OptionType};
/// use pricer_pricing::analytical::escrowed_black_scholes;
///
/// let divs = [Dividend::new(2.06, 3.5 / 12.0).unwrap()];
/// let put: f64 = escrowed_black_scholes(OptionType::Put, 52.0, 0.10, 2.5, &divs, 0.40, 50.0).unwrap();
/// assert!((put - 6.324).abs() < 1e-3);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn escrowed_black_scholes<T: Float>(
    option_type: OptionType,
    spot: T,
    rate: T,
    time_to_expiry: T,
    dividends: &[Dividend],
    volatility: T,
    strike: T,
) -> Result<T, PricingError> {
    require_positive(spot, "spot")?;
    require_positive(time_to_expiry, "time_to_expiry")?;
    require_positive(volatility, "volatility")?;
    if !(strike.is_finite() && strike >= T::zero()) {
        return Err(PricingError::invalid("strike must be finite and >= 0"));
    }

    let escrowed_spot = spot - escrowed_dividend_pv(rate, time_to_expiry, dividends)?;
    require_positive(escrowed_spot, "spot net of escrowed dividends")?;

    let half: T = lift(0.5, "0.5")?;
    let sqrt_t = time_to_expiry.sqrt();
    let vol_sqrt_t = volatility * sqrt_t;
    let discounted_strike = strike * (-rate * time_to_expiry).exp();

    let d1 = ((escrowed_spot / strike).ln() + (rate + half * volatility * volatility) * time_to_expiry)
        / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    let value = match option_type {
        OptionType::Call => escrowed_spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionType::Put => discounted_strike * norm_cdf(-d2) - escrowed_spot * norm_cdf(-d1),
    };
    Ok(value.max(T::zero()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_dividends_matches_plain_black_scholes() {
        // Hull's ATM reference: S=K=100, r=5%, σ=20%, T=1
        let call = escrowed_black_scholes(OptionType::Call, 100.0, 0.05, 1.0, &[], 0.2, 100.0)
            .unwrap();
        let put =
            escrowed_black_scholes(OptionType::Put, 100.0, 0.05, 1.0, &[], 0.2, 100.0).unwrap();
        assert_relative_eq!(call, 10.4506, epsilon = 1e-4);
        assert_relative_eq!(put, 5.5735, epsilon = 1e-4);
    }

    #[test]
    fn test_put_call_parity_with_dividends() {
        let divs = [
            Dividend::new(1.0, 0.25).unwrap(),
            Dividend::new(1.0, 0.75).unwrap(),
        ];
        let (s, r, t, k) = (80.0_f64, 0.03, 1.0, 75.0);
        let call = escrowed_black_scholes(OptionType::Call, s, r, t, &divs, 0.3, k).unwrap();
        let put = escrowed_black_scholes(OptionType::Put, s, r, t, &divs, 0.3, k).unwrap();
        let pv = escrowed_dividend_pv(r, t, &divs).unwrap();
        assert_relative_eq!(call - put, s - pv - k * (-r * t).exp(), epsilon = 1e-6);
    }

    #[test]
    fn test_dividend_lowers_call_raises_put() {
        let divs = [Dividend::new(3.0, 0.5).unwrap()];
        let call_plain =
            escrowed_black_scholes(OptionType::Call, 100.0, 0.05, 1.0, &[], 0.2, 100.0).unwrap();
        let call_div =
            escrowed_black_scholes(OptionType::Call, 100.0, 0.05, 1.0, &divs, 0.2, 100.0).unwrap();
        let put_plain =
            escrowed_black_scholes(OptionType::Put, 100.0, 0.05, 1.0, &[], 0.2, 100.0).unwrap();
        let put_div =
            escrowed_black_scholes(OptionType::Put, 100.0, 0.05, 1.0, &divs, 0.2, 100.0).unwrap();
        assert!(call_div < call_plain);
        assert!(put_div > put_plain);
    }

    #[test]
    fn test_generic_over_f32() {
        let call: f32 =
            escrowed_black_scholes(OptionType::Call, 100.0_f32, 0.05, 1.0, &[], 0.2, 100.0)
                .unwrap();
        assert!((call - 10.4506).abs() < 1e-3);
    }

    #[test]
    fn test_dividends_exceeding_spot_rejected() {
        let divs = [Dividend::new(150.0, 0.5).unwrap()];
        assert!(
            escrowed_black_scholes(OptionType::Put, 100.0, 0.0, 1.0, &divs, 0.2, 100.0).is_err()
        );
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(escrowed_black_scholes(OptionType::Call, 100.0, 0.05, 0.0, &[], 0.2, 100.0).is_err());
        assert!(escrowed_black_scholes(OptionType::Call, 100.0, 0.05, 1.0, &[], 0.0, 100.0).is_err());
        assert!(escrowed_black_scholes(OptionType::Call, -1.0, 0.05, 1.0, &[], 0.2, 100.0).is_err());
        assert!(escrowed_black_scholes(OptionType::Call, 100.0, 0.05, 1.0, &[], 0.2, -5.0).is_err());
    }
}
