//! Standard normal distribution functions.
//!
//! Generic over `T: Float` so the closed-form reference prices can be
//! evaluated in `f32` or `f64`.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function.
///
/// Abramowitz and Stegun 7.1.26, maximum absolute error 1.5e-7.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        T::from(2.0).unwrap() - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = erfc(-x / √2) / 2, accurate to about 1e-7.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap();
    T::from(0.5).unwrap() * erfc_approx(-x / sqrt_2)
}

/// Standard normal probability density function.
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    frac_1_sqrt_2pi * (-(x * x) / T::from(2.0).unwrap()).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_norm_cdf_known_values() {
        assert_abs_diff_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(norm_cdf(1.0_f64), 0.841_344_746_068_543, epsilon = 2e-7);
        assert_abs_diff_eq!(norm_cdf(-1.96_f64), 0.024_997_895_148_220, epsilon = 2e-7);
    }

    #[test]
    fn test_norm_pdf_known_values() {
        assert_abs_diff_eq!(norm_pdf(0.0_f64), 0.398_942_280_4, epsilon = 1e-9);
        assert_abs_diff_eq!(norm_pdf(1.0_f64), 0.241_970_724_5, epsilon = 1e-9);
    }

    #[test]
    fn test_f32_support() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn test_norm_cdf_symmetry(x in -8.0_f64..8.0) {
            let sum = norm_cdf(x) + norm_cdf(-x);
            prop_assert!((sum - 1.0).abs() < 1e-8);
        }

        #[test]
        fn test_norm_cdf_monotone(x in -8.0_f64..8.0, dx in 1e-3_f64..1.0) {
            prop_assert!(norm_cdf(x + dx) >= norm_cdf(x));
        }
    }
}
