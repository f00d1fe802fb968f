//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that the types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::dividend::Dividend;
    use pricer_core::types::error::PricingError;
    use pricer_core::types::option::{ExerciseStyle, OptionType};
    use pricer_core::types::spec::OptionSpec;

    let div = Dividend::new(1.0, 0.5).unwrap();
    assert_eq!(div.amount(), 1.0);

    let spec = OptionSpec::builder()
        .option_type(OptionType::Call)
        .exercise(ExerciseStyle::European)
        .spot(100.0)
        .time_to_expiry(1.0)
        .volatility(0.2)
        .strike(100.0)
        .steps(10)
        .build()
        .unwrap();
    assert_eq!(spec.rate(), 0.0);

    let err: PricingError = "swaption".parse::<OptionType>().unwrap_err();
    assert!(err.is_invalid_argument());
}

/// Test module-level re-exports.
#[test]
fn test_types_reexports() {
    use pricer_core::types::{
        Dividend, ExerciseStyle, OptionSpec, OptionSpecBuilder, OptionType, PricingError,
    };

    let _builder: OptionSpecBuilder = OptionSpec::builder();
    let _ = ExerciseStyle::American;
    let _ = OptionType::Put;
    assert!(matches!(
        Dividend::new(0.0, 1.0),
        Err(PricingError::InvalidArgument(_))
    ));
}

/// Test that math helpers are accessible via absolute path.
#[test]
fn test_math_module_exports() {
    use pricer_core::math::distributions::{norm_cdf, norm_pdf};
    use pricer_core::math::norm_cdf as reexported_cdf;

    assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
    assert!(norm_pdf(0.0_f64) > 0.39);
    assert_eq!(reexported_cdf(1.0_f64), norm_cdf(1.0_f64));
}
