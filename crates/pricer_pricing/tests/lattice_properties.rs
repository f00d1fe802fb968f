//! No-arbitrage and monotonicity properties of the lattice.
//!
//! Property tests keep `σ √Δt` comfortably above `r Δt`, so the risk-neutral
//! probabilities stay inside (0, 1) for every generated contract.

use approx::assert_relative_eq;
use pricer_core::types::{Dividend, ExerciseStyle, OptionSpec, OptionType};
use pricer_pricing::lattice::{price_with_arena, LatticeArena};
use proptest::prelude::*;

#[allow(clippy::too_many_arguments)]
fn build(
    option_type: OptionType,
    exercise: ExerciseStyle,
    spot: f64,
    rate: f64,
    time_to_expiry: f64,
    volatility: f64,
    strike: f64,
    steps: usize,
) -> OptionSpec {
    OptionSpec::builder()
        .option_type(option_type)
        .exercise(exercise)
        .spot(spot)
        .rate(rate)
        .time_to_expiry(time_to_expiry)
        .volatility(volatility)
        .strike(strike)
        .steps(steps)
        .build()
        .unwrap()
}

fn option_type_strategy() -> impl Strategy<Value = OptionType> {
    prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
}

// ============================================================================
// Deterministic Bounds
// ============================================================================

#[test]
fn test_deep_itm_european_call_is_forward_intrinsic() {
    // σ tiny: every terminal node stays in the money
    let divs = [Dividend::new(1.0, 0.5).unwrap()];
    let spec = build(
        OptionType::Call,
        ExerciseStyle::European,
        100.0,
        0.05,
        1.0,
        0.01,
        50.0,
        100,
    );
    let mut arena = LatticeArena::new();
    let value = price_with_arena(&mut arena, &spec, &divs).unwrap();

    let escrowed_spot = 100.0 - (-0.05_f64 * 0.5).exp();
    assert_relative_eq!(value, escrowed_spot - 50.0 * (-0.05_f64).exp(), epsilon = 1e-9);
}

#[test]
fn test_deep_itm_european_put_is_forward_intrinsic() {
    let divs = [Dividend::new(1.0, 0.5).unwrap()];
    let spec = build(
        OptionType::Put,
        ExerciseStyle::European,
        100.0,
        0.05,
        1.0,
        0.01,
        150.0,
        100,
    );
    let mut arena = LatticeArena::new();
    let value = price_with_arena(&mut arena, &spec, &divs).unwrap();

    let escrowed_spot = 100.0 - (-0.05_f64 * 0.5).exp();
    assert_relative_eq!(value, 150.0 * (-0.05_f64).exp() - escrowed_spot, epsilon = 1e-9);
}

#[test]
fn test_american_call_without_dividends_is_european() {
    let mut arena = LatticeArena::new();
    let am = build(
        OptionType::Call,
        ExerciseStyle::American,
        100.0,
        0.05,
        1.0,
        0.3,
        90.0,
        500,
    );
    let eu = build(
        OptionType::Call,
        ExerciseStyle::European,
        100.0,
        0.05,
        1.0,
        0.3,
        90.0,
        500,
    );
    let am_value = price_with_arena(&mut arena, &am, &[]).unwrap();
    let eu_value = price_with_arena(&mut arena, &eu, &[]).unwrap();
    assert_relative_eq!(am_value, eu_value, epsilon = 1e-10);
}

#[test]
fn test_large_dividend_creates_call_exercise_premium() {
    let divs = [Dividend::new(5.0, 0.5).unwrap()];
    let mut arena = LatticeArena::new();
    let am = build(
        OptionType::Call,
        ExerciseStyle::American,
        100.0,
        0.05,
        1.0,
        0.3,
        90.0,
        500,
    );
    let eu = build(
        OptionType::Call,
        ExerciseStyle::European,
        100.0,
        0.05,
        1.0,
        0.3,
        90.0,
        500,
    );
    let am_value = price_with_arena(&mut arena, &am, &divs).unwrap();
    let eu_value = price_with_arena(&mut arena, &eu, &divs).unwrap();
    assert!(am_value - eu_value > 0.5);
}

#[test]
fn test_result_independent_of_prior_calls() {
    let divs = [Dividend::new(2.06, 3.5 / 12.0).unwrap()];
    let small = build(
        OptionType::Put,
        ExerciseStyle::American,
        52.0,
        0.10,
        2.5,
        0.40,
        50.0,
        100,
    );
    let large = small.with_steps(3000).unwrap();

    let mut fresh = LatticeArena::new();
    let expected = price_with_arena(&mut fresh, &small, &divs).unwrap();

    // A larger call leaves non-zero data in the arena tail
    let mut reused = LatticeArena::new();
    price_with_arena(&mut reused, &large, &divs).unwrap();
    let after_large = price_with_arena(&mut reused, &small, &divs).unwrap();
    let after_call = price_with_arena(&mut reused, &small.with_strike(10.0).unwrap(), &[]).unwrap();

    assert_eq!(expected.to_bits(), after_large.to_bits());
    assert!(after_call >= 0.0);
    assert_eq!(
        expected.to_bits(),
        price_with_arena(&mut reused, &small, &divs).unwrap().to_bits()
    );
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_american_dominates_european(
        option_type in option_type_strategy(),
        spot in 20.0..200.0_f64,
        strike in 20.0..200.0_f64,
        rate in 0.0..0.1_f64,
        time_to_expiry in 0.1..2.0_f64,
        volatility in 0.1..0.6_f64,
        steps in 10usize..200,
        amount in 0.1..3.0_f64,
        ex_fraction in 0.0..1.2_f64,
    ) {
        let divs = [Dividend::new(amount, ex_fraction * time_to_expiry).unwrap()];
        let am = build(option_type, ExerciseStyle::American, spot, rate, time_to_expiry, volatility, strike, steps);
        let eu = build(option_type, ExerciseStyle::European, spot, rate, time_to_expiry, volatility, strike, steps);

        let mut arena = LatticeArena::new();
        let am_value = price_with_arena(&mut arena, &am, &divs).unwrap();
        let eu_value = price_with_arena(&mut arena, &eu, &divs).unwrap();

        prop_assert!(eu_value >= 0.0);
        prop_assert!(am_value >= eu_value, "american {} < european {}", am_value, eu_value);
    }

    #[test]
    fn prop_american_at_least_immediate_exercise(
        option_type in option_type_strategy(),
        spot in 20.0..200.0_f64,
        strike in 20.0..200.0_f64,
        rate in 0.0..0.1_f64,
        volatility in 0.1..0.6_f64,
        steps in 10usize..200,
    ) {
        let spec = build(option_type, ExerciseStyle::American, spot, rate, 1.0, volatility, strike, steps);
        let mut arena = LatticeArena::new();
        let value = price_with_arena(&mut arena, &spec, &[]).unwrap();

        // Root node reconstructs spot as spot * u^n * d^n
        let intrinsic = option_type.intrinsic(spot, strike);
        prop_assert!(value >= intrinsic - 1e-9 * spot.max(strike));
    }

    #[test]
    fn prop_monotone_in_strike(
        option_type in option_type_strategy(),
        exercise in prop_oneof![Just(ExerciseStyle::European), Just(ExerciseStyle::American)],
        spot in 50.0..150.0_f64,
        strike in 50.0..150.0_f64,
        bump in 0.5..20.0_f64,
        rate in 0.0..0.1_f64,
        volatility in 0.1..0.6_f64,
        steps in 10usize..200,
    ) {
        let divs = [Dividend::new(1.0, 0.3).unwrap()];
        let low = build(option_type, exercise, spot, rate, 1.0, volatility, strike, steps);
        let high = low.with_strike(strike + bump).unwrap();

        let mut arena = LatticeArena::new();
        let low_value = price_with_arena(&mut arena, &low, &divs).unwrap();
        let high_value = price_with_arena(&mut arena, &high, &divs).unwrap();

        match option_type {
            OptionType::Call => prop_assert!(high_value <= low_value),
            OptionType::Put => prop_assert!(high_value >= low_value),
        }
    }
}
