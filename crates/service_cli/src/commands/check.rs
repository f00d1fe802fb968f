//! Check command implementation
//!
//! Validates the resolved configuration and runs a quick sanity check of the
//! lattice: the European price against escrowed Black-Scholes, and the
//! early-exercise premium of the American contract.

use pricer_core::types::ExerciseStyle;
use pricer_pricing::analytical::escrowed_black_scholes;
use pricer_pricing::lattice::{BinomialPricer, LatticeParams};
use serde::Serialize;
use tracing::{info, warn};

use super::{key_value_table, OutputFormat};
use crate::config::{ConfigSource, LatticeConfig};
use crate::Result;

/// Relative gap to the closed form above which the check is flagged.
const GAP_TOLERANCE: f64 = 0.01;

#[derive(Debug, Serialize)]
struct CheckReport {
    config_source: String,
    log_level: String,
    arbitrage_free: bool,
    prob_up: f64,
    steps: usize,
    european_lattice: f64,
    european_closed_form: f64,
    relative_gap: f64,
    american_lattice: f64,
    early_exercise_premium: f64,
    ok: bool,
}

/// Render the check command output
pub fn render(
    config: &LatticeConfig,
    source: &ConfigSource,
    format: OutputFormat,
) -> Result<String> {
    let spec = config.contract.to_spec()?;
    let dividends = &config.contract.dividends;
    let params = LatticeParams::from_spec(&spec)?;

    let european = spec.with_exercise(ExerciseStyle::European);
    let american = spec.with_exercise(ExerciseStyle::American);

    let mut pricer = BinomialPricer::new();
    let european_lattice = pricer.price(&european, dividends)?;
    let american_lattice = pricer.price(&american, dividends)?;
    let european_closed_form = escrowed_black_scholes(
        spec.option_type(),
        spec.spot(),
        spec.rate(),
        spec.time_to_expiry(),
        dividends,
        spec.volatility(),
        spec.strike(),
    )?;

    let relative_gap =
        (european_lattice - european_closed_form).abs() / european_closed_form.abs().max(1e-8);
    let ok = params.is_arbitrage_free() && relative_gap < GAP_TOLERANCE;
    if !ok {
        warn!(relative_gap, arbitrage_free = params.is_arbitrage_free(), "check failed");
    }

    let report = CheckReport {
        config_source: source.to_string(),
        log_level: config.log_level.to_string(),
        arbitrage_free: params.is_arbitrage_free(),
        prob_up: params.prob_up,
        steps: spec.steps(),
        european_lattice,
        european_closed_form,
        relative_gap,
        american_lattice,
        early_exercise_premium: american_lattice - european_lattice,
        ok,
    };

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => Ok(key_value_table(&[
            ("Config", report.config_source.clone()),
            ("Log level", report.log_level.clone()),
            ("Arbitrage-free", report.arbitrage_free.to_string()),
            ("Prob up", format!("{:.6}", report.prob_up)),
            ("Steps", report.steps.to_string()),
            ("European (lattice)", format!("{:.6}", report.european_lattice)),
            ("European (closed)", format!("{:.6}", report.european_closed_form)),
            ("Relative gap", format!("{:.2e}", report.relative_gap)),
            ("American (lattice)", format!("{:.6}", report.american_lattice)),
            ("Exercise premium", format!("{:.6}", report.early_exercise_premium)),
            ("Status", if report.ok { "OK" } else { "FAIL" }.to_string()),
        ])),
    }
}

/// Run the check command
pub fn run(config: &LatticeConfig, source: &ConfigSource, format: OutputFormat) -> Result<()> {
    info!(source = %source, "Checking configuration...");
    println!("{}", render(config, source, format)?);
    info!("Check complete");
    Ok(())
}
