//! Price command implementation
//!
//! Prices the configured contract once on the binomial lattice.

use pricer_core::types::{Dividend, OptionSpec};
use pricer_pricing::lattice::BinomialPricer;
use serde::Serialize;
use tracing::info;

use super::{key_value_table, OutputFormat};
use crate::config::LatticeConfig;
use crate::Result;

#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    contract: &'a OptionSpec,
    dividends: &'a [Dividend],
    price: f64,
}

/// Render the price command output
pub fn render(config: &LatticeConfig, format: OutputFormat) -> Result<String> {
    let spec = config.contract.to_spec()?;
    let dividends = &config.contract.dividends;

    let price = BinomialPricer::new().price(&spec, dividends)?;

    let report = PriceReport {
        contract: &spec,
        dividends,
        price,
    };

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => Ok(key_value_table(&[
            ("Type", spec.option_type().to_string()),
            ("Exercise", spec.exercise().to_string()),
            ("Spot", format!("{:.4}", spec.spot())),
            ("Strike", format!("{:.4}", spec.strike())),
            ("Rate", format!("{:.6}", spec.rate())),
            ("Expiry (y)", format!("{:.4}", spec.time_to_expiry())),
            ("Volatility", format!("{:.4}", spec.volatility())),
            ("Dividends", dividends.len().to_string()),
            ("Steps", spec.steps().to_string()),
            ("Price", format!("{:.6}", price)),
        ])),
    }
}

/// Run the price command
pub fn run(config: &LatticeConfig, format: OutputFormat) -> Result<()> {
    info!(
        option_type = %config.contract.option_type,
        exercise = %config.contract.exercise,
        steps = config.contract.steps,
        "Starting pricing..."
    );
    println!("{}", render(config, format)?);
    info!("Pricing complete");
    Ok(())
}
