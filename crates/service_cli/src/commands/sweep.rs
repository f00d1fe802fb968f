//! Sweep command implementation
//!
//! Prices the configured contract across a list of strikes, optionally on
//! the Rayon thread pool.

use pricer_pricing::lattice::LatticeArena;
use pricer_pricing::sweep::{par_price_strikes, price_strikes};
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::config::LatticeConfig;
use crate::{CliError, Result};

#[derive(Debug, Serialize)]
struct SweepRow {
    strike: f64,
    price: f64,
}

/// Render the sweep command output
pub fn render(
    config: &LatticeConfig,
    strikes: &[f64],
    parallel: bool,
    format: OutputFormat,
) -> Result<String> {
    if strikes.is_empty() {
        return Err(CliError::InvalidArgument(
            "sweep needs at least one strike".to_string(),
        ));
    }
    let spec = config.contract.to_spec()?;
    let dividends = &config.contract.dividends;

    let prices = if parallel {
        par_price_strikes(&spec, dividends, strikes)?
    } else {
        let mut arena = LatticeArena::with_capacity(spec.steps());
        price_strikes(&mut arena, &spec, dividends, strikes)?
    };

    let rows: Vec<SweepRow> = strikes
        .iter()
        .zip(prices)
        .map(|(&strike, price)| SweepRow { strike, price })
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str("┌────────────┬──────────────┐\n");
            out.push_str("│ Strike     │ Price        │\n");
            out.push_str("├────────────┼──────────────┤\n");
            for row in &rows {
                out.push_str(&format!("│ {:>10.4} │ {:>12.6} │\n", row.strike, row.price));
            }
            out.push_str("└────────────┴──────────────┘");
            Ok(out)
        }
    }
}

/// Run the sweep command
pub fn run(
    config: &LatticeConfig,
    strikes: &[f64],
    parallel: bool,
    format: OutputFormat,
) -> Result<()> {
    info!(strikes = strikes.len(), parallel, "Starting strike sweep...");
    println!("{}", render(config, strikes, parallel, format)?);
    info!("Sweep complete");
    Ok(())
}
