//! Ladder command implementation
//!
//! Prices the configured contract at increasing step counts, reporting the
//! price and wall-clock latency of each rung.

use pricer_pricing::lattice::LatticeArena;
use pricer_pricing::sweep::{convergence_ladder, ConvergencePoint};
use serde::Serialize;
use tracing::info;

use super::OutputFormat;
use crate::config::LatticeConfig;
use crate::{CliError, Result};

#[derive(Debug, Serialize)]
struct LadderRow<'a> {
    #[serde(flatten)]
    point: &'a ConvergencePoint,
    latency_ms: f64,
}

/// Render the ladder command output
pub fn render(config: &LatticeConfig, steps: &[usize], format: OutputFormat) -> Result<String> {
    if steps.is_empty() {
        return Err(CliError::InvalidArgument(
            "ladder needs at least one step count".to_string(),
        ));
    }
    let spec = config.contract.to_spec()?;

    let max_steps = steps.iter().copied().max().unwrap_or(1);
    let mut arena = LatticeArena::with_capacity(max_steps);
    let points = convergence_ladder(&mut arena, &spec, &config.contract.dividends, steps)?;

    match format {
        OutputFormat::Json => {
            let rows: Vec<LadderRow<'_>> = points
                .iter()
                .map(|point| LadderRow {
                    point,
                    latency_ms: point.elapsed_micros() / 1e3,
                })
                .collect();
            Ok(serde_json::to_string_pretty(&rows)?)
        }
        OutputFormat::Table => {
            let mut out = format!("{:<10}{:<15}{:<15}\n", "Steps (N)", "Price", "Latency (ms)");
            out.push_str(&"-".repeat(40));
            for point in &points {
                out.push_str(&format!(
                    "\n{:<10}{:<15.6}{:<15.6}",
                    point.steps,
                    point.price,
                    point.elapsed_micros() / 1e3
                ));
            }
            Ok(out)
        }
    }
}

/// Run the ladder command
pub fn run(config: &LatticeConfig, steps: &[usize], format: OutputFormat) -> Result<()> {
    info!(rungs = steps.len(), "Starting convergence ladder...");
    println!("{}", render(config, steps, format)?);
    info!("Ladder complete");
    Ok(())
}
