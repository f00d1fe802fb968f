//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands render their
//! output to a `String` so it can be tested without capturing stdout.

use std::fmt;
use std::str::FromStr;

use crate::CliError;

pub mod check;
pub mod ladder;
pub mod price;
pub mod sweep;

/// Output format shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Two-column box table.
pub(crate) fn key_value_table(rows: &[(&str, String)]) -> String {
    let mut out = String::new();
    out.push_str("┌──────────────────────┬──────────────────┐\n");
    for (key, value) in rows {
        out.push_str(&format!("│ {:<20} │ {:>16} │\n", key, value));
    }
    out.push_str("└──────────────────────┴──────────────────┘");
    out
}
