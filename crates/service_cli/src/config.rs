//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line flags.
//!
//! Precedence is flags, then `LATTICE_LOG_LEVEL`, then the file, then built-in
//! defaults. `RUST_LOG` is not consulted.
//!
//! ```toml
//! log_level = "info"
//! ladder_steps = [100, 500, 1000]
//! strikes = [230.0, 235.0, 240.0]
//!
//! [contract]
//! option_type = "put"
//! exercise = "american"
//! spot = 235.50
//! rate = 0.0042
//! time_to_expiry = 0.5
//! volatility = 0.25
//! strike = 235.0
//! steps = 1000
//! dividends = [{ amount = 0.25, time_to_ex_div = 0.25 }]
//! ```

use clap::Args;
use pricer_core::types::{Dividend, ExerciseStyle, OptionSpec, OptionType, PricingError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "LATTICE_LOG_LEVEL";

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lattice.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unreadable or malformed config file.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Dividend flag not of the form `amount@time`.
    #[error("Invalid dividend '{0}'. Expected amount@time_to_ex_div, e.g. 0.25@0.25")]
    InvalidDividend(String),

    /// The resolved contract failed validation.
    #[error("Invalid contract: {0}")]
    InvalidContract(#[from] PricingError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, including per-rung pricing events.
    Trace,
    /// Arena growth and per-call summaries.
    Debug,
    /// Command progress.
    Info,
    /// Ill-posed lattices and fallbacks only.
    #[default]
    Warn,
    /// Errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Builds the subscriber filter for this level alone.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.as_filter_str())
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Parses a dividend flag of the form `amount@time_to_ex_div`.
///
/// # Examples
/// ```
/// use service_cli::config::parse_dividend;
///
/// let div = parse_dividend("0.25@0.5").unwrap();
/// assert_eq!(div.amount(), 0.25);
/// assert_eq!(div.time_to_ex_div(), 0.5);
/// assert!(parse_dividend("0.25").is_err());
/// ```
pub fn parse_dividend(s: &str) -> Result<Dividend, ConfigError> {
    let (amount, time) = s
        .split_once('@')
        .ok_or_else(|| ConfigError::InvalidDividend(s.to_string()))?;
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidDividend(s.to_string()))?;
    let time: f64 = time
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidDividend(s.to_string()))?;
    Ok(Dividend::new(amount, time)?)
}

/// Contract priced when no flags override it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Call or put
    pub option_type: OptionType,
    /// European or American
    pub exercise: ExerciseStyle,
    /// Spot price
    pub spot: f64,
    /// Continuously compounded rate
    pub rate: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Strike price
    pub strike: f64,
    /// Lattice steps
    pub steps: usize,
    /// Discrete cash dividends
    pub dividends: Vec<Dividend>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            option_type: OptionType::Put,
            exercise: ExerciseStyle::American,
            spot: 235.50,
            rate: 0.0042,
            time_to_expiry: 0.5,
            volatility: 0.25,
            strike: 235.0,
            steps: 1000,
            dividends: Dividend::new(0.25, 0.25).into_iter().collect(),
        }
    }
}

impl ContractConfig {
    /// Builds the validated contract.
    pub fn to_spec(&self) -> Result<OptionSpec, ConfigError> {
        Ok(OptionSpec::builder()
            .option_type(self.option_type)
            .exercise(self.exercise)
            .spot(self.spot)
            .rate(self.rate)
            .time_to_expiry(self.time_to_expiry)
            .volatility(self.volatility)
            .strike(self.strike)
            .steps(self.steps)
            .build()?)
    }

    /// Applies flag overrides (flags take precedence).
    pub fn merge_with_cli(&mut self, cli: &ContractArgs) {
        if let Some(option_type) = cli.option_type {
            self.option_type = option_type;
        }
        if let Some(exercise) = cli.exercise {
            self.exercise = exercise;
        }
        if let Some(spot) = cli.spot {
            self.spot = spot;
        }
        if let Some(rate) = cli.rate {
            self.rate = rate;
        }
        if let Some(time_to_expiry) = cli.time_to_expiry {
            self.time_to_expiry = time_to_expiry;
        }
        if let Some(volatility) = cli.volatility {
            self.volatility = volatility;
        }
        if let Some(strike) = cli.strike {
            self.strike = strike;
        }
        if let Some(steps) = cli.steps {
            self.steps = steps;
        }
        if cli.no_dividends {
            self.dividends.clear();
        } else if !cli.dividends.is_empty() {
            self.dividends = cli.dividends.clone();
        }
    }
}

/// Contract override flags shared by every pricing command.
#[derive(Args, Debug, Clone, Default)]
pub struct ContractArgs {
    /// Option type (call, put)
    #[arg(long = "type")]
    pub option_type: Option<OptionType>,

    /// Exercise style (european, american)
    #[arg(long)]
    pub exercise: Option<ExerciseStyle>,

    /// Spot price
    #[arg(long)]
    pub spot: Option<f64>,

    /// Continuously compounded rate
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Time to expiry in years
    #[arg(long = "expiry")]
    pub time_to_expiry: Option<f64>,

    /// Annualised volatility
    #[arg(long = "vol")]
    pub volatility: Option<f64>,

    /// Strike price
    #[arg(long)]
    pub strike: Option<f64>,

    /// Number of lattice steps
    #[arg(long)]
    pub steps: Option<usize>,

    /// Dividend as amount@time_to_ex_div (repeatable; replaces configured dividends)
    #[arg(long = "dividend", value_parser = parse_dividend)]
    pub dividends: Vec<Dividend>,

    /// Drop all configured dividends
    #[arg(long, conflicts_with = "dividends")]
    pub no_dividends: bool,
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Default contract
    pub contract: ContractConfig,
    /// Step counts for `ladder`
    pub ladder_steps: Vec<usize>,
    /// Strikes for `sweep`
    pub strikes: Vec<f64>,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            contract: ContractConfig::default(),
            ladder_steps: vec![100, 500, 1_000, 5_000, 10_000, 20_000],
            strikes: vec![215.0, 225.0, 235.0, 245.0, 255.0],
        }
    }
}

/// Where the file layer of the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// No file found; built-in defaults.
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl LatticeConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LatticeConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn from_file_or_default(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        self.contract.merge_with_cli(&cli.contract);
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.contract.to_spec()?;
        if self.ladder_steps.contains(&0) {
            return Err(PricingError::invalid("ladder_steps entries must be >= 1").into());
        }
        Ok(())
    }
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: PathBuf,
    /// Log level override
    pub log_level: Option<String>,
    /// Contract overrides
    pub contract: ContractArgs,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<(LatticeConfig, ConfigSource), ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with_env<F>(
    cli: &CliArgs,
    lookup: F,
) -> Result<(LatticeConfig, ConfigSource), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let (mut config, source) = LatticeConfig::from_file_or_default(&cli.config_file)?;
    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok((config, source))
}
