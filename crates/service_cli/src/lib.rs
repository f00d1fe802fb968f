//! Lattice CLI - command-line harness for the binomial lattice pricer.
//!
//! # Commands
//!
//! - `lattice price` - Price one contract
//! - `lattice ladder` - Price at increasing step counts with latency
//! - `lattice sweep --strikes 225,230,235` - Price across strikes
//! - `lattice check` - Validate configuration and compare against the closed form
//!
//! # Configuration
//!
//! Settings are resolved with the following priority (highest first):
//! 1. Command-line flags
//! 2. Environment (`LATTICE_LOG_LEVEL`)
//! 3. Config file (`lattice.toml` by default)
//! 4. Built-in defaults
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate only parses input, drives
//! `pricer_pricing` and renders output. All pricing lives in the lower layers.

pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};
