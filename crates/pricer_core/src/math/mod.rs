//! Mathematical helpers shared by the pricing layers.
//!
//! - `distributions`: Standard normal CDF/PDF used by closed-form references

pub mod distributions;

pub use distributions::{norm_cdf, norm_pdf};
