//! Option analysis pipeline
//!
//! Orchestrates market inputs, the pricing engine and curve generation:
//! - `config`: day count, ATM tolerance, input limits, sweep ranges
//! - `analysis`: request -> contract -> valuation + curves

pub mod config;
pub mod analysis;

pub use config::*;
pub use analysis::*;
