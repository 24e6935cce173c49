//! Market data inputs
//!
//! Handles:
//! - The market data source boundary and snapshots
//! - Historical volatility from closing prices

pub mod market;
pub mod volatility;

pub use market::*;
pub use volatility::*;
