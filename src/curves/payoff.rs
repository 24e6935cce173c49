//! Payoff diagram at expiry
//!
//! P&L of a long option position held to expiry, priced at a premium taken
//! from one engine evaluation (not re-priced per sample).

use serde::{Deserialize, Serialize};

use super::{CurveSeries, SweepRange};
use crate::core::{OptiResult, OptionContract};

/// Payoff and intrinsic value across a price sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffDiagram {
    /// max(0, ±(p - K)) - premium
    pub payoff: CurveSeries,
    /// max(0, ±(p - K))
    pub intrinsic: CurveSeries,
    /// Zero-P&L reference line
    pub break_even: f64,
    /// Spot at the time of pricing
    pub current_price: f64,
    /// Premium paid, snapshot of the engine price
    pub premium: f64,
}

/// Sweep the underlying over `range` and compute expiry payoff and intrinsic value
pub fn payoff_diagram(
    contract: &OptionContract,
    premium: f64,
    range: &SweepRange,
) -> OptiResult<PayoffDiagram> {
    let spot = contract.underlying_price();
    let strike = contract.strike_price();
    let option_type = contract.option_type();
    let grid = range.grid(spot)?;

    tracing::debug!(
        "Payoff sweep for {} K={:.2}: {} points over [{:.2}, {:.2}]",
        option_type,
        strike,
        grid.len(),
        grid[0],
        grid[grid.len() - 1]
    );

    let label = format!("{} Payoff", option_type);
    let payoff = CurveSeries::from_grid(label, &grid, |p| {
        option_type.intrinsic(p, strike) - premium
    });
    let intrinsic = CurveSeries::from_grid("Intrinsic Value", &grid, |p| {
        option_type.intrinsic(p, strike)
    });

    Ok(PayoffDiagram {
        payoff,
        intrinsic,
        break_even: 0.0,
        current_price: spot,
        premium,
    })
}

/// Payoff diagram with the default ±30%, 100-point sweep
pub fn default_payoff_diagram(contract: &OptionContract, premium: f64) -> OptiResult<PayoffDiagram> {
    payoff_diagram(contract, premium, &SweepRange::payoff_default())
}
