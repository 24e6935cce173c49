//! Greeks vs. underlying price
//!
//! Each sample re-prices a fresh contract with only the underlying price
//! substituted; strike, time, rate, vol and side stay fixed.

use serde::{Deserialize, Serialize};

use super::{CurvePoint, CurveSeries, SweepRange};
use crate::core::{GreeksResult, OptiResult, OptionContract};
use crate::models::black_scholes;

/// Parallel Greek series sharing one price grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreeksCurves {
    pub delta: CurveSeries,
    pub gamma: CurveSeries,
    pub theta: CurveSeries,
    pub vega: CurveSeries,
    pub rho: CurveSeries,
    /// Spot of the base contract
    pub current_price: f64,
}

impl GreeksCurves {
    /// The sampled underlying prices
    pub fn prices(&self) -> Vec<f64> {
        self.delta.prices()
    }

    /// Series in display order
    pub fn series(&self) -> [&CurveSeries; 5] {
        [&self.delta, &self.gamma, &self.theta, &self.vega, &self.rho]
    }
}

/// Sweep the underlying over `range`, evaluating the engine at each sample
pub fn greeks_curves(contract: &OptionContract, range: &SweepRange) -> OptiResult<GreeksCurves> {
    let grid = range.grid(contract.underlying_price())?;

    let samples = grid
        .iter()
        .map(|&p| {
            let bumped = contract.with_underlying_price(p)?;
            Ok((p, black_scholes::evaluate(&bumped)))
        })
        .collect::<OptiResult<Vec<(f64, GreeksResult)>>>()?;

    tracing::debug!(
        "Greeks sweep for {} K={:.2}: {} samples",
        contract.option_type(),
        contract.strike_price(),
        samples.len()
    );

    let series = |label: &str, pick: fn(&GreeksResult) -> f64| CurveSeries {
        label: label.to_string(),
        points: samples
            .iter()
            .map(|(p, g)| CurvePoint {
                underlying_price: *p,
                value: pick(g),
            })
            .collect(),
    };

    Ok(GreeksCurves {
        delta: series("Delta", |g| g.delta),
        gamma: series("Gamma", |g| g.gamma),
        theta: series("Theta", |g| g.theta),
        vega: series("Vega", |g| g.vega),
        rho: series("Rho", |g| g.rho),
        current_price: contract.underlying_price(),
    })
}

/// Greeks curves with the default ±20%, 50-point sweep
pub fn default_greeks_curves(contract: &OptionContract) -> OptiResult<GreeksCurves> {
    greeks_curves(contract, &SweepRange::greeks_default())
}
