//! Historical volatility estimation
//!
//! Annualized standard deviation of simple daily returns, the estimate the
//! pricing engine consumes as σ.

use serde::{Deserialize, Serialize};

use crate::core::{OptiError, OptiResult};

/// Estimator settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityConfig {
    /// Return periods per year used to annualize (252 trading days)
    pub periods_per_year: f64,
    /// Minimum number of closes required
    pub min_observations: usize,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            periods_per_year: 252.0,
            min_observations: 10,
        }
    }
}

/// Simple returns p[i] / p[i-1] - 1
pub fn simple_returns(closes: &[f64]) -> OptiResult<Vec<f64>> {
    if let Some(bad) = closes.iter().find(|c| !(c.is_finite() && **c > 0.0)) {
        return Err(OptiError::invalid_parameter(format!(
            "closing prices must be positive and finite, got {}",
            bad
        )));
    }
    Ok(closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect())
}

/// Sample standard deviation (n - 1 denominator)
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(var.sqrt())
}

/// Annualized historical volatility from a series of closing prices
pub fn historical_volatility(closes: &[f64], config: &VolatilityConfig) -> OptiResult<f64> {
    if closes.len() < config.min_observations.max(3) {
        return Err(OptiError::data_unavailable(format!(
            "need at least {} closing prices for volatility, got {}",
            config.min_observations.max(3),
            closes.len()
        )));
    }
    if !(config.periods_per_year.is_finite() && config.periods_per_year > 0.0) {
        return Err(OptiError::config(format!(
            "periods_per_year must be positive, got {}",
            config.periods_per_year
        )));
    }

    let returns = simple_returns(closes)?;
    let daily = sample_std_dev(&returns)
        .ok_or_else(|| OptiError::data_unavailable("not enough returns for volatility"))?;

    let annual = daily * config.periods_per_year.sqrt();
    tracing::debug!(
        "Historical vol from {} closes: daily {:.5}, annual {:.4}",
        closes.len(),
        daily,
        annual
    );
    Ok(annual)
}
