//! Curve generation
//!
//! Sweeps the underlying price through the pricing engine and returns
//! plotting-ready series:
//! - Payoff diagram: P&L at expiry and intrinsic value
//! - Greeks vs. underlying price
//!
//! Generators are pure: identical inputs give bit-identical output.

pub mod payoff;
pub mod greeks;

pub use payoff::*;
pub use greeks::*;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::core::{OptiError, OptiResult};

/// One sample of a curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub underlying_price: f64,
    pub value: f64,
}

/// Ordered (underlying price, value) series for one charted quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    /// Display name (e.g. "Delta", "Intrinsic Value")
    pub label: String,
    pub points: Vec<CurvePoint>,
}

impl CurveSeries {
    /// Build a series by evaluating `f` at each grid price
    pub fn from_grid(
        label: impl Into<String>,
        grid: &Array1<f64>,
        f: impl Fn(f64) -> f64,
    ) -> Self {
        Self {
            label: label.into(),
            points: grid
                .iter()
                .map(|&p| CurvePoint {
                    underlying_price: p,
                    value: f(p),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.underlying_price).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Price range swept around spot, as multiples of spot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    /// Lowest price as a fraction of spot
    pub lower_factor: f64,
    /// Highest price as a fraction of spot
    pub upper_factor: f64,
    /// Number of samples, endpoints included
    pub samples: usize,
}

impl SweepRange {
    pub fn new(lower_factor: f64, upper_factor: f64, samples: usize) -> Self {
        Self {
            lower_factor,
            upper_factor,
            samples,
        }
    }

    /// ±30% of spot, 100 samples
    pub fn payoff_default() -> Self {
        Self::new(0.7, 1.3, 100)
    }

    /// ±20% of spot, 50 samples
    pub fn greeks_default() -> Self {
        Self::new(0.8, 1.2, 50)
    }

    pub fn validate(&self) -> OptiResult<()> {
        if self.samples < 2 {
            return Err(OptiError::invalid_parameter(format!(
                "sweep needs at least 2 samples, got {}",
                self.samples
            )));
        }
        if !(self.lower_factor.is_finite() && self.upper_factor.is_finite())
            || self.lower_factor <= 0.0
            || self.upper_factor <= self.lower_factor
        {
            return Err(OptiError::invalid_parameter(format!(
                "sweep range [{}, {}] must satisfy 0 < lower < upper",
                self.lower_factor, self.upper_factor
            )));
        }
        Ok(())
    }

    /// Evenly spaced prices over [lower·spot, upper·spot]
    pub fn grid(&self, spot: f64) -> OptiResult<Array1<f64>> {
        self.validate()?;
        Ok(linspace(
            spot * self.lower_factor,
            spot * self.upper_factor,
            self.samples,
        ))
    }
}

/// Sweep settings for both generators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub payoff: SweepRange,
    pub greeks: SweepRange,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            payoff: SweepRange::payoff_default(),
            greeks: SweepRange::greeks_default(),
        }
    }
}

/// `n` evenly spaced points with both endpoints hit exactly
pub fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    if n < 2 {
        return Array1::from_elem(n, start);
    }
    let step = (end - start) / (n - 1) as f64;
    Array1::from_shape_fn(n, |i| if i + 1 == n { end } else { start + step * i as f64 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(70.0, 130.0, 100);
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], 70.0);
        assert_eq!(grid[99], 130.0);
        assert!(grid.iter().zip(grid.iter().skip(1)).all(|(a, b)| b > a));
    }

    #[test]
    fn test_sweep_validation() {
        assert!(SweepRange::new(0.8, 1.2, 1).validate().is_err());
        assert!(SweepRange::new(1.2, 0.8, 10).validate().is_err());
        assert!(SweepRange::new(0.0, 1.2, 10).validate().is_err());
        assert!(SweepRange::new(0.8, f64::NAN, 10).validate().is_err());
        assert!(SweepRange::greeks_default().validate().is_ok());
    }

    #[test]
    fn test_default_grids() {
        let spot = 187.35;
        let payoff = SweepRange::payoff_default().grid(spot).unwrap();
        assert_eq!(payoff.len(), 100);
        assert_eq!(payoff[0], spot * 0.7);
        assert_eq!(payoff[99], spot * 1.3);

        let greeks = SweepRange::greeks_default().grid(spot).unwrap();
        assert_eq!(greeks.len(), 50);
        assert_eq!(greeks[0], spot * 0.8);
        assert_eq!(greeks[49], spot * 1.2);
    }

    #[test]
    fn test_curve_config_partial_toml() {
        let config: CurveConfig = toml::from_str(
            r#"
            [greeks]
            lower_factor = 0.9
            upper_factor = 1.1
            samples = 21
            "#,
        )
        .unwrap();
        assert_eq!(config.greeks, SweepRange::new(0.9, 1.1, 21));
        assert_eq!(config.payoff, SweepRange::payoff_default());
    }
}
