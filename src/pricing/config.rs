//! Configuration for option analysis

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{OptiError, OptiResult};
use crate::curves::CurveConfig;
use crate::data::VolatilityConfig;

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Days per year when converting days to expiry into T
    /// Default: 365
    pub day_count: f64,

    /// Relative strike/spot distance treated as at-the-money
    /// Default: 0.02
    pub atm_tolerance: f64,

    /// Accepted request ranges
    pub limits: InputLimits,

    /// Price sweeps for payoff and Greeks curves
    pub curves: CurveConfig,

    /// Historical volatility estimator
    pub volatility: VolatilityConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            day_count: 365.0,
            atm_tolerance: 0.02,
            limits: InputLimits::default(),
            curves: CurveConfig::default(),
            volatility: VolatilityConfig::default(),
        }
    }
}

impl PricingConfig {
    /// Parse from TOML; missing keys keep their defaults
    pub fn from_toml_str(s: &str) -> OptiResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> OptiResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded pricing config from {:?}", path);
        Ok(config)
    }

    pub fn to_toml_string(&self) -> OptiResult<String> {
        toml::to_string_pretty(self).map_err(|e| OptiError::serialization(e.to_string()))
    }

    pub fn validate(&self) -> OptiResult<()> {
        if !(self.day_count.is_finite() && self.day_count > 0.0) {
            return Err(OptiError::config(format!(
                "day_count must be positive, got {}",
                self.day_count
            )));
        }
        if !(self.atm_tolerance.is_finite() && self.atm_tolerance >= 0.0) {
            return Err(OptiError::config(format!(
                "atm_tolerance must be non-negative, got {}",
                self.atm_tolerance
            )));
        }
        self.limits.validate()?;
        self.curves
            .payoff
            .validate()
            .and_then(|_| self.curves.greeks.validate())
            .map_err(|e| OptiError::config(e.to_string()))?;
        Ok(())
    }
}

/// Bounds on user-supplied inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Default: 1
    pub min_days: u32,
    /// Default: 365
    pub max_days: u32,
    /// Risk-free rate range in percent. Default: 0..10
    pub min_rate_pct: f64,
    pub max_rate_pct: f64,
    /// Volatility override range in percent. Default: 1..200
    pub min_vol_pct: f64,
    pub max_vol_pct: f64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_days: 1,
            max_days: 365,
            min_rate_pct: 0.0,
            max_rate_pct: 10.0,
            min_vol_pct: 1.0,
            max_vol_pct: 200.0,
        }
    }
}

impl InputLimits {
    /// No range checks beyond model validity
    pub fn unbounded() -> Self {
        Self {
            min_days: 0,
            max_days: u32::MAX,
            min_rate_pct: f64::NEG_INFINITY,
            max_rate_pct: f64::INFINITY,
            min_vol_pct: 0.0,
            max_vol_pct: f64::INFINITY,
        }
    }

    fn validate(&self) -> OptiResult<()> {
        let bounds = [
            self.min_rate_pct,
            self.max_rate_pct,
            self.min_vol_pct,
            self.max_vol_pct,
        ];
        // Infinite bounds are allowed (see `unbounded`), NaN is not
        if bounds.iter().any(|b| b.is_nan()) {
            return Err(OptiError::config("input limits must not be NaN"));
        }
        if self.min_days > self.max_days
            || self.min_rate_pct > self.max_rate_pct
            || self.min_vol_pct > self.max_vol_pct
        {
            return Err(OptiError::config("input limits have min above max"));
        }
        Ok(())
    }
}
