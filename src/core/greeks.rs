//! Option Greeks
//!
//! Price and first/second order sensitivities for a single evaluation.

use serde::{Deserialize, Serialize};

/// Price and Greeks from one engine evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GreeksResult {
    /// Theoretical option value
    pub price: f64,
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt per calendar day
    pub theta: f64,
    /// Vega: dV/dσ per 1% vol move
    pub vega: f64,
    /// Rho: dV/dr per 1% rate move
    pub rho: f64,
}

impl GreeksResult {
    pub fn new(price: f64, delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            price,
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// True when every field is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.price, self.delta, self.gamma, self.theta, self.vega, self.rho,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Named rows for tabular display
    pub fn rows(&self) -> [(&'static str, f64); 6] {
        [
            ("Option Price", self.price),
            ("Delta", self.delta),
            ("Gamma", self.gamma),
            ("Theta", self.theta),
            ("Vega", self.vega),
            ("Rho", self.rho),
        ]
    }
}
