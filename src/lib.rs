//! # OptiPrice - Black-Scholes Option Pricing
//!
//! Theoretical value and Greeks of European vanilla options under the
//! Black-Scholes-Merton model, plus the price sweeps used to chart them.
//!
//! ## Key Components
//!
//! - **Core**: `OptionContract`, `GreeksResult`, error types
//! - **Black-Scholes**: closed-form price, delta, gamma, theta, vega, rho
//! - **Curves**: payoff diagram and Greeks vs. underlying price
//! - **Data**: market snapshot boundary and historical volatility
//! - **Pricing**: request handling, valuation summary, configuration
//!
//! ## Usage
//!
//! ```rust
//! use optiprice::prelude::*;
//!
//! let contract = OptionContract::call(100.0, 100.0, 0.25, 0.03, 0.25).unwrap();
//! let greeks = bs_evaluate(&contract);
//! assert!(greeks.price > 5.0 && greeks.price < 6.0);
//!
//! let curves = default_greeks_curves(&contract).unwrap();
//! assert_eq!(curves.delta.len(), 50);
//! ```
//!
//! ## Conventions
//!
//! - Theta is per calendar day
//! - Vega and rho are per 1 percentage point move
//! - At or past expiry every quantity takes its closed-form limit
//!
//! ## What This Crate Does NOT Do
//!
//! - American exercise or dividends
//! - Implied volatility solving
//! - Multi-leg or exotic structures
//! - Monte Carlo or PDE pricing

pub mod core;
pub mod curves;
pub mod data;
pub mod models;
pub mod pricing;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        days_until, years_from_days, GreeksResult, Moneyness, OptiError, OptiResult,
        OptionContract, OptionType,
    };

    // Black-Scholes
    pub use crate::models::black_scholes;
    pub use crate::models::{d1_d2, evaluate as bs_evaluate, norm_cdf, norm_pdf};

    // Curves
    pub use crate::curves::{
        default_greeks_curves, default_payoff_diagram, greeks_curves, payoff_diagram,
        CurveConfig, CurvePoint, CurveSeries, GreeksCurves, PayoffDiagram, SweepRange,
    };

    // Market data
    pub use crate::data::{
        historical_volatility, InMemoryMarketData, MarketDataSource, MarketSnapshot,
        VolatilityConfig,
    };

    // Analysis
    pub use crate::pricing::{
        analyze, analyze_ticker, build_contract, AnalysisRequest, InputLimits, OptionAnalysis,
        PricingConfig, Valuation, VolatilitySource,
    };
}

// Re-export main types at crate root
pub use crate::core::{OptiError, OptiResult};
pub use crate::models::black_scholes;
