//! Option analysis
//!
//! Turns user-level inputs (days to expiry, rates in percent, optional vol
//! override) plus a market snapshot into a priced contract, its valuation
//! summary and both curve sets.

use serde::{Deserialize, Serialize};

use super::config::PricingConfig;
use crate::core::{
    years_from_days, GreeksResult, Moneyness, OptiError, OptiResult, OptionContract, OptionType,
};
use crate::curves::{greeks_curves, payoff_diagram, GreeksCurves, PayoffDiagram};
use crate::data::{MarketDataSource, MarketSnapshot};
use crate::models::black_scholes;

/// User inputs for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub option_type: OptionType,
    /// Strike; at-the-money (current price) when absent
    pub strike: Option<f64>,
    pub days_to_expiry: u32,
    /// Annual risk-free rate in percent
    pub rate_pct: f64,
    /// Volatility override in percent; historical vol when absent
    pub volatility_pct: Option<f64>,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            option_type: OptionType::Call,
            strike: None,
            days_to_expiry: 30,
            rate_pct: 3.0,
            volatility_pct: None,
        }
    }
}

impl AnalysisRequest {
    pub fn new(option_type: OptionType) -> Self {
        Self {
            option_type,
            ..Default::default()
        }
    }

    pub fn with_strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days_to_expiry = days;
        self
    }

    pub fn with_rate_pct(mut self, rate_pct: f64) -> Self {
        self.rate_pct = rate_pct;
        self
    }

    pub fn with_volatility_pct(mut self, volatility_pct: f64) -> Self {
        self.volatility_pct = Some(volatility_pct);
        self
    }

    fn validate(&self, config: &PricingConfig) -> OptiResult<()> {
        let limits = &config.limits;

        if self.days_to_expiry < limits.min_days || self.days_to_expiry > limits.max_days {
            return Err(OptiError::invalid_parameter(format!(
                "days to expiry {} outside [{}, {}]",
                self.days_to_expiry, limits.min_days, limits.max_days
            )));
        }
        if !(limits.min_rate_pct..=limits.max_rate_pct).contains(&self.rate_pct) {
            return Err(OptiError::invalid_parameter(format!(
                "risk-free rate {}% outside [{}%, {}%]",
                self.rate_pct, limits.min_rate_pct, limits.max_rate_pct
            )));
        }
        if let Some(vol) = self.volatility_pct {
            if !(limits.min_vol_pct..=limits.max_vol_pct).contains(&vol) {
                return Err(OptiError::invalid_parameter(format!(
                    "volatility {}% outside [{}%, {}%]",
                    vol, limits.min_vol_pct, limits.max_vol_pct
                )));
            }
        }
        Ok(())
    }
}

/// Where σ came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilitySource {
    Historical,
    Custom,
}

/// Priced contract with derived summary figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub contract: OptionContract,
    pub greeks: GreeksResult,
    pub moneyness: Moneyness,
    pub intrinsic_value: f64,
    /// Price above intrinsic value
    pub time_value: f64,
}

impl Valuation {
    pub fn new(contract: OptionContract, atm_tolerance: f64) -> Self {
        let greeks = black_scholes::evaluate(&contract);
        let intrinsic_value = contract.intrinsic_value();
        Self {
            contract,
            greeks,
            moneyness: contract.moneyness(atm_tolerance),
            intrinsic_value,
            time_value: greeks.price - intrinsic_value,
        }
    }
}

/// Full analysis for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionAnalysis {
    pub snapshot: MarketSnapshot,
    pub request: AnalysisRequest,
    pub days_to_expiry: u32,
    pub volatility_source: VolatilitySource,
    pub valuation: Valuation,
    pub payoff: PayoffDiagram,
    pub greeks_curves: GreeksCurves,
}

impl OptionAnalysis {
    pub fn to_json(&self) -> OptiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the contract a request describes against a snapshot
pub fn build_contract(
    snapshot: &MarketSnapshot,
    request: &AnalysisRequest,
    config: &PricingConfig,
) -> OptiResult<OptionContract> {
    request.validate(config)?;

    let volatility = match request.volatility_pct {
        Some(pct) => pct / 100.0,
        None => snapshot.volatility,
    };

    OptionContract::new(
        snapshot.price,
        request.strike.unwrap_or(snapshot.price),
        years_from_days(request.days_to_expiry, config.day_count),
        request.rate_pct / 100.0,
        volatility,
        request.option_type,
    )
}

/// Price, summarize and sweep one option
pub fn analyze(
    snapshot: &MarketSnapshot,
    request: &AnalysisRequest,
    config: &PricingConfig,
) -> OptiResult<OptionAnalysis> {
    let contract = build_contract(snapshot, request, config)?;
    let valuation = Valuation::new(contract, config.atm_tolerance);

    let payoff = payoff_diagram(&contract, valuation.greeks.price, &config.curves.payoff)?;
    let greeks_curves = greeks_curves(&contract, &config.curves.greeks)?;

    tracing::info!(
        "{} {} K={:.2} T={}d: price {:.4}, delta {:.4} ({})",
        snapshot.ticker,
        contract.option_type(),
        contract.strike_price(),
        request.days_to_expiry,
        valuation.greeks.price,
        valuation.greeks.delta,
        valuation.moneyness.label()
    );

    Ok(OptionAnalysis {
        snapshot: snapshot.clone(),
        request: request.clone(),
        days_to_expiry: request.days_to_expiry,
        volatility_source: if request.volatility_pct.is_some() {
            VolatilitySource::Custom
        } else {
            VolatilitySource::Historical
        },
        valuation,
        payoff,
        greeks_curves,
    })
}

/// Resolve the ticker through `source`, then [`analyze`]
pub fn analyze_ticker<S: MarketDataSource + ?Sized>(
    source: &S,
    ticker: &str,
    request: &AnalysisRequest,
    config: &PricingConfig,
) -> OptiResult<OptionAnalysis> {
    let snapshot = source.snapshot(ticker)?;
    analyze(&snapshot, request, config)
}
