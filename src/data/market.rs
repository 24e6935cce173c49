//! Market data boundary
//!
//! The pricing core only needs a current price and a volatility estimate.
//! Where they come from is behind [`MarketDataSource`]; a source that
//! cannot resolve a ticker returns [`OptiError::DataUnavailable`] and the
//! core is never invoked.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::volatility::{historical_volatility, VolatilityConfig};
use crate::core::{OptiError, OptiResult};

/// Price and volatility for one underlying
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Ticker symbol (upper case)
    pub ticker: String,
    /// Display name, falls back to the ticker
    pub name: String,
    /// Current underlying price
    pub price: f64,
    /// Annualized historical volatility
    pub volatility: f64,
    /// Previous session close
    pub previous_close: Option<f64>,
    pub sector: Option<String>,
    /// Market capitalization in `currency`
    pub market_cap: Option<f64>,
    pub currency: String,
    pub timestamp: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Snapshot with explicit price and volatility
    pub fn new(ticker: impl Into<String>, price: f64, volatility: f64) -> OptiResult<Self> {
        if !(price.is_finite() && price > 0.0) {
            return Err(OptiError::invalid_parameter(format!(
                "underlying price must be positive, got {}",
                price
            )));
        }
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(OptiError::invalid_parameter(format!(
                "volatility must be non-negative, got {}",
                volatility
            )));
        }

        let ticker: String = ticker.into();
        let ticker = ticker.trim().to_uppercase();
        Ok(Self {
            name: ticker.clone(),
            ticker,
            price,
            volatility,
            previous_close: None,
            sector: None,
            market_cap: None,
            currency: "USD".to_string(),
            timestamp: Utc::now(),
        })
    }

    /// Snapshot from a closing-price history: last close is the price,
    /// volatility is estimated from the whole series.
    pub fn from_closes(
        ticker: impl Into<String>,
        closes: &[f64],
        config: &VolatilityConfig,
    ) -> OptiResult<Self> {
        let ticker: String = ticker.into();
        let last = *closes
            .last()
            .ok_or_else(|| OptiError::data_unavailable(format!("no price history for {}", ticker)))?;
        let volatility = historical_volatility(closes, config)?;

        let mut snapshot = Self::new(ticker, last, volatility)?;
        if closes.len() >= 2 {
            snapshot.previous_close = Some(closes[closes.len() - 2]);
        }
        Ok(snapshot)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_previous_close(mut self, previous_close: f64) -> Self {
        self.previous_close = Some(previous_close);
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    /// Change vs. previous close (zero when unknown)
    pub fn price_change(&self) -> f64 {
        self.previous_close.map_or(0.0, |prev| self.price - prev)
    }
}

/// Provider of market snapshots
pub trait MarketDataSource {
    /// Resolve a ticker, or fail with `DataUnavailable`
    fn snapshot(&self, ticker: &str) -> OptiResult<MarketSnapshot>;
}

/// Fixed set of snapshots keyed by ticker
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketData {
    snapshots: HashMap<String, MarketSnapshot>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: MarketSnapshot) {
        self.snapshots.insert(snapshot.ticker.clone(), snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl MarketDataSource for InMemoryMarketData {
    fn snapshot(&self, ticker: &str) -> OptiResult<MarketSnapshot> {
        let key = ticker.trim().to_uppercase();
        match self.snapshots.get(&key) {
            Some(snapshot) => Ok(snapshot.clone()),
            None => {
                tracing::warn!("No market data for {}", key);
                Err(OptiError::data_unavailable(format!("no market data for {}", key)))
            }
        }
    }
}
