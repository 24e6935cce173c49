//! Option contract definitions
//!
//! A European vanilla option together with the market inputs needed to
//! value it under Black-Scholes-Merton.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{OptiError, OptiResult};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = OptiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(OptiError::invalid_parameter(format!(
                "unknown option type '{}'",
                other
            ))),
        }
    }
}

/// Moneyness of an option relative to the current underlying price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Moneyness {
    InTheMoney,
    AtTheMoney,
    OutOfTheMoney,
}

impl Moneyness {
    /// Classify a strike against spot. ATM takes precedence when the strike
    /// is within `atm_tolerance` (relative to spot).
    pub fn classify(option_type: OptionType, spot: f64, strike: f64, atm_tolerance: f64) -> Self {
        if (spot - strike).abs() / spot < atm_tolerance {
            return Moneyness::AtTheMoney;
        }
        let itm = match option_type {
            OptionType::Call => spot > strike,
            OptionType::Put => spot < strike,
        };
        if itm {
            Moneyness::InTheMoney
        } else {
            Moneyness::OutOfTheMoney
        }
    }

    /// Short label: ITM / ATM / OTM
    pub fn label(&self) -> &'static str {
        match self {
            Moneyness::InTheMoney => "ITM",
            Moneyness::AtTheMoney => "ATM",
            Moneyness::OutOfTheMoney => "OTM",
        }
    }
}

/// European option contract with its pricing inputs.
///
/// Immutable once constructed: sweeps build new contracts via
/// [`OptionContract::with_underlying_price`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionContract {
    underlying_price: f64,
    strike_price: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
}

impl OptionContract {
    /// Create a validated contract.
    ///
    /// Rejects non-finite inputs, non-positive spot or strike, and negative
    /// time or volatility. Zero time and zero volatility are accepted and
    /// priced through their closed-form limits.
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> OptiResult<Self> {
        ensure_positive("underlying price", underlying_price)?;
        ensure_positive("strike price", strike_price)?;
        ensure_non_negative("time to expiry", time_to_expiry)?;
        ensure_non_negative("volatility", volatility)?;
        if !risk_free_rate.is_finite() {
            return Err(OptiError::invalid_parameter(format!(
                "risk-free rate must be finite, got {}",
                risk_free_rate
            )));
        }

        Ok(Self {
            underlying_price,
            strike_price,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        })
    }

    /// European call
    pub fn call(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> OptiResult<Self> {
        Self::new(spot, strike, time, rate, vol, OptionType::Call)
    }

    /// European put
    pub fn put(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> OptiResult<Self> {
        Self::new(spot, strike, time, rate, vol, OptionType::Put)
    }

    /// Same contract, different underlying price
    pub fn with_underlying_price(&self, underlying_price: f64) -> OptiResult<Self> {
        ensure_positive("underlying price", underlying_price)?;
        Ok(Self {
            underlying_price,
            ..*self
        })
    }

    /// Same contract, other side
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..*self
        }
    }

    pub fn underlying_price(&self) -> f64 {
        self.underlying_price
    }

    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Intrinsic value at the current underlying price
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type
            .intrinsic(self.underlying_price, self.strike_price)
    }

    /// Discount factor e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// Moneyness at the current underlying price
    pub fn moneyness(&self, atm_tolerance: f64) -> Moneyness {
        Moneyness::classify(
            self.option_type,
            self.underlying_price,
            self.strike_price,
            atm_tolerance,
        )
    }
}

/// Year fraction for a whole number of calendar days
pub fn years_from_days(days: u32, day_count: f64) -> f64 {
    days as f64 / day_count
}

/// Calendar days from `today` until `expiry` (zero once expired)
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> u32 {
    (expiry - today).num_days().max(0) as u32
}

fn ensure_positive(name: &str, value: f64) -> OptiResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OptiError::invalid_parameter(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

fn ensure_non_negative(name: &str, value: f64) -> OptiResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(OptiError::invalid_parameter(format!(
            "{} must be non-negative and finite, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
    }

    #[test]
    fn test_option_type_parse() {
        assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" put ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("straddle".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_validation() {
        assert!(OptionContract::call(100.0, 100.0, 0.25, 0.03, 0.2).is_ok());
        assert!(OptionContract::call(100.0, 100.0, 0.0, 0.03, 0.0).is_ok());
        assert!(OptionContract::call(100.0, 100.0, 0.25, -0.01, 0.2).is_ok());

        assert!(OptionContract::call(0.0, 100.0, 0.25, 0.03, 0.2).is_err());
        assert!(OptionContract::call(100.0, -5.0, 0.25, 0.03, 0.2).is_err());
        assert!(OptionContract::call(100.0, 100.0, -0.1, 0.03, 0.2).is_err());
        assert!(OptionContract::put(100.0, 100.0, 0.25, 0.03, -0.2).is_err());
        assert!(OptionContract::put(f64::NAN, 100.0, 0.25, 0.03, 0.2).is_err());
        assert!(OptionContract::put(100.0, 100.0, 0.25, f64::INFINITY, 0.2).is_err());
    }

    #[test]
    fn test_with_underlying_price() {
        let base = OptionContract::put(100.0, 95.0, 0.5, 0.02, 0.3).unwrap();
        let moved = base.with_underlying_price(80.0).unwrap();

        assert_eq!(moved.underlying_price(), 80.0);
        assert_eq!(moved.strike_price(), 95.0);
        assert_eq!(moved.option_type(), OptionType::Put);
        // Base contract unchanged
        assert_eq!(base.underlying_price(), 100.0);

        assert!(base.with_underlying_price(0.0).is_err());
    }

    #[test]
    fn test_moneyness() {
        // Within 2% of spot is ATM regardless of side
        assert_eq!(
            Moneyness::classify(OptionType::Call, 100.0, 101.0, 0.02),
            Moneyness::AtTheMoney
        );
        assert_eq!(
            Moneyness::classify(OptionType::Call, 110.0, 100.0, 0.02),
            Moneyness::InTheMoney
        );
        assert_eq!(
            Moneyness::classify(OptionType::Put, 110.0, 100.0, 0.02),
            Moneyness::OutOfTheMoney
        );
        assert_eq!(
            Moneyness::classify(OptionType::Put, 90.0, 100.0, 0.02),
            Moneyness::InTheMoney
        );
        assert_eq!(Moneyness::InTheMoney.label(), "ITM");
    }

    #[test]
    fn test_days_to_years() {
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 5, 21).unwrap();

        let days = days_until(expiry, today);
        assert_eq!(days, 30);
        assert!((years_from_days(days, 365.0) - 30.0 / 365.0).abs() < 1e-15);

        // Expired contracts clamp to zero
        assert_eq!(days_until(today, expiry), 0);
    }
}
