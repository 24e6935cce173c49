//! Black-Scholes-Merton Model
//!
//! Closed-form European option price and Greeks.
//!
//! Degenerate inputs are priced through their limits rather than rejected:
//! - `T <= 0`: intrinsic value, step-function delta, all other Greeks zero
//! - `σ = 0, T > 0`: deterministic forward, i.e. discounted intrinsic value
//!
//! Conventions: theta is per calendar day, vega is per 1% vol move, rho is
//! per 1% rate move.

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use statrs::function::erf::erfc;

use crate::core::{GreeksResult, OptionContract, OptionType};

const DAYS_PER_YEAR: f64 = 365.0;
const PERCENT: f64 = 100.0;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes (d1, d2).
///
/// Both are 0 when `T <= 0` or `σ <= 0`; every formula below handles that
/// regime before using them.
pub fn d1_d2(contract: &OptionContract) -> (f64, f64) {
    let time = contract.time_to_expiry();
    let vol = contract.volatility();
    if time <= 0.0 || vol <= 0.0 {
        return (0.0, 0.0);
    }

    let sqrt_t = time.sqrt();
    let d1 = ((contract.underlying_price() / contract.strike_price()).ln()
        + (contract.risk_free_rate() + 0.5 * vol * vol) * time)
        / (vol * sqrt_t);
    (d1, d1 - vol * sqrt_t)
}

/// Black-Scholes d1 parameter
pub fn d1(contract: &OptionContract) -> f64 {
    d1_d2(contract).0
}

/// Black-Scholes d2 parameter
pub fn d2(contract: &OptionContract) -> f64 {
    d1_d2(contract).1
}

/// Normal terms shared by the live (`T > 0`) formulas
struct Terms {
    sqrt_t: f64,
    df: f64,
    cdf_d1: f64,
    cdf_d2: f64,
    cdf_neg_d1: f64,
    cdf_neg_d2: f64,
    pdf_d1: f64,
}

/// `None` at or past expiry.
///
/// With zero volatility the distribution terms take their σ → 0 limits
/// (indicator of `S > K·e^(-rT)`, zero density) instead of evaluating
/// the normal CDF at d1 = d2 = 0.
fn terms(contract: &OptionContract) -> Option<Terms> {
    let time = contract.time_to_expiry();
    if time <= 0.0 {
        return None;
    }

    let sqrt_t = time.sqrt();
    let df = contract.discount_factor();

    if contract.volatility() <= 0.0 {
        // d1, d2 -> ±inf depending on the side of the discounted strike
        let discounted_strike = contract.strike_price() * df;
        let spot = contract.underlying_price();
        let above = if spot > discounted_strike { 1.0 } else { 0.0 };
        let below = if spot < discounted_strike { 1.0 } else { 0.0 };
        return Some(Terms {
            sqrt_t,
            df,
            cdf_d1: above,
            cdf_d2: above,
            cdf_neg_d1: below,
            cdf_neg_d2: below,
            pdf_d1: 0.0,
        });
    }

    let (d1, d2) = d1_d2(contract);
    Some(Terms {
        sqrt_t,
        df,
        cdf_d1: norm_cdf(d1),
        cdf_d2: norm_cdf(d2),
        cdf_neg_d1: norm_cdf(-d1),
        cdf_neg_d2: norm_cdf(-d2),
        pdf_d1: norm_pdf(d1),
    })
}

/// Black-Scholes European option price
pub fn price(contract: &OptionContract) -> f64 {
    let Some(t) = terms(contract) else {
        return contract.intrinsic_value();
    };

    let spot = contract.underlying_price();
    let strike = contract.strike_price();

    match contract.option_type() {
        OptionType::Call => spot * t.cdf_d1 - strike * t.df * t.cdf_d2,
        OptionType::Put => strike * t.df * t.cdf_neg_d2 - spot * t.cdf_neg_d1,
    }
}

/// Delta: dV/dS
pub fn delta(contract: &OptionContract) -> f64 {
    let Some(t) = terms(contract) else {
        let spot = contract.underlying_price();
        let strike = contract.strike_price();
        return match contract.option_type() {
            OptionType::Call => if spot > strike { 1.0 } else { 0.0 },
            OptionType::Put => if spot < strike { -1.0 } else { 0.0 },
        };
    };

    match contract.option_type() {
        OptionType::Call => t.cdf_d1,
        // N(d1) - 1 == -N(-d1)
        OptionType::Put => -t.cdf_neg_d1,
    }
}

/// Gamma: d²V/dS², same for call and put
pub fn gamma(contract: &OptionContract) -> f64 {
    let vol = contract.volatility();
    match terms(contract) {
        Some(t) if vol > 0.0 => t.pdf_d1 / (contract.underlying_price() * vol * t.sqrt_t),
        _ => 0.0,
    }
}

/// Theta: time decay per calendar day
pub fn theta(contract: &OptionContract) -> f64 {
    let Some(t) = terms(contract) else {
        return 0.0;
    };

    let spot = contract.underlying_price();
    let strike = contract.strike_price();
    let rate = contract.risk_free_rate();

    let decay = -spot * t.pdf_d1 * contract.volatility() / (2.0 * t.sqrt_t);
    let annual = match contract.option_type() {
        OptionType::Call => decay - rate * strike * t.df * t.cdf_d2,
        OptionType::Put => decay + rate * strike * t.df * t.cdf_neg_d2,
    };
    annual / DAYS_PER_YEAR
}

/// Vega per 1% vol move, same for call and put
pub fn vega(contract: &OptionContract) -> f64 {
    match terms(contract) {
        Some(t) => contract.underlying_price() * t.pdf_d1 * t.sqrt_t / PERCENT,
        None => 0.0,
    }
}

/// Rho per 1% rate move
pub fn rho(contract: &OptionContract) -> f64 {
    let Some(t) = terms(contract) else {
        return 0.0;
    };

    let strike = contract.strike_price();
    let time = contract.time_to_expiry();

    match contract.option_type() {
        OptionType::Call => strike * time * t.df * t.cdf_d2 / PERCENT,
        OptionType::Put => -strike * time * t.df * t.cdf_neg_d2 / PERCENT,
    }
}

/// Price and all Greeks in one pass
pub fn evaluate(contract: &OptionContract) -> GreeksResult {
    GreeksResult::new(
        price(contract),
        delta(contract),
        gamma(contract),
        theta(contract),
        vega(contract),
        rho(contract),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn call(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> OptionContract {
        OptionContract::call(spot, strike, time, rate, vol).unwrap()
    }

    fn put(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> OptionContract {
        OptionContract::put(spot, strike, time, rate, vol).unwrap()
    }

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-10);
        assert!((norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((norm_cdf(-1.96) - 0.025).abs() < 0.001);
        assert_abs_diff_eq!(norm_cdf(1.3) + norm_cdf(-1.3), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_norm_pdf() {
        assert_abs_diff_eq!(norm_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
        assert_abs_diff_eq!(norm_pdf(1.0), norm_pdf(-1.0), epsilon = 1e-15);
    }

    #[test]
    fn test_d1_d2() {
        let c = call(100.0, 100.0, 0.25, 0.03, 0.25);
        let (d1, d2) = d1_d2(&c);
        assert_abs_diff_eq!(d1, 0.1225, epsilon = 1e-12);
        assert_abs_diff_eq!(d2, -0.0025, epsilon = 1e-12);

        // Degenerate regime
        assert_eq!(d1_d2(&call(100.0, 90.0, 0.0, 0.03, 0.25)), (0.0, 0.0));
        assert_eq!(d1_d2(&call(100.0, 90.0, 0.5, 0.03, 0.0)), (0.0, 0.0));
    }

    #[test]
    fn test_reference_call() {
        // S=100, K=100, T=0.25, r=3%, σ=25%
        let g = evaluate(&call(100.0, 100.0, 0.25, 0.03, 0.25));

        assert_abs_diff_eq!(g.price, 5.347_435, epsilon = 1e-5);
        assert_abs_diff_eq!(g.delta, 0.548_748, epsilon = 1e-5);
        assert_abs_diff_eq!(g.gamma, 0.031_677, epsilon = 1e-5);
        assert_abs_diff_eq!(g.theta, -0.031_191, epsilon = 1e-5);
        assert_abs_diff_eq!(g.vega, 0.197_980, epsilon = 1e-5);
        assert_abs_diff_eq!(g.rho, 0.123_819, epsilon = 1e-5);
    }

    #[test]
    fn test_reference_put() {
        let g = evaluate(&put(100.0, 100.0, 0.25, 0.03, 0.25));

        assert_abs_diff_eq!(g.price, 4.600_241, epsilon = 1e-5);
        assert_abs_diff_eq!(g.delta, -0.451_252, epsilon = 1e-5);
        assert_abs_diff_eq!(g.gamma, 0.031_677, epsilon = 1e-5);
        assert_abs_diff_eq!(g.theta, -0.023_034, epsilon = 1e-5);
        assert_abs_diff_eq!(g.vega, 0.197_980, epsilon = 1e-5);
        assert_abs_diff_eq!(g.rho, -0.124_313, epsilon = 1e-5);
    }

    #[test]
    fn test_textbook_call() {
        // ATM call, 20% vol, 1 year, 5% rate
        let c = call(100.0, 100.0, 1.0, 0.05, 0.20);
        assert_abs_diff_eq!(price(&c), 10.450_584, epsilon = 1e-5);
        assert_abs_diff_eq!(delta(&c), 0.636_831, epsilon = 1e-5);
    }

    #[test]
    fn test_put_call_parity() {
        let (s, k, t, r, v): (f64, f64, f64, f64, f64) = (100.0, 105.0, 0.75, 0.04, 0.3);
        let c = price(&call(s, k, t, r, v));
        let p = price(&put(s, k, t, r, v));
        assert_abs_diff_eq!(c - p, s - k * (-r * t).exp(), epsilon = 1e-6);
    }

    #[test]
    fn test_expired_contract() {
        let itm_call = call(110.0, 100.0, 0.0, 0.03, 0.2);
        let g = evaluate(&itm_call);
        assert_eq!(g, GreeksResult::new(10.0, 1.0, 0.0, 0.0, 0.0, 0.0));

        let otm_put = put(110.0, 100.0, 0.0, 0.03, 0.2);
        assert_eq!(evaluate(&otm_put), GreeksResult::default());

        let itm_put = put(90.0, 100.0, 0.0, 0.03, 0.2);
        assert_eq!(price(&itm_put), 10.0);
        assert_eq!(delta(&itm_put), -1.0);

        // At the strike both deltas are zero
        assert_eq!(delta(&call(100.0, 100.0, 0.0, 0.03, 0.2)), 0.0);
        assert_eq!(delta(&put(100.0, 100.0, 0.0, 0.03, 0.2)), 0.0);
    }

    #[test]
    fn test_expiry_limit_continuity() {
        let near = call(100.0, 100.0, 1e-8, 0.03, 0.2);
        assert_abs_diff_eq!(price(&near), 0.0, epsilon = 1e-3);

        let near_itm = call(120.0, 100.0, 1e-8, 0.03, 0.2);
        assert_abs_diff_eq!(price(&near_itm), 20.0, epsilon = 1e-6);
        assert_abs_diff_eq!(delta(&near_itm), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_volatility() {
        let (s, k, t, r): (f64, f64, f64, f64) = (100.0, 100.0, 0.5, 0.05);
        let df = (-r * t).exp();

        // Spot above discounted strike: forward is in the money
        let c = call(s, k, t, r, 0.0);
        assert_abs_diff_eq!(price(&c), s - k * df, epsilon = 1e-12);
        assert_eq!(delta(&c), 1.0);
        assert_eq!(gamma(&c), 0.0);
        assert_eq!(vega(&c), 0.0);
        assert_abs_diff_eq!(theta(&c), -r * k * df / 365.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rho(&c), k * t * df / 100.0, epsilon = 1e-12);

        let p = put(s, k, t, r, 0.0);
        assert_eq!(price(&p), 0.0);
        assert_eq!(delta(&p), 0.0);
        assert_eq!(theta(&p), 0.0);
        assert_eq!(rho(&p), 0.0);

        // Parity still holds in the limit
        assert_abs_diff_eq!(price(&c) - price(&p), s - k * df, epsilon = 1e-12);
    }

    #[test]
    fn test_gamma_vega_type_independent() {
        let c = call(95.0, 100.0, 0.4, 0.02, 0.35);
        let p = c.with_option_type(OptionType::Put);
        assert_eq!(gamma(&c), gamma(&p));
        assert_eq!(vega(&c), vega(&p));
    }

    #[test]
    fn test_nan_free_extremes() {
        // Deep OTM / ITM with tiny vol
        for &spot in &[1e-3, 50.0, 1e6] {
            let g = evaluate(&call(spot, 100.0, 2.0, 0.1, 1e-6));
            assert!(g.is_finite(), "{:?}", g);
            let g = evaluate(&put(spot, 100.0, 2.0, 0.1, 1e-6));
            assert!(g.is_finite(), "{:?}", g);
        }
    }

    fn contract_strategy() -> impl Strategy<Value = (f64, f64, f64, f64, f64)> {
        (
            1.0..500.0f64,  // spot
            1.0..500.0f64,  // strike
            0.01..3.0f64,   // time
            -0.02..0.15f64, // rate
            0.01..1.5f64,   // vol
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_price_non_negative((s, k, t, r, v) in contract_strategy()) {
            prop_assert!(price(&call(s, k, t, r, v)) >= -1e-9);
            prop_assert!(price(&put(s, k, t, r, v)) >= -1e-9);
        }

        #[test]
        fn prop_put_call_parity((s, k, t, r, v) in contract_strategy()) {
            let c = price(&call(s, k, t, r, v));
            let p = price(&put(s, k, t, r, v));
            let parity = s - k * (-r * t).exp();
            prop_assert!((c - p - parity).abs() < 1e-6 * s.max(k));
        }

        #[test]
        fn prop_delta_bounds((s, k, t, r, v) in contract_strategy()) {
            let dc = delta(&call(s, k, t, r, v));
            let dp = delta(&put(s, k, t, r, v));
            prop_assert!((0.0..=1.0).contains(&dc));
            prop_assert!((-1.0..=0.0).contains(&dp));
        }

        #[test]
        fn prop_gamma_symmetry((s, k, t, r, v) in contract_strategy()) {
            prop_assert_eq!(gamma(&call(s, k, t, r, v)), gamma(&put(s, k, t, r, v)));
            prop_assert!(gamma(&call(s, k, t, r, v)) >= 0.0);
        }
    }
}
