// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes price of a European call
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For a European call this has a closed-form solution involving
//! the cumulative normal distribution function Φ(x).

use crate::error::{validation::*, FinResult};
use crate::math_utils::norm_cdf;

/// Black-Scholes European call option price on already-validated inputs
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// ```
///
/// Where:
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
///
/// # Parameters
/// - `s`: Current stock price
/// - `k`: Strike price
/// - `r`: Risk-free rate (decimal)
/// - `sigma`: Volatility (decimal)
/// - `t`: Time to expiration in years
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());
    let d2 = d1 - sigma * t.sqrt();
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes call price from raw caller arguments.
///
/// `r` and `sigma` are percentage-like (5 or 0.05 both mean 5%). Spot,
/// strike, maturity and volatility must be positive and the normalized rate
/// must lie in [-50%, 50%].
///
/// # Parameters
/// - `s`: Current stock price
/// - `k`: Strike price
/// - `t`: Time to maturity in years (0.5 = six months)
/// - `r`: Annual risk-free rate
/// - `sigma`: Annual volatility
pub fn black_scholes_call(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> FinResult<f64> {
    validate_finite("S", s)?;
    validate_finite("K", k)?;
    validate_finite("T", t)?;
    let r = finite_percentage("r", r)?;
    let sigma = finite_percentage("sigma", sigma)?;

    validate_positive("S", s)?;
    validate_positive("K", k)?;
    validate_positive("T", t)?;
    validate_positive("sigma", sigma)?;
    validate_range("r", r, -0.5, 0.5)?;

    Ok(bs_call_price(s, k, r, sigma, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bs_call_at_the_money() {
        let price = black_scholes_call(100.0, 100.0, 1.0, 5.0, 20.0).unwrap();
        let expected = 10.450_583_572_185_565;
        let rel_error = (price - expected).abs() / expected;
        assert!(rel_error < 1e-9, "price {} vs {}", price, expected);
    }

    #[test]
    fn test_bs_call_decimal_inputs_match_natural() {
        let natural = black_scholes_call(100.0, 100.0, 1.0, 5.0, 20.0).unwrap();
        let decimal = black_scholes_call(100.0, 100.0, 1.0, 0.05, 0.20).unwrap();
        assert_eq!(natural, decimal);
    }

    #[test]
    fn test_bs_call_bounds() {
        // max(S - K e^{-rT}, 0) <= C <= S
        let s = 120.0;
        let k = 100.0;
        let price = black_scholes_call(s, k, 0.5, 0.03, 0.25).unwrap();
        let intrinsic = s - k * (-0.03_f64 * 0.5).exp();
        assert!(price >= intrinsic && price <= s);
    }

    #[test]
    fn test_bs_call_negative_rate_allowed() {
        let price = black_scholes_call(100.0, 100.0, 1.0, -0.01, 0.2).unwrap();
        assert!(price.is_finite() && price > 0.0);
    }

    #[test]
    fn test_bs_call_validation() {
        assert_eq!(
            black_scholes_call(0.0, 100.0, 1.0, 5.0, 20.0)
                .unwrap_err()
                .to_string(),
            "S must be positive"
        );
        assert!(black_scholes_call(100.0, -1.0, 1.0, 5.0, 20.0).is_err());
        assert!(black_scholes_call(100.0, 100.0, 0.0, 5.0, 20.0).is_err());
        assert!(black_scholes_call(100.0, 100.0, 1.0, 5.0, 0.0).is_err());
        // -60% is normalized as-is (<= 1) and falls outside [-0.5, 0.5]
        assert_eq!(
            black_scholes_call(100.0, 100.0, 1.0, -0.6, 20.0)
                .unwrap_err()
                .to_string(),
            "r must be between -0.5 and 0.5"
        );
        // 60 becomes 0.6, also outside
        assert!(black_scholes_call(100.0, 100.0, 1.0, 60.0, 20.0).is_err());
    }
}
