//! Capital Asset Pricing Model
//!
//! ```text
//! E[R] = r_f + β (R_m - r_f)
//! ```

use crate::error::{validation::*, FinError, FinResult};

/// CAPM expected return.
///
/// # Parameters
/// - `beta`: Sensitivity to market movements, must lie in [0, 5]
/// - `risk_free_rate`: Government bond yield, 5 or 0.05 both mean 5%;
///   must lie in [0%, 20%] after normalization
/// - `market_return`: Expected market return, percentage-like, must exceed
///   the risk-free rate
///
/// # Returns
/// Expected return of the asset as a decimal fraction
pub fn calculate_capm(beta: f64, risk_free_rate: f64, market_return: f64) -> FinResult<f64> {
    validate_finite("beta", beta)?;
    let risk_free_rate = finite_percentage("risk_free_rate", risk_free_rate)?;
    let market_return = finite_percentage("market_return", market_return)?;

    validate_range("beta", beta, 0.0, 5.0)?;
    validate_range("risk_free_rate", risk_free_rate, 0.0, 0.20)?;

    if market_return <= risk_free_rate {
        return Err(FinError::validation(
            "market_return",
            "must be greater than risk_free_rate",
        ));
    }

    Ok(risk_free_rate + beta * (market_return - risk_free_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capm_natural_percentages() {
        let expected = calculate_capm(1.2, 3.0, 8.0).unwrap();
        assert!((expected - 0.09).abs() < 1e-12, "got {}", expected);
    }

    #[test]
    fn test_capm_decimal_and_natural_inputs_agree() {
        let natural = calculate_capm(0.8, 4.0, 10.0).unwrap();
        let decimal = calculate_capm(0.8, 0.04, 0.10).unwrap();
        assert!((natural - decimal).abs() < 1e-12);
    }

    #[test]
    fn test_capm_zero_beta_returns_risk_free_rate() {
        let expected = calculate_capm(0.0, 0.02, 0.07).unwrap();
        assert!((expected - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_capm_rejects_non_positive_premium() {
        let err = calculate_capm(1.0, 5.0, 3.0).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "market_return must be greater than risk_free_rate"
        );
        assert!(calculate_capm(1.0, 5.0, 5.0).is_err());
    }

    #[test]
    fn test_capm_rejects_out_of_range_inputs() {
        assert_eq!(
            calculate_capm(10.0, 3.0, 8.0).unwrap_err().to_string(),
            "beta must be between 0 and 5"
        );
        assert!(calculate_capm(-0.1, 3.0, 8.0).is_err());
        // 25% risk-free rate is outside [0, 0.2]
        assert_eq!(
            calculate_capm(1.0, 25.0, 30.0).unwrap_err().to_string(),
            "risk_free_rate must be between 0 and 0.2"
        );
        assert!(calculate_capm(1.0, f64::NAN, 8.0).is_err());
    }
}
