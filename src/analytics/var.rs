//! Parametric (Gaussian) Value at Risk
//!
//! Assuming normally distributed returns with mean μ and standard deviation σ,
//! the loss not exceeded with probability `c` is
//! ```text
//! VaR_c = -(μ + Φ⁻¹(1 - c) σ)
//! ```

use crate::error::{validation::*, FinResult};
use crate::math_utils::norm_inv_cdf;
use tracing::warn;

/// Confidence level used when the caller does not supply one
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Parametric Value at Risk as a fraction of portfolio value.
///
/// `mean_return` and `std_dev` are percentage-like. `confidence_level` is a
/// decimal fraction in [0, 1] and is NOT normalized: 95 is rejected rather
/// than read as 95%.
///
/// The boundary levels are accepted: a confidence of 1 gives `+∞` and a
/// confidence of 0 gives `-∞`.
pub fn calculate_var(mean_return: f64, std_dev: f64, confidence_level: f64) -> FinResult<f64> {
    let mean_return = finite_percentage("mean_return", mean_return)?;
    let std_dev = finite_percentage("std_dev", std_dev)?;

    validate_positive("std_dev", std_dev)?;
    validate_finite("confidence_level", confidence_level)?;
    validate_range("confidence_level", confidence_level, 0.0, 1.0)?;

    let z_score = norm_inv_cdf(1.0 - confidence_level);
    let var = -(mean_return + z_score * std_dev);
    if !var.is_finite() {
        warn!(confidence_level, var, "boundary confidence level gives unbounded VaR");
    }
    Ok(var)
}

/// [`calculate_var`] at [`DEFAULT_CONFIDENCE_LEVEL`]
pub fn calculate_var_default(mean_return: f64, std_dev: f64) -> FinResult<f64> {
    calculate_var(mean_return, std_dev, DEFAULT_CONFIDENCE_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_95() {
        // -(0.05 - 1.6448536 * 0.10)
        let var = calculate_var(5.0, 10.0, 0.95).unwrap();
        assert!((var - 0.114_485_362_695_147).abs() < 1e-9, "got {}", var);
    }

    #[test]
    fn test_var_default_confidence() {
        let explicit = calculate_var(5.0, 10.0, 0.95).unwrap();
        let default = calculate_var_default(5.0, 10.0).unwrap();
        assert_eq!(explicit, default);
    }

    #[test]
    fn test_var_grows_with_confidence() {
        let var_90 = calculate_var(0.01, 0.2, 0.90).unwrap();
        let var_99 = calculate_var(0.01, 0.2, 0.99).unwrap();
        assert!(var_99 > var_90);
    }

    #[test]
    fn test_var_confidence_is_not_normalized() {
        let err = calculate_var(5.0, 10.0, 95.0).unwrap_err();
        assert_eq!(err.to_string(), "confidence_level must be between 0 and 1");
        assert!(calculate_var(5.0, 10.0, 1.5).is_err());
        assert!(calculate_var(5.0, 10.0, -0.01).is_err());
    }

    #[test]
    fn test_var_half_confidence_is_negative_mean() {
        let var = calculate_var(0.03, 0.1, 0.5).unwrap();
        assert!((var + 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_var_boundary_confidence() {
        assert_eq!(calculate_var(5.0, 10.0, 1.0).unwrap(), f64::INFINITY);
        assert_eq!(calculate_var(5.0, 10.0, 0.0).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_var_rejects_nan_confidence() {
        let err = calculate_var(5.0, 10.0, f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "confidence_level must be finite");
        assert!(calculate_var(5.0, 10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_var_rejects_zero_std_dev() {
        assert!(calculate_var(5.0, 0.0, 0.95).is_err());
    }
}
