// src/error.rs
use thiserror::Error;

/// Error types for the fin-calc library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinError {
    /// A numeric precondition (sign, range, shape, symmetry) does not hold
    #[error("{field} {constraint}")]
    Validation { field: String, constraint: String },

    /// The portfolio solver stopped without reaching an optimum
    #[error("Optimization failed: {reason}")]
    Optimization { reason: String, iterations: usize },

    /// A tool call could not be decoded into a known operation
    #[error("Malformed tool call: {reason}")]
    MalformedCall { reason: String },
}

impl FinError {
    /// Validation error for `field`, displayed as `"<field> <constraint>"`
    pub fn validation(field: &str, constraint: impl Into<String>) -> Self {
        FinError::Validation {
            field: field.to_string(),
            constraint: constraint.into(),
        }
    }

    /// True for errors the caller fixes by supplying different inputs
    pub fn is_validation(&self) -> bool {
        matches!(self, FinError::Validation { .. })
    }
}

/// Result type alias for fin-calc operations
pub type FinResult<T> = Result<T, FinError>;

/// Normalization and validation utilities shared by every calculation
pub mod validation {
    use super::{FinError, FinResult};
    use tracing::debug;

    /// Convert a natural percentage (5 meaning 5%) to a decimal fraction.
    ///
    /// Values above 1 are divided by 100; values at or below 1 are taken as
    /// already decimal. The cutoff is ambiguous for rates above 100% written
    /// as fractions: 1.5 meant as 150% is read as 1.5% (0.015), and exactly
    /// 1.0 stays 100%.
    pub fn normalize_percentage(value: f64) -> f64 {
        if value > 1.0 {
            debug!(value, normalized = value / 100.0, "rescaled percentage input");
            value / 100.0
        } else {
            value
        }
    }

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> FinResult<()> {
        if value.is_nan() || value <= 0.0 {
            Err(FinError::validation(name, "must be positive"))
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is within an inclusive range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> FinResult<()> {
        if !(min..=max).contains(&value) {
            Err(FinError::validation(
                name,
                format!("must be between {} and {}", min, max),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> FinResult<()> {
        if !value.is_finite() {
            Err(FinError::validation(name, "must be finite"))
        } else {
            Ok(())
        }
    }

    /// Check finiteness of a raw input, then normalize it as a percentage
    pub fn finite_percentage(name: &str, value: f64) -> FinResult<f64> {
        validate_finite(name, value)?;
        Ok(normalize_percentage(value))
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_normalize_percentage() {
        assert_eq!(normalize_percentage(0.05), 0.05);
        assert_eq!(normalize_percentage(0.0), 0.0);
        assert_eq!(normalize_percentage(1.0), 1.0);
        assert_eq!(normalize_percentage(-3.0), -3.0);
        assert_eq!(normalize_percentage(5.0), 0.05);
        assert_eq!(normalize_percentage(20.0), 0.2);
        assert_eq!(normalize_percentage(150.0), 1.5);
        // Ambiguous: 1.5 meant as 150% is read as 1.5%
        assert_eq!(normalize_percentage(1.5), 0.015);
    }

    #[test]
    fn test_normalize_percentage_unit_interval_is_identity() {
        for i in 0..=100 {
            let x = i as f64 / 100.0;
            assert_eq!(normalize_percentage(x), x);
        }
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("sigma", 0.2).is_ok());
        assert!(validate_positive("sigma", 0.0).is_err());
        assert!(validate_positive("sigma", -0.1).is_err());
    }

    #[test]
    fn test_validate_range_is_inclusive() {
        assert!(validate_range("beta", 0.0, 0.0, 5.0).is_ok());
        assert!(validate_range("beta", 5.0, 0.0, 5.0).is_ok());
        assert!(validate_range("beta", 5.01, 0.0, 5.0).is_err());
        assert!(validate_range("beta", -0.01, 0.0, 5.0).is_err());
    }

    #[test]
    fn test_nan_fails_range_and_positive_checks() {
        let err = validate_range("confidence_level", f64::NAN, 0.0, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "confidence_level must be between 0 and 1");
        assert!(validate_positive("sigma", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = validate_positive("std_dev", 0.0).unwrap_err();
        assert_eq!(error.to_string(), "std_dev must be positive");

        let error = validate_range("risk_free_rate", 0.3, 0.0, 0.2).unwrap_err();
        assert_eq!(
            error.to_string(),
            "risk_free_rate must be between 0 and 0.2"
        );

        let error = FinError::Optimization {
            reason: "Iteration limit reached".to_string(),
            iterations: 100,
        };
        assert_eq!(
            error.to_string(),
            "Optimization failed: Iteration limit reached"
        );
    }
}
