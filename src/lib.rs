//! # fin-calc: Validated Financial Calculations for Tool-Calling Agents
//!
//! The computation layer behind a conversational finance assistant: each
//! operation takes raw numeric arguments as a user would state them,
//! normalizes and validates them, and returns a number or a weight vector.
//!
//! ## Operations
//!
//! - **CAPM**: expected return from beta
//! - **Sharpe ratio**: excess return per unit of volatility
//! - **Value at Risk**: parametric Gaussian VaR
//! - **Black-Scholes**: European call price
//! - **Altman Z-score**: bankruptcy-risk score and zone
//! - **Minimum-variance portfolio**: long-only weights via an active-set QP
//!
//! ## Quick Start
//!
//! ```rust
//! use fin_calc::analytics::{black_scholes_call, calculate_capm};
//! use fin_calc::portfolio::minimize_variance;
//!
//! // Rates may be written as 5 or 0.05
//! let expected = calculate_capm(1.2, 3.0, 8.0).expect("valid inputs");
//! assert!((expected - 0.09).abs() < 1e-12);
//!
//! let call = black_scholes_call(100.0, 100.0, 1.0, 5.0, 20.0).expect("valid inputs");
//! assert!((call - 10.4506).abs() < 1e-4);
//!
//! let weights = minimize_variance(&[vec![0.1, 0.02], vec![0.02, 0.08]]).expect("valid matrix");
//! assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Percentage Inputs
//!
//! Rate-like arguments greater than 1 are divided by 100; arguments at or
//! below 1 are taken as decimal fractions. See
//! [`normalize_percentage`](error::validation::normalize_percentage).

// Module declarations
pub mod error;
pub mod math_utils;
pub mod rng;
pub mod analytics;
pub mod portfolio;
pub mod tools;

// Re-export commonly used types for convenience
pub use error::{FinError, FinResult};
