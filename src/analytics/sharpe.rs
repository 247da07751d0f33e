//! Sharpe ratio: excess return per unit of volatility

use crate::error::{validation::*, FinResult};

/// Sharpe ratio `(R_p - r_f) / σ_p`.
///
/// All three inputs are percentage-like (12 and 0.12 both mean 12%).
/// A standard deviation that is not positive after normalization is rejected.
pub fn calculate_sharpe_ratio(
    portfolio_return: f64,
    risk_free_rate: f64,
    std_dev: f64,
) -> FinResult<f64> {
    let portfolio_return = finite_percentage("portfolio_return", portfolio_return)?;
    let risk_free_rate = finite_percentage("risk_free_rate", risk_free_rate)?;
    let std_dev = finite_percentage("std_dev", std_dev)?;

    validate_positive("std_dev", std_dev)?;

    Ok((portfolio_return - risk_free_rate) / std_dev)
}
