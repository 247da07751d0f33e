//! Static description of every tool and its arguments.
//!
//! The orchestration layer reads this to tell users which inputs a model
//! needs and how rates may be written, and to check that a call is complete
//! before invoking it.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Number,
    Matrix,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParameterKind,
    pub required: bool,
    /// Accepts 5 or 0.05 for 5%
    pub percentage_like: bool,
    pub typical_range: Option<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub summary: &'static str,
    pub formula: &'static str,
    pub parameters: Vec<ParameterSpec>,
    pub output: &'static str,
    pub interpretation: Option<&'static str>,
}

impl ToolSpec {
    pub fn required_parameters(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parameters.iter().filter(|p| p.required).map(|p| p.name)
    }
}

const fn number(
    name: &'static str,
    description: &'static str,
    percentage_like: bool,
    typical_range: Option<&'static str>,
) -> ParameterSpec {
    ParameterSpec {
        name,
        description,
        kind: ParameterKind::Number,
        required: true,
        percentage_like,
        typical_range,
    }
}

/// Every tool exposed by [`ToolCall`](super::ToolCall), in dispatch order
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "capm",
            summary: "Expected return of an asset from its systematic risk (Capital Asset Pricing Model)",
            formula: "E[R] = r_f + beta * (R_m - r_f)",
            parameters: vec![
                number("beta", "Sensitivity of the asset to market movements; 1 is market-level risk", false, Some("0 to 3, accepted 0 to 5")),
                number("risk_free_rate", "Government bond yield", true, Some("0% to 10%, accepted 0% to 20%")),
                number("market_return", "Expected market return; must exceed the risk-free rate", true, Some("5% to 15%")),
            ],
            output: "Expected return as a decimal fraction",
            interpretation: None,
        },
        ToolSpec {
            name: "sharpe",
            summary: "Risk-adjusted return: excess return per unit of volatility",
            formula: "(R_p - r_f) / sigma_p",
            parameters: vec![
                number("portfolio_return", "Expected or realized portfolio return", true, Some("-100% to +100%")),
                number("risk_free_rate", "Risk-free return", true, Some("0% to 10%")),
                number("std_dev", "Standard deviation of portfolio returns; must be positive", true, Some("5% to 50%")),
            ],
            output: "Dimensionless ratio",
            interpretation: Some("> 2 very strong, > 1 good, < 1 weak, negative underperforms the risk-free rate"),
        },
        ToolSpec {
            name: "var_tool",
            summary: "Parametric Value at Risk assuming normally distributed returns",
            formula: "VaR = -(mu + z_(1-c) * sigma)",
            parameters: vec![
                number("mean_return", "Mean return over the horizon", true, None),
                number("std_dev", "Standard deviation of returns; must be positive", true, None),
                ParameterSpec {
                    name: "confidence_level",
                    description: "Decimal confidence level, 0.95 for 95%; 95 is rejected",
                    kind: ParameterKind::Number,
                    required: false,
                    percentage_like: false,
                    typical_range: Some("0.90 to 0.99, default 0.95"),
                },
            ],
            output: "Loss as a decimal fraction of portfolio value",
            interpretation: None,
        },
        ToolSpec {
            name: "black_scholes",
            summary: "Black-Scholes price of a European call option",
            formula: "C = S*N(d1) - K*exp(-rT)*N(d2), d1 = (ln(S/K) + (r + sigma^2/2)T) / (sigma*sqrt(T)), d2 = d1 - sigma*sqrt(T)",
            parameters: vec![
                number("S", "Current price of the underlying; must be positive", false, None),
                number("K", "Strike price; must be positive", false, None),
                number("T", "Time to maturity in years (0.5 = six months); must be positive", false, None),
                number("r", "Annual risk-free rate", true, Some("0% to 10%, accepted -50% to 50%")),
                number("sigma", "Annual volatility; must be positive", true, Some("5% to 100%")),
            ],
            output: "Call option price in the currency of S",
            interpretation: None,
        },
        ToolSpec {
            name: "altman_z",
            summary: "Altman Z-score (manufacturing model) estimating bankruptcy risk",
            formula: "Z = 1.2*WC/TA + 1.4*RE/TA + 3.3*EBIT/TA + 0.6*MVE/TL + 1.0*Sales/TA",
            parameters: vec![
                number("working_capital", "Current assets minus current liabilities", false, None),
                number("retained_earnings", "Accumulated retained earnings", false, None),
                number("ebit", "Earnings before interest and taxes", false, None),
                number("market_value_equity", "Market capitalization", false, None),
                number("total_assets", "Total assets; must be positive", false, None),
                number("total_liabilities", "Total liabilities; must be positive", false, None),
                number("sales", "Total revenue", false, None),
            ],
            output: "Z-score with its risk zone; all figures in one monetary unit",
            interpretation: Some("Z > 3.0 safe, 1.8 to 3.0 grey, Z < 1.8 distress"),
        },
        ToolSpec {
            name: "portfolio_optimization",
            summary: "Long-only, fully invested minimum-variance portfolio weights",
            formula: "minimize w' Sigma w subject to sum(w) = 1, 0 <= w_i <= 1",
            parameters: vec![ParameterSpec {
                name: "cov_matrix",
                description: "Square, symmetric covariance matrix with positive variances, e.g. [[0.1, 0.02], [0.02, 0.08]]",
                kind: ParameterKind::Matrix,
                required: true,
                percentage_like: false,
                typical_range: None,
            }],
            output: "One weight per asset, in matrix order, summing to 1",
            interpretation: None,
        },
    ]
}
