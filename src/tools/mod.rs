//! Named-argument tool calls
//!
//! An orchestration layer (for example a language-model agent) selects an
//! operation and supplies its arguments by name. This module decodes such a
//! call, dispatches it to the matching calculation and encodes the result.
//!
//! ```
//! use fin_calc::tools::{ToolCall, ToolOutput};
//!
//! let call = ToolCall::from_json(
//!     r#"{"name": "sharpe", "arguments": {"portfolio_return": 12, "risk_free_rate": 3, "std_dev": 15}}"#,
//! ).unwrap();
//! match call.evaluate().unwrap() {
//!     ToolOutput::Scalar(ratio) => assert!((ratio - 0.6).abs() < 1e-12),
//!     other => panic!("unexpected output {:?}", other),
//! }
//! ```

pub mod catalog;

use crate::analytics::{
    black_scholes_call, calculate_capm, calculate_sharpe_ratio, calculate_var, AltmanInputs,
    AltmanZone, DEFAULT_CONFIDENCE_LEVEL,
};
use crate::error::{FinError, FinResult};
use crate::portfolio::minimize_variance;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

pub use catalog::{catalog, ParameterKind, ParameterSpec, ToolSpec};

fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}

/// One operation with all of its arguments
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    Capm {
        beta: f64,
        risk_free_rate: f64,
        market_return: f64,
    },
    Sharpe {
        portfolio_return: f64,
        risk_free_rate: f64,
        std_dev: f64,
    },
    VarTool {
        mean_return: f64,
        std_dev: f64,
        #[serde(default = "default_confidence_level")]
        confidence_level: f64,
    },
    BlackScholes {
        #[serde(rename = "S")]
        s: f64,
        #[serde(rename = "K")]
        k: f64,
        #[serde(rename = "T")]
        t: f64,
        r: f64,
        sigma: f64,
    },
    AltmanZ(AltmanInputs),
    PortfolioOptimization { cov_matrix: Vec<Vec<f64>> },
}

/// Result of a successful tool call.
///
/// A non-finite scalar (VaR at confidence 0 or 1) is encoded as the string
/// `"inf"`, `"-inf"` or `"nan"`, since JSON numbers cannot carry it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolOutput {
    Scalar(#[serde(with = "non_finite")] f64),
    AltmanScore { z_score: f64, zone: AltmanZone },
    Weights(Vec<f64>),
}

impl ToolCall {
    /// Decode a `{"name": ..., "arguments": {...}}` object
    pub fn from_json(input: &str) -> FinResult<Self> {
        serde_json::from_str(input).map_err(|e| FinError::MalformedCall {
            reason: e.to_string(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::Capm { .. } => "capm",
            ToolCall::Sharpe { .. } => "sharpe",
            ToolCall::VarTool { .. } => "var_tool",
            ToolCall::BlackScholes { .. } => "black_scholes",
            ToolCall::AltmanZ(_) => "altman_z",
            ToolCall::PortfolioOptimization { .. } => "portfolio_optimization",
        }
    }

    /// Run the calculation
    pub fn evaluate(&self) -> FinResult<ToolOutput> {
        debug!(tool = self.name(), "evaluating tool call");
        match self {
            ToolCall::Capm {
                beta,
                risk_free_rate,
                market_return,
            } => calculate_capm(*beta, *risk_free_rate, *market_return).map(ToolOutput::Scalar),
            ToolCall::Sharpe {
                portfolio_return,
                risk_free_rate,
                std_dev,
            } => calculate_sharpe_ratio(*portfolio_return, *risk_free_rate, *std_dev)
                .map(ToolOutput::Scalar),
            ToolCall::VarTool {
                mean_return,
                std_dev,
                confidence_level,
            } => calculate_var(*mean_return, *std_dev, *confidence_level).map(ToolOutput::Scalar),
            ToolCall::BlackScholes { s, k, t, r, sigma } => {
                black_scholes_call(*s, *k, *t, *r, *sigma).map(ToolOutput::Scalar)
            }
            ToolCall::AltmanZ(inputs) => {
                let z_score = inputs.score()?;
                Ok(ToolOutput::AltmanScore {
                    z_score,
                    zone: AltmanZone::classify(z_score),
                })
            }
            ToolCall::PortfolioOptimization { cov_matrix } => {
                minimize_variance(cov_matrix).map(ToolOutput::Weights)
            }
        }
    }
}

/// Evaluate independent calls in parallel, results in input order
pub fn evaluate_batch(calls: &[ToolCall]) -> Vec<FinResult<ToolOutput>> {
    calls.par_iter().map(ToolCall::evaluate).collect()
}

mod non_finite {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"inf\", \"-inf\" or \"nan\"",
                )),
            },
        }
    }
}

fn error_kind(error: &FinError) -> &'static str {
    match error {
        FinError::Validation { .. } => "validation",
        FinError::Optimization { .. } => "optimization",
        FinError::MalformedCall { .. } => "malformed_call",
    }
}

/// Decode, evaluate and encode one call.
///
/// Never fails: errors come back as `{"error": {"kind": ..., "message": ...}}`
/// so the orchestration layer can relay the message to the user.
pub fn handle_json(input: &str) -> Value {
    let outcome = ToolCall::from_json(input).and_then(|call| {
        let output = call.evaluate()?;
        Ok((call.name(), output))
    });

    match outcome {
        Ok((name, output)) => json!({ "name": name, "result": output }),
        Err(e) => json!({
            "error": { "kind": error_kind(&e), "message": e.to_string() }
        }),
    }
}
