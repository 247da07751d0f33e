//! Closed-form financial formulas.
//!
//! Every public entry point takes raw caller arguments, normalizes the
//! rate-like ones with [`normalize_percentage`](crate::error::validation::normalize_percentage),
//! validates them and only then evaluates the formula.

pub mod altman_z;
pub mod bs_analytic;
pub mod capm;
pub mod sharpe;
pub mod var;

pub use altman_z::{calculate_altman_z, AltmanInputs, AltmanZone};
pub use bs_analytic::black_scholes_call;
pub use capm::calculate_capm;
pub use sharpe::calculate_sharpe_ratio;
pub use var::{calculate_var, calculate_var_default, DEFAULT_CONFIDENCE_LEVEL};
