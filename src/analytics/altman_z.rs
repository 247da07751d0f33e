//! Altman Z-Score (original manufacturing model)
//!
//! ```text
//! Z = 1.2·(WC/TA) + 1.4·(RE/TA) + 3.3·(EBIT/TA) + 0.6·(MVE/TL) + 1.0·(Sales/TA)
//! ```
//!
//! All figures are raw monetary amounts in one consistent unit; none of them
//! is percentage-normalized.

use crate::error::{validation::*, FinResult};
use serde::{Deserialize, Serialize};

/// Balance-sheet and income figures feeding the Z-score
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AltmanInputs {
    /// Current assets minus current liabilities
    pub working_capital: f64,
    pub retained_earnings: f64,
    /// Earnings before interest and taxes
    pub ebit: f64,
    /// Market capitalization
    pub market_value_equity: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub sales: f64,
}

impl AltmanInputs {
    pub fn validate(&self) -> FinResult<()> {
        validate_finite("working_capital", self.working_capital)?;
        validate_finite("retained_earnings", self.retained_earnings)?;
        validate_finite("ebit", self.ebit)?;
        validate_finite("market_value_equity", self.market_value_equity)?;
        validate_finite("total_assets", self.total_assets)?;
        validate_finite("total_liabilities", self.total_liabilities)?;
        validate_finite("sales", self.sales)?;

        validate_positive("total_assets", self.total_assets)?;
        validate_positive("total_liabilities", self.total_liabilities)?;
        Ok(())
    }

    /// Validated Z-score
    pub fn score(&self) -> FinResult<f64> {
        self.validate()?;
        let ta = self.total_assets;
        Ok(1.2 * (self.working_capital / ta)
            + 1.4 * (self.retained_earnings / ta)
            + 3.3 * (self.ebit / ta)
            + 0.6 * (self.market_value_equity / self.total_liabilities)
            + 1.0 * (self.sales / ta))
    }
}

/// Altman Z-score from the seven raw figures
pub fn calculate_altman_z(
    working_capital: f64,
    retained_earnings: f64,
    ebit: f64,
    market_value_equity: f64,
    total_assets: f64,
    total_liabilities: f64,
    sales: f64,
) -> FinResult<f64> {
    AltmanInputs {
        working_capital,
        retained_earnings,
        ebit,
        market_value_equity,
        total_assets,
        total_liabilities,
        sales,
    }
    .score()
}

/// Bankruptcy-risk band of a Z-score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltmanZone {
    /// Z > 3.0
    Safe,
    /// 1.8 <= Z <= 3.0
    Grey,
    /// Z < 1.8
    Distress,
}

impl AltmanZone {
    pub fn classify(z: f64) -> Self {
        if z > 3.0 {
            AltmanZone::Safe
        } else if z >= 1.8 {
            AltmanZone::Grey
        } else {
            AltmanZone::Distress
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AltmanZone::Safe => "financially safe zone",
            AltmanZone::Grey => "grey zone (moderate risk)",
            AltmanZone::Distress => "distress zone (high bankruptcy risk)",
        }
    }
}
