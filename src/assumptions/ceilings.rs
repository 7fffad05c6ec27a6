//! Regulatory ceilings of the tax wrappers

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionCeilings {
    /// Maximum paid into the sheltered equity wrapper
    pub sheltered_equity: f64,
    /// Maximum deductible retirement contribution per year
    pub retirement_annual: f64,
    /// Maximum balance of the regulated savings account
    pub savings_balance: f64,
}

impl Default for ContributionCeilings {
    fn default() -> Self {
        Self {
            sheltered_equity: 150_000.0,
            retirement_annual: 33_000.0,
            savings_balance: 61_200.0,
        }
    }
}

impl ContributionCeilings {
    /// Create from a loaded `wrapper -> limit` table
    pub fn from_loaded(limits: &HashMap<String, f64>) -> Self {
        let mut ceilings = Self::default();
        for (wrapper, &limit) in limits {
            match wrapper.as_str() {
                "sheltered_equity" => ceilings.sheltered_equity = limit,
                "retirement_annual" => ceilings.retirement_annual = limit,
                "savings_balance" => ceilings.savings_balance = limit,
                other => warn!("Ignoring unknown wrapper ceiling '{}'", other),
            }
        }
        ceilings
    }
}
