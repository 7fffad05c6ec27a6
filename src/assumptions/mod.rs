//! Assumptions: tax rates, income-fund products and wrapper ceilings

mod ceilings;
mod funds;
mod tax;
pub mod loader;

pub use ceilings::ContributionCeilings;
pub use funds::{FundCatalog, FundTerms};
pub use loader::LoadedAssumptions;
pub use tax::{TaperRelief, TaxRates};

use crate::error::Result;
use std::path::Path;

/// Container for all projection assumptions
#[derive(Debug, Clone, PartialEq)]
pub struct Assumptions {
    pub tax: TaxRates,
    pub funds: FundCatalog,
    pub ceilings: ContributionCeilings,
}

impl Assumptions {
    /// Current French rates and the reference fund catalog, in memory
    pub fn default_french() -> Self {
        Self {
            tax: TaxRates::default(),
            funds: FundCatalog::default(),
            ceilings: ContributionCeilings::default(),
        }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedAssumptions::load_from(path)?;

        Ok(Self {
            tax: TaxRates::from_loaded(&loaded.tax_rates),
            funds: FundCatalog::from_loaded(&loaded.fund_products),
            ceilings: ContributionCeilings::from_loaded(&loaded.contribution_ceilings),
        })
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_french()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_matches_in_memory_defaults() {
        let from_csv = Assumptions::from_csv().expect("Failed to load assumptions");
        assert_eq!(from_csv, Assumptions::default_french());
    }
}
