//! Real-estate income fund products

use serde::{Deserialize, Serialize};

/// Terms of one income-fund product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundTerms {
    /// Lookup key used in parameter records
    pub key: String,
    pub name: String,
    /// Gross distribution rate on invested capital
    pub gross_yield_pct: f64,
    /// Subscription fee
    pub entry_fee_pct: f64,
    /// Management fee, charged on the gross distribution
    ///
    /// Not a rate on invested capital: on that basis the catalog fees would
    /// wipe out every distribution.
    pub management_fee_pct: f64,
    /// Financial occupancy rate (informational)
    pub occupancy_pct: f64,
    pub zone: String,
    pub risk: String,
}

impl FundTerms {
    /// Terms that neither charge nor distribute anything
    pub fn zero_rate(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: key.to_string(),
            gross_yield_pct: 0.0,
            entry_fee_pct: 0.0,
            management_fee_pct: 0.0,
            occupancy_pct: 0.0,
            zone: String::new(),
            risk: String::new(),
        }
    }

    /// Distribution rate after management fee, before tax (decimal)
    pub fn net_distribution_rate(&self) -> f64 {
        self.gross_yield_pct / 100.0 * (1.0 - self.management_fee_pct / 100.0)
    }
}

/// Catalog of available income-fund products
#[derive(Debug, Clone, PartialEq)]
pub struct FundCatalog {
    products: Vec<FundTerms>,
}

impl FundCatalog {
    /// Create from loaded CSV rows
    pub fn from_loaded(products: &[FundTerms]) -> Self {
        Self {
            products: products.to_vec(),
        }
    }

    /// Find a product by key
    pub fn get(&self, key: &str) -> Option<&FundTerms> {
        self.products.iter().find(|p| p.key == key)
    }

    pub fn products(&self) -> &[FundTerms] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for FundCatalog {
    fn default() -> Self {
        let product = |key: &str, name: &str, gross: f64, entry: f64, mgmt: f64, occupancy: f64, zone: &str, risk: &str| FundTerms {
            key: key.to_string(),
            name: name.to_string(),
            gross_yield_pct: gross,
            entry_fee_pct: entry,
            management_fee_pct: mgmt,
            occupancy_pct: occupancy,
            zone: zone.to_string(),
            risk: risk.to_string(),
        };

        Self {
            products: vec![
                product("sofidynamic", "Sofidynamic", 9.52, 0.0, 10.8, 94.7, "Europe", "High"),
                product("transitions", "Transitions Europe", 8.25, 8.5, 9.5, 95.5, "Europe", "Moderate-high"),
                product("remake", "Remake Live", 7.50, 10.0, 12.0, 96.0, "Europe", "Moderate"),
                product("iroko", "Iroko Zen", 7.32, 10.0, 10.0, 95.2, "Europe", "Moderate"),
                product("corum", "Corum Origin", 6.05, 0.0, 10.0, 97.0, "World", "Low-moderate"),
                product("euodia", "SCPI Euodia", 4.50, 10.0, 10.0, 93.0, "Europe", "Moderate"),
            ],
        }
    }
}
