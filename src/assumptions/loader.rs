//! CSV-based assumption loader
//!
//! Loads tax rates, fund products and wrapper ceilings from data/assumptions/

use super::funds::FundTerms;
use crate::error::{ProjectionError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

fn open(path: &Path, file_name: &str) -> Result<csv::Reader<File>> {
    let full = path.join(file_name);
    let file = File::open(&full).map_err(|e| ProjectionError::io(&full, e))?;
    Ok(csv::Reader::from_reader(file))
}

/// Load a two-column `name,value` table
fn load_named_values(path: &Path, file_name: &str) -> Result<HashMap<String, f64>> {
    let mut reader = open(path, file_name)?;
    let mut values = HashMap::new();

    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            return Err(ProjectionError::invalid_table(
                file_name,
                format!("expected 2 columns, found {}", record.len()),
            ));
        }
        let name = record[0].trim().to_string();
        let value: f64 = record[1].trim().parse().map_err(|_| {
            ProjectionError::invalid_table(file_name, format!("'{}' is not a number for {}", &record[1], name))
        })?;
        values.insert(name, value);
    }

    Ok(values)
}

/// Load tax rates from tax_rates.csv
/// Returns HashMap<name, rate>
pub fn load_tax_rates(path: &Path) -> Result<HashMap<String, f64>> {
    load_named_values(path, "tax_rates.csv")
}

/// Load wrapper ceilings from contribution_ceilings.csv
/// Returns HashMap<wrapper, limit>
pub fn load_contribution_ceilings(path: &Path) -> Result<HashMap<String, f64>> {
    load_named_values(path, "contribution_ceilings.csv")
}

/// Load income-fund products from fund_products.csv
pub fn load_fund_products(path: &Path) -> Result<Vec<FundTerms>> {
    let mut reader = open(path, "fund_products.csv")?;
    let mut products = Vec::new();

    for result in reader.deserialize() {
        let product: FundTerms = result?;
        products.push(product);
    }

    if products.is_empty() {
        return Err(ProjectionError::invalid_table("fund_products.csv", "no products"));
    }

    Ok(products)
}

/// All assumption tables as read from disk
pub struct LoadedAssumptions {
    pub tax_rates: HashMap<String, f64>,
    pub fund_products: Vec<FundTerms>,
    pub contribution_ceilings: HashMap<String, f64>,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            tax_rates: load_tax_rates(path)?,
            fund_products: load_fund_products(path)?,
            contribution_ceilings: load_contribution_ceilings(path)?,
        })
    }
}
