//! French tax rates applied by the projection
//!
//! Rates are decimals (0.30 = 30%).

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tax rates used across the sleeves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    /// Flat tax on investment income and gains (income part + social levies)
    pub flat_tax: f64,

    /// Social levies alone (sheltered equity gains, property gains)
    pub social_levy: f64,

    /// Flat allowance on furnished-rental income
    pub rental_allowance: f64,

    /// Income tax on the taxable part of rental income
    pub rental_income_tax: f64,

    /// Social levies on the taxable part of rental income
    pub rental_social_levy: f64,

    /// Income tax on property capital gains
    pub property_gain_income_tax: f64,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            flat_tax: 0.30,
            social_levy: 0.172,
            rental_allowance: 0.50,
            rental_income_tax: 0.30,
            rental_social_levy: 0.172,
            property_gain_income_tax: 0.19,
        }
    }
}

impl TaxRates {
    /// Build from a loaded `name -> rate` table; missing names keep their default
    pub fn from_loaded(rates: &HashMap<String, f64>) -> Self {
        let mut tax = Self::default();
        for (name, &rate) in rates {
            let slot = match name.as_str() {
                "flat_tax" => &mut tax.flat_tax,
                "social_levy" => &mut tax.social_levy,
                "rental_allowance" => &mut tax.rental_allowance,
                "rental_income_tax" => &mut tax.rental_income_tax,
                "rental_social_levy" => &mut tax.rental_social_levy,
                "property_gain_income_tax" => &mut tax.property_gain_income_tax,
                other => {
                    warn!("Ignoring unknown tax rate '{}'", other);
                    continue;
                }
            };
            *slot = rate;
        }
        tax
    }

    /// Tax on gross rent under the flat-allowance regime
    pub fn rental_tax(&self, gross_rent: f64) -> f64 {
        let taxable = gross_rent * (1.0 - self.rental_allowance);
        taxable * (self.rental_income_tax + self.rental_social_levy)
    }

    /// Combined rate on a property gain with no holding-period relief
    pub fn undiscounted_property_gain_rate(&self) -> f64 {
        self.property_gain_income_tax + self.social_levy
    }

    /// Tax on a property capital gain after taper relief
    pub fn property_gain_tax(&self, gain: f64, holding_years: u32) -> f64 {
        let gain = gain.max(0.0);
        let relief = TaperRelief::for_holding_period(holding_years);
        let income_base = gain * (1.0 - relief.income_tax);
        let social_base = gain * (1.0 - relief.social_levy);
        income_base * self.property_gain_income_tax + social_base * self.social_levy
    }
}

/// Share of a property gain exempted after a holding period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaperRelief {
    /// Relief on the income-tax base (1.0 = fully exempt)
    pub income_tax: f64,
    /// Relief on the social-levy base
    pub social_levy: f64,
}

impl TaperRelief {
    /// Relief schedule by whole years of ownership
    ///
    /// Income tax is fully relieved after 22 years, social levies after 30.
    pub fn for_holding_period(years: u32) -> Self {
        let (income_tax, social_levy) = match years {
            0..=5 => (0.0, 0.0),
            6..=21 => {
                let n = (years - 5) as f64;
                (n * 0.06, n * 0.0165)
            }
            22 => (1.0, 0.28),
            23..=30 => (1.0, (0.28 + (years - 22) as f64 * 0.09).min(1.0)),
            _ => (1.0, 1.0),
        };
        Self {
            income_tax,
            social_levy,
        }
    }
}
