//! Comparison of preset splits between the sheltered and unsheltered equity wrappers

use crate::assumptions::TaxRates;
use crate::params::SimulationParameters;
use crate::projection::{Allocation, HORIZON_YEARS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquityMix {
    Prudent,
    Balanced,
    Aggressive,
}

impl EquityMix {
    pub const ALL: [EquityMix; 3] = [EquityMix::Prudent, EquityMix::Balanced, EquityMix::Aggressive];

    /// Share held in the sheltered wrapper (percent)
    pub fn sheltered_share_pct(&self) -> f64 {
        match self {
            EquityMix::Prudent => 80.0,
            EquityMix::Balanced => 60.0,
            EquityMix::Aggressive => 40.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EquityMix::Prudent => "Prudent",
            EquityMix::Balanced => "Balanced",
            EquityMix::Aggressive => "Aggressive",
        }
    }
}

/// Horizon outcome of one equity split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityMixOutcome {
    pub mix: EquityMix,
    pub sheltered_initial: f64,
    pub unsheltered_initial: f64,
    pub sheltered_final: f64,
    pub unsheltered_final: f64,
    pub gross_gain: f64,
    pub tax: f64,
    pub net_gain: f64,
    /// Average yearly return on the equity capital, before tax
    pub average_annual_return_pct: f64,
}

/// Compound each preset split over the horizon
///
/// Uses the equity capital the allocation would give (loan proceeds
/// included) and the yields of `params`. Empty when equities are disabled.
pub fn compare_equity_mixes(params: &SimulationParameters, allocation: &Allocation, tax: &TaxRates) -> Vec<EquityMixOutcome> {
    if !params.equities.enabled {
        return Vec::new();
    }

    let capital = allocation.equity_capital();
    let sheltered_growth = (1.0 + params.equities.sheltered_yield_pct / 100.0).powi(HORIZON_YEARS as i32);
    let unsheltered_growth = (1.0 + params.equities.unsheltered_yield_pct / 100.0).powi(HORIZON_YEARS as i32);

    EquityMix::ALL
        .iter()
        .map(|&mix| {
            let sheltered_initial = capital * mix.sheltered_share_pct() / 100.0;
            let unsheltered_initial = capital - sheltered_initial;
            let sheltered_final = sheltered_initial * sheltered_growth;
            let unsheltered_final = unsheltered_initial * unsheltered_growth;

            let gross_gain = sheltered_final + unsheltered_final - capital;
            let tax = (sheltered_final - sheltered_initial).max(0.0) * tax.social_levy
                + (unsheltered_final - unsheltered_initial).max(0.0) * tax.flat_tax;
            let average_annual_return_pct = if capital > 0.0 {
                gross_gain / capital / HORIZON_YEARS as f64 * 100.0
            } else {
                0.0
            };

            EquityMixOutcome {
                mix,
                sheltered_initial,
                unsheltered_initial,
                sheltered_final,
                unsheltered_final,
                gross_gain,
                tax,
                net_gain: gross_gain - tax,
                average_annual_return_pct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::FundCatalog;
    use approx::assert_relative_eq;

    fn compare(params: &SimulationParameters) -> Vec<EquityMixOutcome> {
        let allocation = Allocation::resolve(params, &FundCatalog::default());
        compare_equity_mixes(params, &allocation, &TaxRates::default())
    }

    #[test]
    fn test_three_mixes_on_reference_record() {
        let outcomes = compare(&SimulationParameters::default());
        assert_eq!(outcomes.len(), 3);

        let prudent = &outcomes[0];
        assert_eq!(prudent.mix, EquityMix::Prudent);
        assert_relative_eq!(prudent.sheltered_initial, 55_200.0, epsilon = 1e-6);
        assert_relative_eq!(prudent.unsheltered_initial, 13_800.0, epsilon = 1e-6);
        assert_relative_eq!(prudent.sheltered_final, 55_200.0 * 1.078_f64.powi(8), epsilon = 1e-6);

        let expected_tax = (prudent.sheltered_final - 55_200.0) * 0.172 + (prudent.unsheltered_final - 13_800.0) * 0.30;
        assert_relative_eq!(prudent.tax, expected_tax, epsilon = 1e-6);
        assert_relative_eq!(prudent.net_gain, prudent.gross_gain - expected_tax, epsilon = 1e-6);

        // Higher-yield unsheltered share wins before and after tax here
        assert!(outcomes[2].gross_gain > outcomes[1].gross_gain);
        assert!(outcomes[1].net_gain > outcomes[0].net_gain);
    }

    #[test]
    fn test_loss_is_not_taxed() {
        let mut params = SimulationParameters::default();
        params.equities.sheltered_yield_pct = -5.0;
        params.equities.unsheltered_yield_pct = -5.0;

        for outcome in compare(&params) {
            assert_eq!(outcome.tax, 0.0);
            assert!(outcome.gross_gain < 0.0);
            assert_eq!(outcome.net_gain, outcome.gross_gain);
        }
    }

    #[test]
    fn test_disabled_equities_give_nothing() {
        let mut params = SimulationParameters::default();
        params.equities.enabled = false;
        assert!(compare(&params).is_empty());
    }
}
