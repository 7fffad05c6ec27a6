//! Market scenarios and the batch runner
//!
//! Assumptions are loaded once, then any number of parameter records can be
//! projected against them. Batch runs fan out with rayon; each run is an
//! independent call of the engine.

use crate::error::Result;
use crate::params::SimulationParameters;
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::Assumptions;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Named market outlook applied on top of a parameter record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Historical yields, as entered
    #[default]
    UltraRealistic,
    Pessimistic,
    Neutral,
}

/// Yields a scenario forces onto the parameter record (percentages)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketOverrides {
    pub annuity_yield_pct: f64,
    pub rental_yield_pct: f64,
    pub appreciation_pct: f64,
    pub sheltered_equity_yield_pct: f64,
    pub unsheltered_equity_yield_pct: f64,
    pub inflation_rate_pct: f64,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::UltraRealistic, Scenario::Pessimistic, Scenario::Neutral];

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::UltraRealistic => "Ultra-realistic",
            Scenario::Pessimistic => "Pessimistic",
            Scenario::Neutral => "Neutral",
        }
    }

    pub fn overrides(&self) -> Option<MarketOverrides> {
        match self {
            Scenario::UltraRealistic => None,
            Scenario::Pessimistic => Some(MarketOverrides {
                annuity_yield_pct: 1.5,
                rental_yield_pct: 4.0,
                appreciation_pct: -1.0,
                sheltered_equity_yield_pct: -2.0,
                unsheltered_equity_yield_pct: 5.0,
                inflation_rate_pct: 4.0,
            }),
            Scenario::Neutral => Some(MarketOverrides {
                annuity_yield_pct: 2.5,
                rental_yield_pct: 5.0,
                appreciation_pct: 1.0,
                sheltered_equity_yield_pct: 6.0,
                unsheltered_equity_yield_pct: 15.0,
                inflation_rate_pct: 2.5,
            }),
        }
    }

    /// Copy of `params` with this scenario's yields applied
    pub fn apply(&self, params: &SimulationParameters) -> SimulationParameters {
        let mut params = params.clone();
        if let Some(o) = self.overrides() {
            params.annuity.gross_yield_pct = o.annuity_yield_pct;
            params.real_estate.rental_yield_pct = o.rental_yield_pct;
            params.real_estate.appreciation_pct = o.appreciation_pct;
            params.equities.sheltered_yield_pct = o.sheltered_equity_yield_pct;
            params.equities.unsheltered_yield_pct = o.unsheltered_equity_yield_pct;
            params.inflation.rate_pct = o.inflation_rate_pct;
        }
        params
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// for (scenario, result) in runner.run_presets(&params) {
///     println!("{}: {:.0}", scenario, result.synthesis.final_net_wealth);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default_french())
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv()?))
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv_path(path)?))
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            engine: ProjectionEngine::new(assumptions),
        }
    }

    /// Project a single parameter record
    pub fn run(&self, params: &SimulationParameters) -> ProjectionResult {
        self.engine.project(params)
    }

    /// Project one record under a market scenario
    pub fn run_scenario(&self, params: &SimulationParameters, scenario: Scenario) -> ProjectionResult {
        self.engine.project(&scenario.apply(params))
    }

    /// Project many records in parallel, results in input order
    pub fn run_batch(&self, records: &[SimulationParameters]) -> Vec<ProjectionResult> {
        records.par_iter().map(|params| self.engine.project(params)).collect()
    }

    /// Project one record under every preset scenario, in parallel
    pub fn run_presets(&self, params: &SimulationParameters) -> Vec<(Scenario, ProjectionResult)> {
        Scenario::ALL
            .par_iter()
            .map(|&scenario| (scenario, self.run_scenario(params, scenario)))
            .collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.engine.assumptions()
    }

    /// Mutable access to the assumptions used by later runs
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        self.engine.assumptions_mut()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ultra_realistic_keeps_record() {
        let params = SimulationParameters::default();
        assert_eq!(Scenario::UltraRealistic.apply(&params), params);
    }

    #[test]
    fn test_pessimistic_overrides() {
        let params = Scenario::Pessimistic.apply(&SimulationParameters::default());

        assert_eq!(params.annuity.gross_yield_pct, 1.5);
        assert_eq!(params.real_estate.rental_yield_pct, 4.0);
        assert_eq!(params.real_estate.appreciation_pct, -1.0);
        assert_eq!(params.equities.sheltered_yield_pct, -2.0);
        assert_eq!(params.equities.unsheltered_yield_pct, 5.0);
        assert_eq!(params.inflation.rate_pct, 4.0);
        // Allocation is untouched
        assert_eq!(params.annuity.allocation_pct, 30.0);
    }

    #[test]
    fn test_presets_ordered_by_outlook() {
        let runner = ScenarioRunner::new();
        let results = runner.run_presets(&SimulationParameters::default());
        assert_eq!(results.len(), 3);

        let wealth = |scenario: Scenario| {
            results
                .iter()
                .find(|(s, _)| *s == scenario)
                .map(|(_, r)| r.synthesis.final_net_wealth)
                .unwrap_or(f64::NAN)
        };
        assert!(wealth(Scenario::Pessimistic) < wealth(Scenario::Neutral));
        assert!(wealth(Scenario::Neutral) < wealth(Scenario::UltraRealistic));
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = ScenarioRunner::new();
        let records: Vec<_> = [100_000.0, 230_000.0, 500_000.0]
            .iter()
            .map(|&base| SimulationParameters {
                base_capital: base,
                ..SimulationParameters::default()
            })
            .collect();

        let batch = runner.run_batch(&records);
        assert_eq!(batch.len(), 3);
        for (params, result) in records.iter().zip(&batch) {
            assert_eq!(result, &runner.run(params));
        }
        assert!(batch[2].synthesis.final_net_wealth > batch[0].synthesis.final_net_wealth);
    }

    #[test]
    fn test_assumptions_mut_changes_later_runs() {
        let mut runner = ScenarioRunner::new();
        let params = SimulationParameters::default();
        let before = runner.run(&params);

        runner.assumptions_mut().tax.flat_tax = 0.0;
        let after = runner.run(&params);
        assert!(after.synthesis.total_taxes < before.synthesis.total_taxes);
    }

    #[test]
    fn test_scenario_serde_names() {
        let scenario: Scenario = serde_json::from_str("\"ultra_realistic\"").unwrap();
        assert_eq!(scenario, Scenario::UltraRealistic);
    }
}
