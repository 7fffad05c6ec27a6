//! Run every market scenario for one or more parameter records
//!
//! Outputs one synthesis row per (record, scenario) for side-by-side comparison

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use wealth_projection::{params, ProjectionResult, Scenario, ScenarioRunner, SimulationParameters};

/// Compare the preset market scenarios
#[derive(Parser, Debug)]
#[command(name = "run_scenarios", version, about)]
struct Cli {
    /// Parameter records (JSON); the reference record when none are given
    records: Vec<PathBuf>,

    /// Directory holding the assumption CSV files
    #[arg(short, long)]
    assumptions: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, default_value = "scenario_comparison.csv")]
    output: PathBuf,
}

/// One row of the comparison file
#[derive(Debug, Serialize)]
struct ScenarioRow {
    record: String,
    scenario: Scenario,
    final_net_wealth: f64,
    final_real_wealth: f64,
    total_gain: f64,
    total_gain_pct: f64,
    average_annual_return_pct: f64,
    real_average_annual_return_pct: f64,
    total_taxes: f64,
    annuity_paid: f64,
    annuity_depleted_year: Option<u32>,
    loan_final_balance: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();

    let runner = match &cli.assumptions {
        Some(dir) => ScenarioRunner::from_csv_path(dir)
            .with_context(|| format!("Failed to load assumptions from {}", dir.display()))?,
        None => ScenarioRunner::new(),
    };

    let records: Vec<(String, SimulationParameters)> = if cli.records.is_empty() {
        vec![("reference".to_string(), SimulationParameters::default())]
    } else {
        cli.records
            .iter()
            .map(|path| {
                let params = params::load_parameters(path)
                    .with_context(|| format!("Failed to load parameters from {}", path.display()))?;
                Ok((path.display().to_string(), params))
            })
            .collect::<Result<_>>()?
    };
    println!("Loaded {} record(s) in {:?}", records.len(), start.elapsed());

    println!("Running projections...");
    let proj_start = Instant::now();

    // Records in parallel; each one fans out over the presets
    let results: Vec<(String, Vec<(Scenario, ProjectionResult)>)> = records
        .par_iter()
        .map(|(name, params)| (name.clone(), runner.run_presets(params)))
        .collect();

    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Unable to create {}", cli.output.display()))?;

    println!(
        "\n{:<24} {:<16} {:>12} {:>12} {:>9} {:>11}",
        "Record", "Scenario", "Final", "Real", "Return%", "Taxes"
    );
    println!("{}", "-".repeat(89));

    for (name, runs) in &results {
        for (scenario, result) in runs {
            let syn = result.synthesis.rounded();
            println!(
                "{:<24} {:<16} {:>12.0} {:>12.0} {:>9.2} {:>11.0}",
                name,
                scenario.label(),
                syn.final_net_wealth,
                syn.final_real_wealth,
                syn.average_annual_return_pct,
                syn.total_taxes
            );

            writer.serialize(ScenarioRow {
                record: name.clone(),
                scenario: *scenario,
                final_net_wealth: syn.final_net_wealth,
                final_real_wealth: syn.final_real_wealth,
                total_gain: syn.total_gain,
                total_gain_pct: syn.total_gain_pct,
                average_annual_return_pct: syn.average_annual_return_pct,
                real_average_annual_return_pct: syn.real_average_annual_return_pct,
                total_taxes: syn.total_taxes,
                annuity_paid: syn.cumulative_annuity_paid,
                annuity_depleted_year: syn.annuity_depleted_year,
                loan_final_balance: syn.loan_final_balance,
            })?;
        }
    }
    writer.flush()?;

    println!("\nOutput written to {}", cli.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
