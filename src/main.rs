//! Wealth Projection CLI
//!
//! Runs one projection and prints the yearly table, the synthesis and the
//! advisory findings.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use wealth_projection::{
    analysis::{self, insights::Severity, Finding},
    params,
    projection::AnnuityDuration,
    Assumptions, ProjectionResult, Scenario, ScenarioRunner, SimulationParameters,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioArg {
    UltraRealistic,
    Pessimistic,
    Neutral,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::UltraRealistic => Scenario::UltraRealistic,
            ScenarioArg::Pessimistic => Scenario::Pessimistic,
            ScenarioArg::Neutral => Scenario::Neutral,
        }
    }
}

/// Project a multi-sleeve portfolio over eight years
#[derive(Parser, Debug)]
#[command(name = "wealth_projection", version, about)]
struct Cli {
    /// Parameter record (JSON); the reference record when omitted
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Directory holding the assumption CSV files; built-in rates when omitted
    #[arg(short, long)]
    assumptions: Option<PathBuf>,

    /// Market scenario applied to the record
    #[arg(short, long, value_enum, default_value = "ultra-realistic")]
    scenario: ScenarioArg,

    /// Write the yearly snapshots to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the yearly cash-flow detail to this CSV file
    #[arg(long)]
    details_csv: Option<PathBuf>,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Keep unrounded values in every output
    #[arg(long)]
    raw: bool,
}

fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Unable to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_tables(result: &ProjectionResult) {
    let params = &result.params;
    let allocation = &result.allocation;

    println!("Base capital: {:.0}", allocation.base_capital);
    if allocation.loan_proceeds > 0.0 {
        println!(
            "Margin loan: {:.0} (effective capital {:.0})",
            allocation.loan_proceeds, allocation.effective_capital
        );
    }
    println!("Allocated: {:.1}% ({:.0})", allocation.total_allocation_pct, allocation.allocated_capital);
    println!();

    println!(
        "{:>4} {:>11} {:>11} {:>11} {:>11} {:>11} {:>11} {:>11} {:>11} {:>12} {:>12}",
        "Year", "Annuity", "Fund", "Property", "Sheltered", "Unsheltered", "Savings", "Retirement", "Loan", "Gross", "Net"
    );
    println!("{}", "-".repeat(132));
    for s in &result.snapshots {
        println!(
            "{:>4} {:>11.0} {:>11.0} {:>11.0} {:>11.0} {:>11.0} {:>11.0} {:>11.0} {:>11.0} {:>12.0} {:>12.0}",
            s.year,
            s.annuity_balance,
            s.fund_balance,
            s.property_value,
            s.sheltered_equity,
            s.unsheltered_equity,
            s.savings_balance,
            s.retirement_balance,
            s.loan_balance,
            s.gross_wealth,
            s.net_wealth,
        );
    }

    println!();
    println!(
        "{:>4} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Year", "NetRent", "FundInc", "Annuity", "Taxes", "LoanInt", "LoanAmort", "Loan"
    );
    println!("{}", "-".repeat(81));
    for (s, d) in result.snapshots.iter().zip(&result.details) {
        let loan = match d.loan_outcome {
            Some(outcome) => format!("{:?}", outcome),
            None => "-".to_string(),
        };
        println!(
            "{:>4} {:>10.0} {:>10.0} {:>10.0} {:>10.0} {:>10.0} {:>10.0} {:>10}",
            s.year, s.net_rent, s.fund_income, s.annuity_paid, s.taxes, s.loan_interest, s.loan_amortization, loan
        );
    }

    let syn = &result.synthesis;
    println!("\nSynthesis:");
    println!("  Final net wealth:      {:.0}", syn.final_net_wealth);
    if params.inflation.enabled {
        println!(
            "  Real final wealth:     {:.0} (inflation {:.2}% over the horizon)",
            syn.final_real_wealth, syn.cumulative_inflation_pct
        );
    }
    println!("  Total gain:            {:.0} ({:.2}%)", syn.total_gain, syn.total_gain_pct);
    println!("  Average annual return: {:.2}%", syn.average_annual_return_pct);
    if params.inflation.enabled {
        println!("  Real annual return:    {:.2}%", syn.real_average_annual_return_pct);
    }
    println!("  Total taxes:           {:.0}", syn.total_taxes);
    if params.retirement.enabled {
        println!("  Retirement tax relief: {:.0}", syn.retirement_tax_relief);
    }
    if params.annuity.enabled {
        println!(
            "  Annuity:               {:.0} paid, capital {:.0} -> {:.0}, duration {}",
            syn.cumulative_annuity_paid,
            syn.annuity_capital_start,
            syn.annuity_capital_final,
            describe_duration(syn.annuity_duration)
        );
    }
    if syn.loan_borrowed > 0.0 {
        println!(
            "  Margin loan:           {:.0} borrowed, {:.0} interest, {:.0} outstanding",
            syn.loan_borrowed, syn.loan_total_interest, syn.loan_final_balance
        );
    }
    if syn.unrouted_income > 0.0 {
        println!("  Unrouted income:       {:.0}", syn.unrouted_income);
    }
}

fn describe_duration(duration: AnnuityDuration) -> String {
    match duration {
        AnnuityDuration::Finite { years, months } => format!("{}y {}m", years, months),
        AnnuityDuration::Perpetual => "perpetual".to_string(),
    }
}

fn print_findings(findings: &[Finding]) {
    println!("\nFindings:");
    for finding in findings {
        let marker = match finding.severity() {
            Severity::Info => " ",
            Severity::Warning => "!",
        };
        println!("  {} {}", marker, finding);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let base: SimulationParameters = match &cli.params {
        Some(path) => params::load_parameters(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
        None => SimulationParameters::default(),
    };

    let assumptions = match &cli.assumptions {
        Some(dir) => Assumptions::from_csv_path(dir)
            .with_context(|| format!("Failed to load assumptions from {}", dir.display()))?,
        None => Assumptions::default_french(),
    };

    let runner = ScenarioRunner::with_assumptions(assumptions);
    let scenario = Scenario::from(cli.scenario);
    let result = runner.run_scenario(&base, scenario);
    let findings = analysis::review(&result, &runner.assumptions().ceilings);
    let output = if cli.raw { result } else { result.rounded() };

    if let Some(path) = &cli.csv {
        write_csv(path, &output.snapshots)?;
        log::info!("Yearly snapshots written to {}", path.display());
    }
    if let Some(path) = &cli.details_csv {
        write_csv(path, &output.details)?;
        log::info!("Cash-flow detail written to {}", path.display());
    }

    if cli.json {
        let payload = serde_json::json!({
            "scenario": scenario,
            "result": output,
            "findings": findings,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Wealth Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("Scenario: {}", scenario);
    println!("======================\n");
    print_tables(&output);
    print_findings(&findings);

    Ok(())
}
