//! Print the horizon outcome of the preset equity splits

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use wealth_projection::{
    analysis::compare_equity_mixes, params, projection::Allocation, Assumptions, SimulationParameters,
};

/// Compare prudent, balanced and aggressive equity splits
#[derive(Parser, Debug)]
#[command(name = "compare_equity_mixes", version, about)]
struct Cli {
    /// Parameter record (JSON); the reference record when omitted
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Write the comparison to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = match &cli.params {
        Some(path) => params::load_parameters(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
        None => SimulationParameters::default(),
    };
    let assumptions = Assumptions::default_french();
    let allocation = Allocation::resolve(&params, &assumptions.funds);

    let outcomes = compare_equity_mixes(&params, &allocation, &assumptions.tax);
    if outcomes.is_empty() {
        println!("Equity sleeve disabled; nothing to compare");
        return Ok(());
    }

    println!(
        "Equity capital {:.0}, sheltered yield {}%, unsheltered yield {}%\n",
        allocation.equity_capital(),
        params.equities.sheltered_yield_pct,
        params.equities.unsheltered_yield_pct
    );
    println!(
        "{:<11} {:>7} {:>12} {:>12} {:>12} {:>10} {:>12} {:>9}",
        "Mix", "Shelt%", "Initial", "Final", "Gross gain", "Tax", "Net gain", "Return%"
    );
    println!("{}", "-".repeat(92));
    for o in &outcomes {
        println!(
            "{:<11} {:>7.0} {:>12.0} {:>12.0} {:>12.0} {:>10.0} {:>12.0} {:>9.1}",
            o.mix.label(),
            o.mix.sheltered_share_pct(),
            o.sheltered_initial + o.unsheltered_initial,
            o.sheltered_final + o.unsheltered_final,
            o.gross_gain,
            o.tax,
            o.net_gain,
            o.average_annual_return_pct
        );
    }

    if let Some(path) = &cli.csv {
        let mut writer =
            csv::Writer::from_path(path).with_context(|| format!("Unable to create {}", path.display()))?;
        for outcome in &outcomes {
            writer.serialize(outcome)?;
        }
        writer.flush()?;
        println!("\nWritten {} mixes to {}", outcomes.len(), path.display());
    }

    Ok(())
}
