//! Sweep SIP outcomes over a grid of return rates and terms
//!
//! Runs every combination in parallel and writes one CSV row per cell

use anyhow::{ensure, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use fincalc::config::Config;
use fincalc::growth::{GrowthInputs, StepUpPlan};
use fincalc::scenario::ScenarioRunner;

#[derive(Parser, Debug)]
#[command(name = "rate_sweep", about = "Parallel SIP sweep over rates and terms")]
struct Args {
    #[arg(long, default_value_t = 5000.0)]
    monthly: f64,
    #[arg(long, value_delimiter = ',', default_values_t = vec![6.0, 8.0, 10.0, 12.0, 14.0])]
    rates: Vec<f64>,
    #[arg(long, value_delimiter = ',', default_values_t = vec![5, 10, 15, 20, 25, 30])]
    terms: Vec<u32>,
    #[arg(long, help = "Yearly contribution increase in percent from year 1")]
    step_up: Option<f64>,
    #[arg(long)]
    inflation: Option<f64>,
    #[arg(long, default_value = "rate_sweep_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    ensure!(!args.rates.is_empty() && !args.terms.is_empty(), "need at least one rate and one term");

    let longest = args.terms.iter().copied().max().unwrap_or(0);
    let mut plan = StepUpPlan::new();
    if let Some(pct) = args.step_up {
        plan.add(1, pct, longest).context("invalid step-up")?;
    }

    let mut base = GrowthInputs::new(args.monthly, args.rates[0], longest).with_step_up(plan);
    if let Some(i) = args.inflation {
        base = base.with_inflation(i);
    }

    let runner = ScenarioRunner::new(Config::from_env());

    println!("Running {} scenarios...", args.rates.len() * args.terms.len());
    let start = Instant::now();
    let grid = runner
        .sweep_growth(&base, &args.rates, &args.terms)
        .context("sweep failed")?;
    println!("Completed in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("unable to create {}", args.output.display()))?;
    for point in &grid {
        writer.serialize(point)?;
    }
    writer.flush()?;

    println!("\n{:>6} {:>5} {:>16} {:>18} {:>9}", "Rate%", "Years", "Invested", "Maturity", "IRR%");
    println!("{}", "-".repeat(58));
    for point in &grid {
        let irr = point
            .annualized_return
            .map(|r| format!("{:.2}", r * 100.0))
            .unwrap_or_else(|| "-".to_string());
        println!("{:>6.2} {:>5} {:>16.2} {:>18.2} {:>9}",
            point.annual_rate_percent, point.years, point.total_invested, point.maturity_value, irr);
    }

    println!("\nResults written to {}", args.output.display());
    Ok(())
}
