//! Fincalc CLI
//!
//! Command-line interface for loan, SIP and bill-splitting calculations

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use fincalc::config::Config;
use fincalc::format::{format_currency, FormatOptions};
use fincalc::growth::{annualized_return, project_growth, GrowthInputs, StepUpPlan};
use fincalc::loan::{assess_affordability, compute_amortization, AffordabilityInputs, LoanTerms};
use fincalc::split::repository::{GroupRepository, JsonFileGroupRepository};
use fincalc::split::GroupSummary;

#[derive(Parser, Debug)]
#[command(name = "fincalc", version, about = "Loan, SIP and group expense calculators")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Level-payment loan schedule
    Emi {
        #[arg(long)]
        principal: f64,
        #[arg(long, help = "Annual interest rate in percent, e.g. 9")]
        rate: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, help = "Print every monthly installment instead of yearly rows")]
        monthly: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// SIP growth projection
    Sip {
        #[arg(long)]
        monthly: f64,
        #[arg(long, help = "Expected annual return in percent, e.g. 12")]
        rate: f64,
        #[arg(long)]
        years: u32,
        #[arg(
            long = "step-up",
            value_parser = parse_step_up,
            help = "Contribution increase as FROM_YEAR:PERCENT; repeatable"
        )]
        step_up: Vec<(u32, f64)>,
        #[arg(long, help = "Annual inflation in percent for real values")]
        inflation: Option<f64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Vehicle affordability check
    Afford {
        #[arg(long)]
        cost: f64,
        #[arg(long, help = "Monthly income after tax")]
        income: f64,
        #[arg(long)]
        down_payment: Option<f64>,
        #[arg(long)]
        tenure: Option<u32>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        inflation: Option<f64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Balances and settlements for a saved group
    Settle {
        #[arg(long, env = "FINCALC_GROUPS_FILE", help = "Groups JSON file")]
        file: Option<PathBuf>,
        #[arg(long, help = "Group id; lists groups when omitted")]
        group: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    #[arg(long, help = "Write rows to this CSV file")]
    csv: Option<PathBuf>,
    #[arg(long, help = "Print JSON instead of a table")]
    json: bool,
}

fn parse_step_up(raw: &str) -> Result<(u32, f64), String> {
    let (from, pct) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected FROM_YEAR:PERCENT, got {:?}", raw))?;
    let from = from
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad year {:?}: {}", from, e))?;
    let pct = pct
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|e| format!("bad percentage {:?}: {}", pct, e))?;
    Ok((from, pct))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Emi { principal, rate, years, monthly, output } => {
            run_emi(&config, LoanTerms::new(principal, rate, years), monthly, &output)
        }
        Command::Sip { monthly, rate, years, step_up, inflation, output } => {
            let mut plan = StepUpPlan::new();
            for (from, pct) in step_up {
                plan.add(from, pct, years)
                    .with_context(|| format!("invalid step-up {}:{}", from, pct))?;
            }
            let mut inputs = GrowthInputs::new(monthly, rate, years).with_step_up(plan);
            if let Some(i) = inflation {
                inputs = inputs.with_inflation(i);
            }
            run_sip(&config, &inputs, &output)
        }
        Command::Afford { cost, income, down_payment, tenure, rate, inflation, output } => {
            let inputs = AffordabilityInputs {
                cost,
                monthly_income: income,
                down_payment,
                tenure_years: tenure,
                annual_rate_percent: rate,
                inflation_percent: inflation,
            };
            run_afford(&config, &inputs, &output)
        }
        Command::Settle { file, group, output } => {
            let path = file.unwrap_or_else(|| config.groups_file.clone());
            run_settle(&config, &path, group.as_deref(), &output)
        }
    }
}

fn run_emi(config: &Config, terms: LoanTerms, monthly: bool, output: &OutputArgs) -> Result<()> {
    let schedule = compute_amortization(&terms).context("loan calculation failed")?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
    } else {
        let money = FormatOptions::for_currency(&config.currency);
        let summary = schedule.summary();
        banner("Loan EMI");
        println!("  Principal:      {}", format_currency(summary.principal, &plain(&money)));
        println!("  Rate:           {:.2}% p.a.", terms.annual_rate_percent);
        println!("  Term:           {} years ({} months)", terms.term_years, summary.months);
        println!("  EMI:            {}", format_currency(summary.emi, &plain(&money)));
        println!("  Total interest: {}", format_currency(summary.total_interest, &plain(&money)));
        println!("  Total payment:  {}", format_currency(summary.total_payment, &plain(&money)));
        println!();

        if monthly {
            println!("{:>5} {:>14} {:>14} {:>14} {:>16}", "Month", "Payment", "Principal", "Interest", "Outstanding");
            println!("{}", "-".repeat(67));
            for row in &schedule.monthly {
                println!("{:>5} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
                    row.month, row.payment, row.principal, row.interest, row.outstanding);
            }
        } else {
            println!("{:>4} {:>16} {:>18} {:>18}", "Year", "Outstanding", "Principal Paid", "Interest Paid");
            println!("{}", "-".repeat(59));
            for row in &schedule.yearly {
                println!("{:>4} {:>16.2} {:>18.2} {:>18.2}",
                    row.year, row.outstanding, row.cumulative_principal, row.cumulative_interest);
            }
        }
    }

    if let Some(path) = &output.csv {
        if monthly {
            write_csv(path, &schedule.monthly)?;
        } else {
            write_csv(path, &schedule.yearly)?;
        }
    }
    Ok(())
}

fn run_sip(config: &Config, inputs: &GrowthInputs, output: &OutputArgs) -> Result<()> {
    let projection = project_growth(inputs).context("growth projection failed")?;
    let summary = projection.summary();

    if output.json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        let money = FormatOptions::for_currency(&config.currency);
        banner("SIP Projection");
        println!("  Total invested: {}", format_currency(summary.total_invested, &money));
        println!("  Maturity value: {}", format_currency(summary.maturity_value, &money));
        println!("  Total returns:  {}", format_currency(summary.total_returns, &money));
        if inputs.inflation_percent.is_some() {
            println!("  Real value:     {}", format_currency(summary.real_maturity_value, &money));
        }
        if let Some(irr) = annualized_return(&projection) {
            println!("  Annual return:  {:.2}%", irr * 100.0);
        }
        println!();

        println!("{:>4} {:>8} {:>12} {:>16} {:>18} {:>18}",
            "Year", "StepUp%", "Monthly", "Invested", "Value", "Real Value");
        println!("{}", "-".repeat(81));
        for row in &projection.rows {
            println!("{:>4} {:>8.2} {:>12.2} {:>16.2} {:>18.2} {:>18.2}",
                row.year, row.step_up_percent, row.monthly_contribution,
                row.total_invested, row.nominal_value, row.real_value);
        }
    }

    if let Some(path) = &output.csv {
        write_csv(path, &projection.rows)?;
    }
    Ok(())
}

fn run_afford(config: &Config, inputs: &AffordabilityInputs, output: &OutputArgs) -> Result<()> {
    let report = assess_affordability(inputs, &config.affordability)
        .context("affordability check failed")?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let money = plain(&FormatOptions::for_currency(&config.currency));
        banner("Vehicle Affordability");
        println!("  Down payment:   {}", format_currency(report.down_payment, &money));
        println!("  Loan amount:    {}", format_currency(report.principal, &money));
        println!("  Tenure / rate:  {} years at {:.2}%", report.tenure_years, report.annual_rate_percent);
        println!("  EMI:            {}", format_currency(report.emi, &money));
        println!("  Max EMI:        {}", format_currency(report.max_affordable_emi, &money));
        println!("  Total interest: {}", format_currency(report.total_interest, &money));
        println!("  Total cost:     {}", format_currency(report.total_cost, &money));
        println!("  Affordable:     {}", if report.is_affordable { "yes" } else { "no" });
        println!();

        println!("{:>4} {:>16} {:>16}", "Year", "Liability", "Real Liability");
        println!("{}", "-".repeat(38));
        for point in &report.liability {
            println!("{:>4} {:>16.2} {:>16.2}", point.year, point.nominal, point.real);
        }
    }

    if let Some(path) = &output.csv {
        write_csv(path, &report.liability)?;
    }
    Ok(())
}

fn run_settle(config: &Config, path: &Path, group_id: Option<&str>, output: &OutputArgs) -> Result<()> {
    let repo = JsonFileGroupRepository::new(path);

    let Some(group_id) = group_id else {
        let groups = repo
            .list()
            .with_context(|| format!("failed to read groups from {}", path.display()))?;
        if groups.is_empty() {
            bail!("no groups saved in {}", path.display());
        }
        for group in &groups {
            println!("{:<20} {:<30} {:>3} members {:>4} expenses",
                group.id, group.name, group.members.len(), group.expenses.len());
        }
        return Ok(());
    };

    let group = repo
        .require(group_id)
        .with_context(|| format!("failed to load group {} from {}", group_id, path.display()))?;
    let netting = group.net_balances().context("group has invalid expenses")?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&netting)?);
    } else {
        let currency = if group.currency.is_empty() { &config.currency } else { &group.currency };
        let money = plain(&FormatOptions::for_currency(currency));
        let summary = GroupSummary::for_group(&group)?;

        banner(&group.name);
        println!("  Expenses: {} totalling {}", group.expenses.len(),
            format_currency(summary.total_expenses, &money));
        for (category, amount) in &summary.category_breakdown {
            println!("    {:<14} {:>16}", format!("{:?}", category), format_currency(*amount, &money));
        }
        println!();

        println!("Balances:");
        for balance in &netting.balances {
            let name = group.member(&balance.member_id).map(|m| m.name.as_str()).unwrap_or(&balance.member_id);
            println!("  {:<20} {:>16}", name, format_currency(balance.amount, &money));
        }
        println!();

        if netting.settlements.is_empty() {
            println!("All settled up.");
        } else {
            println!("Settlements:");
            for s in &netting.settlements {
                println!("  {} pays {} {}", s.from, s.to, format_currency(s.amount, &money));
            }
        }
    }

    if let Some(path) = &output.csv {
        write_csv(path, &netting.settlements)?;
    }
    Ok(())
}

fn banner(title: &str) {
    println!("{}", title);
    println!("{}\n", "=".repeat(title.chars().count()));
}

fn plain(options: &FormatOptions) -> FormatOptions {
    FormatOptions {
        compact: false,
        ..options.clone()
    }
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    eprintln!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
