//! Investment Projection CLI
//!
//! Runs a single scenario and prints the year-by-year table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use investment_projection::plan::{load_events, load_scenario, ScenarioFile, TERMINAL_AGE};
use investment_projection::report::{format_amount, render_table, write_csv_path};
use investment_projection::{Currency, ProjectionEngine};

#[derive(Parser, Debug)]
#[command(name = "investment_projection")]
#[command(about = "Project a portfolio year by year to age 100")]
#[command(version)]
struct Args {
    /// Scenario JSON file; defaults are used for anything it omits
    #[arg(long, short, env = "PROJECTION_SCENARIO")]
    scenario: Option<PathBuf>,

    /// Custom events CSV (Year,Month,Amount,Kind[,GrowthPct]), appended to the scenario's events
    #[arg(long, env = "PROJECTION_EVENTS")]
    events: Option<PathBuf>,

    /// Display currency (INR, USD, EUR, GBP, JPY or the symbol)
    #[arg(long)]
    currency: Option<Currency>,

    #[arg(long)]
    age_start: Option<u32>,

    /// Age at which monthly contributions stop
    #[arg(long)]
    age_end: Option<u32>,

    /// Age at which the SWP starts
    #[arg(long)]
    age_retire: Option<u32>,

    #[arg(long)]
    lump_sum: Option<f64>,

    #[arg(long)]
    monthly_investment: Option<f64>,

    /// Annual step-up of the monthly investment (%)
    #[arg(long)]
    step_up: Option<f64>,

    /// Annual return (%)
    #[arg(long)]
    annual_return: Option<f64>,

    /// Annual inflation (%), informational only
    #[arg(long)]
    inflation: Option<f64>,

    /// Annual escalation of the SWP (%)
    #[arg(long)]
    swp_inflation: Option<f64>,

    /// Monthly SWP amount
    #[arg(long)]
    swp: Option<f64>,

    /// Report the adjusted balance at this age as well as at 100
    #[arg(long)]
    balance_at: Option<u32>,

    /// Number of years to print (all when omitted)
    #[arg(long)]
    rows: Option<usize>,

    /// Write the full table as CSV to this path
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl Args {
    fn scenario(&self) -> Result<ScenarioFile> {
        let mut scenario = match &self.scenario {
            Some(path) => load_scenario(path)
                .with_context(|| format!("reading scenario {}", path.display()))?,
            None => ScenarioFile::default(),
        };

        if let Some(path) = &self.events {
            let events = load_events(path)
                .with_context(|| format!("reading events {}", path.display()))?;
            scenario.events.extend(events);
        }

        let p = &mut scenario.parameters;
        if let Some(v) = self.age_start { p.age_start = v; }
        if let Some(v) = self.age_end { p.age_end = v; }
        if let Some(v) = self.age_retire { p.age_retire = v; }
        if let Some(v) = self.lump_sum { p.initial_lump_sum = v; }
        if let Some(v) = self.monthly_investment { p.monthly_investment = v; }
        if let Some(v) = self.step_up { p.yearly_step_up_pct = v; }
        if let Some(v) = self.annual_return { p.annual_return_pct = v; }
        if let Some(v) = self.inflation { p.annual_inflation_pct = v; }
        if let Some(v) = self.swp_inflation { p.swp_inflation_pct = v; }
        if let Some(v) = self.swp { p.swp_monthly_withdrawal = v; }
        if let Some(c) = self.currency { scenario.currency = c; }

        Ok(scenario)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = args.scenario()?;
    let currency = scenario.currency;
    let params = scenario.parameters;

    let engine = ProjectionEngine::new(params, &scenario.events).context("invalid scenario")?;
    let result = engine.project();
    info!("Projected {} years", result.len());

    println!("Investment Projection ({currency})");
    println!(
        "  Ages {}-{}, contributions until {}, SWP from {}",
        params.age_start, TERMINAL_AGE, params.age_end, params.age_retire
    );
    println!(
        "  Return {}%, step-up {}%, SWP inflation {}%, inflation {}%",
        params.annual_return_pct,
        params.yearly_step_up_pct,
        params.swp_inflation_pct,
        params.annual_inflation_pct
    );
    println!();

    print!("{}", render_table(&result, currency, args.rows));

    let summary = result.summary();
    println!("\nSummary:");
    println!(
        "  Recurring investment: {}",
        format_amount(summary.total_recurring_investment, currency)
    );
    println!(
        "  Custom investment:    {}",
        format_amount(summary.total_custom_investment, currency)
    );
    println!(
        "  SWP withdrawn:        {}",
        format_amount(summary.total_swp_withdrawal, currency)
    );
    println!(
        "  Custom withdrawals:   {}",
        format_amount(summary.total_custom_withdrawal, currency)
    );
    println!(
        "  Peak balance:         {} at age {}",
        format_amount(summary.peak_balance, currency),
        summary.peak_age
    );
    if let Some(age) = summary.depletion_age {
        println!("  Balance turns negative at age {age}");
    }

    if let Some(age) = args.balance_at {
        let balance = result.balance_at(age)?;
        println!("\nBalance at age {age}: {}", format_amount(balance, currency));
    }
    println!(
        "Final Balance at Age {TERMINAL_AGE}: {}",
        format_amount(result.final_balance(), currency)
    );

    if let Some(path) = &args.output {
        write_csv_path(&result, path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}
