//! Re-run one scenario across a range of annual return rates
//!
//! Outputs one CSV row per rate with the final balance and depletion age

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use investment_projection::plan::{load_scenario, ScenarioFile};
use investment_projection::report::format_amount;
use investment_projection::ScenarioRunner;

#[derive(Parser, Debug)]
#[command(name = "sweep_returns")]
#[command(about = "Project a scenario at every annual return rate in a range")]
struct Args {
    /// Scenario JSON file (defaults when omitted)
    #[arg(long, short, env = "PROJECTION_SCENARIO")]
    scenario: Option<PathBuf>,

    /// Lowest annual return (%)
    #[arg(long, default_value_t = 1.0)]
    min: f64,

    /// Highest annual return (%)
    #[arg(long, default_value_t = 20.0)]
    max: f64,

    /// Increment between rates (%)
    #[arg(long, default_value_t = 0.5)]
    step: f64,

    /// CSV output path (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn rates(min: f64, max: f64, step: f64) -> Result<Vec<f64>> {
    if !(step > 0.0) || !(min <= max) {
        bail!("expected min <= max and a positive step, got {min}..{max} by {step}");
    }
    let count = ((max - min) / step + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| min + step * i as f64).collect())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("reading scenario {}", path.display()))?,
        None => ScenarioFile::default(),
    };
    let runner = ScenarioRunner::new(scenario.parameters, scenario.events)
        .context("invalid base scenario")?;

    let rates = rates(args.min, args.max, args.step)?;
    let start = Instant::now();
    let results = runner.sweep_annual_return(&rates);
    info!("Ran {} projections in {:?}", results.len(), start.elapsed());

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["AnnualReturnPct", "FinalBalance", "PeakBalance", "DepletionAge"])?;

    for (rate, result) in rates.iter().zip(results) {
        let result = result.with_context(|| format!("projecting at {rate}%"))?;
        let summary = result.summary();
        writer.write_record([
            format!("{rate:.2}"),
            format!("{:.2}", summary.final_balance),
            format!("{:.2}", summary.peak_balance),
            summary.depletion_age.map(|a| a.to_string()).unwrap_or_default(),
        ])?;

        info!(
            "{rate:>5.2}% -> {}",
            format_amount(summary.final_balance, scenario.currency)
        );
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_inclusive_range() {
        assert_eq!(rates(1.0, 2.0, 0.5).unwrap(), vec![1.0, 1.5, 2.0]);
        assert_eq!(rates(12.0, 12.0, 1.0).unwrap(), vec![12.0]);
        assert!(rates(5.0, 1.0, 1.0).is_err());
        assert!(rates(1.0, 5.0, 0.0).is_err());
    }
}
