//! Load scenarios from JSON files and custom events from CSV files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::Reader;
use log::info;
use serde::{Deserialize, Serialize};

use super::{CustomCashFlowEvent, EventKind, ScenarioParameters};
use crate::error::LoadError;
use crate::report::Currency;

/// A complete scenario as stored on disk
///
/// ```json
/// {
///   "currency": "USD",
///   "parameters": { "age_start": 35, "monthly_investment": 2000 },
///   "events": [ { "year": 40, "month": 6, "amount": 10000, "kind": "investment" } ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    /// Display currency; never affects arithmetic
    pub currency: Currency,

    pub parameters: ScenarioParameters,

    pub events: Vec<CustomCashFlowEvent>,
}

/// Raw CSV row matching the events file columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "GrowthPct", default)]
    growth_pct: Option<f64>,
}

impl CsvRow {
    fn into_event(self, row: usize) -> Result<CustomCashFlowEvent, LoadError> {
        let kind = EventKind::parse(&self.kind).ok_or_else(|| LoadError::UnknownKind {
            row,
            kind: self.kind.clone(),
        })?;

        Ok(CustomCashFlowEvent {
            year: self.year,
            month: self.month,
            amount: self.amount,
            kind,
            growth_pct: self.growth_pct,
        })
    }
}

/// Load a scenario file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioFile, LoadError> {
    let file = File::open(path.as_ref())?;
    let scenario = load_scenario_from_reader(BufReader::new(file))?;
    info!(
        "Loaded scenario from {} ({} custom events)",
        path.as_ref().display(),
        scenario.events.len()
    );
    Ok(scenario)
}

/// Load a scenario from any reader (e.g., string buffer, network stream)
pub fn load_scenario_from_reader<R: Read>(reader: R) -> Result<ScenarioFile, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load custom events from a CSV file with `Year,Month,Amount,Kind[,GrowthPct]` columns
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<CustomCashFlowEvent>, LoadError> {
    let reader = Reader::from_path(path.as_ref())?;
    let events = read_events(reader)?;
    info!("Loaded {} custom events from {}", events.len(), path.as_ref().display());
    Ok(events)
}

/// Load custom events from any reader
pub fn load_events_from_reader<R: Read>(reader: R) -> Result<Vec<CustomCashFlowEvent>, LoadError> {
    read_events(Reader::from_reader(reader))
}

fn read_events<R: Read>(mut reader: Reader<R>) -> Result<Vec<CustomCashFlowEvent>, LoadError> {
    let mut events = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Header is line 1
        events.push(row.into_event(i + 2)?);
    }

    Ok(events)
}
