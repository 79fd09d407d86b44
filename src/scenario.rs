//! Scenario runner for what-if projections
//!
//! Holds a base scenario and its custom events, then runs independent
//! variants of it in parallel. Every variant gets its own engine, so runs
//! never share state.

use rayon::prelude::*;

use crate::error::ProjectionError;
use crate::plan::{CustomCashFlowEvent, ScenarioParameters};
use crate::projection::{ProjectionEngine, ProjectionResult};

/// Pre-validated base scenario for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ScenarioParameters::default(), Vec::new())?;
///
/// for result in runner.sweep_annual_return(&[8.0, 10.0, 12.0]) {
///     println!("{:.0}", result?.final_balance());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: ScenarioParameters,
    events: Vec<CustomCashFlowEvent>,
}

impl ScenarioRunner {
    /// Create a runner, rejecting an invalid base scenario up front
    pub fn new(
        base: ScenarioParameters,
        events: Vec<CustomCashFlowEvent>,
    ) -> Result<Self, ProjectionError> {
        ProjectionEngine::new(base, &events)?;
        Ok(Self { base, events })
    }

    pub fn base(&self) -> &ScenarioParameters {
        &self.base
    }

    pub fn events(&self) -> &[CustomCashFlowEvent] {
        &self.events
    }

    /// Project the base scenario
    pub fn run(&self) -> Result<ProjectionResult, ProjectionError> {
        self.run_with(self.base)
    }

    /// Project the base events under different parameters
    pub fn run_with(&self, params: ScenarioParameters) -> Result<ProjectionResult, ProjectionError> {
        let engine = ProjectionEngine::new(params, &self.events)?;
        Ok(engine.project())
    }

    /// Run several parameter sets against the base events, in input order
    pub fn run_variants(
        &self,
        variants: &[ScenarioParameters],
    ) -> Vec<Result<ProjectionResult, ProjectionError>> {
        variants.par_iter().map(|&params| self.run_with(params)).collect()
    }

    /// Re-run the base scenario at each annual return rate (%), in input order
    pub fn sweep_annual_return(
        &self,
        rates: &[f64],
    ) -> Vec<Result<ProjectionResult, ProjectionError>> {
        let variants: Vec<ScenarioParameters> = rates
            .iter()
            .map(|&rate| ScenarioParameters {
                annual_return_pct: rate,
                ..self.base
            })
            .collect();
        self.run_variants(&variants)
    }
}
