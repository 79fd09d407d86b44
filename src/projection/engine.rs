//! Core projection engine for yearly balance projections

use log::{debug, trace, warn};

use super::events::EventIndex;
use super::state::ProjectionState;
use super::table::{ProjectionResult, YearRecord};
use crate::error::ProjectionError;
use crate::plan::{CustomCashFlowEvent, ScenarioParameters, TERMINAL_AGE};

/// Main projection engine
///
/// Holds a validated scenario. `project` can be called any number of times;
/// each call folds over the horizon with its own accumulators.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: ScenarioParameters,
    events: EventIndex,
}

impl ProjectionEngine {
    /// Validate the scenario and index its custom events
    pub fn new(
        params: ScenarioParameters,
        events: &[CustomCashFlowEvent],
    ) -> Result<Self, ProjectionError> {
        params.validate()?;
        let events = EventIndex::build(events, params.age_start)?;
        Ok(Self { params, events })
    }

    pub fn parameters(&self) -> &ScenarioParameters {
        &self.params
    }

    pub fn events(&self) -> &EventIndex {
        &self.events
    }

    /// Run the projection from the starting age through age 100
    pub fn project(&self) -> ProjectionResult {
        let params = &self.params;
        let mut result = ProjectionResult::with_capacity(params.age_start, params.horizon_years());
        let mut state = ProjectionState::from_parameters(params);

        debug!(
            "Projecting ages {}..={} (contributions until {}, SWP from {}, {} event points)",
            params.age_start,
            TERMINAL_AGE,
            params.age_end,
            params.age_retire,
            self.events.scheduled_points()
        );

        for age in params.age_start..=TERMINAL_AGE {
            let row = self.calculate_year(age, &mut state);
            result.add_row(row);
        }

        debug!(
            "Projection complete: final balance {:.2} at age {}",
            result.final_balance(),
            TERMINAL_AGE
        );

        result
    }

    /// Calculate one simulated year and advance the accumulators
    fn calculate_year(&self, age: u32, state: &mut ProjectionState) -> YearRecord {
        let params = &self.params;

        let annual_investment = if params.is_contributing(age) {
            state.monthly_contribution * 12.0
        } else {
            0.0
        };
        let custom_investment = self.events.investment_in_year(age);
        let custom_withdrawal = self.events.withdrawal_in_year(age);

        // Growth applies to the carried balance only; this year's money arrives after it
        state.balance = state.balance * params.return_factor() + annual_investment + custom_investment;

        let year_start_balance = state.balance - annual_investment - custom_investment;
        let year_end_balance_pre_withdrawal = state.balance;

        let swp_withdrawal = if params.is_retired(age) {
            state.current_swp_monthly * 12.0
        } else {
            0.0
        };

        state.balance = state.balance - swp_withdrawal - custom_withdrawal;

        // First retirement year withdraws at the un-escalated rate
        if params.is_retired(age) {
            state.escalate_swp(params);
        }

        let adjusted_end_balance = state.balance;

        // Keeps compounding after contributions stop
        state.step_up_contribution(params);

        if adjusted_end_balance < 0.0 && state.depleted_at.is_none() {
            warn!("Portfolio depleted at age {age}: balance {adjusted_end_balance:.2}");
            state.depleted_at = Some(age);
        }

        trace!(
            "age {age}: start {year_start_balance:.2} +{annual_investment:.2} +{custom_investment:.2} \
             -> {year_end_balance_pre_withdrawal:.2}, -{swp_withdrawal:.2} -{custom_withdrawal:.2} \
             -> {adjusted_end_balance:.2}"
        );

        YearRecord {
            age,
            year_start_balance,
            annual_investment,
            custom_investment_total: custom_investment,
            year_end_balance_pre_withdrawal,
            swp_withdrawal,
            custom_withdrawal_total: custom_withdrawal,
            adjusted_end_balance,
        }
    }
}
