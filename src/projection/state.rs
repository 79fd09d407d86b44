//! Running accumulators for a single projection

use crate::plan::ScenarioParameters;

/// Values carried from one simulated year to the next
///
/// Owned by one `ProjectionEngine::project` call; every run starts from fresh state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Portfolio balance carried into the next year
    pub balance: f64,

    /// Monthly contribution for the next year (already stepped up)
    pub monthly_contribution: f64,

    /// Monthly SWP for the next retirement year (already escalated)
    pub current_swp_monthly: f64,

    /// First age whose adjusted end balance went negative
    pub depleted_at: Option<u32>,
}

impl ProjectionState {
    /// Initialize state at the start of the horizon
    pub fn from_parameters(params: &ScenarioParameters) -> Self {
        Self {
            balance: params.initial_lump_sum,
            monthly_contribution: params.monthly_investment,
            current_swp_monthly: params.swp_monthly_withdrawal,
            depleted_at: None,
        }
    }

    /// Step up the contribution rate after a simulated year
    pub fn step_up_contribution(&mut self, params: &ScenarioParameters) {
        self.monthly_contribution *= params.step_up_factor();
    }

    /// Escalate the SWP after a retirement year's withdrawal has been taken
    pub fn escalate_swp(&mut self, params: &ScenarioParameters) {
        self.current_swp_monthly *= params.swp_escalation_factor();
    }
}
