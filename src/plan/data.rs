//! Scenario parameters and custom cash-flow events

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Youngest age a scenario may start at
pub const MIN_AGE: u32 = 18;

/// Last simulated age; every projection runs through this age inclusive
pub const TERMINAL_AGE: u32 = 100;

/// Allowed range for a custom investment's growth rate metadata (%)
pub const EVENT_GROWTH_RANGE: (f64, f64) = (1.0, 50.0);

/// Scalar inputs for one projection run
///
/// Percentages are expressed as whole numbers (12.0 means 12%).
/// Missing fields in a scenario file fall back to [`ScenarioParameters::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    /// Age at which the projection starts
    pub age_start: u32,

    /// Age at which recurring contributions stop (exclusive)
    pub age_end: u32,

    /// Age at which systematic withdrawals begin (inclusive)
    pub age_retire: u32,

    /// Opening balance
    pub initial_lump_sum: f64,

    /// Recurring monthly contribution in the first year
    pub monthly_investment: f64,

    /// Annual increase applied to the monthly contribution (%)
    pub yearly_step_up_pct: f64,

    /// Nominal annual return applied to the carried balance (%)
    pub annual_return_pct: f64,

    /// Annual escalation of the SWP amount once retired (%)
    pub swp_inflation_pct: f64,

    /// Monthly withdrawal in the first retirement year
    pub swp_monthly_withdrawal: f64,

    /// General inflation (%); reported alongside the scenario but never applied to balances
    pub annual_inflation_pct: f64,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            age_start: 30,
            age_end: 45,
            age_retire: 60,
            initial_lump_sum: 500_000.0,
            monthly_investment: 50_000.0,
            yearly_step_up_pct: 5.0,
            annual_return_pct: 12.0,
            swp_inflation_pct: 6.0,
            swp_monthly_withdrawal: 100_000.0,
            annual_inflation_pct: 6.0,
        }
    }
}

impl ScenarioParameters {
    /// Check age ordering and every numeric range
    pub fn validate(&self) -> Result<(), ProjectionError> {
        check_age("age_start", self.age_start)?;
        check_age("age_end", self.age_end)?;
        check_age("age_retire", self.age_retire)?;

        if self.age_end < self.age_start {
            return Err(ProjectionError::scenario(
                "age_end",
                format!("({}) must not be below age_start ({})", self.age_end, self.age_start),
            ));
        }
        if self.age_retire < self.age_end {
            return Err(ProjectionError::scenario(
                "age_retire",
                format!("({}) must not be below age_end ({})", self.age_retire, self.age_end),
            ));
        }

        check_amount("initial_lump_sum", self.initial_lump_sum)?;
        check_amount("monthly_investment", self.monthly_investment)?;
        check_amount("swp_monthly_withdrawal", self.swp_monthly_withdrawal)?;

        check_pct("yearly_step_up_pct", self.yearly_step_up_pct, 0.0, 20.0)?;
        // Zero return is accepted so pure-contribution scenarios can be expressed
        check_pct("annual_return_pct", self.annual_return_pct, 0.0, 50.0)?;
        check_pct("swp_inflation_pct", self.swp_inflation_pct, 0.0, 15.0)?;
        check_pct("annual_inflation_pct", self.annual_inflation_pct, 0.0, 15.0)?;

        Ok(())
    }

    /// Number of simulated years, `age_start..=100`
    pub fn horizon_years(&self) -> usize {
        (TERMINAL_AGE.saturating_sub(self.age_start) + 1) as usize
    }

    /// Whether recurring contributions are made at this age
    pub fn is_contributing(&self, age: u32) -> bool {
        self.age_start <= age && age < self.age_end
    }

    /// Whether the SWP is active at this age
    pub fn is_retired(&self, age: u32) -> bool {
        age >= self.age_retire
    }

    /// Growth multiplier applied to the carried balance each year
    pub fn return_factor(&self) -> f64 {
        1.0 + self.annual_return_pct / 100.0
    }

    /// Multiplier applied to the monthly contribution after each year
    pub fn step_up_factor(&self) -> f64 {
        1.0 + self.yearly_step_up_pct / 100.0
    }

    /// Multiplier applied to the monthly SWP after each retirement year
    pub fn swp_escalation_factor(&self) -> f64 {
        1.0 + self.swp_inflation_pct / 100.0
    }
}

fn check_age(field: &'static str, age: u32) -> Result<(), ProjectionError> {
    if !(MIN_AGE..=TERMINAL_AGE).contains(&age) {
        return Err(ProjectionError::scenario(
            field,
            format!("({age}) is outside {MIN_AGE}..={TERMINAL_AGE}"),
        ));
    }
    Ok(())
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ProjectionError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ProjectionError::scenario(
            field,
            format!("({value}) must be a non-negative amount"),
        ));
    }
    Ok(())
}

fn check_pct(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ProjectionError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ProjectionError::scenario(
            field,
            format!("({value}%) is outside {min}..={max}%"),
        ));
    }
    Ok(())
}

/// Direction of a custom cash flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Investment,
    Withdrawal,
}

impl EventKind {
    /// Parse the names used in event files (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "investment" | "invest" => Some(EventKind::Investment),
            "withdrawal" | "withdraw" => Some(EventKind::Withdrawal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Investment => "investment",
            EventKind::Withdrawal => "withdrawal",
        }
    }
}

/// A one-off contribution or withdrawal at a given (age, month)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomCashFlowEvent {
    /// Age (year of the projection) the event falls in
    pub year: u32,

    /// Month within the year (1-12)
    pub month: u32,

    /// Amount moved into or out of the portfolio
    pub amount: f64,

    pub kind: EventKind,

    /// Growth rate recorded with an investment (%). Kept as metadata only:
    /// every contribution compounds at the portfolio-wide return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_pct: Option<f64>,
}

impl CustomCashFlowEvent {
    pub fn investment(year: u32, month: u32, amount: f64) -> Self {
        Self {
            year,
            month,
            amount,
            kind: EventKind::Investment,
            growth_pct: None,
        }
    }

    pub fn withdrawal(year: u32, month: u32, amount: f64) -> Self {
        Self {
            year,
            month,
            amount,
            kind: EventKind::Withdrawal,
            growth_pct: None,
        }
    }

    /// Attach growth rate metadata
    pub fn with_growth(mut self, growth_pct: f64) -> Self {
        self.growth_pct = Some(growth_pct);
        self
    }

    /// Check the event against the simulated horizon starting at `age_start`
    ///
    /// `index` is the event's position in its list and is echoed in the error.
    pub fn validate(&self, index: usize, age_start: u32) -> Result<(), ProjectionError> {
        if self.year < age_start || self.year > TERMINAL_AGE {
            return Err(ProjectionError::event(
                index,
                format!("year {} is outside {}..={}", self.year, age_start, TERMINAL_AGE),
            ));
        }
        if !(1..=12).contains(&self.month) {
            return Err(ProjectionError::event(
                index,
                format!("month {} is outside 1..=12", self.month),
            ));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ProjectionError::event(
                index,
                format!("amount {} must be a non-negative amount", self.amount),
            ));
        }
        if let Some(growth) = self.growth_pct {
            if self.kind == EventKind::Withdrawal {
                return Err(ProjectionError::event(index, "withdrawals do not carry a growth rate"));
            }
            let (min, max) = EVENT_GROWTH_RANGE;
            if !growth.is_finite() || growth < min || growth > max {
                return Err(ProjectionError::event(
                    index,
                    format!("growth rate {growth}% is outside {min}..={max}%"),
                ));
            }
        }
        Ok(())
    }
}
