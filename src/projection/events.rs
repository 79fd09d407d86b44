//! Aggregation of custom cash-flow events by (year, month)

use std::collections::HashMap;

use crate::error::ProjectionError;
use crate::plan::{CustomCashFlowEvent, EventKind};

/// Summed custom investments and withdrawals keyed by (year, month)
///
/// Events sharing a key are added together; individual events are not kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventIndex {
    investment_totals: HashMap<(u32, u32), f64>,
    withdrawal_totals: HashMap<(u32, u32), f64>,
}

impl EventIndex {
    /// Validate every event against the horizon starting at `age_start` and sum them by key
    pub fn build(events: &[CustomCashFlowEvent], age_start: u32) -> Result<Self, ProjectionError> {
        let mut index = Self::default();

        for (i, event) in events.iter().enumerate() {
            event.validate(i, age_start)?;

            let totals = match event.kind {
                EventKind::Investment => &mut index.investment_totals,
                EventKind::Withdrawal => &mut index.withdrawal_totals,
            };
            *totals.entry((event.year, event.month)).or_insert(0.0) += event.amount;
        }

        Ok(index)
    }

    /// Total custom investment at (year, month); zero when nothing is scheduled
    pub fn investment_at(&self, year: u32, month: u32) -> f64 {
        self.investment_totals.get(&(year, month)).copied().unwrap_or(0.0)
    }

    /// Total custom withdrawal at (year, month); zero when nothing is scheduled
    pub fn withdrawal_at(&self, year: u32, month: u32) -> f64 {
        self.withdrawal_totals.get(&(year, month)).copied().unwrap_or(0.0)
    }

    /// Custom investment summed over the 12 months of `year`
    pub fn investment_in_year(&self, year: u32) -> f64 {
        (1..=12).map(|month| self.investment_at(year, month)).sum()
    }

    /// Custom withdrawal summed over the 12 months of `year`
    pub fn withdrawal_in_year(&self, year: u32) -> f64 {
        (1..=12).map(|month| self.withdrawal_at(year, month)).sum()
    }

    /// Number of distinct (year, month) keys across both directions
    pub fn scheduled_points(&self) -> usize {
        self.investment_totals.len() + self.withdrawal_totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.investment_totals.is_empty() && self.withdrawal_totals.is_empty()
    }
}
