//! Year-by-year projection output

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// A single row of projection output for one simulated age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub age: u32,

    /// Balance carried in from the prior year, after this year's growth
    pub year_start_balance: f64,

    /// Recurring contributions made this year
    pub annual_investment: f64,

    /// Custom lump-sum investments made this year
    pub custom_investment_total: f64,

    /// Balance after growth and contributions, before any withdrawal
    pub year_end_balance_pre_withdrawal: f64,

    pub swp_withdrawal: f64,

    pub custom_withdrawal_total: f64,

    /// Balance after all withdrawals; carried into the next year
    pub adjusted_end_balance: f64,
}

impl YearRecord {
    /// Recurring plus custom contributions
    pub fn total_contribution(&self) -> f64 {
        self.annual_investment + self.custom_investment_total
    }

    /// SWP plus custom withdrawals
    pub fn total_withdrawal(&self) -> f64 {
        self.swp_withdrawal + self.custom_withdrawal_total
    }
}

/// Complete projection result, ordered by age from the starting age to 100
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    age_start: u32,
    rows: Vec<YearRecord>,
}

impl ProjectionResult {
    pub(crate) fn with_capacity(age_start: u32, years: usize) -> Self {
        Self {
            age_start,
            rows: Vec::with_capacity(years),
        }
    }

    pub(crate) fn add_row(&mut self, row: YearRecord) {
        debug_assert_eq!(row.age, self.age_start + self.rows.len() as u32);
        self.rows.push(row);
    }

    /// First simulated age
    pub fn first_age(&self) -> u32 {
        self.age_start
    }

    /// Last simulated age
    pub fn last_age(&self) -> u32 {
        self.rows.last().map(|r| r.age).unwrap_or(self.age_start)
    }

    /// Row for `age`
    pub fn at_age(&self, age: u32) -> Result<&YearRecord, ProjectionError> {
        age.checked_sub(self.age_start)
            .and_then(|offset| self.rows.get(offset as usize))
            .ok_or_else(|| ProjectionError::AgeOutOfRange {
                age,
                first: self.first_age(),
                last: self.last_age(),
            })
    }

    /// Adjusted end balance at `age`
    pub fn balance_at(&self, age: u32) -> Result<f64, ProjectionError> {
        self.at_age(age).map(|r| r.adjusted_end_balance)
    }

    /// Adjusted end balance of the last simulated year
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.adjusted_end_balance).unwrap_or(0.0)
    }

    pub fn rows(&self) -> &[YearRecord] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YearRecord> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(age, year_end_balance_pre_withdrawal, adjusted_end_balance)` for the growth chart
    pub fn growth_series(&self) -> Vec<(u32, f64, f64)> {
        self.rows
            .iter()
            .map(|r| (r.age, r.year_end_balance_pre_withdrawal, r.adjusted_end_balance))
            .collect()
    }

    /// `(age, swp_withdrawal)` for the withdrawal chart
    pub fn withdrawal_series(&self) -> Vec<(u32, f64)> {
        self.rows.iter().map(|r| (r.age, r.swp_withdrawal)).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_recurring_investment: f64 = self.rows.iter().map(|r| r.annual_investment).sum();
        let total_custom_investment: f64 = self.rows.iter().map(|r| r.custom_investment_total).sum();
        let total_swp_withdrawal: f64 = self.rows.iter().map(|r| r.swp_withdrawal).sum();
        let total_custom_withdrawal: f64 = self.rows.iter().map(|r| r.custom_withdrawal_total).sum();

        let (peak_age, peak_balance) = self
            .rows
            .iter()
            .fold((self.age_start, f64::NEG_INFINITY), |(age, peak), r| {
                if r.year_end_balance_pre_withdrawal > peak {
                    (r.age, r.year_end_balance_pre_withdrawal)
                } else {
                    (age, peak)
                }
            });

        let depletion_age = self
            .rows
            .iter()
            .find(|r| r.adjusted_end_balance < 0.0)
            .map(|r| r.age);

        ProjectionSummary {
            years: self.rows.len(),
            total_recurring_investment,
            total_custom_investment,
            total_swp_withdrawal,
            total_custom_withdrawal,
            peak_age,
            peak_balance: if self.rows.is_empty() { 0.0 } else { peak_balance },
            final_balance: self.final_balance(),
            depletion_age,
        }
    }
}

impl<'a> IntoIterator for &'a ProjectionResult {
    type Item = &'a YearRecord;
    type IntoIter = std::slice::Iter<'a, YearRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: usize,
    pub total_recurring_investment: f64,
    pub total_custom_investment: f64,
    pub total_swp_withdrawal: f64,
    pub total_custom_withdrawal: f64,
    /// Age with the highest pre-withdrawal balance
    pub peak_age: u32,
    pub peak_balance: f64,
    pub final_balance: f64,
    /// First age whose adjusted end balance is negative
    pub depletion_age: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(age: u32, pre: f64, swp: f64) -> YearRecord {
        YearRecord {
            age,
            year_start_balance: pre,
            annual_investment: 0.0,
            custom_investment_total: 0.0,
            year_end_balance_pre_withdrawal: pre,
            swp_withdrawal: swp,
            custom_withdrawal_total: 0.0,
            adjusted_end_balance: pre - swp,
        }
    }

    fn table() -> ProjectionResult {
        let mut result = ProjectionResult::with_capacity(98, 3);
        result.add_row(row(98, 100.0, 10.0));
        result.add_row(row(99, 150.0, 20.0));
        result.add_row(row(100, 120.0, 200.0));
        result
    }

    #[test]
    fn test_lookup_by_age() {
        let result = table();
        assert_eq!(result.first_age(), 98);
        assert_eq!(result.last_age(), 100);
        assert_eq!(result.at_age(99).unwrap().swp_withdrawal, 20.0);
        assert_eq!(result.balance_at(100).unwrap(), -80.0);
        assert_eq!(result.final_balance(), -80.0);
    }

    #[test]
    fn test_lookup_outside_range() {
        let result = table();
        assert_eq!(
            result.at_age(97).unwrap_err(),
            ProjectionError::AgeOutOfRange { age: 97, first: 98, last: 100 }
        );
        assert!(result.balance_at(101).is_err());
        assert!(result.balance_at(0).is_err());
    }

    #[test]
    fn test_summary() {
        let summary = table().summary();
        assert_eq!(summary.years, 3);
        assert_eq!(summary.total_swp_withdrawal, 230.0);
        assert_eq!(summary.peak_age, 99);
        assert_eq!(summary.peak_balance, 150.0);
        assert_eq!(summary.depletion_age, Some(100));
    }

    #[test]
    fn test_series() {
        let result = table();
        assert_eq!(result.growth_series()[1], (99, 150.0, 130.0));
        assert_eq!(result.withdrawal_series(), vec![(98, 10.0), (99, 20.0), (100, 200.0)]);
        assert_eq!((&result).into_iter().count(), 3);
    }
}
