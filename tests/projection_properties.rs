//! Properties that hold for every valid scenario

use investment_projection::plan::TERMINAL_AGE;
use investment_projection::{
    CustomCashFlowEvent, ProjectionEngine, ProjectionError, ScenarioParameters,
};
use proptest::prelude::*;

fn scenario_strategy() -> impl Strategy<Value = ScenarioParameters> {
    (
        18u32..=100,
        0u32..=40,
        0u32..=40,
        0u32..2_000_000,
        0u32..100_000,
        0u32..=40,
        2u32..=100,
        0u32..=30,
        0u32..200_000,
        0u32..=30,
    )
        .prop_map(
            |(start, work, gap, lump, monthly, step_half, ret_half, swp_inf_half, swp, inf_half)| {
                let age_end = (start + work).min(TERMINAL_AGE);
                let age_retire = (age_end + gap).min(TERMINAL_AGE);
                ScenarioParameters {
                    age_start: start,
                    age_end,
                    age_retire,
                    initial_lump_sum: lump as f64,
                    monthly_investment: monthly as f64,
                    yearly_step_up_pct: step_half as f64 / 2.0,
                    annual_return_pct: ret_half as f64 / 2.0,
                    swp_inflation_pct: swp_inf_half as f64 / 2.0,
                    swp_monthly_withdrawal: swp as f64,
                    annual_inflation_pct: inf_half as f64 / 2.0,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rows_cover_horizon_contiguously(params in scenario_strategy()) {
        let result = ProjectionEngine::new(params, &[]).unwrap().project();

        prop_assert_eq!(result.len(), (TERMINAL_AGE - params.age_start + 1) as usize);
        prop_assert_eq!(result.rows()[0].age, params.age_start);
        prop_assert_eq!(result.rows().last().unwrap().age, TERMINAL_AGE);
        for pair in result.rows().windows(2) {
            prop_assert_eq!(pair[1].age, pair[0].age + 1);
        }
    }

    #[test]
    fn prop_rows_balance(params in scenario_strategy()) {
        let result = ProjectionEngine::new(params, &[]).unwrap().project();

        for r in result.iter() {
            let scale = r
                .year_end_balance_pre_withdrawal
                .abs()
                .max(r.year_start_balance.abs())
                .max(r.annual_investment)
                .max(r.custom_investment_total)
                .max(1.0);
            let rebuilt = r.year_start_balance + r.annual_investment + r.custom_investment_total;
            prop_assert!((rebuilt - r.year_end_balance_pre_withdrawal).abs() <= scale * 1e-9);
            prop_assert_eq!(
                r.adjusted_end_balance,
                r.year_end_balance_pre_withdrawal - r.swp_withdrawal - r.custom_withdrawal_total
            );
        }
        for pair in result.rows().windows(2) {
            let carried = pair[0].adjusted_end_balance * params.return_factor();
            let scale = carried
                .abs()
                .max(pair[1].year_end_balance_pre_withdrawal.abs())
                .max(pair[1].annual_investment)
                .max(1.0);
            prop_assert!((pair[1].year_start_balance - carried).abs() <= scale * 1e-9);
        }
    }

    #[test]
    fn prop_pure_compounding(
        start in 18u32..=99,
        lump in 1u32..5_000_000,
        ret_half in 2u32..=100,
    ) {
        let params = ScenarioParameters {
            age_start: start,
            age_end: start,
            age_retire: start,
            initial_lump_sum: lump as f64,
            monthly_investment: 0.0,
            annual_return_pct: ret_half as f64 / 2.0,
            swp_monthly_withdrawal: 0.0,
            ..Default::default()
        };
        let result = ProjectionEngine::new(params, &[]).unwrap().project();

        for pair in result.rows().windows(2) {
            prop_assert_eq!(
                pair[1].adjusted_end_balance,
                pair[0].adjusted_end_balance * params.return_factor()
            );
        }
    }

    #[test]
    fn prop_split_events_are_additive(
        params in scenario_strategy(),
        offset in 0u32..=82,
        month in 1u32..=12,
        a in 0u32..1_000_000,
        b in 0u32..1_000_000,
        withdraw in any::<bool>(),
    ) {
        let year = (params.age_start + offset).min(TERMINAL_AGE);
        let make = |amount: f64| if withdraw {
            CustomCashFlowEvent::withdrawal(year, month, amount)
        } else {
            CustomCashFlowEvent::investment(year, month, amount)
        };

        let split = [make(a as f64), make(b as f64)];
        let joined = [make(a as f64 + b as f64)];

        let split = ProjectionEngine::new(params, &split).unwrap().project();
        let joined = ProjectionEngine::new(params, &joined).unwrap().project();
        prop_assert_eq!(split.rows(), joined.rows());
    }

    #[test]
    fn prop_lookup_round_trip(params in scenario_strategy()) {
        let result = ProjectionEngine::new(params, &[]).unwrap().project();

        for r in result.iter() {
            prop_assert_eq!(result.balance_at(r.age).unwrap(), r.adjusted_end_balance);
        }
        let below = params.age_start - 1;
        prop_assert!(
            matches!(
                result.balance_at(below),
                Err(ProjectionError::AgeOutOfRange { .. })
            ),
            "expected AgeOutOfRange below the horizon"
        );
        prop_assert!(
            matches!(
                result.balance_at(TERMINAL_AGE + 1),
                Err(ProjectionError::AgeOutOfRange { .. })
            ),
            "expected AgeOutOfRange above the horizon"
        );
    }
}

#[test]
fn accumulation_stops_at_end_age() {
    let params = ScenarioParameters {
        age_start: 30,
        age_end: 45,
        age_retire: 60,
        initial_lump_sum: 0.0,
        monthly_investment: 10_000.0,
        yearly_step_up_pct: 0.0,
        annual_return_pct: 0.0,
        swp_monthly_withdrawal: 0.0,
        ..Default::default()
    };
    let result = ProjectionEngine::new(params, &[]).unwrap().project();

    assert_eq!(result.balance_at(44).unwrap(), 1_800_000.0);
    for age in 45..=TERMINAL_AGE {
        assert_eq!(result.balance_at(age).unwrap(), 1_800_000.0);
    }
}

#[test]
fn swp_escalation_ordering() {
    let params = ScenarioParameters {
        age_retire: 60,
        swp_monthly_withdrawal: 1000.0,
        swp_inflation_pct: 10.0,
        ..Default::default()
    };
    let result = ProjectionEngine::new(params, &[]).unwrap().project();

    assert_eq!(result.at_age(60).unwrap().swp_withdrawal, 12_000.0);
    approx::assert_relative_eq!(
        result.at_age(61).unwrap().swp_withdrawal,
        13_200.0,
        max_relative = 1e-12
    );
}
