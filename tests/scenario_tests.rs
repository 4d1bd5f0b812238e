use invest_calc::{
    CalcError, InputField, ScenarioKind, ScenarioOutcome, Suggestion, Tabular,
    RemainingMonthlyPayment, run_scenario_json, select_scenario,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// JSON inputs through the registry
// ===========================================================================

#[test]
fn test_target_price_from_json() {
    let outcome = run_scenario_json(
        "targetPrice",
        r#"{"currentPrice": "0.000028", "targetPrice": "0.001", "targetBalance": 100000}"#,
    )
    .unwrap();

    let ScenarioOutcome::Suggestion(Suggestion::Computed(suggestion)) = outcome else {
        panic!("expected a computed suggestion, got {outcome:?}");
    };
    assert_eq!(suggestion.shares_to_buy, dec!(100_000_000));
    assert_eq!(suggestion.investment_value, dec!(2800));
}

#[test]
fn test_previous_growth_zero_old_price_surfaces_divide_by_zero() {
    let err = run_scenario_json(
        "1",
        r#"{"currentPrice": 5, "oldPrice": 0, "targetBalance": 100}"#,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CalcError>(),
        Some(CalcError::DivideByZero { .. })
    ));
}

#[test]
fn test_missed_investment_from_json() {
    let outcome = run_scenario_json(
        "missed-investment",
        r#"{"intendedInvestmentAmount": 500, "pricePaid": 10, "priceNow": 25, "verbose": true}"#,
    )
    .unwrap();

    let ScenarioOutcome::Value(value) = outcome else {
        panic!("expected a single value, got {outcome:?}");
    };
    assert_eq!(value.shares, dec!(50));
    assert_eq!(value.value, dec!(1250));
    assert_eq!(value.profit, dec!(750));
}

#[test]
fn test_potential_investment_from_json() {
    let outcome = run_scenario_json(
        "potentialInvestment",
        r#"{"intendedInvestmentAmount": 100, "currentPrice": 2, "nextPrices": [1, 2, 4]}"#,
    )
    .unwrap();

    let ScenarioOutcome::Values(values) = outcome else {
        panic!("expected a list of values, got {outcome:?}");
    };
    let profits: Vec<_> = values.iter().map(|v| v.profit).collect();
    assert_eq!(profits, vec![dec!(-50), dec!(0), dec!(100)]);
}

#[test]
fn test_loan_schedule_from_json_hits_cap() {
    let outcome = run_scenario_json(
        "constant_loan_payment",
        r#"{"startingBalance": 1000000, "monthlyPayment": 1, "apr": 0,
            "startingMonth": "12", "startingYear": 2024}"#,
    )
    .unwrap();

    let ScenarioOutcome::Schedule(schedule) = outcome else {
        panic!("expected a schedule, got {outcome:?}");
    };
    assert_eq!(schedule.payments.len(), 60);
    assert!(!schedule.is_complete());
    assert_eq!(schedule.payments[0].month_and_year, "Dec-2024");
    assert_eq!(schedule.payments[1].month_and_year, "Jan-2025");
}

#[test]
fn test_loan_schedule_rows_render_as_table() {
    let outcome = run_scenario_json(
        "5",
        r#"{"startingBalance": 1200, "monthlyPayment": 100, "apr": 0,
            "startingMonth": "march", "startingYear": 2024}"#,
    )
    .unwrap();

    let ScenarioOutcome::Schedule(schedule) = outcome else {
        panic!("expected a schedule, got {outcome:?}");
    };
    assert_eq!(schedule.total_paid(), dec!(1200));
    for row in &schedule.payments {
        assert_eq!(row.cells().len(), RemainingMonthlyPayment::COLUMNS.len());
    }
    assert_eq!(schedule.payments[11].cells()[1], "Feb-2025");
}

// ===========================================================================
// Rejected inputs
// ===========================================================================

#[test]
fn test_unknown_scenario_is_rejected() {
    let err = run_scenario_json("9", "{}").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CalcError>(),
        Some(CalcError::InvalidScenario(_))
    ));
}

#[test]
fn test_missing_field_is_reported_by_name() {
    let err = run_scenario_json("targetPrice", r#"{"currentPrice": 1, "targetBalance": 10}"#)
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<CalcError>(),
        Some(&CalcError::MissingInput(InputField::TargetPrice))
    );
    assert_eq!(err.to_string(), "Missing input: targetPrice");
}

#[test]
fn test_out_of_range_result_is_an_error_not_a_panic() {
    let err = run_scenario_json(
        "previousGrowth",
        r#"{"currentPrice": 1000000000000000, "oldPrice": "0.00000000000001", "targetBalance": 100}"#,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CalcError>(),
        Some(CalcError::OutOfRange { .. })
    ));
}

#[test]
fn test_zero_payment_loan_returns_capped_schedule() {
    let outcome = run_scenario_json(
        "constantLoanPayment",
        r#"{"startingBalance": 1000, "monthlyPayment": 0, "apr": 0,
            "startingMonth": "jan", "startingYear": 2024}"#,
    )
    .unwrap();

    let ScenarioOutcome::Schedule(schedule) = outcome else {
        panic!("expected a schedule, got {outcome:?}");
    };
    assert_eq!(schedule.payments.len(), 60);
    assert!(schedule.cap_reached.is_some());
}

#[test]
fn test_unknown_json_field_is_rejected() {
    let err = run_scenario_json("targetPrice", r#"{"currentPrise": 1}"#).unwrap_err();
    assert!(err.to_string().contains("parsing inputs for scenario TargetPrice"));
}

// ===========================================================================
// Registry
// ===========================================================================

#[test]
fn test_registry_titles_and_prompts() {
    let prompts: Vec<&str> = select_scenario(ScenarioKind::TargetPrice)
        .prompted_inputs()
        .map(|f| f.name())
        .collect();
    assert_eq!(prompts, vec!["currentPrice", "targetPrice", "targetBalance"]);

    for kind in ScenarioKind::ALL {
        assert!(!kind.to_string().is_empty());
    }
}
