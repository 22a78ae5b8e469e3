//! Integration tests for the payroll simulation engine.
//!
//! This test suite runs full simulations against the bundled JMU
//! configuration and covers:
//! - The plain technician scenario
//! - Idempotence of repeated runs
//! - The contribution ceiling under the capped regime
//! - Transportation allowance exclusivity
//! - Substitution below the abatement base
//! - Overtime, compensatory leave and travel per-diems reaching the totals
//! - The January advance and November settlement of the 13th salary
//! - Locked overrides
//! - Configuration errors and the strict lookup policy

use std::collections::BTreeMap;
use std::str::FromStr;

use proptest::prelude::*;
use rust_decimal::Decimal;

use jmu_payroll::calculation::{calculate, calculate_all, income_tax, social_security_contribution};
use jmu_payroll::config::{
    BenefitsConfig, ConfigLoader, ConfigStore, Configuration, CourtMetadata, LookupPolicy,
    SalaryConfig, TaxConfig,
};
use jmu_payroll::error::EngineError;
use jmu_payroll::models::{
    BenefitElection, CalculationMonth, CalculatorState, ExtraLine, FundElection,
    GratificationType, LeaveInput, LineKind, MAX_INPUT_AMOUNT, Overridable, PensionElection,
    PensionRegime, PerDiemInput, Position, SubstitutionInput,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> Configuration {
    ConfigLoader::load("./config/jmu")
        .expect("Failed to load config")
        .into_config()
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn strict_config_without_tax_tables() -> Configuration {
    let base = load_config();
    let metadata = CourtMetadata {
        scope: "jmu-strict".to_string(),
        name: "Justiça Militar da União".to_string(),
        lookup_policy: LookupPolicy::Strict,
    };
    let salaries = SalaryConfig {
        salary_table: base.salary_table().clone(),
        function_bonus_table: base.function_bonus_table().clone(),
        reference_base_amount: base.reference_base_amount(),
    };
    let taxes = TaxConfig {
        social_security_tables: BTreeMap::new(),
        income_tax_deductions: BTreeMap::new(),
        dependent_deduction: base.dependent_deduction(),
    };
    let benefits = BenefitsConfig {
        benefits: BTreeMap::new(),
        per_diem: base.per_diem_rates().clone(),
    };
    Configuration::new(metadata, salaries, taxes, benefits).unwrap()
}

// =============================================================================
// Plain technician scenario
// =============================================================================

#[test]
fn test_technician_a1_regular_month() {
    let config = load_config();
    let result = calculate_all(&CalculatorState::default(), Some(&config)).unwrap();
    let b = &result.state.breakdown;

    assert_eq!(b.base_salary, decimal("5455.68"));
    assert_eq!(b.activity_bonus, decimal("7637.952"));
    assert_eq!(b.gross_total, decimal("13093.632"));

    let expected_contribution =
        social_security_contribution(decimal("13093.632"), config.social_security_table("2025"));
    assert_eq!(b.contribution, expected_contribution);
    assert_eq!(b.contribution, decimal("1667.38659"));
    assert_eq!(b.income_tax, decimal("2233.48748775"));
    assert_eq!(b.deduction_total, b.contribution + b.income_tax);
    assert_eq!(b.net, b.gross_total - b.deduction_total);
    assert_eq!(b.net, decimal("9192.75792225"));

    // Every other computed field stays zero.
    assert_eq!(b.function_value, Decimal::ZERO);
    assert_eq!(b.title_bonus, Decimal::ZERO);
    assert_eq!(b.training_bonus, Decimal::ZERO);
    assert_eq!(b.gratification_value, Decimal::ZERO);
    assert_eq!(b.overtime_total, Decimal::ZERO);
    assert_eq!(b.substitution_total, Decimal::ZERO);
    assert_eq!(b.leave_value, Decimal::ZERO);
    assert_eq!(b.per_diem_gross, Decimal::ZERO);
    assert_eq!(b.vacation_bonus, Decimal::ZERO);
    assert_eq!(b.christmas_total, Decimal::ZERO);
    assert_eq!(b.fund_contribution, Decimal::ZERO);
    assert_eq!(b.transport_credit, Decimal::ZERO);
    assert_eq!(b.transport_debit, Decimal::ZERO);
}

#[test]
fn test_technician_a1_rows_are_rounded_and_ordered() {
    let config = load_config();
    let result = calculate_all(&CalculatorState::default(), Some(&config)).unwrap();

    let rows: Vec<(&str, Decimal, LineKind)> = result
        .rows
        .iter()
        .map(|row| (row.label.as_str(), row.amount, row.kind))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("Vencimento", decimal("5455.68"), LineKind::Credit),
            ("GAJ", decimal("7637.95"), LineKind::Credit),
            ("PSS", decimal("1667.39"), LineKind::Debit),
            ("IRRF", decimal("2233.49"), LineKind::Debit),
        ]
    );
    assert_eq!(result.credits().count(), 2);
    assert_eq!(result.debits().count(), 2);
}

#[test]
fn test_result_envelope() {
    let config = load_config();
    let result = calculate_all(&CalculatorState::default(), Some(&config)).unwrap();

    assert_eq!(result.scope, "jmu");
    assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
    assert!(!result.audit_trace.steps.is_empty());
    assert!(result.audit_trace.warnings.is_empty());

    let json = serde_json::to_value(&result).unwrap();
    let base_salary = json["state"]["breakdown"]["base_salary"].as_str().unwrap();
    assert_eq!(decimal(base_salary), decimal("5455.68"));
    assert_eq!(json["rows"][0]["label"], "Vencimento");
}

// =============================================================================
// Idempotence
// =============================================================================

fn rich_state() -> CalculatorState {
    let mut days = BTreeMap::new();
    days.insert("cj1".to_string(), decimal("30"));

    CalculatorState {
        position: Position::Analyst,
        step: "B6".to_string(),
        function_code: Some("fc3".to_string()),
        period: 3,
        month: CalculationMonth::January,
        gratification: GratificationType::Gae,
        legal_advantages: decimal("350.00"),
        pension: PensionElection {
            regime: PensionRegime::Capped,
            include_function: true,
            permanence_bonus: true,
            fund: Some(FundElection {
                mandatory_rate: decimal("0.085"),
                voluntary_percent: decimal("1.5"),
            }),
            ..PensionElection::default()
        },
        substitution: SubstitutionInput {
            days,
            previous_exercise: true,
        },
        benefits: BenefitElection {
            meal_allowance: true,
            preschool_dependents: 1,
            transport_monthly_expense: decimal("250.00"),
            ..BenefitElection::default()
        },
        ..CalculatorState::default()
    }
}

#[test]
fn test_calculate_is_idempotent() {
    let config = load_config();
    let once = calculate(&rich_state(), Some(&config)).unwrap();
    let twice = calculate(&once, Some(&config)).unwrap();

    assert_eq!(once, twice);
    assert!(once.breakdown.substitution_total > Decimal::ZERO);
    assert!(once.breakdown.income_tax_previous_exercise > Decimal::ZERO);
}

#[test]
fn test_state_round_trips_through_json() {
    let config = load_config();
    let once = calculate(&rich_state(), Some(&config)).unwrap();

    let json = serde_json::to_string(&once).unwrap();
    let parsed: CalculatorState = serde_json::from_str(&json).unwrap();
    assert_eq!(calculate(&parsed, Some(&config)).unwrap(), once);
}

// =============================================================================
// Contribution ceiling
// =============================================================================

#[test]
fn test_capped_regime_clamps_base_and_funds_the_excess() {
    let config = load_config();
    let state = rich_state();
    let b = calculate(&state, Some(&config)).unwrap().breakdown;

    assert_eq!(b.contribution_base, decimal("8157.41"));
    assert!(b.fund_contribution > Decimal::ZERO);
    assert_eq!(
        b.contribution,
        social_security_contribution(decimal("8157.41"), config.social_security_table("2025"))
    );
    assert_eq!(b.permanence_bonus, b.contribution);
}

#[test]
fn test_capped_regime_funds_excess_over_ceiling() {
    let config = load_config();
    let state = CalculatorState {
        pension: PensionElection {
            regime: PensionRegime::Capped,
            fund: Some(FundElection {
                mandatory_rate: decimal("0.085"),
                voluntary_percent: Decimal::ZERO,
            }),
            ..PensionElection::default()
        },
        ..CalculatorState::default()
    };

    let b = calculate(&state, Some(&config)).unwrap().breakdown;

    assert_eq!(b.contribution_base, decimal("8157.41"));
    assert_eq!(b.contribution, decimal("951.6344"));
    // (13093.632 - 8157.41) * 0.085
    assert_eq!(b.fund_contribution, decimal("419.57887"));
}

#[test]
fn test_full_regime_has_no_fund() {
    let config = load_config();
    let state = CalculatorState {
        pension: PensionElection {
            fund: Some(FundElection {
                mandatory_rate: decimal("0.085"),
                voluntary_percent: Decimal::ZERO,
            }),
            ..PensionElection::default()
        },
        ..CalculatorState::default()
    };

    let b = calculate(&state, Some(&config)).unwrap().breakdown;

    assert_eq!(b.contribution_base, decimal("13093.632"));
    assert_eq!(b.fund_contribution, Decimal::ZERO);
}

// =============================================================================
// Substitution
// =============================================================================

#[test]
fn test_substitution_below_threshold_contributes_zero() {
    let config = load_config();
    let mut days = BTreeMap::new();
    days.insert("fc1".to_string(), decimal("10"));

    let state = CalculatorState {
        function_code: Some("fc3".to_string()),
        substitution: SubstitutionInput {
            days,
            previous_exercise: false,
        },
        ..CalculatorState::default()
    };

    let b = calculate(&state, Some(&config)).unwrap().breakdown;
    assert_eq!(b.substitution_total, Decimal::ZERO);
}

#[test]
fn test_substitution_above_threshold_accrues_difference() {
    let config = load_config();
    let mut days = BTreeMap::new();
    days.insert("fc6".to_string(), decimal("15"));

    let state = CalculatorState {
        function_code: Some("fc1".to_string()),
        substitution: SubstitutionInput {
            days,
            previous_exercise: false,
        },
        ..CalculatorState::default()
    };

    // (3631.06 - 1357.93) / 30 * 15
    let b = calculate(&state, Some(&config)).unwrap().breakdown;
    assert_eq!(
        b.substitution_total,
        (decimal("3631.06") - decimal("1357.93")) / decimal("30") * decimal("15")
    );
}

// =============================================================================
// Overtime, leave and per-diems
// =============================================================================

fn travelling_state() -> CalculatorState {
    let mut state = CalculatorState {
        leave: LeaveInput {
            days: decimal("3"),
            ..LeaveInput::default()
        },
        per_diem: PerDiemInput {
            quantity: decimal("2"),
            external_lodging: true,
            restitute_meal_allowance: true,
            ..PerDiemInput::default()
        },
        benefits: BenefitElection {
            meal_allowance: true,
            ..BenefitElection::default()
        },
        ..CalculatorState::default()
    };
    state.overtime.hours_50 = decimal("7");
    state
}

#[test]
fn test_overtime_leave_and_per_diems_reach_totals() {
    let config = load_config();
    let result = calculate_all(&travelling_state(), Some(&config)).unwrap();
    let b = &result.state.breakdown;

    // Overtime on the full monthly sum, no permanence estimate.
    assert_eq!(b.overtime_base, decimal("13093.632"));
    let overtime = decimal("13093.632") / decimal("175") * decimal("1.5") * decimal("7");
    assert_eq!(b.overtime_50, overtime);
    assert_eq!(b.overtime_total, overtime);

    // 13093.632 / 30 * 3
    assert_eq!(b.leave_value, decimal("1309.3632"));

    // Technician rate 769.76 for two days; lodging claws back 55% and the
    // meal allowance is restituted for the travel days.
    let gross = decimal("1539.52");
    let clawback = gross * decimal("0.55");
    let restitution = decimal("1784.42") / decimal("22") * decimal("2");
    let net = (gross - clawback - restitution).max(Decimal::ZERO);
    assert_eq!(b.meal_allowance, decimal("1784.42"));
    assert_eq!(b.per_diem_gross, gross);
    assert_eq!(b.per_diem_net, net);
    assert_eq!(b.per_diem_discount, gross - net);

    // Non-EA overtime is taxed with the monthly base; leave, per-diems and
    // the meal allowance are not.
    assert_eq!(b.contribution, decimal("1667.38659"));
    assert_eq!(
        b.income_tax_base,
        decimal("13093.632") + overtime - decimal("1667.38659")
    );
    assert_eq!(b.income_tax, income_tax(b.income_tax_base, decimal("908.73")));
    assert_eq!(b.income_tax_previous_exercise, Decimal::ZERO);

    assert_eq!(
        b.gross_total,
        decimal("13093.632") + overtime + decimal("1309.3632") + gross + decimal("1784.42")
    );
    assert_eq!(
        b.deduction_total,
        b.contribution + b.income_tax + b.per_diem_discount
    );
    assert_eq!(b.net, b.gross_total - b.deduction_total);

    let codes: Vec<&str> = result.rows.iter().map(|row| row.code.as_str()).collect();
    assert_eq!(
        codes,
        vec![
            "base_salary",
            "activity_bonus",
            "overtime_50",
            "leave_value",
            "per_diem_gross",
            "meal_allowance",
            "contribution",
            "income_tax",
            "per_diem_discount",
        ]
    );
}

#[test]
fn test_overtime_leave_and_per_diems_are_idempotent() {
    let config = load_config();
    let once = calculate(&travelling_state(), Some(&config)).unwrap();
    let twice = calculate(&once, Some(&config)).unwrap();

    assert_eq!(once, twice);
    assert!(!once.overtime.base.is_locked());
}

#[test]
fn test_previous_exercise_overtime_leaves_monthly_base() {
    let config = load_config();
    let mut state = travelling_state();
    state.overtime.hours_50 = decimal("40");
    state.overtime.previous_exercise = true;

    let b = calculate(&state, Some(&config)).unwrap().breakdown;

    assert_eq!(b.income_tax_base, decimal("13093.632") - decimal("1667.38659"));
    assert!(b.income_tax_previous_exercise > Decimal::ZERO);
}

// =============================================================================
// 13th salary
// =============================================================================

#[test]
fn test_january_advance_then_november_settlement() {
    let config = load_config();
    let january = CalculatorState {
        month: CalculationMonth::January,
        ..CalculatorState::default()
    };

    let after_january = calculate(&january, Some(&config)).unwrap();
    assert_eq!(
        after_january.christmas.advance_base,
        Overridable::Computed(decimal("6546.816"))
    );
    assert_eq!(after_january.breakdown.christmas_advance_base, decimal("6546.816"));

    let november = CalculatorState {
        month: CalculationMonth::November,
        vacation: Default::default(),
        ..after_january
    };
    let b = calculate(&november, Some(&config)).unwrap().breakdown;

    assert_eq!(b.christmas_advance_deduction, decimal("6546.816"));
    assert_eq!(b.christmas_total, decimal("13093.632"));
    assert_eq!(b.christmas_advance_base, Decimal::ZERO);
    // Gross carries the full total, not the advance.
    assert_eq!(b.gross_total, decimal("13093.632") * decimal("2"));
    assert!(b.christmas_tax > Decimal::ZERO);
}

#[test]
fn test_locked_advance_is_debited_in_november() {
    let config = load_config();
    let mut state = CalculatorState {
        month: CalculationMonth::November,
        ..CalculatorState::default()
    };
    state.christmas.advance_base = Overridable::Locked(decimal("5000.00"));

    let next = calculate(&state, Some(&config)).unwrap();
    assert_eq!(next.christmas.advance_base, Overridable::Locked(decimal("5000.00")));
    assert_eq!(next.breakdown.christmas_advance_deduction, decimal("5000.00"));
}

// =============================================================================
// Overrides
// =============================================================================

#[test]
fn test_locked_overrides_are_preserved() {
    let config = load_config();
    let mut state = CalculatorState {
        month: CalculationMonth::January,
        ..CalculatorState::default()
    };
    state.vacation.bonus = Overridable::Locked(decimal("1234.56"));
    state.overtime.base = Overridable::Locked(decimal("17500.00"));
    state.overtime.hours_50 = decimal("2");

    let next = calculate(&state, Some(&config)).unwrap();

    assert_eq!(next.vacation.bonus, Overridable::Locked(decimal("1234.56")));
    assert_eq!(next.overtime.base, Overridable::Locked(decimal("17500.00")));
    assert_eq!(next.breakdown.vacation_bonus, decimal("1234.56"));
    // 17500 / 175 * 1.5 * 2
    assert_eq!(next.breakdown.overtime_total, decimal("300"));
}

#[test]
fn test_extras_and_discounts_reach_totals() {
    let config = load_config();
    let state = CalculatorState {
        other_discounts: decimal("100.00"),
        extras: vec![
            ExtraLine {
                id: "health".to_string(),
                description: "Auxílio Saúde".to_string(),
                amount: decimal("400.00"),
                kind: LineKind::Credit,
            },
            ExtraLine {
                id: "loan".to_string(),
                description: "Consignado".to_string(),
                amount: decimal("250.00"),
                kind: LineKind::Debit,
            },
        ],
        ..CalculatorState::default()
    };

    let result = calculate_all(&state, Some(&config)).unwrap();
    let b = &result.state.breakdown;

    assert_eq!(b.gross_total, decimal("13493.632"));
    assert_eq!(
        b.deduction_total,
        b.contribution + b.income_tax + decimal("350.00")
    );
    assert!(result.rows.iter().any(|row| row.code == "extra.loan"));
}

// =============================================================================
// Errors and lookup policy
// =============================================================================

#[test]
fn test_missing_configuration_is_fatal() {
    match calculate(&CalculatorState::default(), None) {
        Err(EngineError::ConfigurationRequired { .. }) => {}
        other => panic!("Expected ConfigurationRequired, got {:?}", other),
    }
}

#[test]
fn test_store_require_unknown_scope() {
    let store = ConfigStore::load_dir("./config").unwrap();
    assert!(store.get("jmu").is_some());
    assert!(matches!(
        store.require("tjdft"),
        Err(EngineError::ConfigurationRequired { .. })
    ));
}

#[test]
fn test_unknown_step_is_an_error() {
    let config = load_config();
    let state = CalculatorState {
        step: "D20".to_string(),
        ..CalculatorState::default()
    };

    assert!(matches!(
        calculate(&state, Some(&config)),
        Err(EngineError::StepNotFound { .. })
    ));
}

#[test]
fn test_permissive_missing_table_warns_and_defaults() {
    let config = load_config();
    let mut state = CalculatorState::default();
    state.tax.social_security_table = "2019".to_string();

    let result = calculate_all(&state, Some(&config)).unwrap();

    assert_eq!(result.state.breakdown.contribution, Decimal::ZERO);
    assert_eq!(result.audit_trace.warnings.len(), 1);
    assert_eq!(result.audit_trace.warnings[0].code, "MISSING_SOCIAL_SECURITY_TABLE");
}

#[test]
fn test_strict_policy_reports_incomplete_configuration() {
    let config = strict_config_without_tax_tables();

    match calculate(&CalculatorState::default(), Some(&config)) {
        Err(EngineError::ConfigurationIncomplete { key }) => {
            assert_eq!(key, "social_security_tables.2025");
        }
        other => panic!("Expected ConfigurationIncomplete, got {:?}", other),
    }
}

#[test]
fn test_negative_days_are_rejected() {
    let config = load_config();
    let mut state = CalculatorState::default();
    state.leave.days = decimal("-3");

    match calculate(&state, Some(&config)) {
        Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "leave.days"),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_oversized_amount_is_rejected_without_panicking() {
    let config = load_config();
    let state = CalculatorState {
        legal_advantages: Decimal::MAX,
        ..CalculatorState::default()
    };

    match calculate_all(&state, Some(&config)) {
        Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "legal_advantages"),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_largest_accepted_amounts_do_not_overflow() {
    let config = load_config();
    let mut state = travelling_state();
    state.legal_advantages = MAX_INPUT_AMOUNT;
    state.overtime.hours_50 = MAX_INPUT_AMOUNT;
    state.overtime.hours_100 = MAX_INPUT_AMOUNT;
    state.leave.days = MAX_INPUT_AMOUNT;
    state.per_diem.quantity = MAX_INPUT_AMOUNT;
    state.other_discounts = MAX_INPUT_AMOUNT;

    let b = calculate(&state, Some(&config)).unwrap().breakdown;
    assert_eq!(b.net, b.gross_total - b.deduction_total);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_transport_is_credit_or_debit(
        expense in 0u64..200_000,
        step in prop::sample::select(vec!["A1", "B6", "C13"]),
        analyst in any::<bool>(),
    ) {
        let config = load_config();
        let state = CalculatorState {
            position: if analyst { Position::Analyst } else { Position::Technician },
            step: step.to_string(),
            benefits: BenefitElection {
                transport_monthly_expense: Decimal::new(expense as i64, 2),
                ..BenefitElection::default()
            },
            ..CalculatorState::default()
        };

        let b = calculate(&state, Some(&config)).unwrap().breakdown;
        prop_assert!(b.transport_credit.is_zero() || b.transport_debit.is_zero());
    }

    #[test]
    fn prop_net_is_gross_minus_deductions(hours in 0u32..60, period in 0u8..=4) {
        let config = load_config();
        let mut state = CalculatorState {
            period,
            ..CalculatorState::default()
        };
        state.overtime.hours_50 = Decimal::from(hours);

        let b = calculate(&state, Some(&config)).unwrap().breakdown;
        prop_assert_eq!(b.net, b.gross_total - b.deduction_total);
    }
}
