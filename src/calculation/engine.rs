//! Calculation orchestrator.
//!
//! Runs every calculator in a fixed order over one resolved set of tables,
//! accumulates the gross and deduction totals and returns the recomputed
//! state together with the paycheck rows and the audit trace.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{BenefitAmounts, Configuration};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, CalculationResult, CalculatorState, ChristmasInput, ExtraLine,
    LineKind, OvertimeInput, PayrollBreakdown, VacationInput, normalize_function_code,
};

use super::adjustment::resolve_tables;
use super::allowances::calculate_allowances;
use super::christmas_bonus::calculate_christmas_bonus;
use super::compensatory_leave::calculate_compensatory_leave;
use super::components::{BaseComponents, calculate_base_salary};
use super::contribution::calculate_contribution;
use super::gratification::calculate_gratification;
use super::lookup::ConfigLookup;
use super::overtime::calculate_overtime;
use super::per_diem::{PerDiemTier, RestitutableAllowances, calculate_per_diem};
use super::qualification::calculate_qualification;
use super::rows::project_rows;
use super::substitution::{SubstitutionTarget, calculate_substitution};
use super::tax::TaxContext;
use super::vacation::calculate_vacation;
use super::withholding::{WithholdingInput, calculate_withholding};

/// Runs a full simulation and returns the result envelope.
///
/// # Arguments
///
/// * `state` - The simulation input; its breakdown is ignored
/// * `config` - The configuration snapshot; required
///
/// # Returns
///
/// Returns the [`CalculationResult`], or an error if:
/// - No configuration was supplied (`ConfigurationRequired`)
/// - The input has a negative amount or an out-of-range period (`InvalidInput`)
/// - The salary table has no entry for the position and step
/// - A configuration entry is missing under the strict lookup policy
///
/// # Examples
///
/// ```no_run
/// use jmu_payroll::calculation::calculate_all;
/// use jmu_payroll::config::ConfigLoader;
/// use jmu_payroll::models::CalculatorState;
///
/// let loader = ConfigLoader::load("./config/jmu").unwrap();
/// let result = calculate_all(&CalculatorState::default(), Some(loader.config())).unwrap();
/// println!("Net pay: {}", result.state.breakdown.net);
/// ```
pub fn calculate_all(
    state: &CalculatorState,
    config: Option<&Configuration>,
) -> EngineResult<CalculationResult> {
    let start_time = Instant::now();
    let calculation_id = Uuid::new_v4();

    let config = config.ok_or_else(|| EngineError::ConfigurationRequired {
        scope: "unspecified".to_string(),
    })?;
    state.validate()?;

    debug!(
        calculation_id = %calculation_id,
        scope = %config.scope(),
        position = %state.position.as_str(),
        step = %state.step,
        period = state.period,
        "Starting payroll simulation"
    );

    let mut lookup = ConfigLookup::new(config);
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    // Tables
    let adjustment = resolve_tables(state.period, config, step_number);
    let tables = adjustment.tables;
    audit_steps.push(adjustment.audit_step);
    step_number += 1;

    // Base bundle
    let function_value = match state.held_function() {
        Some(code) => lookup.function_bonus(&tables, code)?,
        None => Decimal::ZERO,
    };
    let base = calculate_base_salary(
        &tables,
        state.position,
        &state.step,
        function_value,
        step_number,
    )?;
    audit_steps.push(base.audit_step);
    step_number += 1;

    let qualification = calculate_qualification(
        base.base_salary,
        tables.reference_unit_value,
        state.period,
        &state.qualification,
        step_number,
    );
    audit_steps.push(qualification.audit_step);
    step_number += 1;

    let gratification = calculate_gratification(base.base_salary, state.gratification, step_number);
    audit_steps.push(gratification.audit_step);
    step_number += 1;

    let components = BaseComponents {
        base_salary: base.base_salary,
        activity_bonus: base.activity_bonus,
        function_value: base.function_value,
        reference_unit_value: tables.reference_unit_value,
        title_bonus: qualification.title_bonus,
        training_bonus: qualification.training_bonus,
        gratification_value: gratification.value,
        legal_advantages: state.legal_advantages,
    };

    debug!(
        calculation_id = %calculation_id,
        base_salary = %components.base_salary,
        function_value = %components.function_value,
        reference_unit_value = %components.reference_unit_value,
        "Resolved base components"
    );

    let tax = TaxContext {
        table: lookup.social_security_table(&state.tax.social_security_table)?,
        regime: state.pension.regime,
        fund: state.pension.fund,
        income_tax_deduction: lookup.income_tax_deduction(&state.tax.income_tax_table)?,
        dependent_deduction: config.dependent_deduction(),
        dependents: state.tax.dependents,
    };

    // Overtime and substitution
    let overtime = calculate_overtime(
        &components,
        &state.overtime,
        &state.pension,
        &tax,
        step_number,
    );
    audit_steps.push(overtime.audit_step);
    step_number += 1;

    let mut targets = Vec::new();
    for (code, days) in &state.substitution.days {
        let Some(code) = normalize_function_code(Some(code.as_str())) else {
            continue;
        };
        if *days > Decimal::ZERO {
            targets.push(SubstitutionTarget {
                function_code: code.to_string(),
                days: *days,
                target_value: lookup.function_bonus(&tables, code)?,
            });
        }
    }
    let substitution = calculate_substitution(&components, &targets, step_number);
    audit_steps.push(substitution.audit_step);
    step_number += 1;

    // Leave
    let leave_function_value = if state.leave.days > Decimal::ZERO {
        match normalize_function_code(state.leave.function_code.as_deref()) {
            Some(code) => lookup.function_bonus(&tables, code)?,
            None => components.function_value,
        }
    } else {
        Decimal::ZERO
    };
    let leave = calculate_compensatory_leave(
        &components,
        &state.leave,
        leave_function_value,
        &tax,
        step_number,
    );
    audit_steps.push(leave.audit_step);
    step_number += 1;

    // Allowances precede per-diems, whose restitution reads them.
    let benefits = &state.benefits;
    let amounts = if benefits.meal_allowance || benefits.preschool_dependents > 0 {
        lookup.benefit_amounts(state.period)?
    } else {
        BenefitAmounts {
            meal_allowance: Decimal::ZERO,
            preschool_quota: Decimal::ZERO,
        }
    };
    let allowances = calculate_allowances(components.base_salary, benefits, &amounts, step_number);
    audit_steps.push(allowances.audit_step);
    step_number += 1;

    let per_diem = calculate_per_diem(
        &state.per_diem,
        config.per_diem_rates(),
        PerDiemTier::for_employee(state.position, state.held_function()),
        RestitutableAllowances {
            meal_allowance: allowances.meal_allowance,
            transport_allowance: allowances.transport_credit,
        },
        step_number,
    );
    audit_steps.push(per_diem.audit_step);
    step_number += 1;

    // Vacation and 13th salary
    let vacation = calculate_vacation(
        &components,
        &state.vacation,
        state.month,
        &tax,
        step_number,
    );
    audit_steps.push(vacation.audit_step);
    step_number += 1;

    let christmas = calculate_christmas_bonus(
        &components,
        &state.christmas,
        state.month,
        &state.pension,
        &tax,
        step_number,
    );
    audit_steps.push(christmas.audit_step);
    step_number += 1;

    // Contribution and income tax
    let contribution = calculate_contribution(&components, &state.pension, &tax, step_number);
    audit_steps.push(contribution.audit_step);
    step_number += 1;

    let withholding = calculate_withholding(
        &components,
        &WithholdingInput {
            permanence_bonus: contribution.permanence_bonus,
            overtime_total: overtime.total,
            overtime_previous_exercise: state.overtime.previous_exercise,
            substitution_total: substitution.total,
            substitution_previous_exercise: state.substitution.previous_exercise,
            contribution: contribution.contribution,
            fund: contribution.fund,
        },
        &tax,
        step_number,
    );
    audit_steps.push(withholding.audit_step);
    step_number += 1;

    let paid_advance = state.month.pays_christmas_advance();
    let (christmas_advance_base, christmas_advance_function) = if paid_advance {
        (christmas.advance_base.value(), christmas.advance_function.value())
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let mut breakdown = PayrollBreakdown {
        base_salary: components.base_salary,
        activity_bonus: components.activity_bonus,
        function_value: components.function_value,
        reference_unit_value: components.reference_unit_value,
        title_bonus: components.title_bonus,
        training_bonus: components.training_bonus,
        gratification_value: components.gratification_value,
        legal_advantages: components.legal_advantages,
        permanence_bonus: contribution.permanence_bonus,
        overtime_base: overtime.base.value(),
        overtime_hourly_rate: overtime.hourly_rate,
        overtime_50: overtime.value_50,
        overtime_100: overtime.value_100,
        overtime_total: overtime.total,
        substitution_total: substitution.total,
        leave_base: leave.base,
        leave_value: leave.value,
        per_diem_gross: per_diem.gross,
        per_diem_discount: per_diem.discount,
        per_diem_net: per_diem.net,
        vacation_bonus: vacation.bonus.value(),
        vacation_tax: vacation.tax,
        christmas_advance_base,
        christmas_advance_function,
        christmas_total: christmas.total,
        christmas_contribution: christmas.contribution,
        christmas_fund: christmas.fund,
        christmas_tax: christmas.tax,
        christmas_advance_deduction: christmas.advance_deduction,
        meal_allowance: allowances.meal_allowance,
        preschool_allowance: allowances.preschool_allowance,
        transport_share: allowances.transport_share,
        transport_credit: allowances.transport_credit,
        transport_debit: allowances.transport_debit,
        contribution_base: contribution.base,
        contribution: contribution.contribution,
        fund_contribution: contribution.fund,
        income_tax_base: withholding.base,
        income_tax: withholding.income_tax,
        income_tax_previous_exercise: withholding.previous_exercise_tax,
        gross_total: Decimal::ZERO,
        deduction_total: Decimal::ZERO,
        net: Decimal::ZERO,
    };

    breakdown.gross_total = gross_total(&breakdown, &state.extras);
    breakdown.deduction_total = deduction_total(&breakdown, state);
    breakdown.net = breakdown.gross_total - breakdown.deduction_total;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "totals".to_string(),
        rule_name: "Gross, Deductions and Net".to_string(),
        legal_ref: "Lei 8.112/1990, art. 41".to_string(),
        input: serde_json::json!({
            "extras": state.extras.len(),
            "other_discounts": state.other_discounts.to_string()
        }),
        output: serde_json::json!({
            "gross_total": breakdown.gross_total.to_string(),
            "deduction_total": breakdown.deduction_total.to_string(),
            "net": breakdown.net.to_string()
        }),
        reasoning: format!(
            "{} - {} = {}",
            breakdown.gross_total, breakdown.deduction_total, breakdown.net
        ),
    });

    let next_state = CalculatorState {
        overtime: OvertimeInput {
            base: overtime.base,
            ..state.overtime
        },
        vacation: VacationInput {
            bonus: vacation.bonus,
            ..state.vacation
        },
        christmas: ChristmasInput {
            advance_base: christmas.advance_base,
            advance_function: christmas.advance_function,
        },
        breakdown,
        ..state.clone()
    };

    let rows = project_rows(&next_state);
    let warnings = lookup.into_warnings();
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        calculation_id = %calculation_id,
        scope = %config.scope(),
        gross_total = %next_state.breakdown.gross_total,
        net = %next_state.breakdown.net,
        warnings = warnings.len(),
        duration_us = duration_us,
        "Payroll simulation completed"
    );

    Ok(CalculationResult {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        scope: config.scope().to_string(),
        state: next_state,
        rows,
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings,
            duration_us,
        },
    })
}

/// Recomputes a state; the result can be fed back as the next input.
///
/// Locked values are preserved and every computed value is refreshed.
pub fn calculate(
    state: &CalculatorState,
    config: Option<&Configuration>,
) -> EngineResult<CalculatorState> {
    calculate_all(state, config).map(|result| result.state)
}

fn extras_total(extras: &[ExtraLine], kind: LineKind) -> Decimal {
    extras
        .iter()
        .filter(|extra| extra.kind == kind)
        .map(|extra| extra.amount)
        .sum()
}

fn gross_total(breakdown: &PayrollBreakdown, extras: &[ExtraLine]) -> Decimal {
    [
        breakdown.base_salary,
        breakdown.activity_bonus,
        breakdown.function_value,
        breakdown.title_bonus,
        breakdown.training_bonus,
        breakdown.gratification_value,
        breakdown.legal_advantages,
        breakdown.permanence_bonus,
        breakdown.overtime_total,
        breakdown.substitution_total,
        breakdown.leave_value,
        breakdown.per_diem_gross,
        breakdown.vacation_bonus,
        breakdown.christmas_advance_base,
        breakdown.christmas_advance_function,
        breakdown.christmas_total,
        breakdown.meal_allowance,
        breakdown.preschool_allowance,
        breakdown.transport_credit,
    ]
    .iter()
    .sum::<Decimal>()
        + extras_total(extras, LineKind::Credit)
}

fn deduction_total(breakdown: &PayrollBreakdown, state: &CalculatorState) -> Decimal {
    [
        breakdown.contribution,
        breakdown.fund_contribution,
        breakdown.income_tax,
        breakdown.income_tax_previous_exercise,
        breakdown.vacation_tax,
        breakdown.christmas_contribution,
        breakdown.christmas_fund,
        breakdown.christmas_tax,
        breakdown.christmas_advance_deduction,
        state.vacation.advance_discount,
        breakdown.per_diem_discount,
        breakdown.transport_debit,
        state.other_discounts,
    ]
    .iter()
    .sum::<Decimal>()
        + extras_total(&state.extras, LineKind::Debit)
}
