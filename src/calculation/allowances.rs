//! Meal, pre-school and transportation allowances.
//!
//! The transportation allowance is either a credit of the declared expense
//! or, when the employee share (6% of the base salary prorated over 22
//! working days) meets or exceeds that expense, a debit of the share. The
//! credit and the debit are never both non-zero.

use rust_decimal::Decimal;

use crate::config::BenefitAmounts;
use crate::models::{AuditStep, BenefitElection};

/// Employee share of the transportation allowance (6% of the base salary).
pub const TRANSPORT_SHARE_RATE: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// Working days of the reference month for the transportation share.
pub const TRANSPORT_REFERENCE_DAYS: Decimal = Decimal::from_parts(22, 0, 0, false, 0);

/// The result of the allowance calculation.
#[derive(Debug, Clone)]
pub struct AllowanceResult {
    /// Meal allowance credit.
    pub meal_allowance: Decimal,
    /// Pre-school allowance credit.
    pub preschool_allowance: Decimal,
    /// Prorated employee share of the transportation allowance.
    pub transport_share: Decimal,
    /// Transportation allowance credit.
    pub transport_credit: Decimal,
    /// Transportation debit.
    pub transport_debit: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the meal, pre-school and transportation allowances.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::calculate_allowances;
/// use jmu_payroll::config::BenefitAmounts;
/// use jmu_payroll::models::BenefitElection;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let amounts = BenefitAmounts {
///     meal_allowance: dec("1784.42"),
///     preschool_quota: dec("1235.77"),
/// };
/// let election = BenefitElection {
///     transport_monthly_expense: dec("400.00"),
///     ..BenefitElection::default()
/// };
///
/// // Share 5000 * 6% = 300 is below the expense: the expense is credited.
/// let result = calculate_allowances(dec("5000.00"), &election, &amounts, 1);
/// assert_eq!(result.transport_credit, dec("400.00"));
/// assert_eq!(result.transport_debit, Decimal::ZERO);
/// ```
pub fn calculate_allowances(
    base_salary: Decimal,
    election: &BenefitElection,
    amounts: &BenefitAmounts,
    step_number: u32,
) -> AllowanceResult {
    let meal_allowance = if election.meal_allowance {
        amounts.meal_allowance
    } else {
        Decimal::ZERO
    };
    let preschool_allowance =
        amounts.preschool_quota * Decimal::from(election.preschool_dependents);

    let expense = election.transport_monthly_expense;
    let (transport_share, transport_credit, transport_debit) = if expense > Decimal::ZERO {
        let share = base_salary * TRANSPORT_SHARE_RATE * election.transport_working_days
            / TRANSPORT_REFERENCE_DAYS;
        if share < expense {
            (share, expense, Decimal::ZERO)
        } else {
            (share, Decimal::ZERO, share)
        }
    } else {
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowances".to_string(),
        rule_name: "Meal, Pre-school and Transportation Allowances".to_string(),
        legal_ref: "Lei 8.112/1990, art. 51; MP 2.165-36/2001".to_string(),
        input: serde_json::json!({
            "meal_allowance_elected": election.meal_allowance,
            "preschool_dependents": election.preschool_dependents,
            "transport_monthly_expense": expense.to_string(),
            "transport_working_days": election.transport_working_days.to_string()
        }),
        output: serde_json::json!({
            "meal_allowance": meal_allowance.to_string(),
            "preschool_allowance": preschool_allowance.to_string(),
            "transport_share": transport_share.to_string(),
            "transport_credit": transport_credit.to_string(),
            "transport_debit": transport_debit.to_string()
        }),
        reasoning: format!(
            "Transport share {} against expense {}: credit {}, debit {}",
            transport_share, expense, transport_credit, transport_debit
        ),
    };

    AllowanceResult {
        meal_allowance,
        preschool_allowance,
        transport_share,
        transport_credit,
        transport_debit,
        audit_step,
    }
}
