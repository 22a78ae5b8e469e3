//! Computed payroll fields.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every value derived by a calculation run.
///
/// The breakdown is fully replaced on each run; none of its fields are read
/// back as input. Values are kept at full precision and rounded to cents
/// only when projected into result rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollBreakdown {
    /// Base salary (vencimento) from the period-adjusted table.
    pub base_salary: Decimal,
    /// Judicial activity bonus (GAJ), 140% of the base salary.
    pub activity_bonus: Decimal,
    /// Function bonus (FC/CJ) of the held function.
    pub function_value: Decimal,
    /// Reference unit (VR) of the period.
    pub reference_unit_value: Decimal,
    /// Qualification bonus for academic titles.
    pub title_bonus: Decimal,
    /// Qualification bonus for training hours.
    pub training_bonus: Decimal,
    /// Specific gratification (GAE/GAS).
    pub gratification_value: Decimal,
    /// VPNI and personal legal advantages.
    pub legal_advantages: Decimal,
    /// Permanence bonus credit.
    pub permanence_bonus: Decimal,

    /// Base used for the overtime hourly rate.
    pub overtime_base: Decimal,
    /// Overtime hourly rate (base / 175).
    pub overtime_hourly_rate: Decimal,
    /// Overtime paid at 50%.
    pub overtime_50: Decimal,
    /// Overtime paid at 100%.
    pub overtime_100: Decimal,
    /// Total overtime.
    pub overtime_total: Decimal,
    /// Total function substitution pay.
    pub substitution_total: Decimal,
    /// Base of the compensatory leave indemnity.
    pub leave_base: Decimal,
    /// Compensatory leave indemnity.
    pub leave_value: Decimal,

    /// Gross per-diems including the boarding supplement.
    pub per_diem_gross: Decimal,
    /// Per-diem clawback for externally provided benefits and restitutions.
    pub per_diem_discount: Decimal,
    /// Net per-diems, floored at zero.
    pub per_diem_net: Decimal,

    /// 1/3 constitutional vacation bonus.
    pub vacation_bonus: Decimal,
    /// Income tax withheld on the vacation bonus.
    pub vacation_tax: Decimal,

    /// 13th-salary advance on the salary portion.
    pub christmas_advance_base: Decimal,
    /// 13th-salary advance on the function portion.
    pub christmas_advance_function: Decimal,
    /// Full 13th salary paid in November.
    pub christmas_total: Decimal,
    /// Social-security contribution on the 13th salary.
    pub christmas_contribution: Decimal,
    /// Supplementary fund contribution on the 13th salary.
    pub christmas_fund: Decimal,
    /// Income tax on the 13th salary.
    pub christmas_tax: Decimal,
    /// Advance already received, debited at settlement.
    pub christmas_advance_deduction: Decimal,

    /// Meal allowance.
    pub meal_allowance: Decimal,
    /// Pre-school allowance.
    pub preschool_allowance: Decimal,
    /// Employee share of the transportation cost (6% of base, prorated).
    pub transport_share: Decimal,
    /// Transportation allowance credit.
    pub transport_credit: Decimal,
    /// Transportation debit.
    pub transport_debit: Decimal,

    /// Social-security contribution base after the ceiling.
    pub contribution_base: Decimal,
    /// Monthly social-security contribution.
    pub contribution: Decimal,
    /// Supplementary fund contribution on the excess over the ceiling.
    pub fund_contribution: Decimal,
    /// Monthly income tax base.
    pub income_tax_base: Decimal,
    /// Monthly income tax.
    pub income_tax: Decimal,
    /// Income tax on previous-exercise overtime and substitution.
    pub income_tax_previous_exercise: Decimal,

    /// Sum of all credits.
    pub gross_total: Decimal,
    /// Sum of all debits.
    pub deduction_total: Decimal,
    /// Net pay.
    pub net: Decimal,
}
