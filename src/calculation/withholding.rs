//! Monthly income tax withholding (IRRF).
//!
//! Regular income is taxed with the single-rate formula. Overtime and
//! substitution paid as previous-exercise income (EA) leave the monthly
//! base and are taxed separately with the progressive schedule.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::components::BaseComponents;
use super::tax::{TaxContext, income_tax_progressive};

/// Monthly amounts feeding the income tax base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WithholdingInput {
    /// Permanence bonus credit.
    pub permanence_bonus: Decimal,
    /// Total overtime pay.
    pub overtime_total: Decimal,
    /// Overtime is previous-exercise income.
    pub overtime_previous_exercise: bool,
    /// Total substitution pay.
    pub substitution_total: Decimal,
    /// Substitution is previous-exercise income.
    pub substitution_previous_exercise: bool,
    /// Monthly social-security contribution.
    pub contribution: Decimal,
    /// Monthly fund contribution.
    pub fund: Decimal,
}

/// The result of the income tax calculation.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// The monthly taxable base.
    pub base: Decimal,
    /// Income tax on the monthly base.
    pub income_tax: Decimal,
    /// Previous-exercise income taxed separately.
    pub previous_exercise_base: Decimal,
    /// Income tax on previous-exercise income.
    pub previous_exercise_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly and previous-exercise income tax.
pub fn calculate_withholding(
    components: &BaseComponents,
    input: &WithholdingInput,
    tax: &TaxContext<'_>,
    step_number: u32,
) -> WithholdingResult {
    let mut base = components.full_sum() + input.permanence_bonus;
    let mut previous_exercise_base = Decimal::ZERO;

    for (amount, previous_exercise) in [
        (input.overtime_total, input.overtime_previous_exercise),
        (input.substitution_total, input.substitution_previous_exercise),
    ] {
        if previous_exercise {
            previous_exercise_base += amount;
        } else {
            base += amount;
        }
    }

    base -= input.contribution + input.fund + tax.dependents_deduction();

    let income_tax = tax.income_tax(base);
    let previous_exercise_tax = income_tax_progressive(previous_exercise_base);

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax Withholding".to_string(),
        legal_ref: "Lei 7.713/1988; Lei 9.250/1995, art. 4".to_string(),
        input: serde_json::json!({
            "contribution": input.contribution.to_string(),
            "fund": input.fund.to_string(),
            "dependents": tax.dependents,
            "deduction": tax.income_tax_deduction.to_string()
        }),
        output: serde_json::json!({
            "base": base.to_string(),
            "income_tax": income_tax.to_string(),
            "previous_exercise_base": previous_exercise_base.to_string(),
            "previous_exercise_tax": previous_exercise_tax.to_string()
        }),
        reasoning: format!(
            "{} x 27.5% - {} = {}; previous exercise {} taxed {}",
            base,
            tax.income_tax_deduction,
            income_tax,
            previous_exercise_base,
            previous_exercise_tax
        ),
    };

    WithholdingResult {
        base,
        income_tax,
        previous_exercise_base,
        previous_exercise_tax,
        audit_step,
    }
}
