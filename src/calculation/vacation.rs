//! Constitutional vacation bonus (1/3 de férias) calculation.
//!
//! The bonus is triggered in January and, once it holds a non-zero value,
//! keeps being recomputed on later runs. A locked bonus is never touched.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CalculationMonth, Overridable, VacationInput};

use super::components::BaseComponents;
use super::tax::TaxContext;

/// The vacation bonus divisor (one third).
pub const VACATION_DIVISOR: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// The result of the vacation bonus calculation.
#[derive(Debug, Clone)]
pub struct VacationResult {
    /// The bonus, recomputed unless locked.
    pub bonus: Overridable,
    /// Income tax withheld on the bonus.
    pub tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the vacation bonus and its income tax.
///
/// # Arguments
///
/// * `components` - The resolved pay components
/// * `input` - The (possibly locked) bonus and withholding flags
/// * `month` - The month branch
/// * `tax` - Resolved tax settings
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_vacation(
    components: &BaseComponents,
    input: &VacationInput,
    month: CalculationMonth,
    tax: &TaxContext<'_>,
    step_number: u32,
) -> VacationResult {
    let bonus = input.bonus.resolve_if(
        |current| month == CalculationMonth::January || !current.is_zero(),
        || components.full_sum() / VACATION_DIVISOR,
    );

    let withheld = if input.received_last_month || bonus.value().is_zero() {
        Decimal::ZERO
    } else {
        tax.income_tax(bonus.value() - tax.dependents_deduction())
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "vacation_bonus".to_string(),
        rule_name: "Vacation Bonus".to_string(),
        legal_ref: "CF/1988, art. 7, XVII; Lei 8.112/1990, art. 76".to_string(),
        input: serde_json::json!({
            "month": month,
            "locked": bonus.is_locked(),
            "received_last_month": input.received_last_month,
            "dependents": tax.dependents
        }),
        output: serde_json::json!({
            "bonus": bonus.value().to_string(),
            "tax": withheld.to_string()
        }),
        reasoning: if input.received_last_month {
            format!("Bonus {}; tax already withheld last month", bonus.value())
        } else {
            format!("Bonus {}; income tax {}", bonus.value(), withheld)
        },
    };

    VacationResult {
        bonus,
        tax: withheld,
        audit_step,
    }
}
