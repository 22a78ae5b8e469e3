//! Compensatory leave indemnity calculation.
//!
//! Unused compensatory leave days are indemnified at 1/30 of a leave base
//! per day. The base uses either the held function or an explicitly
//! selected one.

use rust_decimal::Decimal;

use crate::models::{AuditStep, LeaveInput};

use super::components::BaseComponents;
use super::substitution::MONTH_DAYS;
use super::tax::TaxContext;

/// The result of the compensatory leave calculation.
#[derive(Debug, Clone)]
pub struct LeaveResult {
    /// The leave base (zero when no days are indemnified).
    pub base: Decimal,
    /// Estimated permanence contribution added to the base.
    pub permanence_estimate: Decimal,
    /// The indemnity.
    pub value: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the compensatory leave indemnity.
///
/// # Arguments
///
/// * `components` - The resolved pay components
/// * `input` - Days and leave options
/// * `leave_function_value` - Bonus of the function used for the base
/// * `tax` - Resolved tax settings, for the permanence estimate
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_compensatory_leave(
    components: &BaseComponents,
    input: &LeaveInput,
    leave_function_value: Decimal,
    tax: &TaxContext<'_>,
    step_number: u32,
) -> LeaveResult {
    let (base, permanence_estimate, value) = if input.days > Decimal::ZERO {
        let base = components.base_salary
            + components.activity_bonus
            + components.title_bonus
            + components.training_bonus
            + components.gratification_value
            + components.legal_advantages
            + leave_function_value;
        let estimate = if input.include_permanence_bonus {
            tax.contribution_on(base)
        } else {
            Decimal::ZERO
        };
        (base, estimate, (base + estimate) / MONTH_DAYS * input.days)
    } else {
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "compensatory_leave".to_string(),
        rule_name: "Compensatory Leave Indemnity".to_string(),
        legal_ref: "Regulamento de licença compensatória".to_string(),
        input: serde_json::json!({
            "days": input.days.to_string(),
            "function_code": input.function_code,
            "leave_function_value": leave_function_value.to_string(),
            "include_permanence_bonus": input.include_permanence_bonus
        }),
        output: serde_json::json!({
            "base": base.to_string(),
            "permanence_estimate": permanence_estimate.to_string(),
            "value": value.to_string()
        }),
        reasoning: format!(
            "({} + {}) / 30 x {} days = {}",
            base, permanence_estimate, input.days, value
        ),
    };

    LeaveResult {
        base,
        permanence_estimate,
        value,
        audit_step,
    }
}
