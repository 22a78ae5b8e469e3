//! Overtime (serviço extraordinário) calculation.
//!
//! The overtime base is the sum of the monthly components plus, for
//! employees receiving the permanence bonus, an estimate of the
//! contribution that the bonus reimburses. A locked base is used as is.
//!
//! - hourly rate = base / 175
//! - 50% hours pay `hourly * 1.5` each
//! - 100% hours pay `hourly * 2` each

use rust_decimal::Decimal;

use crate::models::{AuditStep, OvertimeInput, Overridable, PensionElection};

use super::components::BaseComponents;
use super::tax::TaxContext;

/// Monthly hours divisor for the overtime hourly rate.
pub const MONTHLY_HOURS_DIVISOR: Decimal = Decimal::from_parts(175, 0, 0, false, 0);

/// Multiplier for hours paid at 50%.
pub const OVERTIME_50_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Multiplier for hours paid at 100%.
pub const OVERTIME_100_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// The result of the overtime calculation.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// The overtime base, recomputed unless locked.
    pub base: Overridable,
    /// Estimated permanence contribution included in a computed base.
    pub permanence_estimate: Decimal,
    /// Hourly rate (base / 175).
    pub hourly_rate: Decimal,
    /// Pay for hours at 50%.
    pub value_50: Decimal,
    /// Pay for hours at 100%.
    pub value_100: Decimal,
    /// Total overtime pay.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates overtime pay.
///
/// # Arguments
///
/// * `components` - The resolved pay components
/// * `input` - Overtime hours and the (possibly locked) base
/// * `pension` - Pension elections, for the permanence estimate
/// * `tax` - Resolved tax settings
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_overtime(
    components: &BaseComponents,
    input: &OvertimeInput,
    pension: &PensionElection,
    tax: &TaxContext<'_>,
    step_number: u32,
) -> OvertimeResult {
    let permanence_estimate = if pension.permanence_bonus && !input.base.is_locked() {
        tax.contribution_on(components.contribution_sub_base(pension))
    } else {
        Decimal::ZERO
    };

    let base = input
        .base
        .resolve(|| components.full_sum() + permanence_estimate);
    let hourly_rate = base.value() / MONTHLY_HOURS_DIVISOR;
    let value_50 = hourly_rate * OVERTIME_50_MULTIPLIER * input.hours_50;
    let value_100 = hourly_rate * OVERTIME_100_MULTIPLIER * input.hours_100;
    let total = value_50 + value_100;

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime".to_string(),
        legal_ref: "Lei 8.112/1990, arts. 73 e 74".to_string(),
        input: serde_json::json!({
            "base_locked": base.is_locked(),
            "hours_50": input.hours_50.to_string(),
            "hours_100": input.hours_100.to_string(),
            "previous_exercise": input.previous_exercise
        }),
        output: serde_json::json!({
            "base": base.value().to_string(),
            "permanence_estimate": permanence_estimate.to_string(),
            "hourly_rate": hourly_rate.to_string(),
            "value_50": value_50.to_string(),
            "value_100": value_100.to_string(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "{} / 175 = {} per hour; {}h x 1.5 + {}h x 2 = {}",
            base.value(),
            hourly_rate,
            input.hours_50,
            input.hours_100,
            total
        ),
    };

    OvertimeResult {
        base,
        permanence_estimate,
        hourly_rate,
        value_50,
        value_100,
        total,
        audit_step,
    }
}
