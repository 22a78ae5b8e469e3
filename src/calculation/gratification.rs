//! Specific gratification (GAE/GAS) calculation.
//!
//! The gratification type fully determines the amount: GAE and GAS pay 35%
//! of the base salary, every other type pays nothing.

use rust_decimal::Decimal;

use crate::models::{AuditStep, GratificationType};

/// The gratification rate for GAE and GAS (35% of the base salary).
pub const GRATIFICATION_RATE: Decimal = Decimal::from_parts(35, 0, 0, false, 2);

/// The result of the gratification calculation.
#[derive(Debug, Clone)]
pub struct GratificationResult {
    /// The gratification amount.
    pub value: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the specific gratification.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::calculate_gratification;
/// use jmu_payroll::models::GratificationType;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let base = Decimal::from_str("5000.00").unwrap();
/// let result = calculate_gratification(base, GratificationType::Gae, 1);
/// assert_eq!(result.value, Decimal::from_str("1750.00").unwrap());
///
/// let result = calculate_gratification(base, GratificationType::None, 1);
/// assert_eq!(result.value, Decimal::ZERO);
/// ```
pub fn calculate_gratification(
    base_salary: Decimal,
    gratification: GratificationType,
    step_number: u32,
) -> GratificationResult {
    let value = match gratification {
        GratificationType::Gae | GratificationType::Gas => base_salary * GRATIFICATION_RATE,
        GratificationType::None => Decimal::ZERO,
    };

    let reasoning = if value.is_zero() {
        "No specific gratification; value reset to 0".to_string()
    } else {
        format!("{} x 35% = {}", base_salary, value)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "specific_gratification".to_string(),
        rule_name: "Specific Gratification".to_string(),
        legal_ref: "Lei 11.416/2006, arts. 16 e 17".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "gratification": gratification
        }),
        output: serde_json::json!({
            "gratification_value": value.to_string()
        }),
        reasoning,
    };

    GratificationResult { value, audit_step }
}
