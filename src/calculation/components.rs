//! Base salary bundle.
//!
//! Looks up the base salary (vencimento), derives the judicial activity
//! bonus (GAJ) and carries the function bonus. The resulting
//! [`BaseComponents`] bundle is computed once per run and threaded through
//! every downstream calculator.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, PensionElection, Position};

use super::adjustment::ResolvedTables;

/// The judicial activity bonus rate (140% of the base salary).
pub const ACTIVITY_BONUS_RATE: Decimal = Decimal::from_parts(140, 0, 0, false, 2);

/// The resolved pay components shared by every calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseComponents {
    /// Base salary (vencimento).
    pub base_salary: Decimal,
    /// Judicial activity bonus (GAJ).
    pub activity_bonus: Decimal,
    /// Function bonus of the held function.
    pub function_value: Decimal,
    /// Reference unit of the period.
    pub reference_unit_value: Decimal,
    /// Qualification bonus for titles.
    pub title_bonus: Decimal,
    /// Qualification bonus for training.
    pub training_bonus: Decimal,
    /// Specific gratification.
    pub gratification_value: Decimal,
    /// VPNI and personal legal advantages.
    pub legal_advantages: Decimal,
}

impl BaseComponents {
    /// Sum of every monthly component: base, GAJ, title, training,
    /// function, gratification and legal advantages.
    pub fn full_sum(&self) -> Decimal {
        self.base_salary
            + self.activity_bonus
            + self.title_bonus
            + self.training_bonus
            + self.function_value
            + self.gratification_value
            + self.legal_advantages
    }

    /// The monthly social-security sub-base before the ceiling.
    ///
    /// Always excludes the training bonus. The function bonus and the
    /// gratification enter only when their inclusion flags are set.
    pub fn contribution_sub_base(&self, pension: &PensionElection) -> Decimal {
        let mut base =
            self.base_salary + self.activity_bonus + self.title_bonus + self.legal_advantages;
        if pension.include_function {
            base += self.function_value;
        }
        if pension.include_gratification {
            base += self.gratification_value;
        }
        base
    }
}

/// The result of the base salary lookup.
#[derive(Debug, Clone)]
pub struct BaseSalaryResult {
    /// Base salary from the adjusted table.
    pub base_salary: Decimal,
    /// Judicial activity bonus.
    pub activity_bonus: Decimal,
    /// Function bonus carried into the bundle.
    pub function_value: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Looks up the base salary and derives the activity bonus.
///
/// # Arguments
///
/// * `tables` - The period-adjusted tables
/// * `position` - The career position
/// * `step` - The salary step code (e.g., "A1")
/// * `function_value` - The already resolved bonus of the held function
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns the bundle values, or `PositionNotFound`/`StepNotFound` when the
/// salary table has no entry. Salary bases have no safe default.
pub fn calculate_base_salary(
    tables: &ResolvedTables,
    position: Position,
    step: &str,
    function_value: Decimal,
    step_number: u32,
) -> EngineResult<BaseSalaryResult> {
    let base_salary = tables.salary(position, step)?;
    let activity_bonus = base_salary * ACTIVITY_BONUS_RATE;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_salary".to_string(),
        rule_name: "Base Salary and Activity Bonus".to_string(),
        legal_ref: "Lei 11.416/2006, arts. 9 e 13".to_string(),
        input: serde_json::json!({
            "position": position.as_str(),
            "step": step,
            "period": tables.period
        }),
        output: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "activity_bonus": activity_bonus.to_string(),
            "function_value": function_value.to_string()
        }),
        reasoning: format!(
            "Base {} for {} {}; GAJ = {} x 140% = {}",
            base_salary,
            position.as_str(),
            step,
            base_salary,
            activity_bonus
        ),
    };

    Ok(BaseSalaryResult {
        base_salary,
        activity_bonus,
        function_value,
        audit_step,
    })
}
