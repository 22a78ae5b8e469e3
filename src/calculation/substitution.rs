//! Function substitution calculation.
//!
//! While substituting into a higher-paid function, an employee earns the
//! difference between that function's bonus and what they already receive
//! (function bonus plus gratification), prorated over 30 days.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::components::BaseComponents;

/// Days in the month used for proration.
pub const MONTH_DAYS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// A substituted function with its resolved bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTarget {
    /// The substituted function code.
    pub function_code: String,
    /// Days substituted.
    pub days: Decimal,
    /// The period-adjusted bonus of the substituted function.
    pub target_value: Decimal,
}

/// The accrual of a single substitution entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionAccrual {
    /// The substituted function code.
    pub function_code: String,
    /// The amount accrued; zero when the target does not exceed the abatement base.
    pub amount: Decimal,
}

/// The result of the substitution calculation.
#[derive(Debug, Clone)]
pub struct SubstitutionResult {
    /// Function bonus plus gratification already received.
    pub abatement_base: Decimal,
    /// Per-entry accruals, in input order.
    pub accruals: Vec<SubstitutionAccrual>,
    /// Sum of all accruals.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the substitution pay over every target with days > 0.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::{calculate_substitution, BaseComponents, SubstitutionTarget};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let components = BaseComponents {
///     function_value: dec("1000.00"),
///     ..BaseComponents::default()
/// };
/// let targets = vec![SubstitutionTarget {
///     function_code: "fc6".to_string(),
///     days: dec("15"),
///     target_value: dec("4000.00"),
/// }];
///
/// // (4000 - 1000) / 30 * 15
/// let result = calculate_substitution(&components, &targets, 1);
/// assert_eq!(result.total, dec("1500"));
/// ```
pub fn calculate_substitution(
    components: &BaseComponents,
    targets: &[SubstitutionTarget],
    step_number: u32,
) -> SubstitutionResult {
    let abatement_base = components.function_value + components.gratification_value;

    let accruals: Vec<SubstitutionAccrual> = targets
        .iter()
        .filter(|target| target.days > Decimal::ZERO)
        .map(|target| {
            let amount = if target.target_value > abatement_base {
                (target.target_value - abatement_base) / MONTH_DAYS * target.days
            } else {
                Decimal::ZERO
            };
            SubstitutionAccrual {
                function_code: target.function_code.clone(),
                amount,
            }
        })
        .collect();

    let total: Decimal = accruals.iter().map(|accrual| accrual.amount).sum();

    let entries: Vec<serde_json::Value> = accruals
        .iter()
        .map(|accrual| {
            serde_json::json!({
                "function_code": accrual.function_code,
                "amount": accrual.amount.to_string()
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "function_substitution".to_string(),
        rule_name: "Function Substitution".to_string(),
        legal_ref: "Lei 8.112/1990, art. 38".to_string(),
        input: serde_json::json!({
            "abatement_base": abatement_base.to_string(),
            "targets": targets.len()
        }),
        output: serde_json::json!({
            "accruals": entries,
            "total": total.to_string()
        }),
        reasoning: format!(
            "{} substitution(s) accrued {} over an abatement base of {}",
            accruals.len(),
            total,
            abatement_base
        ),
    };

    SubstitutionResult {
        abatement_base,
        accruals,
        total,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn target(code: &str, days: &str, value: &str) -> SubstitutionTarget {
        SubstitutionTarget {
            function_code: code.to_string(),
            days: dec(days),
            target_value: dec(value),
        }
    }

    fn components(function: &str, gratification: &str) -> BaseComponents {
        BaseComponents {
            function_value: dec(function),
            gratification_value: dec(gratification),
            ..BaseComponents::default()
        }
    }

    #[test]
    fn test_target_below_abatement_contributes_exactly_zero() {
        let result = calculate_substitution(
            &components("2000.00", "1750.00"),
            &[target("fc3", "10", "2000.00")],
            1,
        );

        assert_eq!(result.accruals.len(), 1);
        assert_eq!(result.accruals[0].amount, Decimal::ZERO);
        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn test_target_equal_to_abatement_contributes_zero() {
        let result = calculate_substitution(
            &components("2000.00", "0"),
            &[target("fc3", "30", "2000.00")],
            1,
        );

        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn test_gratification_counts_toward_abatement() {
        // (3600 - (1000 + 500)) / 30 * 10 = 700
        let result = calculate_substitution(
            &components("1000.00", "500.00"),
            &[target("fc6", "10", "3600.00")],
            1,
        );

        assert_eq!(result.abatement_base, dec("1500.00"));
        assert_eq!(result.total, dec("700"));
    }

    #[test]
    fn test_entries_are_summed_and_zero_days_skipped() {
        let result = calculate_substitution(
            &components("0", "0"),
            &[
                target("cj1", "3", "9000.00"),
                target("fc1", "0", "1000.00"),
                target("fc6", "6", "3600.00"),
            ],
            1,
        );

        // 9000 / 30 * 3 = 900; 3600 / 30 * 6 = 720
        assert_eq!(result.accruals.len(), 2);
        assert_eq!(result.total, dec("1620"));
    }
}
