//! 13th salary (gratificação natalina) calculation.
//!
//! The branch depends on the calculation month:
//!
//! - **January / June:** pays the advance, half of the salary portion and
//!   half of the function bonus. Locked advances are kept.
//! - **November:** settles the integral 13th. The displayed total carries a
//!   permanence estimate; the 13th's own contribution, fund contribution and
//!   income tax are computed on their own bases; the stored advance is
//!   debited.
//! - **Other months:** nothing is paid and stored advances are left as they are.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CalculationMonth, ChristmasInput, Overridable, PensionElection};

use super::components::BaseComponents;
use super::tax::TaxContext;

/// The result of the 13th salary calculation.
#[derive(Debug, Clone)]
pub struct ChristmasResult {
    /// Advance on the salary portion (credited in January and June).
    pub advance_base: Overridable,
    /// Advance on the function portion (credited in January and June).
    pub advance_function: Overridable,
    /// Permanence estimate added to the November total.
    pub permanence_estimate: Decimal,
    /// November integral 13th plus the permanence estimate.
    pub total: Decimal,
    /// The 13th's own social-security contribution.
    pub contribution: Decimal,
    /// The 13th's fund contribution on the excess over the ceiling.
    pub fund: Decimal,
    /// Income tax on the 13th.
    pub tax: Decimal,
    /// Stored advance debited in November.
    pub advance_deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the 13th salary for the month branch.
///
/// # Arguments
///
/// * `components` - The resolved pay components
/// * `input` - The stored (possibly locked) advances
/// * `month` - The month branch
/// * `pension` - Pension elections
/// * `tax` - Resolved tax settings
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_christmas_bonus(
    components: &BaseComponents,
    input: &ChristmasInput,
    month: CalculationMonth,
    pension: &PensionElection,
    tax: &TaxContext<'_>,
    step_number: u32,
) -> ChristmasResult {
    let mut result = ChristmasResult {
        advance_base: input.advance_base,
        advance_function: input.advance_function,
        permanence_estimate: Decimal::ZERO,
        total: Decimal::ZERO,
        contribution: Decimal::ZERO,
        fund: Decimal::ZERO,
        tax: Decimal::ZERO,
        advance_deduction: Decimal::ZERO,
        audit_step: AuditStep {
            step_number,
            rule_id: "christmas_bonus".to_string(),
            rule_name: "13th Salary".to_string(),
            legal_ref: "Lei 8.112/1990, arts. 63 a 66".to_string(),
            input: serde_json::Value::Null,
            output: serde_json::Value::Null,
            reasoning: String::new(),
        },
    };

    match month {
        CalculationMonth::January | CalculationMonth::June => {
            let salary_portion = components.full_sum() - components.function_value;
            result.advance_base = input.advance_base.resolve(|| salary_portion / Decimal::TWO);
            result.advance_function = input
                .advance_function
                .resolve(|| components.function_value / Decimal::TWO);
            result.audit_step.reasoning = format!(
                "Advance: {} (salary) + {} (function)",
                result.advance_base.value(),
                result.advance_function.value()
            );
        }
        CalculationMonth::November => {
            let integral = components.full_sum();

            // Permanence gross-up: excludes training only.
            if pension.permanence_bonus {
                result.permanence_estimate =
                    tax.contribution_on(integral - components.training_bonus);
            }
            result.total = integral + result.permanence_estimate;

            // Own contribution: excludes training, and the function unless elected.
            let mut contribution_base = integral - components.training_bonus;
            if !pension.include_function {
                contribution_base -= components.function_value;
            }
            result.contribution = tax.contribution_on(contribution_base);
            result.fund = tax.fund_on(contribution_base);

            result.tax = tax.income_tax(
                result.total - result.contribution - result.fund - tax.dependents_deduction(),
            );
            result.advance_deduction =
                input.advance_base.value() + input.advance_function.value();
            result.audit_step.reasoning = format!(
                "Settlement {} (integral {} + permanence {}); advance {} debited",
                result.total, integral, result.permanence_estimate, result.advance_deduction
            );
        }
        CalculationMonth::Regular => {
            result.audit_step.reasoning = "No 13th salary in a regular month".to_string();
        }
    }

    result.audit_step.input = serde_json::json!({
        "month": month,
        "advance_base_locked": input.advance_base.is_locked(),
        "advance_function_locked": input.advance_function.is_locked(),
        "stored_advance": (input.advance_base.value() + input.advance_function.value()).to_string()
    });
    result.audit_step.output = serde_json::json!({
        "advance_base": result.advance_base.value().to_string(),
        "advance_function": result.advance_function.value().to_string(),
        "total": result.total.to_string(),
        "contribution": result.contribution.to_string(),
        "fund": result.fund.to_string(),
        "tax": result.tax.to_string(),
        "advance_deduction": result.advance_deduction.to_string()
    });

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::tax::DEFAULT_INCOME_TAX_DEDUCTION;
    use crate::config::types::fixtures::social_security_2025;
    use crate::config::SocialSecurityTable;
    use crate::models::{FundElection, PensionRegime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn components() -> BaseComponents {
        BaseComponents {
            base_salary: dec("5000.00"),
            activity_bonus: dec("7000.00"),
            function_value: dec("2000.00"),
            training_bonus: dec("100.00"),
            ..BaseComponents::default()
        }
    }

    fn context(table: &SocialSecurityTable) -> TaxContext<'_> {
        TaxContext {
            table: Some(table),
            regime: PensionRegime::Full,
            fund: None,
            income_tax_deduction: DEFAULT_INCOME_TAX_DEDUCTION,
            dependent_deduction: dec("189.59"),
            dependents: 0,
        }
    }

    #[test]
    fn test_june_pays_half_advances() {
        let table = social_security_2025();
        let result = calculate_christmas_bonus(
            &components(),
            &ChristmasInput::default(),
            CalculationMonth::June,
            &PensionElection::default(),
            &context(&table),
            1,
        );

        // (5000 + 7000 + 100) / 2 and 2000 / 2
        assert_eq!(result.advance_base, Overridable::Computed(dec("6050")));
        assert_eq!(result.advance_function, Overridable::Computed(dec("1000")));
        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn test_locked_advance_is_kept_in_january() {
        let table = social_security_2025();
        let input = ChristmasInput {
            advance_base: Overridable::Locked(dec("3000.00")),
            ..ChristmasInput::default()
        };

        let result = calculate_christmas_bonus(
            &components(),
            &input,
            CalculationMonth::January,
            &PensionElection::default(),
            &context(&table),
            1,
        );

        assert_eq!(result.advance_base, Overridable::Locked(dec("3000.00")));
        assert_eq!(result.advance_function.value(), dec("1000"));
    }

    #[test]
    fn test_november_debits_stored_advance() {
        let table = social_security_2025();
        let input = ChristmasInput {
            advance_base: Overridable::Computed(dec("6050.00")),
            advance_function: Overridable::Computed(dec("1000.00")),
        };
        let tax = context(&table);

        let result = calculate_christmas_bonus(
            &components(),
            &input,
            CalculationMonth::November,
            &PensionElection::default(),
            &tax,
            1,
        );

        assert_eq!(result.total, dec("14100.00"));
        assert_eq!(result.advance_deduction, dec("7050.00"));
        assert_eq!(result.advance_base, input.advance_base);

        // Own contribution on 14100 - 100 - 2000
        let contribution = tax.contribution_on(dec("12000.00"));
        assert_eq!(result.contribution, contribution);
        assert_eq!(
            result.tax,
            (dec("14100.00") - contribution) * dec("0.275") - dec("896.00")
        );
    }

    #[test]
    fn test_november_permanence_estimate_and_fund_use_separate_bases() {
        let table = social_security_2025();
        let pension = PensionElection {
            regime: PensionRegime::Capped,
            include_function: true,
            permanence_bonus: true,
            fund: Some(FundElection {
                mandatory_rate: dec("0.085"),
                voluntary_percent: Decimal::ZERO,
            }),
            ..PensionElection::default()
        };
        let tax = TaxContext {
            regime: PensionRegime::Capped,
            fund: pension.fund,
            ..context(&table)
        };

        let result = calculate_christmas_bonus(
            &components(),
            &ChristmasInput::default(),
            CalculationMonth::November,
            &pension,
            &tax,
            1,
        );

        let capped = tax.contribution_on(dec("8157.41"));
        assert_eq!(result.permanence_estimate, capped);
        assert_eq!(result.total, dec("14100.00") + capped);
        assert_eq!(result.contribution, capped);
        // (14000 - 8157.41) * 0.085
        assert_eq!(result.fund, dec("496.62015"));
    }

    #[test]
    fn test_regular_month_pays_nothing_and_keeps_advances() {
        let table = social_security_2025();
        let input = ChristmasInput {
            advance_base: Overridable::Computed(dec("6050.00")),
            advance_function: Overridable::Computed(dec("1000.00")),
        };

        let result = calculate_christmas_bonus(
            &components(),
            &input,
            CalculationMonth::Regular,
            &PensionElection::default(),
            &context(&table),
            1,
        );

        assert_eq!(result.advance_base, input.advance_base);
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.advance_deduction, Decimal::ZERO);
    }
}
