//! Adjustment table resolution.
//!
//! Salary and function-bonus tables are published for the current period;
//! later adjustment periods apply successive 8% raises. Each raise is
//! floored to cents before the next one is applied, so the result differs
//! from a single `value * 1.08^n` exponentiation.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::Configuration;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Position};

/// The multiplier applied per adjustment step (8% raise).
pub const ADJUSTMENT_FACTOR: Decimal = Decimal::from_parts(108, 0, 0, false, 2);

/// The share of the anchor salary that makes up one reference unit (6.5%).
pub const REFERENCE_UNIT_RATE: Decimal = Decimal::from_parts(65, 0, 0, false, 3);

/// Returns the number of compounded raises for a period.
///
/// Periods 0 and 1 use the published tables; every period from 2 on adds
/// one raise.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::adjustment_steps;
///
/// assert_eq!(adjustment_steps(0), 0);
/// assert_eq!(adjustment_steps(1), 0);
/// assert_eq!(adjustment_steps(2), 1);
/// assert_eq!(adjustment_steps(4), 3);
/// ```
pub fn adjustment_steps(period: u8) -> u32 {
    if period >= 2 { u32::from(period) - 1 } else { 0 }
}

/// Applies `steps` raises of 8%, flooring to cents after each one.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::compound;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from_str("1000.00").unwrap();
/// assert_eq!(compound(value, 2), Decimal::from_str("1166.40").unwrap());
///
/// // Per-step flooring: 10.99 -> 11.86 -> 12.80 (10.99 * 1.1664 would floor to 12.81)
/// let value = Decimal::from_str("10.99").unwrap();
/// assert_eq!(compound(value, 2), Decimal::from_str("12.80").unwrap());
/// ```
pub fn compound(value: Decimal, steps: u32) -> Decimal {
    (0..steps).fold(value, |acc, _| {
        (acc * ADJUSTMENT_FACTOR).round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity)
    })
}

/// Salary and function tables adjusted for one period.
///
/// Resolved once per calculation and shared by every component calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTables {
    /// The period the tables were resolved for.
    pub period: u8,
    /// The number of compounded raises applied.
    pub steps: u32,
    /// Adjusted salary table.
    pub salary_table: HashMap<Position, BTreeMap<String, Decimal>>,
    /// Adjusted function-bonus table.
    pub function_bonus_table: BTreeMap<String, Decimal>,
    /// Reference unit (VR) value for the period.
    pub reference_unit_value: Decimal,
}

impl ResolvedTables {
    /// Looks up the adjusted base salary for a position and step.
    pub fn salary(&self, position: Position, step: &str) -> EngineResult<Decimal> {
        let steps = self
            .salary_table
            .get(&position)
            .ok_or_else(|| EngineError::PositionNotFound {
                position: position.as_str().to_string(),
            })?;

        steps
            .get(step)
            .copied()
            .ok_or_else(|| EngineError::StepNotFound {
                position: position.as_str().to_string(),
                step: step.to_string(),
            })
    }

    /// Looks up the adjusted bonus of a function code (case-insensitive).
    pub fn function_bonus(&self, code: &str) -> Option<Decimal> {
        self.function_bonus_table
            .get(&code.to_ascii_lowercase())
            .copied()
    }
}

/// The result of resolving the tables, including the audit step.
#[derive(Debug, Clone)]
pub struct AdjustmentResult {
    /// The resolved tables.
    pub tables: ResolvedTables,
    /// The audit step recording the resolution.
    pub audit_step: AuditStep,
}

/// Resolves the salary tables, function tables and reference unit for a period.
///
/// # Examples
///
/// ```no_run
/// use jmu_payroll::calculation::resolve_tables;
/// use jmu_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/jmu").unwrap();
/// let result = resolve_tables(3, loader.config(), 1);
/// assert_eq!(result.tables.steps, 2);
/// ```
pub fn resolve_tables(period: u8, config: &Configuration, step_number: u32) -> AdjustmentResult {
    let steps = adjustment_steps(period);

    let salary_table = config
        .salary_table()
        .iter()
        .map(|(position, table)| {
            let adjusted = table
                .iter()
                .map(|(step, value)| (step.clone(), compound(*value, steps)))
                .collect();
            (*position, adjusted)
        })
        .collect();

    let function_bonus_table = config
        .function_bonus_table()
        .iter()
        .map(|(code, value)| (code.to_ascii_lowercase(), compound(*value, steps)))
        .collect();

    let anchor = compound(config.reference_base_amount(), steps);
    let reference_unit_value = (anchor * REFERENCE_UNIT_RATE)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let audit_step = AuditStep {
        step_number,
        rule_id: "adjustment_tables".to_string(),
        rule_name: "Adjustment Table Resolution".to_string(),
        legal_ref: "Lei 11.416/2006, Anexos II e III".to_string(),
        input: serde_json::json!({
            "period": period,
            "reference_base_amount": config.reference_base_amount().to_string()
        }),
        output: serde_json::json!({
            "steps": steps,
            "adjusted_reference_base": anchor.to_string(),
            "reference_unit_value": reference_unit_value.to_string()
        }),
        reasoning: format!(
            "Period {} applies {} compounded 8% raise(s); VR = 6.5% of {} = {}",
            period, steps, anchor, reference_unit_value
        ),
    };

    AdjustmentResult {
        tables: ResolvedTables {
            period,
            steps,
            salary_table,
            function_bonus_table,
            reference_unit_value,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::fixtures::test_configuration;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_compound_zero_steps_returns_value_unchanged() {
        assert_eq!(compound(dec("1000.005"), 0), dec("1000.005"));
    }

    #[test]
    fn test_compound_two_steps_on_round_value() {
        // 1000.00 -> 1080.00 -> 1166.40
        assert_eq!(compound(dec("1000.00"), 1), dec("1080.00"));
        assert_eq!(compound(dec("1000.00"), 2), dec("1166.40"));
    }

    #[test]
    fn test_compound_floors_fractional_cents_each_step() {
        // 1000.005 * 1.08 = 1080.0054 -> 1080.00; 1080.00 * 1.08 = 1166.40
        assert_eq!(compound(dec("1000.005"), 2), dec("1166.40"));
    }

    #[test]
    fn test_compound_diverges_from_single_exponentiation() {
        // Per step: 10.99 * 1.08 = 11.8692 -> 11.86; 11.86 * 1.08 = 12.8088 -> 12.80
        let per_step = compound(dec("10.99"), 2);
        let single_shot = (dec("10.99") * dec("1.1664"))
            .round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity);

        assert_eq!(per_step, dec("12.80"));
        assert_eq!(single_shot, dec("12.81"));
        assert_ne!(per_step, single_shot);
    }

    #[test]
    fn test_period_zero_and_one_keep_published_tables() {
        let config = test_configuration();

        for period in [0, 1] {
            let result = resolve_tables(period, &config, 1);
            assert_eq!(result.tables.steps, 0);
            assert_eq!(
                result.tables.salary(Position::Technician, "A1").unwrap(),
                dec("5000.00")
            );
            assert_eq!(result.tables.function_bonus("fc3"), Some(dec("2000.00")));
            assert_eq!(result.tables.reference_unit_value, dec("1300.00"));
        }
    }

    #[test]
    fn test_period_three_applies_two_raises_everywhere() {
        let config = test_configuration();
        let result = resolve_tables(3, &config, 1);

        assert_eq!(result.tables.steps, 2);
        assert_eq!(
            result.tables.salary(Position::Technician, "A1").unwrap(),
            dec("5832.00")
        );
        assert_eq!(result.tables.function_bonus("FC3"), Some(dec("2332.80")));
        // 20000 -> 21600 -> 23328; 23328 * 0.065 = 1516.32
        assert_eq!(result.tables.reference_unit_value, dec("1516.32"));
    }

    #[test]
    fn test_reference_unit_rounds_half_away_from_zero() {
        // 19145.59 * 0.065 = 1244.46335 -> 1244.46
        let value = (dec("19145.59") * REFERENCE_UNIT_RATE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(value, dec("1244.46"));
    }

    #[test]
    fn test_unknown_step_returns_error() {
        let config = test_configuration();
        let result = resolve_tables(0, &config, 1);

        match result.tables.salary(Position::Analyst, "Z9") {
            Err(EngineError::StepNotFound { position, step }) => {
                assert_eq!(position, "analyst");
                assert_eq!(step, "Z9");
            }
            other => panic!("Expected StepNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_step_records_steps_and_reference_unit() {
        let config = test_configuration();
        let result = resolve_tables(2, &config, 7);

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "adjustment_tables");
        assert_eq!(result.audit_step.output["steps"], 1);
        assert_eq!(
            result.audit_step.output["reference_unit_value"]
                .as_str()
                .unwrap(),
            "1404.00"
        );
    }
}
