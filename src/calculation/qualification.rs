//! Qualification bonus (AQ) calculation.
//!
//! Two mutually exclusive regimes are selected by the adjustment period:
//! period 0 pays a percentage of the base salary, later periods pay a
//! multiple of the reference unit (VR).

use rust_decimal::Decimal;

use crate::models::{AuditStep, QualificationElection, TitleLevel, TrainingLevel};

/// Legacy title rate as a fraction of the base salary.
pub fn legacy_title_rate(level: TitleLevel) -> Decimal {
    match level {
        TitleLevel::None => Decimal::ZERO,
        TitleLevel::Graduation => Decimal::new(5, 2),
        TitleLevel::Specialization => Decimal::new(75, 3),
        TitleLevel::Master => Decimal::new(10, 2),
        TitleLevel::Doctorate => Decimal::new(125, 3),
    }
}

/// Legacy training rate as a fraction of the base salary.
pub fn legacy_training_rate(level: TrainingLevel) -> Decimal {
    match level {
        TrainingLevel::None => Decimal::ZERO,
        TrainingLevel::Hours120 => Decimal::new(1, 2),
        TrainingLevel::Hours240 => Decimal::new(2, 2),
        TrainingLevel::Hours360 => Decimal::new(3, 2),
    }
}

/// Title bonus as a multiple of the reference unit.
pub fn title_unit_multiplier(level: TitleLevel) -> Decimal {
    match level {
        TitleLevel::None => Decimal::ZERO,
        TitleLevel::Graduation => Decimal::ONE,
        TitleLevel::Specialization => Decimal::TWO,
        TitleLevel::Master => Decimal::new(35, 1),
        TitleLevel::Doctorate => Decimal::new(5, 0),
    }
}

/// Training bonus as a multiple of the reference unit.
pub fn training_unit_multiplier(level: TrainingLevel) -> Decimal {
    match level {
        TrainingLevel::None => Decimal::ZERO,
        TrainingLevel::Hours120 => Decimal::new(2, 1),
        TrainingLevel::Hours240 => Decimal::new(4, 1),
        TrainingLevel::Hours360 => Decimal::new(6, 1),
    }
}

/// The result of the qualification bonus calculation.
#[derive(Debug, Clone)]
pub struct QualificationResult {
    /// Bonus for the academic title.
    pub title_bonus: Decimal,
    /// Bonus for training hours.
    pub training_bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the title and training bonuses for the period's regime.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::calculate_qualification;
/// use jmu_payroll::models::{QualificationElection, TitleLevel, TrainingLevel};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let election = QualificationElection {
///     title: TitleLevel::Master,
///     training: TrainingLevel::Hours120,
/// };
/// let base = Decimal::from_str("5000.00").unwrap();
/// let unit = Decimal::from_str("1300.00").unwrap();
///
/// let legacy = calculate_qualification(base, unit, 0, &election, 1);
/// assert_eq!(legacy.title_bonus, Decimal::from_str("500.00").unwrap());
///
/// let current = calculate_qualification(base, unit, 1, &election, 1);
/// assert_eq!(current.title_bonus, Decimal::from_str("4550.00").unwrap());
/// ```
pub fn calculate_qualification(
    base_salary: Decimal,
    reference_unit_value: Decimal,
    period: u8,
    election: &QualificationElection,
    step_number: u32,
) -> QualificationResult {
    let legacy = period == 0;

    let (title_factor, training_factor, multiplicand) = if legacy {
        (
            legacy_title_rate(election.title),
            legacy_training_rate(election.training),
            base_salary,
        )
    } else {
        (
            title_unit_multiplier(election.title),
            training_unit_multiplier(election.training),
            reference_unit_value,
        )
    };

    let title_bonus = multiplicand * title_factor;
    let training_bonus = multiplicand * training_factor;
    let regime = if legacy { "percent_of_base" } else { "reference_unit" };

    let audit_step = AuditStep {
        step_number,
        rule_id: "qualification_bonus".to_string(),
        rule_name: "Qualification Bonus".to_string(),
        legal_ref: "Lei 11.416/2006, art. 15".to_string(),
        input: serde_json::json!({
            "period": period,
            "title": election.title,
            "training": election.training,
            "multiplicand": multiplicand.to_string()
        }),
        output: serde_json::json!({
            "regime": regime,
            "title_bonus": title_bonus.to_string(),
            "training_bonus": training_bonus.to_string()
        }),
        reasoning: format!(
            "{} x {} (title) + {} x {} (training) under the {} regime",
            multiplicand, title_factor, multiplicand, training_factor, regime
        ),
    };

    QualificationResult {
        title_bonus,
        training_bonus,
        audit_step,
    }
}
