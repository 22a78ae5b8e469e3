//! Simulation input model.
//!
//! This module defines [`CalculatorState`], the structured input of a payroll
//! simulation. The engine returns a value of the same shape with the
//! [`PayrollBreakdown`] and every computed [`Overridable`] refreshed, so a
//! caller can feed the result straight back in as the next input.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{LineKind, Overridable, PayrollBreakdown};

/// The highest adjustment period index with configured semantics.
pub const MAX_PERIOD: u8 = 4;

/// Upper bound for any amount, count, rate or quantity entered by the user.
///
/// Keeps every derived product and sum far inside the `Decimal` range.
pub const MAX_INPUT_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// The career position of the employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Analista Judiciário.
    Analyst,
    /// Técnico Judiciário.
    #[default]
    Technician,
}

impl Position {
    /// Returns the configuration key of the position.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Analyst => "analyst",
            Position::Technician => "technician",
        }
    }
}

/// Which month branch of the simulation is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalculationMonth {
    /// Any month without 13th-salary or vacation triggers.
    #[default]
    #[serde(rename = "comum")]
    Regular,
    /// January: vacation bonus and 13th-salary advance.
    #[serde(rename = "jan")]
    January,
    /// June: 13th-salary advance.
    #[serde(rename = "jun")]
    June,
    /// November: 13th-salary settlement.
    #[serde(rename = "nov")]
    November,
}

impl CalculationMonth {
    /// Returns true for the months that pay the 13th-salary advance.
    pub fn pays_christmas_advance(&self) -> bool {
        matches!(self, CalculationMonth::January | CalculationMonth::June)
    }
}

/// Highest academic title held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleLevel {
    /// No title bonus.
    #[default]
    None,
    /// Undergraduate degree (technicians).
    Graduation,
    /// Specialization course.
    Specialization,
    /// Master's degree.
    Master,
    /// Doctorate.
    Doctorate,
}

/// Accumulated training hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrainingLevel {
    /// No training bonus.
    #[default]
    #[serde(rename = "none")]
    None,
    /// 120 hours of training.
    #[serde(rename = "120h")]
    Hours120,
    /// 240 hours of training.
    #[serde(rename = "240h")]
    Hours240,
    /// 360 hours of training.
    #[serde(rename = "360h")]
    Hours360,
}

/// Qualification bonus elections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QualificationElection {
    /// Academic title level.
    pub title: TitleLevel,
    /// Training hours level.
    pub training: TrainingLevel,
}

/// Specific gratification type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GratificationType {
    /// No specific gratification.
    #[default]
    None,
    /// Gratificação de Atividade Externa (court officers).
    Gae,
    /// Gratificação de Atividade de Segurança (security staff).
    Gas,
}

/// Pension regime of the employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PensionRegime {
    /// Contribution on the full base, no ceiling.
    #[default]
    Full,
    /// Contribution capped at the ceiling; the excess may go to the fund.
    Capped,
}

/// Supplementary fund (Funpresp) participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FundElection {
    /// Mandatory contribution rate as a fraction (e.g., 0.085).
    pub mandatory_rate: Decimal,
    /// Voluntary contribution as a percentage (e.g., 1.5 for 1.5%).
    pub voluntary_percent: Decimal,
}

/// Pension and social-security elections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PensionElection {
    /// The pension regime.
    pub regime: PensionRegime,
    /// Whether the function bonus is part of the contribution base.
    pub include_function: bool,
    /// Whether the gratification is part of the contribution base.
    pub include_gratification: bool,
    /// Whether the employee receives the permanence bonus.
    pub permanence_bonus: bool,
    /// Supplementary fund participation, for the capped regime.
    pub fund: Option<FundElection>,
}

/// Tax table selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxElection {
    /// Version of the social-security table.
    pub social_security_table: String,
    /// Version of the income tax deduction table.
    pub income_tax_table: String,
    /// Number of declared dependents.
    pub dependents: u32,
}

impl Default for TaxElection {
    fn default() -> Self {
        Self {
            social_security_table: "2025".to_string(),
            income_tax_table: "2025".to_string(),
            dependents: 0,
        }
    }
}

/// Overtime inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeInput {
    /// The overtime base, derived unless locked.
    pub base: Overridable,
    /// Hours paid at 50%.
    pub hours_50: Decimal,
    /// Hours paid at 100%.
    pub hours_100: Decimal,
    /// Paid as previous-exercise income.
    pub previous_exercise: bool,
}

/// Function substitution inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionInput {
    /// Days substituted, keyed by the substituted function code.
    pub days: BTreeMap<String, Decimal>,
    /// Paid as previous-exercise income.
    pub previous_exercise: bool,
}

/// Compensatory leave indemnity inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveInput {
    /// Days of leave to indemnify.
    pub days: Decimal,
    /// Function used for the base instead of the current one.
    pub function_code: Option<String>,
    /// Adds the estimated permanence bonus to the base.
    pub include_permanence_bonus: bool,
}

/// Boarding supplement selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardingSupplement {
    /// No supplement.
    #[default]
    None,
    /// Half of the configured supplement.
    Half,
    /// The full configured supplement.
    Full,
}

/// Travel per-diem inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerDiemInput {
    /// Number of dailies (may be fractional).
    pub quantity: Decimal,
    /// Boarding supplement selector.
    pub boarding: BoardingSupplement,
    /// Lodging provided by a third party.
    pub external_lodging: bool,
    /// Meals provided by a third party.
    pub external_meals: bool,
    /// Transport provided by a third party.
    pub external_transport: bool,
    /// Returns the meal allowance share for the travel days.
    pub restitute_meal_allowance: bool,
    /// Returns the transportation allowance share for the travel days.
    pub restitute_transport_allowance: bool,
}

/// Vacation bonus inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VacationInput {
    /// The 1/3 vacation bonus, derived unless locked.
    pub bonus: Overridable,
    /// The bonus was paid last month and its tax already withheld.
    pub received_last_month: bool,
    /// Vacation advance received earlier and discounted this month.
    pub advance_discount: Decimal,
}

/// 13th-salary inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChristmasInput {
    /// Advance on the salary portion.
    pub advance_base: Overridable,
    /// Advance on the function portion.
    pub advance_function: Overridable,
}

/// Benefit elections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitElection {
    /// Receives the meal allowance.
    pub meal_allowance: bool,
    /// Dependents eligible for the pre-school allowance.
    pub preschool_dependents: u32,
    /// Declared monthly transportation expense.
    pub transport_monthly_expense: Decimal,
    /// Working days used to prorate the employee share.
    pub transport_working_days: Decimal,
}

impl Default for BenefitElection {
    fn default() -> Self {
        Self {
            meal_allowance: false,
            preschool_dependents: 0,
            transport_monthly_expense: Decimal::ZERO,
            transport_working_days: Decimal::from(22),
        }
    }
}

/// A free-form credit or debit line entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraLine {
    /// Caller-assigned identifier.
    pub id: String,
    /// Description shown on the paycheck.
    pub description: String,
    /// Amount of the line.
    pub amount: Decimal,
    /// Whether the line is a credit or a debit.
    pub kind: LineKind,
}

/// The complete simulation input, echoed back with computed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorState {
    /// The career position.
    pub position: Position,
    /// The salary step code (e.g., "A1", "C13").
    pub step: String,
    /// The function held, if any (e.g., "fc3", "cj1").
    pub function_code: Option<String>,
    /// Adjustment period index (0 = current tables, 1 = new rules, 2+ = raises).
    pub period: u8,
    /// The month branch.
    pub month: CalculationMonth,
    /// Qualification bonus elections.
    pub qualification: QualificationElection,
    /// Specific gratification type.
    pub gratification: GratificationType,
    /// VPNI and other personal legal advantages.
    pub legal_advantages: Decimal,
    /// Pension elections.
    pub pension: PensionElection,
    /// Tax table selections.
    pub tax: TaxElection,
    /// Overtime inputs.
    pub overtime: OvertimeInput,
    /// Function substitution inputs.
    pub substitution: SubstitutionInput,
    /// Compensatory leave inputs.
    pub leave: LeaveInput,
    /// Travel per-diem inputs.
    pub per_diem: PerDiemInput,
    /// Vacation bonus inputs.
    pub vacation: VacationInput,
    /// 13th-salary inputs.
    pub christmas: ChristmasInput,
    /// Benefit elections.
    pub benefits: BenefitElection,
    /// Manual discounts.
    pub other_discounts: Decimal,
    /// Free-form credit and debit lines.
    pub extras: Vec<ExtraLine>,
    /// Computed breakdown, replaced on every run.
    pub breakdown: PayrollBreakdown,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            position: Position::default(),
            step: "A1".to_string(),
            function_code: None,
            period: 0,
            month: CalculationMonth::default(),
            qualification: QualificationElection::default(),
            gratification: GratificationType::default(),
            legal_advantages: Decimal::ZERO,
            pension: PensionElection::default(),
            tax: TaxElection::default(),
            overtime: OvertimeInput::default(),
            substitution: SubstitutionInput::default(),
            leave: LeaveInput::default(),
            per_diem: PerDiemInput::default(),
            vacation: VacationInput::default(),
            christmas: ChristmasInput::default(),
            benefits: BenefitElection::default(),
            other_discounts: Decimal::ZERO,
            extras: Vec::new(),
            breakdown: PayrollBreakdown::default(),
        }
    }
}

impl CalculatorState {
    /// Returns the held function code, treating "none" and empty as no function.
    pub fn held_function(&self) -> Option<&str> {
        normalize_function_code(self.function_code.as_deref())
    }

    /// Rejects inputs the calculators would otherwise propagate arithmetically.
    ///
    /// Checks the period range and that every count, quantity and manual
    /// amount lies between zero and [`MAX_INPUT_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.period > MAX_PERIOD {
            return Err(EngineError::InvalidInput {
                field: "period".to_string(),
                message: format!("must be between 0 and {}", MAX_PERIOD),
            });
        }

        let mut amounts: Vec<(String, Decimal)> = vec![
            ("legal_advantages".to_string(), self.legal_advantages),
            ("overtime.base".to_string(), self.overtime.base.value()),
            ("overtime.hours_50".to_string(), self.overtime.hours_50),
            ("overtime.hours_100".to_string(), self.overtime.hours_100),
            ("leave.days".to_string(), self.leave.days),
            ("per_diem.quantity".to_string(), self.per_diem.quantity),
            ("vacation.bonus".to_string(), self.vacation.bonus.value()),
            (
                "vacation.advance_discount".to_string(),
                self.vacation.advance_discount,
            ),
            (
                "christmas.advance_base".to_string(),
                self.christmas.advance_base.value(),
            ),
            (
                "christmas.advance_function".to_string(),
                self.christmas.advance_function.value(),
            ),
            (
                "benefits.transport_monthly_expense".to_string(),
                self.benefits.transport_monthly_expense,
            ),
            (
                "benefits.transport_working_days".to_string(),
                self.benefits.transport_working_days,
            ),
            ("other_discounts".to_string(), self.other_discounts),
        ];

        if let Some(fund) = &self.pension.fund {
            amounts.push(("pension.fund.mandatory_rate".to_string(), fund.mandatory_rate));
            amounts.push((
                "pension.fund.voluntary_percent".to_string(),
                fund.voluntary_percent,
            ));
        }

        for (code, days) in &self.substitution.days {
            amounts.push((format!("substitution.days.{}", code), *days));
        }

        for extra in &self.extras {
            amounts.push((format!("extras.{}", extra.id), extra.amount));
        }

        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field,
                    message: "must not be negative".to_string(),
                });
            }
            if value > MAX_INPUT_AMOUNT {
                return Err(EngineError::InvalidInput {
                    field,
                    message: format!("must not exceed {}", MAX_INPUT_AMOUNT),
                });
            }
        }

        Ok(())
    }
}

/// Treats `None`, an empty string and "none" as "no function held".
pub(crate) fn normalize_function_code(code: Option<&str>) -> Option<&str> {
    match code {
        Some(code) if !code.is_empty() && !code.eq_ignore_ascii_case("none") => Some(code),
        _ => None,
    }
}
