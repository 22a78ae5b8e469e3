//! Core data models for the payroll simulation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod calculation_result;
mod calculator_state;
mod overridable;

pub use breakdown::PayrollBreakdown;
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, LineKind, ResultRow,
};
pub(crate) use calculator_state::normalize_function_code;
pub use calculator_state::{
    BenefitElection, BoardingSupplement, CalculationMonth, CalculatorState, ChristmasInput,
    ExtraLine, FundElection, GratificationType, LeaveInput, MAX_INPUT_AMOUNT, MAX_PERIOD,
    OvertimeInput, PensionElection, PensionRegime, PerDiemInput, Position,
    QualificationElection, SubstitutionInput, TaxElection, TitleLevel, TrainingLevel,
    VacationInput,
};
pub use overridable::Overridable;
