//! Calculation logic for the payroll simulation engine.
//!
//! This module contains the adjustment table resolver, the progressive tax
//! calculators, one calculator per payroll component, the orchestrator that
//! composes them and the projector that renders paycheck rows.

mod adjustment;
mod allowances;
mod christmas_bonus;
mod compensatory_leave;
mod components;
mod contribution;
mod engine;
mod gratification;
mod lookup;
mod overtime;
mod per_diem;
mod qualification;
mod rows;
mod substitution;
mod tax;
mod vacation;
mod withholding;

pub use adjustment::{
    ADJUSTMENT_FACTOR, AdjustmentResult, REFERENCE_UNIT_RATE, ResolvedTables, adjustment_steps,
    compound, resolve_tables,
};
pub use allowances::{
    AllowanceResult, TRANSPORT_REFERENCE_DAYS, TRANSPORT_SHARE_RATE, calculate_allowances,
};
pub use christmas_bonus::{ChristmasResult, calculate_christmas_bonus};
pub use compensatory_leave::{LeaveResult, calculate_compensatory_leave};
pub use components::{ACTIVITY_BONUS_RATE, BaseComponents, BaseSalaryResult, calculate_base_salary};
pub use contribution::{ContributionResult, calculate_contribution};
pub use engine::{calculate, calculate_all};
pub use gratification::{GRATIFICATION_RATE, GratificationResult, calculate_gratification};
pub use lookup::ConfigLookup;
pub use overtime::{
    MONTHLY_HOURS_DIVISOR, OVERTIME_50_MULTIPLIER, OVERTIME_100_MULTIPLIER, OvertimeResult,
    calculate_overtime,
};
pub use per_diem::{
    ALLOWANCE_WORKING_DAYS, LODGING_CLAWBACK_RATE, MEALS_CLAWBACK_RATE, PerDiemResult,
    PerDiemTier, RestitutableAllowances, TRANSPORT_CLAWBACK_RATE, calculate_per_diem,
};
pub use qualification::{
    QualificationResult, calculate_qualification, legacy_title_rate, legacy_training_rate,
    title_unit_multiplier, training_unit_multiplier,
};
pub use rows::project_rows;
pub use substitution::{
    MONTH_DAYS, SubstitutionAccrual, SubstitutionResult, SubstitutionTarget,
    calculate_substitution,
};
pub use tax::{
    DEFAULT_INCOME_TAX_DEDUCTION, INCOME_TAX_RATE, TaxContext, fund_contribution, income_tax,
    income_tax_progressive, social_security_contribution,
};
pub use vacation::{VACATION_DIVISOR, VacationResult, calculate_vacation};
pub use withholding::{WithholdingInput, WithholdingResult, calculate_withholding};
