//! Calculation result models for the payroll simulation engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures that capture all outputs of a simulation run: the recomputed
//! state, the ordered paycheck rows and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CalculatorState;

/// Whether a line adds to gross pay or is deducted from it.
///
/// # Example
///
/// ```
/// use jmu_payroll::models::LineKind;
///
/// let kind = LineKind::Debit;
/// assert_eq!(serde_json::to_string(&kind).unwrap(), "\"debit\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Adds to gross pay.
    Credit,
    /// Deducted from gross pay.
    Debit,
}

/// A single displayable paycheck row.
///
/// # Example
///
/// ```
/// use jmu_payroll::models::{LineKind, ResultRow};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let row = ResultRow {
///     code: "base_salary".to_string(),
///     label: "Vencimento".to_string(),
///     amount: Decimal::from_str("5455.68").unwrap(),
///     kind: LineKind::Credit,
/// };
/// assert_eq!(row.signed_amount(), row.amount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Stable machine-readable identifier of the row.
    pub code: String,
    /// Human-readable label.
    pub label: String,
    /// Amount rounded to cents.
    pub amount: Decimal,
    /// Credit or debit.
    pub kind: LineKind,
}

impl ResultRow {
    /// Returns the amount with debits negated.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            LineKind::Credit => self.amount,
            LineKind::Debit => -self.amount,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The statute or regulation backing the rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate configuration gaps that were filled with defaults
/// under the permissive lookup policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use jmu_payroll::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 42,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a payroll simulation.
///
/// The `state` field has the same shape as the input, with every computed
/// value refreshed, so it can be fed back as the next input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The jurisdiction scope of the configuration used.
    pub scope: String,
    /// The recomputed simulation state.
    pub state: CalculatorState,
    /// Ordered paycheck rows.
    pub rows: Vec<ResultRow>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Returns the credit rows in display order.
    pub fn credits(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().filter(|row| row.kind == LineKind::Credit)
    }

    /// Returns the debit rows in display order.
    pub fn debits(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().filter(|row| row.kind == LineKind::Debit)
    }
}
