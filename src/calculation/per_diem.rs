//! Travel per-diem (diárias) calculation.
//!
//! The daily rate depends on the role tier. Externally provided lodging,
//! meals and transport claw back a fixed share of the dailies (glosa), and
//! the meal and transportation allowances can be restituted pro rata for the
//! trip's days. The net is never negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PerDiemRates;
use crate::models::{AuditStep, BoardingSupplement, PerDiemInput, Position};

/// Clawback share when lodging is provided externally (55%).
pub const LODGING_CLAWBACK_RATE: Decimal = Decimal::from_parts(55, 0, 0, false, 2);

/// Clawback share when meals are provided externally (25%).
pub const MEALS_CLAWBACK_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Clawback share when transport is provided externally (20%).
pub const TRANSPORT_CLAWBACK_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Working days over which monthly allowances are restituted.
pub const ALLOWANCE_WORKING_DAYS: Decimal = Decimal::from_parts(22, 0, 0, false, 0);

/// Role tier selecting the daily rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerDiemTier {
    /// Holders of a commissioned (CJ) function.
    Commissioned,
    /// Analysts without a CJ function.
    Analyst,
    /// Technicians without a CJ function.
    Technician,
}

impl PerDiemTier {
    /// Selects the tier: a CJ function outranks the position.
    pub fn for_employee(position: Position, function_code: Option<&str>) -> Self {
        let commissioned = function_code
            .is_some_and(|code| code.to_ascii_lowercase().starts_with("cj"));

        match (commissioned, position) {
            (true, _) => PerDiemTier::Commissioned,
            (false, Position::Analyst) => PerDiemTier::Analyst,
            (false, Position::Technician) => PerDiemTier::Technician,
        }
    }

    /// Returns the daily rate of the tier.
    pub fn daily_rate(&self, rates: &PerDiemRates) -> Decimal {
        match self {
            PerDiemTier::Commissioned => rates.commissioned,
            PerDiemTier::Analyst => rates.analyst,
            PerDiemTier::Technician => rates.technician,
        }
    }
}

/// Monthly allowances that may be restituted during a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestitutableAllowances {
    /// Monthly meal allowance credited this month.
    pub meal_allowance: Decimal,
    /// Transportation allowance credited this month.
    pub transport_allowance: Decimal,
}

/// The result of the per-diem calculation.
#[derive(Debug, Clone)]
pub struct PerDiemResult {
    /// The selected tier.
    pub tier: PerDiemTier,
    /// The daily rate of the tier.
    pub daily_rate: Decimal,
    /// The boarding supplement paid.
    pub boarding: Decimal,
    /// Gross dailies: `quantity * rate + boarding`.
    pub gross: Decimal,
    /// Clawback for externally provided benefits.
    pub clawback: Decimal,
    /// Restitution of the meal and transportation allowances.
    pub restitution: Decimal,
    /// Net per-diems, floored at zero.
    pub net: Decimal,
    /// The debited discount: `gross - net`.
    pub discount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates travel per-diems.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::{calculate_per_diem, PerDiemTier, RestitutableAllowances};
/// use jmu_payroll::config::PerDiemRates;
/// use jmu_payroll::models::PerDiemInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rates = PerDiemRates {
///     commissioned: dec("1000"),
///     analyst: dec("800"),
///     technician: dec("600"),
///     boarding_supplement: dec("500"),
/// };
/// let input = PerDiemInput {
///     quantity: dec("2"),
///     external_lodging: true,
///     ..PerDiemInput::default()
/// };
///
/// let result = calculate_per_diem(
///     &input,
///     &rates,
///     PerDiemTier::Technician,
///     RestitutableAllowances::default(),
///     1,
/// );
/// assert_eq!(result.gross, dec("1200"));
/// // 55% of 1200
/// assert_eq!(result.discount, dec("660"));
/// assert_eq!(result.net, dec("540"));
/// ```
pub fn calculate_per_diem(
    input: &PerDiemInput,
    rates: &PerDiemRates,
    tier: PerDiemTier,
    allowances: RestitutableAllowances,
    step_number: u32,
) -> PerDiemResult {
    let daily_rate = tier.daily_rate(rates);
    let dailies = input.quantity * daily_rate;

    let boarding = match input.boarding {
        BoardingSupplement::None => Decimal::ZERO,
        BoardingSupplement::Half => rates.boarding_supplement / Decimal::TWO,
        BoardingSupplement::Full => rates.boarding_supplement,
    };
    let gross = dailies + boarding;

    let clawback_rate = [
        (input.external_lodging, LODGING_CLAWBACK_RATE),
        (input.external_meals, MEALS_CLAWBACK_RATE),
        (input.external_transport, TRANSPORT_CLAWBACK_RATE),
    ]
    .iter()
    .filter(|(flag, _)| *flag)
    .map(|(_, rate)| *rate)
    .sum::<Decimal>();
    let clawback = dailies * clawback_rate;

    let mut restitution = Decimal::ZERO;
    if input.restitute_meal_allowance {
        restitution += allowances.meal_allowance / ALLOWANCE_WORKING_DAYS * input.quantity;
    }
    if input.restitute_transport_allowance {
        restitution += allowances.transport_allowance / ALLOWANCE_WORKING_DAYS * input.quantity;
    }

    let net = (gross - clawback - restitution).max(Decimal::ZERO);
    let discount = gross - net;

    let audit_step = AuditStep {
        step_number,
        rule_id: "per_diem".to_string(),
        rule_name: "Travel Per-Diems".to_string(),
        legal_ref: "Lei 8.112/1990, art. 58".to_string(),
        input: serde_json::json!({
            "quantity": input.quantity.to_string(),
            "tier": tier,
            "boarding": input.boarding,
            "external_lodging": input.external_lodging,
            "external_meals": input.external_meals,
            "external_transport": input.external_transport
        }),
        output: serde_json::json!({
            "daily_rate": daily_rate.to_string(),
            "gross": gross.to_string(),
            "clawback": clawback.to_string(),
            "restitution": restitution.to_string(),
            "net": net.to_string()
        }),
        reasoning: format!(
            "{} x {} + {} boarding = {}; clawback {} and restitution {} leave {}",
            input.quantity, daily_rate, boarding, gross, clawback, restitution, net
        ),
    };

    PerDiemResult {
        tier,
        daily_rate,
        boarding,
        gross,
        clawback,
        restitution,
        net,
        discount,
        audit_step,
    }
}
