//! Progressive tax calculators.
//!
//! This module implements the social-security (PSS) bracket accumulation,
//! the single-rate income tax with flat deduction, the five-bracket schedule
//! used for previous-exercise income, and the supplementary fund
//! contribution on pay above the contribution ceiling.
//!
//! ## Schedules
//!
//! - **PSS:** marginal brackets; each bracket contributes
//!   `(min(base, max) - min) * rate` when `base > min`.
//! - **Income tax:** `base * 27.5% - deduction`, never negative.
//! - **Previous exercise:** fixed thresholds with subtraction constants.

use rust_decimal::Decimal;

use crate::config::SocialSecurityTable;
use crate::models::{FundElection, PensionRegime};

/// The top income tax rate (27.5%).
pub const INCOME_TAX_RATE: Decimal = Decimal::from_parts(275, 0, 0, false, 3);

/// Deduction used when the selected income tax table is not configured.
pub const DEFAULT_INCOME_TAX_DEDUCTION: Decimal = Decimal::from_parts(89600, 0, 0, false, 2);

/// One row of the previous-exercise schedule: (upper threshold, rate, subtraction).
type ProgressiveRow = (Decimal, Decimal, Decimal);

const PROGRESSIVE_SCHEDULE: [ProgressiveRow; 4] = [
    (
        Decimal::from_parts(225920, 0, 0, false, 2),
        Decimal::ZERO,
        Decimal::ZERO,
    ),
    (
        Decimal::from_parts(282665, 0, 0, false, 2),
        Decimal::from_parts(75, 0, 0, false, 3),
        Decimal::from_parts(16944, 0, 0, false, 2),
    ),
    (
        Decimal::from_parts(375105, 0, 0, false, 2),
        Decimal::from_parts(150, 0, 0, false, 3),
        Decimal::from_parts(38144, 0, 0, false, 2),
    ),
    (
        Decimal::from_parts(466468, 0, 0, false, 2),
        Decimal::from_parts(225, 0, 0, false, 3),
        Decimal::from_parts(66277, 0, 0, false, 2),
    ),
];

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Calculates the social-security contribution by marginal bracket accumulation.
///
/// Returns zero when no table is available.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::social_security_contribution;
/// use jmu_payroll::config::{SocialSecurityTable, TaxBracket};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let table = SocialSecurityTable {
///     contribution_ceiling: dec("3000"),
///     brackets: vec![
///         TaxBracket { min: dec("0"), max: Some(dec("1000")), rate: dec("0.10") },
///         TaxBracket { min: dec("1000"), max: None, rate: dec("0.20") },
///     ],
/// };
///
/// // 1000 * 10% + 500 * 20%
/// assert_eq!(social_security_contribution(dec("1500"), Some(&table)), dec("200"));
/// assert_eq!(social_security_contribution(dec("1500"), None), Decimal::ZERO);
/// ```
pub fn social_security_contribution(base: Decimal, table: Option<&SocialSecurityTable>) -> Decimal {
    let Some(table) = table else {
        return Decimal::ZERO;
    };

    table
        .brackets
        .iter()
        .filter(|bracket| base > bracket.min)
        .map(|bracket| {
            let upper = bracket.max.map_or(base, |max| base.min(max));
            (upper - bracket.min) * bracket.rate
        })
        .sum()
}

/// Calculates the single-rate income tax: `base * 27.5% - deduction`, floored at zero.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::{income_tax, DEFAULT_INCOME_TAX_DEDUCTION};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tax = income_tax(Decimal::from_str("10000").unwrap(), DEFAULT_INCOME_TAX_DEDUCTION);
/// assert_eq!(tax, Decimal::from_str("1854.00").unwrap());
///
/// let tax = income_tax(Decimal::from_str("1000").unwrap(), DEFAULT_INCOME_TAX_DEDUCTION);
/// assert_eq!(tax, Decimal::ZERO);
/// ```
pub fn income_tax(base: Decimal, deduction: Decimal) -> Decimal {
    (base * INCOME_TAX_RATE - deduction).max(Decimal::ZERO)
}

/// Calculates income tax on previous-exercise income with the five-bracket schedule.
///
/// | Base up to | Rate  | Subtract |
/// |-----------:|------:|---------:|
/// | 2,259.20   | 0     | 0        |
/// | 2,826.65   | 7.5%  | 169.44   |
/// | 3,751.05   | 15%   | 381.44   |
/// | 4,664.68   | 22.5% | 662.77   |
/// | above      | 27.5% | 896.00   |
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::income_tax_progressive;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(income_tax_progressive(dec("2259.20")), Decimal::ZERO);
/// assert_eq!(income_tax_progressive(dec("2826.65")), dec("42.55875"));
/// ```
pub fn income_tax_progressive(base: Decimal) -> Decimal {
    let (rate, subtraction) = PROGRESSIVE_SCHEDULE
        .iter()
        .find(|(threshold, _, _)| base <= *threshold)
        .map(|(_, rate, subtraction)| (*rate, *subtraction))
        .unwrap_or((INCOME_TAX_RATE, DEFAULT_INCOME_TAX_DEDUCTION));

    (base * rate - subtraction).max(Decimal::ZERO)
}

/// Calculates the supplementary fund contribution on the excess over the ceiling.
///
/// `excess * mandatory_rate + excess * voluntary_percent / 100`.
pub fn fund_contribution(excess: Decimal, fund: Option<&FundElection>) -> Decimal {
    match fund {
        Some(fund) if excess > Decimal::ZERO => {
            excess * fund.mandatory_rate + excess * fund.voluntary_percent / HUNDRED
        }
        _ => Decimal::ZERO,
    }
}

/// The tax settings resolved once per calculation.
///
/// Bundles the selected social-security table, the income tax deduction,
/// the dependents deduction and the pension elections so that every
/// calculator estimates contributions the same way.
#[derive(Debug, Clone, Copy)]
pub struct TaxContext<'a> {
    /// The selected social-security table, if configured.
    pub table: Option<&'a SocialSecurityTable>,
    /// The pension regime.
    pub regime: PensionRegime,
    /// Supplementary fund participation.
    pub fund: Option<FundElection>,
    /// Flat deduction of the single-rate income tax.
    pub income_tax_deduction: Decimal,
    /// Deduction per dependent.
    pub dependent_deduction: Decimal,
    /// Number of dependents.
    pub dependents: u32,
}

impl TaxContext<'_> {
    /// Returns the ceiling when the regime caps the contribution base.
    pub fn ceiling(&self) -> Option<Decimal> {
        match self.regime {
            PensionRegime::Capped => self.table.map(|table| table.contribution_ceiling),
            PensionRegime::Full => None,
        }
    }

    /// Clamps a raw contribution base to the ceiling when one applies.
    pub fn capped_base(&self, raw_base: Decimal) -> Decimal {
        match self.ceiling() {
            Some(ceiling) => raw_base.min(ceiling),
            None => raw_base,
        }
    }

    /// Returns the part of a raw base above the ceiling.
    pub fn excess_over_ceiling(&self, raw_base: Decimal) -> Decimal {
        match self.ceiling() {
            Some(ceiling) if raw_base > ceiling => raw_base - ceiling,
            _ => Decimal::ZERO,
        }
    }

    /// Contribution on a raw base after applying the ceiling.
    pub fn contribution_on(&self, raw_base: Decimal) -> Decimal {
        social_security_contribution(self.capped_base(raw_base), self.table)
    }

    /// Fund contribution on the excess of a raw base over the ceiling.
    pub fn fund_on(&self, raw_base: Decimal) -> Decimal {
        fund_contribution(self.excess_over_ceiling(raw_base), self.fund.as_ref())
    }

    /// Total deduction for declared dependents.
    pub fn dependents_deduction(&self) -> Decimal {
        self.dependent_deduction * Decimal::from(self.dependents)
    }

    /// Single-rate income tax with the resolved deduction.
    pub fn income_tax(&self, base: Decimal) -> Decimal {
        income_tax(base, self.income_tax_deduction)
    }
}
