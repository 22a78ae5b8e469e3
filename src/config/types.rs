//! Configuration types for payroll simulation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the assembled
//! [`Configuration`] snapshot injected into every calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{EngineError, EngineResult};
use crate::models::Position;

/// How lookups into externally supplied tables behave when an entry is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Missing entries fall back to numeric defaults and raise an audit warning.
    #[default]
    Permissive,
    /// Missing entries abort the calculation with `ConfigurationIncomplete`.
    Strict,
}

/// Metadata about the court whose tables are configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtMetadata {
    /// The jurisdiction scope key (e.g., "jmu").
    pub scope: String,
    /// The human-readable name of the court.
    pub name: String,
    /// The lookup policy for missing configuration entries.
    #[serde(default)]
    pub lookup_policy: LookupPolicy,
}

/// Salary bases and function-bonus tables from salaries.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryConfig {
    /// Map of position to step code to base monthly salary.
    pub salary_table: HashMap<Position, BTreeMap<String, Decimal>>,
    /// Map of function code (e.g., "fc3", "cj1") to bonus amount.
    pub function_bonus_table: BTreeMap<String, Decimal>,
    /// Anchor salary from which the reference unit is derived.
    pub reference_base_amount: Decimal,
}

/// A single marginal bracket of the social-security schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (exclusive for accrual purposes).
    pub min: Decimal,
    /// Upper bound of the bracket; `None` means unbounded.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Marginal rate applied inside the bracket (e.g., 0.14).
    pub rate: Decimal,
}

/// A versioned social-security contribution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityTable {
    /// The contribution ceiling applied under the capped pension regime.
    pub contribution_ceiling: Decimal,
    /// Brackets sorted ascending by `min`.
    pub brackets: Vec<TaxBracket>,
}

impl SocialSecurityTable {
    /// Checks the bracket invariants: ascending, non-overlapping, with only
    /// the last bracket unbounded.
    pub fn validate(&self, version: &str) -> EngineResult<()> {
        let table = format!("social_security_tables.{}", version);
        let invalid = |message: String| EngineError::InvalidConfiguration {
            table: table.clone(),
            message,
        };

        if self.brackets.is_empty() {
            return Err(invalid("no brackets defined".to_string()));
        }

        let last = self.brackets.len() - 1;
        let mut previous_max = Decimal::ZERO;
        for (i, bracket) in self.brackets.iter().enumerate() {
            if bracket.min < previous_max {
                return Err(invalid(format!(
                    "bracket {} starts at {} which overlaps the previous bracket ending at {}",
                    i, bracket.min, previous_max
                )));
            }
            match bracket.max {
                Some(max) if max <= bracket.min => {
                    return Err(invalid(format!(
                        "bracket {} has max {} not above min {}",
                        i, max, bracket.min
                    )));
                }
                Some(max) => previous_max = max,
                None if i != last => {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but is not the last bracket",
                        i
                    )));
                }
                None => {}
            }
        }

        if self.brackets[last].max.is_some() {
            return Err(invalid("last bracket must be unbounded".to_string()));
        }

        Ok(())
    }
}

/// Tax schedules from taxes.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Social-security tables keyed by version (e.g., "2025").
    pub social_security_tables: BTreeMap<String, SocialSecurityTable>,
    /// Flat deductions of the single-rate income tax, keyed by version.
    pub income_tax_deductions: BTreeMap<String, Decimal>,
    /// Flat deduction per declared dependent.
    pub dependent_deduction: Decimal,
}

/// Benefit amounts for one adjustment period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitAmounts {
    /// Monthly meal allowance.
    pub meal_allowance: Decimal,
    /// Pre-school allowance per eligible dependent.
    pub preschool_quota: Decimal,
}

/// Daily travel rates by role tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerDiemRates {
    /// Daily rate for holders of a commissioned (CJ) function.
    pub commissioned: Decimal,
    /// Daily rate for analysts.
    pub analyst: Decimal,
    /// Daily rate for technicians.
    pub technician: Decimal,
    /// Full boarding supplement; the half option pays 50% of it.
    pub boarding_supplement: Decimal,
}

/// Benefits configuration from benefits.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitsConfig {
    /// Benefit amounts keyed by adjustment period index.
    pub benefits: BTreeMap<u8, BenefitAmounts>,
    /// Travel per-diem rates.
    pub per_diem: PerDiemRates,
}

/// The complete court configuration loaded from YAML files.
///
/// A `Configuration` is an immutable snapshot: it is built once, shared
/// between calculations and never mutated in place.
#[derive(Debug, Clone)]
pub struct Configuration {
    metadata: CourtMetadata,
    salaries: SalaryConfig,
    taxes: TaxConfig,
    benefits: BenefitsConfig,
}

impl Configuration {
    /// Creates a new Configuration from its component parts, validating
    /// every social-security table.
    pub fn new(
        metadata: CourtMetadata,
        salaries: SalaryConfig,
        taxes: TaxConfig,
        benefits: BenefitsConfig,
    ) -> EngineResult<Self> {
        for (version, table) in &taxes.social_security_tables {
            table.validate(version)?;
        }
        Ok(Self {
            metadata,
            salaries,
            taxes,
            benefits,
        })
    }

    /// Returns the court metadata.
    pub fn court(&self) -> &CourtMetadata {
        &self.metadata
    }

    /// Returns the jurisdiction scope key.
    pub fn scope(&self) -> &str {
        &self.metadata.scope
    }

    /// Returns the lookup policy for missing entries.
    pub fn lookup_policy(&self) -> LookupPolicy {
        self.metadata.lookup_policy
    }

    /// Returns the unadjusted salary table.
    pub fn salary_table(&self) -> &HashMap<Position, BTreeMap<String, Decimal>> {
        &self.salaries.salary_table
    }

    /// Returns the unadjusted function-bonus table.
    pub fn function_bonus_table(&self) -> &BTreeMap<String, Decimal> {
        &self.salaries.function_bonus_table
    }

    /// Returns the anchor salary for the reference unit.
    pub fn reference_base_amount(&self) -> Decimal {
        self.salaries.reference_base_amount
    }

    /// Gets a social-security table by version.
    pub fn social_security_table(&self, version: &str) -> Option<&SocialSecurityTable> {
        self.taxes.social_security_tables.get(version)
    }

    /// Gets the single-rate income tax deduction for a version.
    pub fn income_tax_deduction(&self, version: &str) -> Option<Decimal> {
        self.taxes.income_tax_deductions.get(version).copied()
    }

    /// Returns the per-dependent deduction.
    pub fn dependent_deduction(&self) -> Decimal {
        self.taxes.dependent_deduction
    }

    /// Gets the benefit amounts for an adjustment period.
    ///
    /// Falls back to the closest earlier period when the exact period is
    /// not configured.
    pub fn benefit_amounts(&self, period: u8) -> Option<&BenefitAmounts> {
        self.benefits
            .benefits
            .range(..=period)
            .next_back()
            .map(|(_, amounts)| amounts)
    }

    /// Returns the travel per-diem rates.
    pub fn per_diem_rates(&self) -> &PerDiemRates {
        &self.benefits.per_diem
    }
}
