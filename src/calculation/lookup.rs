//! Policy-aware lookups into the injected configuration.
//!
//! Missing tax tables, income tax deductions, benefit periods and function
//! codes are handled according to the configuration's [`LookupPolicy`]:
//! permissive lookups fall back to a numeric default and record a warning,
//! strict lookups abort with [`EngineError::ConfigurationIncomplete`].

use rust_decimal::Decimal;

use crate::config::{BenefitAmounts, Configuration, LookupPolicy, SocialSecurityTable};
use crate::error::{EngineError, EngineResult};
use crate::models::AuditWarning;

use super::adjustment::ResolvedTables;
use super::tax::DEFAULT_INCOME_TAX_DEDUCTION;

/// Resolves configuration entries and collects the warnings of permissive fallbacks.
#[derive(Debug)]
pub struct ConfigLookup<'a> {
    config: &'a Configuration,
    warnings: Vec<AuditWarning>,
}

impl<'a> ConfigLookup<'a> {
    /// Creates a lookup over a configuration snapshot.
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            warnings: Vec::new(),
        }
    }

    /// Returns the warnings recorded so far.
    pub fn warnings(&self) -> &[AuditWarning] {
        &self.warnings
    }

    /// Consumes the lookup and returns its warnings.
    pub fn into_warnings(self) -> Vec<AuditWarning> {
        self.warnings
    }

    /// Gets a social-security table; a missing table yields `None` (zero contribution).
    pub fn social_security_table(
        &mut self,
        version: &str,
    ) -> EngineResult<Option<&'a SocialSecurityTable>> {
        match self.config.social_security_table(version) {
            Some(table) => Ok(Some(table)),
            None => self.missing(
                format!("social_security_tables.{}", version),
                "MISSING_SOCIAL_SECURITY_TABLE",
                format!(
                    "Social-security table '{}' is not configured; contributions default to 0",
                    version
                ),
                None,
            ),
        }
    }

    /// Gets the income tax deduction; a missing version yields the 896.00 fallback.
    pub fn income_tax_deduction(&mut self, version: &str) -> EngineResult<Decimal> {
        match self.config.income_tax_deduction(version) {
            Some(deduction) => Ok(deduction),
            None => self.missing(
                format!("income_tax_deductions.{}", version),
                "MISSING_INCOME_TAX_DEDUCTION",
                format!(
                    "Income tax deduction '{}' is not configured; using {}",
                    version, DEFAULT_INCOME_TAX_DEDUCTION
                ),
                DEFAULT_INCOME_TAX_DEDUCTION,
            ),
        }
    }

    /// Gets the benefit amounts of a period; a missing period yields zero amounts.
    pub fn benefit_amounts(&mut self, period: u8) -> EngineResult<BenefitAmounts> {
        match self.config.benefit_amounts(period) {
            Some(amounts) => Ok(amounts.clone()),
            None => self.missing(
                format!("benefits.{}", period),
                "MISSING_BENEFIT_AMOUNTS",
                format!(
                    "No benefit amounts configured for period {}; allowances default to 0",
                    period
                ),
                BenefitAmounts {
                    meal_allowance: Decimal::ZERO,
                    preschool_quota: Decimal::ZERO,
                },
            ),
        }
    }

    /// Gets the adjusted bonus of a function code; an unknown code yields zero.
    pub fn function_bonus(&mut self, tables: &ResolvedTables, code: &str) -> EngineResult<Decimal> {
        match tables.function_bonus(code) {
            Some(value) => Ok(value),
            None => self.missing(
                format!("function_bonus_table.{}", code),
                "UNKNOWN_FUNCTION_CODE",
                format!("Function code '{}' is not configured; its bonus defaults to 0", code),
                Decimal::ZERO,
            ),
        }
    }

    fn missing<T>(
        &mut self,
        key: String,
        code: &str,
        message: String,
        fallback: T,
    ) -> EngineResult<T> {
        match self.config.lookup_policy() {
            LookupPolicy::Strict => Err(EngineError::ConfigurationIncomplete { key }),
            LookupPolicy::Permissive => {
                tracing::warn!(
                    scope = %self.config.scope(),
                    key = %key,
                    "Configuration entry missing, using default"
                );
                self.warnings.push(AuditWarning {
                    code: code.to_string(),
                    message,
                    severity: "medium".to_string(),
                });
                Ok(fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::adjustment::resolve_tables;
    use crate::config::types::fixtures::test_configuration;
    use crate::config::{CourtMetadata, SalaryConfig};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn strict_configuration() -> Configuration {
        let base = test_configuration();
        let metadata = CourtMetadata {
            scope: "strict".to_string(),
            name: "Strict Court".to_string(),
            lookup_policy: LookupPolicy::Strict,
        };
        let salaries = SalaryConfig {
            salary_table: base.salary_table().clone(),
            function_bonus_table: base.function_bonus_table().clone(),
            reference_base_amount: base.reference_base_amount(),
        };
        let mut taxes = crate::config::TaxConfig {
            social_security_tables: Default::default(),
            income_tax_deductions: Default::default(),
            dependent_deduction: base.dependent_deduction(),
        };
        taxes
            .income_tax_deductions
            .insert("2025".to_string(), dec("908.73"));
        let benefits = crate::config::BenefitsConfig {
            benefits: Default::default(),
            per_diem: base.per_diem_rates().clone(),
        };
        Configuration::new(metadata, salaries, taxes, benefits).unwrap()
    }

    #[test]
    fn test_present_entries_resolve_without_warnings() {
        let config = test_configuration();
        let mut lookup = ConfigLookup::new(&config);

        assert!(lookup.social_security_table("2025").unwrap().is_some());
        assert_eq!(lookup.income_tax_deduction("2025").unwrap(), dec("908.73"));
        assert_eq!(lookup.benefit_amounts(1).unwrap().meal_allowance, dec("1800.00"));
        assert!(lookup.warnings().is_empty());
    }

    #[test]
    fn test_permissive_missing_table_falls_back_with_warning() {
        let config = test_configuration();
        let mut lookup = ConfigLookup::new(&config);

        assert!(lookup.social_security_table("1999").unwrap().is_none());
        assert_eq!(
            lookup.income_tax_deduction("1999").unwrap(),
            DEFAULT_INCOME_TAX_DEDUCTION
        );

        let warnings = lookup.into_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].code, "MISSING_SOCIAL_SECURITY_TABLE");
        assert_eq!(warnings[1].code, "MISSING_INCOME_TAX_DEDUCTION");
    }

    #[test]
    fn test_permissive_unknown_function_is_zero() {
        let config = test_configuration();
        let tables = resolve_tables(0, &config, 1).tables;
        let mut lookup = ConfigLookup::new(&config);

        assert_eq!(lookup.function_bonus(&tables, "FC3").unwrap(), dec("2000.00"));
        assert_eq!(lookup.function_bonus(&tables, "fc9").unwrap(), Decimal::ZERO);
        assert_eq!(lookup.warnings()[0].code, "UNKNOWN_FUNCTION_CODE");
    }

    #[test]
    fn test_strict_missing_table_is_incomplete() {
        let config = strict_configuration();
        let mut lookup = ConfigLookup::new(&config);

        match lookup.social_security_table("2025") {
            Err(EngineError::ConfigurationIncomplete { key }) => {
                assert_eq!(key, "social_security_tables.2025");
            }
            other => panic!("Expected ConfigurationIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_missing_benefits_is_incomplete() {
        let config = strict_configuration();
        let mut lookup = ConfigLookup::new(&config);

        assert!(matches!(
            lookup.benefit_amounts(0),
            Err(EngineError::ConfigurationIncomplete { .. })
        ));
        assert_eq!(lookup.income_tax_deduction("2025").unwrap(), dec("908.73"));
    }
}
