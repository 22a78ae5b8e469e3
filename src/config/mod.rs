//! Configuration loading and management for the payroll simulation engine.
//!
//! This module provides functionality to load court configurations from YAML
//! files, including salary tables, function bonuses, tax schedules and
//! benefit amounts, and to keep one immutable snapshot per jurisdiction.
//!
//! # Example
//!
//! ```no_run
//! use jmu_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/jmu").unwrap();
//! println!("Loaded court: {}", config.court().name);
//! ```

mod loader;
mod store;
pub(crate) mod types;

pub use loader::ConfigLoader;
pub use store::ConfigStore;
pub use types::{
    BenefitAmounts, BenefitsConfig, Configuration, CourtMetadata, LookupPolicy, PerDiemRates,
    SalaryConfig, SocialSecurityTable, TaxBracket, TaxConfig,
};
