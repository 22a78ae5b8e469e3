//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading court
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{BenefitsConfig, Configuration, CourtMetadata, SalaryConfig, TaxConfig};

/// Loads a court configuration from a directory of YAML files.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/jmu/
/// ├── court.yaml     # Scope, name and lookup policy
/// ├── salaries.yaml  # Salary table, function bonuses, reference base
/// ├── taxes.yaml     # Social-security tables and income tax deductions
/// └── benefits.yaml  # Benefit amounts per period and per-diem rates
/// ```
///
/// # Example
///
/// ```no_run
/// use jmu_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/jmu").unwrap();
/// println!("Loaded court: {}", loader.court().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: Configuration,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/jmu")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A social-security table violates the bracket invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CourtMetadata>(&path.join("court.yaml"))?;
        let salaries = Self::load_yaml::<SalaryConfig>(&path.join("salaries.yaml"))?;
        let taxes = Self::load_yaml::<TaxConfig>(&path.join("taxes.yaml"))?;
        let benefits = Self::load_yaml::<BenefitsConfig>(&path.join("benefits.yaml"))?;

        let config = Configuration::new(metadata, salaries, taxes, benefits)?;

        tracing::debug!(
            scope = %config.scope(),
            path = %path.display(),
            "Loaded court configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Consumes the loader and returns the configuration snapshot.
    pub fn into_config(self) -> Configuration {
        self.config
    }

    /// Returns the court metadata.
    pub fn court(&self) -> &CourtMetadata {
        self.config.court()
    }
}
