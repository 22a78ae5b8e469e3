//! Jurisdiction-scoped configuration snapshots.
//!
//! A [`ConfigStore`] holds one immutable [`Configuration`] per scope key.
//! Snapshots are shared through `Arc` so concurrent calculations can read
//! them without locking; reloading a scope replaces the snapshot wholesale.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{EngineError, EngineResult};

use super::loader::ConfigLoader;
use super::types::Configuration;

/// Holds configuration snapshots keyed by jurisdiction scope.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    snapshots: HashMap<String, Arc<Configuration>>,
}

impl ConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every scope directory found under `root`.
    ///
    /// Each subdirectory is loaded with [`ConfigLoader::load`] and stored
    /// under the scope declared in its `court.yaml`.
    pub fn load_dir<P: AsRef<Path>>(root: P) -> EngineResult<Self> {
        let root = root.as_ref();
        let root_str = root.display().to_string();

        let entries = fs::read_dir(root).map_err(|_| EngineError::ConfigNotFound {
            path: root_str.clone(),
        })?;

        let mut store = Self::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: root_str.clone(),
            })?;
            let path = entry.path();
            if path.is_dir() {
                let loader = ConfigLoader::load(&path)?;
                store.insert(loader.into_config());
            }
        }

        if store.snapshots.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no scope directories found)", root_str),
            });
        }

        Ok(store)
    }

    /// Inserts or replaces the snapshot for the configuration's scope,
    /// returning the previous snapshot if there was one.
    pub fn insert(&mut self, config: Configuration) -> Option<Arc<Configuration>> {
        let scope = config.scope().to_string();
        tracing::info!(scope = %scope, "Installing configuration snapshot");
        self.snapshots.insert(scope, Arc::new(config))
    }

    /// Gets the snapshot for a scope, if one is installed.
    pub fn get(&self, scope: &str) -> Option<Arc<Configuration>> {
        self.snapshots.get(scope).cloned()
    }

    /// Gets the snapshot for a scope or fails with `ConfigurationRequired`.
    pub fn require(&self, scope: &str) -> EngineResult<Arc<Configuration>> {
        self.get(scope)
            .ok_or_else(|| EngineError::ConfigurationRequired {
                scope: scope.to_string(),
            })
    }

    /// Returns the installed scope keys in sorted order.
    pub fn scopes(&self) -> Vec<&str> {
        let mut scopes: Vec<&str> = self.snapshots.keys().map(String::as_str).collect();
        scopes.sort_unstable();
        scopes
    }
}
