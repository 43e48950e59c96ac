//! Thread-safe configuration storage.
//!
//! The UI thread reads preferences on every command launch while the
//! onboarding wizard and preferences dialog mutate them; the store gives
//! both a single shared handle with interior mutability.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Shared config container bound to its backing file.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store from an already-loaded config and its file path.
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Load the config at `path` (or defaults if absent) into a store.
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let config = Config::load_from(&path)?;
        Ok(Self::new(config, path))
    }

    /// Get a clone of the current config. Cheap; Config is small.
    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Apply `mutate` to the config, validate, and persist the result.
    ///
    /// On validation or write failure the in-memory config keeps the
    /// mutated value only if it validated; otherwise the old value stays.
    pub fn update<F>(&self, mutate: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut Config),
    {
        let mut candidate = self.get();
        mutate(&mut candidate);
        candidate.validate()?;
        candidate.save_to(&self.path)?;
        *self.inner.write() = candidate;
        Ok(())
    }

    /// The backing config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
