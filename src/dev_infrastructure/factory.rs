//! Name-keyed factory registry
//!
//! Maps selector strings to creator closures so a structure (or anything else)
//! can be chosen at run time from a command-line flag or configuration value.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{ArboraError, Result};

/// Creator closure producing a fresh `T`
pub type Creator<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;

/// Thread-safe registry of named creators
pub struct FactoryRegistry<T> {
    creators: RwLock<HashMap<String, Creator<T>>>,
}

impl<T> Default for FactoryRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FactoryRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("creators", &self.list_creators().unwrap_or_default())
            .finish()
    }
}

impl<T> FactoryRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            creators: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Creator<T>>>> {
        self.creators
            .read()
            .map_err(|_| ArboraError::configuration("factory registry lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Creator<T>>>> {
        self.creators
            .write()
            .map_err(|_| ArboraError::configuration("factory registry lock poisoned"))
    }

    /// Register a creator under `name`; a name can only be taken once
    pub fn register<F>(&self, name: &str, creator: F) -> Result<()>
    where
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        let mut creators = self.write()?;
        if creators.contains_key(name) {
            return Err(ArboraError::configuration(format!(
                "creator '{}' already registered",
                name
            )));
        }
        creators.insert(name.to_string(), Box::new(creator));
        log::debug!("registered creator '{}'", name);
        Ok(())
    }

    /// Drop the creator under `name`, reporting whether one existed
    pub fn unregister(&self, name: &str) -> Result<bool> {
        Ok(self.write()?.remove(name).is_some())
    }

    /// Run the creator registered under `name`
    pub fn create(&self, name: &str) -> Result<T> {
        let creators = self.read()?;
        let creator = creators
            .get(name)
            .ok_or_else(|| ArboraError::unknown_structure(name))?;
        creator()
    }

    /// Registered names, sorted
    pub fn list_creators(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.read()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Number of registered creators
    pub fn creator_count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// True when `name` is registered
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_create() {
        let registry: FactoryRegistry<Vec<u8>> = FactoryRegistry::new();
        registry.register("empty", || Ok(Vec::new())).unwrap();
        registry.register("three", || Ok(vec![1, 2, 3])).unwrap();

        assert_eq!(registry.create("three").unwrap(), vec![1, 2, 3]);
        assert!(registry.create("empty").unwrap().is_empty());
        assert_eq!(registry.creator_count().unwrap(), 2);
        assert_eq!(registry.list_creators().unwrap(), vec!["empty", "three"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let registry: FactoryRegistry<u32> = FactoryRegistry::new();
        registry.register("one", || Ok(1)).unwrap();
        let err = registry.register("one", || Ok(2)).unwrap_err();
        assert_eq!(err.category(), "config");
        assert_eq!(registry.create("one").unwrap(), 1);
    }

    #[test]
    fn test_unknown_name() {
        let registry: FactoryRegistry<u32> = FactoryRegistry::new();
        let err = registry.create("splay").unwrap_err();
        assert!(matches!(err, ArboraError::UnknownStructure { ref name } if name == "splay"));
        assert!(!registry.contains("splay").unwrap());
    }

    #[test]
    fn test_unregister() {
        let registry: FactoryRegistry<u32> = FactoryRegistry::new();
        registry.register("x", || Ok(0)).unwrap();
        assert!(registry.unregister("x").unwrap());
        assert!(!registry.unregister("x").unwrap());
        assert_eq!(registry.creator_count().unwrap(), 0);
    }

    #[test]
    fn test_creator_errors_propagate() {
        let registry: FactoryRegistry<u32> = FactoryRegistry::new();
        registry
            .register("broken", || Err(ArboraError::invalid_data("no seed")))
            .unwrap();
        assert!(registry.create("broken").is_err());
    }
}
