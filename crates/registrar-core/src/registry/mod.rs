//! Plugin-based registrar registry
//!
//! The registry lets registrar adapters be registered at runtime, so the
//! front end never hardcodes a vendor list.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registrar_core::{RegistrarConfig, RegistrarRegistry};
//!
//! let registry = RegistrarRegistry::new();
//! registrar_porkbun::register(&registry);
//!
//! let config = RegistrarConfig::porkbun("pk1_...", "sk1_...", None);
//! let registrar = registry.create_registrar(&config)?;
//! ```

use crate::config::RegistrarConfig;
use crate::error::{Error, Result};
use crate::traits::{Registrar, RegistrarFactory};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Registry for plugin-based registrar creation
///
/// Maps registrar type names to factory objects. Uses interior mutability
/// with RwLock, allowing concurrent reads and exclusive writes.
#[derive(Default)]
pub struct RegistrarRegistry {
    registrars: RwLock<HashMap<String, Box<dyn RegistrarFactory>>>,
}

impl RegistrarRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a registrar factory
    ///
    /// # Parameters
    ///
    /// - `name`: Registrar type name (e.g., "porkbun")
    /// - `factory`: Factory object for creating registrar instances
    pub fn register_registrar(&self, name: impl Into<String>, factory: Box<dyn RegistrarFactory>) {
        let name = name.into();
        tracing::debug!("Registering registrar factory: {}", name);
        let mut registrars = self
            .registrars
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        registrars.insert(name, factory);
    }

    /// Create a registrar from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn Registrar>)`: Created registrar instance
    /// - `Err(Error)`: If the type is not registered or creation fails
    pub fn create_registrar(&self, config: &RegistrarConfig) -> Result<Box<dyn Registrar>> {
        let registrar_type = config.type_name();
        let registrars = self
            .registrars
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let factory = registrars
            .get(registrar_type)
            .ok_or_else(|| Error::config(format!("Unknown registrar type: {}", registrar_type)))?;

        factory.create(config)
    }

    /// List all registered registrar types
    pub fn list_registrars(&self) -> Vec<String> {
        let registrars = self
            .registrars
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = registrars.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a registrar type is registered
    pub fn has_registrar(&self, name: &str) -> bool {
        let registrars = self
            .registrars
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        registrars.contains_key(name)
    }
}
