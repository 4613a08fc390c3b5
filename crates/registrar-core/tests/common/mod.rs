//! Test doubles for registrar-core contract tests

#![allow(dead_code)]

use anyhow::Context;
use registrar_core::config::RegistrarConfig;
use registrar_core::traits::{Registrar, RegistrarFactory};
use registrar_core::{Capability, Error, RegistrableDomain, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A registrar that supports nameserver updates and details only
pub struct MockRegistrar {
    /// Call counter for modify_ns()
    modify_ns_calls: Arc<AtomicUsize>,
}

impl MockRegistrar {
    pub fn new() -> Self {
        Self {
            modify_ns_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a MockRegistrar that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            modify_ns_calls: Arc::clone(&other.modify_ns_calls),
        }
    }

    /// Get the number of times modify_ns() was called
    pub fn modify_ns_calls(&self) -> usize {
        self.modify_ns_calls.load(Ordering::SeqCst)
    }
}

fn gap(capability: Capability) -> Error {
    Error::unsupported("Mock", capability)
}

#[async_trait::async_trait]
impl Registrar for MockRegistrar {
    async fn is_domain_available(&self, domain: &RegistrableDomain) -> Result<bool> {
        Ok(domain.name.starts_with("free-"))
    }

    async fn can_be_transferred(&self, _domain: &RegistrableDomain) -> Result<bool> {
        Err(gap(Capability::TransferAvailability))
    }

    async fn modify_ns(&self, _domain: &RegistrableDomain) -> Result<()> {
        self.modify_ns_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn modify_contact(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(gap(Capability::ContactUpdate))
    }

    async fn transfer_domain(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(gap(Capability::Transfer))
    }

    async fn domain_details(&self, domain: &mut RegistrableDomain) -> Result<()> {
        domain.locked = true;
        domain.set_nameservers(vec![Some("ns1.mock.test".to_string())]);
        Ok(())
    }

    async fn auth_code(&self, _domain: &RegistrableDomain) -> Result<String> {
        Err(gap(Capability::AuthCode))
    }

    async fn register_domain(&self, domain: &RegistrableDomain) -> Result<()> {
        Err(Error::rejected(format!("Domain \"{}\" is not available.", domain.name)))
    }

    async fn renew_domain(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(gap(Capability::Renewal))
    }

    async fn delete_domain(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(gap(Capability::Deletion))
    }

    async fn enable_privacy_protection(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(gap(Capability::EnablePrivacy))
    }

    async fn disable_privacy_protection(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(gap(Capability::DisablePrivacy))
    }

    async fn lock(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(gap(Capability::Lock))
    }

    async fn unlock(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(gap(Capability::Unlock))
    }

    async fn verify_credentials(&self) -> Result<()> {
        Ok(())
    }

    fn registrar_name(&self) -> &'static str {
        "mock"
    }
}

/// Factory handing out MockRegistrars that share one set of counters
pub struct MockRegistrarFactory {
    pub template: MockRegistrar,
}

impl RegistrarFactory for MockRegistrarFactory {
    fn create(&self, config: &RegistrarConfig) -> Result<Box<dyn Registrar>> {
        config.validate()?;
        mock_endpoint(config)?;
        Ok(Box::new(MockRegistrar::sharing_counters_with(&self.template)))
    }
}

/// Read the mock's settings with anyhow, as an out-of-tree adapter might
fn mock_endpoint(config: &RegistrarConfig) -> anyhow::Result<String> {
    match config {
        RegistrarConfig::Custom { config, .. } => config
            .get("endpoint")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .context("Mock registrar needs an \"endpoint\" setting"),
        _ => anyhow::bail!("Mock registrar needs a custom config"),
    }
}

/// Config selecting the mock factory
pub fn mock_config() -> RegistrarConfig {
    RegistrarConfig::Custom {
        factory: "mock".to_string(),
        config: serde_json::json!({ "endpoint": "memory" }),
    }
}
