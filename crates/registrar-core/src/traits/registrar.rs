// # Registrar Trait
//
// Defines the generic capability set every registrar adapter exposes.
//
// ## Implementations
//
// - Porkbun: `registrar-porkbun` crate
//
// ## Usage
//
// ```rust,ignore
// use registrar_core::{Registrar, RegistrableDomain};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let registrar = /* Registrar implementation */;
//
//     let mut domain = RegistrableDomain::new("example.com");
//     if registrar.is_domain_available(&domain).await? {
//         registrar.register_domain(&domain).await?;
//     }
//
//     registrar.domain_details(&mut domain).await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::domain::RegistrableDomain;

/// Trait for registrar adapter implementations
///
/// One implementation per vendor. Adapters hold only read-only credentials
/// and a shared HTTP client, so a single instance may serve concurrent
/// callers without locking.
///
/// # Unsupported Operations
///
/// A vendor API may not expose every operation. Adapters must fail such
/// calls with [`crate::Error::Unsupported`] before any network request,
/// so callers can tell a capability gap from a transient failure.
///
/// # Retries
///
/// Adapters do not retry failed operations. The only permitted repeat is a
/// transport-level re-encoding of the same request when the vendor rejects
/// the first encoding outright.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Check whether a domain can be registered
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: Available at the standard price
    /// - `Ok(false)`: Taken
    /// - `Err(Error)`: Lookup failed, or the adapter refuses the domain
    ///   (e.g., premium pricing)
    async fn is_domain_available(&self, domain: &RegistrableDomain) -> crate::Result<bool>;

    /// Check whether a domain can be transferred in
    async fn can_be_transferred(&self, domain: &RegistrableDomain) -> crate::Result<bool>;

    /// Replace the domain's nameservers with the ones set on `domain`
    async fn modify_ns(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Push the contacts set on `domain` to the registrar
    async fn modify_contact(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Start an inbound transfer
    async fn transfer_domain(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Fill `domain` with the registrar's current view of it
    ///
    /// Writes registration/expiration times, lock and privacy flags, and
    /// nameserver slots 1-4. Fields the registrar does not report in a
    /// usable form are left untouched.
    async fn domain_details(&self, domain: &mut RegistrableDomain) -> crate::Result<()>;

    /// Retrieve the EPP/auth code
    async fn auth_code(&self, domain: &RegistrableDomain) -> crate::Result<String>;

    /// Register the domain for its requested period
    async fn register_domain(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Renew the domain
    async fn renew_domain(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Delete the domain
    async fn delete_domain(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Turn WHOIS privacy on
    async fn enable_privacy_protection(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Turn WHOIS privacy off
    async fn disable_privacy_protection(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Apply the registrar lock
    async fn lock(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Remove the registrar lock
    async fn unlock(&self, domain: &RegistrableDomain) -> crate::Result<()>;

    /// Confirm the configured credentials are accepted
    async fn verify_credentials(&self) -> crate::Result<()>;

    /// Get the registrar name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the registrar (e.g., "porkbun")
    fn registrar_name(&self) -> &'static str;
}

/// Helper trait for constructing registrars from configuration
pub trait RegistrarFactory: Send + Sync {
    /// Create a Registrar instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this registrar
    ///
    /// # Returns
    ///
    /// A boxed Registrar trait object
    fn create(
        &self,
        config: &crate::config::RegistrarConfig,
    ) -> crate::Result<Box<dyn Registrar>>;
}
