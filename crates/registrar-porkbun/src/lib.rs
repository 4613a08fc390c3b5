// # Porkbun Registrar Adapter
//
// This crate maps the generic `Registrar` interface onto the Porkbun JSON
// API v3.
//
// ## Capabilities
//
// - ✅ Availability check (`domain/checkDomain`)
// - ✅ Registration at the TLD's minimum term (`domain/create`)
// - ✅ Nameserver update (`domain/updateNs`)
// - ✅ Domain details (`domain/listAll` + `domain/getNs`)
// - ✅ Credential check (`ping`)
// - ❌ Transfers, contacts, EPP codes, renewals, deletions, privacy and
//   lock toggles: not in the public API documentation. These fail with
//   `Error::Unsupported` before any request is made.
// - ❌ Premium domains: refused with a business-rule error
//
// ## Security Requirements
//
// - API keys NEVER appear in logs or error messages
// - Adapter MUST fail fast if either key is blank
//
// ## API Reference
//
// - Porkbun API v3: https://porkbun.com/api/json/v3/documentation

pub mod account;
pub mod client;
pub mod convert;
pub mod http;

use async_trait::async_trait;
use registrar_core::config::RegistrarConfig;
use registrar_core::traits::{HttpClient, Registrar, RegistrarFactory};
use registrar_core::{Capability, Error, RegistrableDomain, Result};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub use account::{AccountDomain, find_account_domain};
pub use client::{Credentials, Envelope, PROVIDER, PorkbunClient};
pub use http::ReqwestHttpClient;

use convert::{cost_in_pennies, lenient_string, normalize_domain, parse_timestamp, parse_years};

/// Availability part of a `checkDomain` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Availability {
    #[serde(default, deserialize_with = "lenient_string")]
    avail: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    premium: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    min_duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    price: Option<String>,
}

impl Availability {
    fn is_available(&self) -> bool {
        self.avail.as_deref() == Some("yes")
    }

    fn is_premium(&self) -> bool {
        self.premium.as_deref() == Some("yes")
    }

    /// Minimum registration term in years (1 when absent or unreadable)
    fn min_years(&self) -> u32 {
        self.min_duration.as_deref().and_then(parse_years).unwrap_or(1)
    }
}

/// Porkbun registrar adapter
///
/// Holds only credentials and a shared HTTP client. Safe to share across
/// tasks; each operation runs its own sequence of requests.
#[derive(Debug, Clone)]
pub struct PorkbunRegistrar {
    client: PorkbunClient,
}

impl PorkbunRegistrar {
    /// Create an adapter over the default reqwest transport
    ///
    /// # Errors
    ///
    /// Configuration error if either key is blank, the API URL is unusable,
    /// or the HTTP client cannot be built.
    pub fn new(api_key: &str, secret_api_key: &str, api_url: Option<&str>) -> Result<Self> {
        let credentials = Credentials::new(api_key, secret_api_key, api_url)?;
        Ok(Self::with_http_client(
            credentials,
            Arc::new(ReqwestHttpClient::new()?),
        ))
    }

    /// Create an adapter over an injected HTTP transport
    pub fn with_http_client(credentials: Credentials, http: Arc<dyn HttpClient>) -> Self {
        Self {
            client: PorkbunClient::new(credentials, http),
        }
    }

    /// The underlying API client
    pub fn client(&self) -> &PorkbunClient {
        &self.client
    }

    async fn check(&self, fqdn: &str) -> Result<Availability> {
        let mut envelope = self
            .client
            .post_for_domain("domain/checkDomain", fqdn, Envelope::new())
            .await?;

        match envelope.remove("response") {
            Some(response @ Value::Object(_)) => Ok(serde_json::from_value(response)?),
            _ => Ok(Availability::default()),
        }
    }
}

fn premium_refused() -> Error {
    Error::rejected("Premium domains are not supported by this adapter.")
}

fn unsupported(capability: Capability) -> Error {
    Error::unsupported(PROVIDER, capability)
}

#[async_trait]
impl Registrar for PorkbunRegistrar {
    async fn is_domain_available(&self, domain: &RegistrableDomain) -> Result<bool> {
        let fqdn = normalize_domain(&domain.name);
        let availability = self.check(&fqdn).await?;

        if availability.is_premium() {
            return Err(premium_refused());
        }

        Ok(availability.is_available())
    }

    async fn can_be_transferred(&self, _domain: &RegistrableDomain) -> Result<bool> {
        Err(unsupported(Capability::TransferAvailability))
    }

    async fn modify_ns(&self, domain: &RegistrableDomain) -> Result<()> {
        let fqdn = normalize_domain(&domain.name);
        let nameservers: Vec<&str> = domain
            .nameservers()
            .into_iter()
            .flatten()
            .filter(|ns| !ns.trim().is_empty())
            .collect();

        if nameservers.len() < 2 {
            return Err(Error::rejected("At least two name servers are required."));
        }

        let payload = Envelope::from_iter([("ns".to_string(), Value::from(nameservers.clone()))]);
        self.client
            .post_for_domain("domain/updateNs", &fqdn, payload)
            .await?;

        tracing::info!("Nameservers updated for {}: {}", fqdn, nameservers.join(", "));
        Ok(())
    }

    async fn modify_contact(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(unsupported(Capability::ContactUpdate))
    }

    async fn transfer_domain(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(unsupported(Capability::Transfer))
    }

    async fn domain_details(&self, domain: &mut RegistrableDomain) -> Result<()> {
        let fqdn = normalize_domain(&domain.name);
        let record = find_account_domain(&self.client, &fqdn)
            .await?
            .ok_or_else(|| {
                Error::rejected(format!(
                    "Domain \"{}\" was not found in the Porkbun account.",
                    fqdn
                ))
            })?;

        let envelope = self
            .client
            .post_for_domain("domain/getNs", &fqdn, Envelope::new())
            .await?;
        let nameservers: Vec<Option<String>> = match envelope.get("ns") {
            Some(Value::Array(list)) => list
                .iter()
                .map(|ns| ns.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        // Nothing is written until every request has succeeded
        if let Some(registered_at) = parse_timestamp(record.create_date.as_deref()) {
            domain.registered_at = Some(registered_at);
        }
        if let Some(expires_at) = parse_timestamp(record.expire_date.as_deref()) {
            domain.expires_at = Some(expires_at);
        }
        domain.locked = record.is_locked();
        domain.privacy_enabled = record.has_privacy();
        domain.set_nameservers(nameservers);

        Ok(())
    }

    async fn auth_code(&self, _domain: &RegistrableDomain) -> Result<String> {
        Err(unsupported(Capability::AuthCode))
    }

    async fn register_domain(&self, domain: &RegistrableDomain) -> Result<()> {
        let fqdn = normalize_domain(&domain.name);
        let availability = self.check(&fqdn).await?;

        if !availability.is_available() {
            return Err(Error::rejected(format!(
                "Domain \"{}\" is not available.",
                fqdn
            )));
        }

        if availability.is_premium() {
            return Err(premium_refused());
        }

        let min_years = availability.min_years();
        let requested_years = domain
            .registration_period
            .filter(|years| *years > 0)
            .unwrap_or(min_years);

        // The create endpoint only orders the minimum term
        if requested_years != min_years {
            return Err(Error::rejected(format!(
                "Porkbun API registers this TLD for {} year(s) minimum; requested {} year(s).",
                min_years, requested_years
            )));
        }

        let price = availability.price.as_deref().ok_or_else(|| {
            Error::rejected("Porkbun availability response did not include a price.")
        })?;

        let cost = cost_in_pennies(price, min_years).ok_or_else(|| {
            Error::rejected(format!(
                "Porkbun availability response included an unreadable price: {}",
                price
            ))
        })?;

        let payload = Envelope::from_iter([
            ("cost".to_string(), Value::from(cost)),
            ("agreeToTerms".to_string(), Value::from("yes")),
        ]);
        self.client
            .post_for_domain("domain/create", &fqdn, payload)
            .await?;

        tracing::info!(
            "Registered {} for {} year(s) at {} cents",
            fqdn,
            min_years,
            cost
        );
        Ok(())
    }

    async fn renew_domain(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(unsupported(Capability::Renewal))
    }

    async fn delete_domain(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(unsupported(Capability::Deletion))
    }

    async fn enable_privacy_protection(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(unsupported(Capability::EnablePrivacy))
    }

    async fn disable_privacy_protection(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(unsupported(Capability::DisablePrivacy))
    }

    async fn lock(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(unsupported(Capability::Lock))
    }

    async fn unlock(&self, _domain: &RegistrableDomain) -> Result<()> {
        Err(unsupported(Capability::Unlock))
    }

    async fn verify_credentials(&self) -> Result<()> {
        self.client.post("ping", Envelope::new()).await?;
        tracing::info!("Porkbun credentials accepted");
        Ok(())
    }

    fn registrar_name(&self) -> &'static str {
        "porkbun"
    }
}

/// Factory for creating Porkbun registrars
pub struct PorkbunFactory;

impl RegistrarFactory for PorkbunFactory {
    fn create(&self, config: &RegistrarConfig) -> Result<Box<dyn Registrar>> {
        match config {
            RegistrarConfig::Porkbun {
                api_key,
                secret_api_key,
                api_url,
            } => Ok(Box::new(PorkbunRegistrar::new(
                api_key,
                secret_api_key,
                api_url.as_deref(),
            )?)),
            _ => Err(Error::config("Invalid config for Porkbun registrar")),
        }
    }
}

/// Register the Porkbun adapter with a registry
///
/// # Example
///
/// ```rust
/// use registrar_core::RegistrarRegistry;
///
/// let registry = RegistrarRegistry::new();
/// registrar_porkbun::register(&registry);
/// assert!(registry.has_registrar("porkbun"));
/// ```
pub fn register(registry: &registrar_core::RegistrarRegistry) {
    registry.register_registrar("porkbun", Box::new(PorkbunFactory));
}
