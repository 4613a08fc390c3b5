//! Configuration types for registrar adapters
//!
//! Configuration is plain data; adapters validate it once at construction.

use serde::{Deserialize, Serialize};

/// Default Porkbun API base URL
pub const PORKBUN_DEFAULT_API_URL: &str = "https://api.porkbun.com/api/json/v3";

/// Registrar configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistrarConfig {
    /// Porkbun API v3
    Porkbun {
        /// API key
        #[serde(rename = "apikey")]
        api_key: String,
        /// Secret API key
        #[serde(rename = "secretapikey")]
        secret_api_key: String,
        /// API base URL (defaults to [`PORKBUN_DEFAULT_API_URL`])
        #[serde(default)]
        api_url: Option<String>,
    },

    /// Custom registrar
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

// Keys stay out of Debug output
impl std::fmt::Debug for RegistrarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrarConfig::Porkbun { api_url, .. } => f
                .debug_struct("Porkbun")
                .field("api_key", &"<REDACTED>")
                .field("secret_api_key", &"<REDACTED>")
                .field("api_url", api_url)
                .finish(),
            RegistrarConfig::Custom { factory, config } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", config)
                .finish(),
        }
    }
}

impl RegistrarConfig {
    /// Create a Porkbun configuration
    pub fn porkbun(
        api_key: impl Into<String>,
        secret_api_key: impl Into<String>,
        api_url: Option<String>,
    ) -> Self {
        RegistrarConfig::Porkbun {
            api_key: api_key.into(),
            secret_api_key: secret_api_key.into(),
            api_url,
        }
    }

    /// Validate the registrar configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            RegistrarConfig::Porkbun {
                api_key,
                secret_api_key,
                ..
            } => {
                if api_key.trim().is_empty() {
                    return Err(not_configured("Porkbun", "API Key"));
                }
                if secret_api_key.trim().is_empty() {
                    return Err(not_configured("Porkbun", "Secret API Key"));
                }
                Ok(())
            }
            RegistrarConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom registrar factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom registrar config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the registrar type name
    pub fn type_name(&self) -> &str {
        match self {
            RegistrarConfig::Porkbun { .. } => "porkbun",
            RegistrarConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Configuration error for a registrar missing a required field
pub fn not_configured(registrar: &str, missing: &str) -> crate::Error {
    crate::Error::config(format!(
        "The \"{}\" domain registrar is not fully configured. Please configure the {}",
        registrar, missing
    ))
}
