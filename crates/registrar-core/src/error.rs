//! Error types for registrar adapters
//!
//! Every adapter failure maps onto one of these variants. Callers that only
//! need a message can rely on `Display`; callers that must tell a capability
//! gap apart from a transient failure can match on [`Error::Unsupported`].

use std::fmt;
use thiserror::Error;

/// Result type alias for registrar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for registrar adapters
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration (raised at construction, never retried)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-200 HTTP status after the transport fallback
    #[error("{provider} API HTTP {status} on {endpoint}: {message}")]
    Http {
        /// Provider display name
        provider: String,
        /// HTTP status code of the final attempt
        status: u16,
        /// Endpoint path, relative to the API base
        endpoint: String,
        /// Vendor message, or a placeholder
        message: String,
    },

    /// Connection failure, timeout, or any other network-level problem
    #[error("{provider} request failed: {message}")]
    Network {
        /// Provider display name
        provider: String,
        /// Underlying error text
        message: String,
    },

    /// Response body was not a JSON object
    #[error("{provider} API returned an invalid JSON response.")]
    InvalidResponse {
        /// Provider display name
        provider: String,
    },

    /// Well-formed response whose status is not SUCCESS
    #[error("{provider} API error: {message}")]
    Api {
        /// Provider display name
        provider: String,
        /// Vendor message, verbatim
        message: String,
    },

    /// Business-rule violation (availability, premium, duration, price,
    /// nameserver count, account lookup)
    #[error("{0}")]
    Rejected(String),

    /// Operation the vendor API does not expose
    #[error("{provider} API does not expose {capability} in the public documentation.")]
    Unsupported {
        /// Provider display name
        provider: String,
        /// The missing capability
        capability: Capability,
    },

    /// JSON decoding errors for typed sub-records
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP status error
    pub fn http(
        provider: impl Into<String>,
        status: u16,
        endpoint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Http {
            provider: provider.into(),
            status,
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-response (protocol) error
    pub fn invalid_response(provider: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
        }
    }

    /// Create an API-level error
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a business-rule error
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Create a capability-gap error
    pub fn unsupported(provider: impl Into<String>, capability: Capability) -> Self {
        Self::Unsupported {
            provider: provider.into(),
            capability,
        }
    }

    /// Whether this error reports a capability the vendor does not offer
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// The missing capability, for [`Error::Unsupported`]
    pub fn capability(&self) -> Option<Capability> {
        match self {
            Self::Unsupported { capability, .. } => Some(*capability),
            _ => None,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Registrar capabilities that an adapter may decline to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Checking whether a domain can be transferred in
    TransferAvailability,
    /// Updating registrant/admin/tech contacts
    ContactUpdate,
    /// Transferring a domain in
    Transfer,
    /// Retrieving the EPP/auth code
    AuthCode,
    /// Renewing a domain on demand
    Renewal,
    /// Deleting a domain
    Deletion,
    /// Turning WHOIS privacy on
    EnablePrivacy,
    /// Turning WHOIS privacy off
    DisablePrivacy,
    /// Applying the registrar lock
    Lock,
    /// Removing the registrar lock
    Unlock,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TransferAvailability => "transfer availability checks",
            Self::ContactUpdate => "contact updates",
            Self::Transfer => "domain transfers",
            Self::AuthCode => "EPP/auth code retrieval",
            Self::Renewal => "manual renewals",
            Self::Deletion => "domain deletions",
            Self::EnablePrivacy => "enabling privacy protection",
            Self::DisablePrivacy => "disabling privacy protection",
            Self::Lock => "domain locking",
            Self::Unlock => "domain unlocking",
        };
        f.write_str(name)
    }
}
