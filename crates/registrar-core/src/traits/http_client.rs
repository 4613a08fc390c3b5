// # HTTP Client Trait
//
// The injected transport collaborator. Adapters build requests and interpret
// responses; the client only moves bytes.
//
// ## Implementations
//
// - reqwest: `registrar_porkbun::ReqwestHttpClient`
// - Tests: scripted in-memory clients under each crate's `tests/common`

use async_trait::async_trait;
use std::time::Duration;

/// Body of an outgoing POST request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON-encoded body (`Content-Type: application/json`)
    Json(serde_json::Value),
    /// Form-urlencoded body, as already-flattened key/value pairs
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Whether this body is form-urlencoded
    pub fn is_form(&self) -> bool {
        matches!(self, Self::Form(_))
    }
}

/// An outgoing POST request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Fully-qualified URL
    pub url: String,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Timeout for this attempt
    pub timeout: Duration,
    /// Request body
    pub body: RequestBody,
}

impl HttpRequest {
    /// Look up a header value (case-insensitive name)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response: status code and undecoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Network-level failure (connection refused, timeout, TLS, ...)
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct HttpError(pub String);

/// Trait for HTTP transport implementations
///
/// Implementations must be reentrant: adapters share one client across
/// concurrent operations and never lock around it.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST and return the status and raw body
    ///
    /// Non-2xx statuses are NOT errors at this layer; only failures that
    /// prevent a response from being received are.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}
