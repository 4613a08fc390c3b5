//! reqwest-backed HTTP transport

use async_trait::async_trait;
use registrar_core::traits::{HttpClient, HttpError, HttpRequest, HttpResponse, RequestBody};
use registrar_core::{Error, Result};

/// [`HttpClient`] over a shared `reqwest::Client`
///
/// The per-request timeout comes from [`HttpRequest::timeout`]; the
/// underlying client is cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a transport with a default `reqwest::Client`
    ///
    /// # Errors
    ///
    /// Configuration error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client` (proxies, custom TLS, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post(&self, request: HttpRequest) -> std::result::Result<HttpResponse, HttpError> {
        let mut builder = self.client.post(&request.url).timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Form(pairs) => builder.form(pairs),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| HttpError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
