//! Porkbun API transport
//!
//! Every Porkbun endpoint is a POST whose body carries `apikey` and
//! `secretapikey`. Some deployments reject JSON bodies with HTTP 400, so a
//! 400 on the JSON attempt is retried once as form-urlencoded.
//!
//! Response envelope: a JSON object whose `status` must be `SUCCESS`
//! (any case). Errors carry a `message`.

use registrar_core::config::{PORKBUN_DEFAULT_API_URL, not_configured};
use registrar_core::traits::{HttpClient, HttpRequest, HttpResponse, RequestBody};
use registrar_core::{Error, Result};
use reqwest::Url;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::convert::scalar_text;

/// Provider display name used in error messages
pub const PROVIDER: &str = "Porkbun";

/// Timeout for each HTTP attempt
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const API_KEY_FIELD: &str = "apikey";
const SECRET_API_KEY_FIELD: &str = "secretapikey";
const MASK: &str = "***";

/// JSON object sent to or received from the API
pub type Envelope = Map<String, Value>;

/// Porkbun API credentials and base URL
///
/// Immutable after construction. Debug output never shows either key.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    secret_api_key: String,
    api_url: String,
    base_url: Url,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<REDACTED>")
            .field("secret_api_key", &"<REDACTED>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Credentials {
    /// Validate and normalise credentials
    ///
    /// Both keys are trimmed and must be non-blank. A blank `api_url` falls
    /// back to the public endpoint; trailing slashes are stripped. The URL
    /// must be absolute and able to carry path segments.
    pub fn new(api_key: &str, secret_api_key: &str, api_url: Option<&str>) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(not_configured(PROVIDER, "API Key"));
        }

        let secret_api_key = secret_api_key.trim();
        if secret_api_key.is_empty() {
            return Err(not_configured(PROVIDER, "Secret API Key"));
        }

        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(PORKBUN_DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let base_url = Url::parse(&api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| Error::config(format!("Invalid {} API URL: {}", PROVIDER, api_url)))?;

        Ok(Self {
            api_key: api_key.to_string(),
            secret_api_key: secret_api_key.to_string(),
            api_url,
            base_url,
        })
    }

    /// API base URL, without trailing slash
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Porkbun API client
///
/// Stateless apart from its credentials. One logical call makes at most
/// two HTTP attempts (JSON, then form-urlencoded on HTTP 400).
#[derive(Clone)]
pub struct PorkbunClient {
    credentials: Credentials,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PorkbunClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PorkbunClient")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl PorkbunClient {
    /// Create a client over an injected HTTP transport
    pub fn new(credentials: Credentials, http: Arc<dyn HttpClient>) -> Self {
        Self { credentials, http }
    }

    /// The client's credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fully-qualified URL for an endpoint path
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        self.url_with_segments(endpoint.split('/'))
    }

    /// Fully-qualified URL for a per-domain endpoint such as `domain/getNs`
    ///
    /// The domain is appended as a single escaped path segment.
    pub fn domain_endpoint_url(&self, action: &str, fqdn: &str) -> String {
        self.url_with_segments(action.split('/').chain(std::iter::once(fqdn)))
    }

    fn url_with_segments<'a>(&self, segments: impl Iterator<Item = &'a str>) -> String {
        let mut url = self.credentials.base_url.clone();
        // Credentials only accept URLs that can carry a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(segments.filter(|segment| !segment.is_empty()));
        }
        url.into()
    }

    /// Request body: both credential fields plus `payload`
    ///
    /// Payload fields extend the body but never replace a credential.
    pub fn request_body(&self, payload: Envelope) -> Envelope {
        let mut body = Envelope::new();
        body.insert(
            SECRET_API_KEY_FIELD.to_string(),
            Value::String(self.credentials.secret_api_key.clone()),
        );
        body.insert(
            API_KEY_FIELD.to_string(),
            Value::String(self.credentials.api_key.clone()),
        );
        for (key, value) in payload {
            body.entry(key).or_insert(value);
        }
        body
    }

    /// POST to an endpoint and return the validated response envelope
    ///
    /// # Errors
    ///
    /// - [`Error::Network`]: No response was received
    /// - [`Error::Http`]: Final attempt returned a status other than 200
    /// - [`Error::InvalidResponse`]: Body is not a JSON object
    /// - [`Error::Api`]: `status` is not `SUCCESS`
    pub async fn post(&self, endpoint: &str, payload: Envelope) -> Result<Envelope> {
        let url = self.endpoint_url(endpoint);
        self.post_url(&url, endpoint, payload).await
    }

    /// POST to a per-domain endpoint (`{action}/{fqdn}`)
    ///
    /// Errors name the endpoint as `{action}/{fqdn}`, unescaped.
    pub async fn post_for_domain(
        &self,
        action: &str,
        fqdn: &str,
        payload: Envelope,
    ) -> Result<Envelope> {
        let url = self.domain_endpoint_url(action, fqdn);
        let endpoint = format!("{}/{}", action.trim_matches('/'), fqdn);
        self.post_url(&url, &endpoint, payload).await
    }

    async fn post_url(&self, url: &str, endpoint: &str, payload: Envelope) -> Result<Envelope> {
        let body = self.request_body(payload);

        tracing::debug!(
            "Porkbun API request: {} payload={}",
            url,
            serde_json::Value::Object(mask_credentials(&body))
        );

        let mut response = self
            .send(url, RequestBody::Json(Value::Object(body.clone())))
            .await?;

        if response.status == 400 {
            tracing::warn!(
                "Porkbun rejected JSON body on {} (HTTP 400), retrying as form-urlencoded",
                endpoint
            );
            response = self.send(url, RequestBody::Form(form_pairs(&body))).await?;
        }

        validate_envelope(endpoint, response)
    }

    async fn send(&self, url: &str, body: RequestBody) -> Result<HttpResponse> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_form() {
            headers.push((
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ));
        }

        let request = HttpRequest {
            url: url.to_string(),
            headers,
            timeout: REQUEST_TIMEOUT,
            body,
        };

        self.http
            .post(request)
            .await
            .map_err(|e| Error::network(PROVIDER, e.to_string()))
    }
}

/// Classify a raw response into an envelope or an error
fn validate_envelope(endpoint: &str, response: HttpResponse) -> Result<Envelope> {
    let decoded = match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(envelope)) => Some(envelope),
        _ => None,
    };

    if response.status != 200 {
        let message = decoded
            .as_ref()
            .and_then(|envelope| field_text(envelope, "message"))
            .unwrap_or_else(|| "Unknown HTTP error".to_string());
        return Err(Error::http(PROVIDER, response.status, endpoint, message));
    }

    let envelope = decoded.ok_or_else(|| Error::invalid_response(PROVIDER))?;

    let status = field_text(&envelope, "status").unwrap_or_default();
    if !status.eq_ignore_ascii_case("SUCCESS") {
        let message = field_text(&envelope, "message").unwrap_or_else(|| "Unknown error".to_string());
        return Err(Error::api(PROVIDER, message));
    }

    Ok(envelope)
}

/// Non-empty text of a scalar envelope field
fn field_text(envelope: &Envelope, field: &str) -> Option<String> {
    envelope
        .get(field)
        .and_then(scalar_text)
        .filter(|text| !text.is_empty())
}

/// Copy of `body` with both credential fields replaced by `***`
pub fn mask_credentials(body: &Envelope) -> Envelope {
    let mut masked = body.clone();
    for field in [API_KEY_FIELD, SECRET_API_KEY_FIELD] {
        masked.insert(field.to_string(), Value::String(MASK.to_string()));
    }
    masked
}

/// Flatten a body into form pairs, nesting as `key[index]` / `key[name]`
///
/// Booleans become `1`/`0`; nulls are dropped.
pub fn form_pairs(body: &Envelope) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in body {
        flatten_form_value(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten_form_value(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_form_value(format!("{}[{}]", key, index), item, pairs);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                flatten_form_value(format!("{}[{}]", key, name), item, pairs);
            }
        }
        scalar => {
            if let Some(text) = scalar_text(scalar) {
                pairs.push((key, text));
            }
        }
    }
}
