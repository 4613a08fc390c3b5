//! Test doubles and common utilities for Porkbun contract tests
//!
//! The scripted HTTP client replays queued responses in order and records
//! every request it receives, so tests can assert on exact call counts and
//! request bodies without a network.

#![allow(dead_code)]

use registrar_core::traits::{HttpClient, HttpError, HttpRequest, HttpResponse, RequestBody};
use registrar_porkbun::{Credentials, PorkbunRegistrar};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Base URL used by every test registrar
pub const BASE_URL: &str = "https://porkbun.test/api/json/v3";

/// API key used by every test registrar
pub const API_KEY: &str = "pk1_contract_test_key";

/// Secret API key used by every test registrar
pub const SECRET_API_KEY: &str = "sk1_contract_test_secret";

/// An HttpClient that replays scripted responses
#[derive(Default)]
pub struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response with a JSON body
    pub fn push_json(&self, status: u16, body: Value) {
        self.push_raw(status, &body.to_string());
    }

    /// Queue a response with a raw body
    pub fn push_raw(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a network failure
    pub fn push_network_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(HttpError(message.to_string())));
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Endpoint paths requested, relative to [`BASE_URL`]
    pub fn endpoints(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| {
                request
                    .url
                    .strip_prefix(BASE_URL)
                    .unwrap_or(&request.url)
                    .trim_start_matches('/')
                    .to_string()
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError("no scripted response left".to_string())))
    }
}

/// Registrar wired to the scripted client
pub fn registrar(http: &Arc<ScriptedHttpClient>) -> PorkbunRegistrar {
    let credentials = Credentials::new(API_KEY, SECRET_API_KEY, Some(BASE_URL))
        .expect("test credentials are valid");
    PorkbunRegistrar::with_http_client(credentials, http.clone())
}

/// A SUCCESS envelope carrying `fields`
pub fn success(fields: Value) -> Value {
    let mut envelope = json!({ "status": "SUCCESS" });
    if let (Some(target), Value::Object(extra)) = (envelope.as_object_mut(), fields) {
        target.extend(extra);
    }
    envelope
}

/// JSON body of a request (panics on form bodies)
pub fn json_body(request: &HttpRequest) -> &Value {
    match &request.body {
        RequestBody::Json(body) => body,
        RequestBody::Form(_) => panic!("expected a JSON body, got a form body"),
    }
}

/// A `listAll` page of `count` filler domains, optionally with `target` at `position`
pub fn list_page(page: usize, count: usize, target: Option<(usize, &str)>) -> Value {
    let domains: Vec<Value> = (0..count)
        .map(|index| match target {
            Some((position, name)) if position == index => json!({
                "domain": name,
                "status": "ACTIVE",
                "createDate": "2018-08-20 17:52:51",
                "expireDate": "2027-08-20 17:52:51",
                "securityLock": "1",
                "whoisPrivacy": "1",
                "autoRenew": 0,
            }),
            _ => json!({
                "domain": format!("filler-{}-{}.com", page, index),
                "status": "ACTIVE",
                "securityLock": "0",
                "whoisPrivacy": "0",
            }),
        })
        .collect();

    success(json!({ "domains": domains }))
}
