//! Transports that carry a [Request] to a [Response].
//!
//! The transport is chosen once when the client is built:
//! - [HttpTransport] talks to the configured backend
//! - [FixtureTransport] serves canned data from [crate::fixtures]

use std::fmt::Debug;

use enum_dispatch::enum_dispatch;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{payload_is_present, ApiError};
use crate::fixtures;
use crate::types::Query;

/// An outgoing request, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path below the base URL, without query string.
    pub path: String,
    pub query: Query,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful response. The body is already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Response {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Drop the transport envelope and keep the payload.
    pub fn into_payload(self) -> Value {
        self.body
    }
}

/// Either the network transport, or the fixture transport for local
/// development.
#[derive(Debug)]
#[enum_dispatch(TransportTrait)]
pub enum Transport {
    Http(HttpTransport),
    Fixture(FixtureTransport),
}

#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait TransportTrait {
    /// Carry out a single request. No retries.
    async fn send(&self, request: Request) -> Result<Response, ApiError>;
}

/// Transport for the real backend.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(format!("inkwell/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&url).map_err(|source| ApiError::Url { url, source })
    }
}

impl TransportTrait for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let url = self.url_for(&request.path)?;

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "request did not complete");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(ApiError::Transport)?;
        let body = decode_body(&bytes);

        if status.is_success() {
            Ok(Response {
                status,
                headers,
                body,
            })
        } else {
            debug!(%status, has_body = payload_is_present(&body), "request failed");
            Err(ApiError::from_body(Some(status), body))
        }
    }
}

/// Empty bodies decode to `null`, bodies that are not JSON to a string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Transport that never touches the network.
///
/// Every request fails on purpose with the canned payload attached, exactly
/// like a backend error that carries a body. The response stage of the
/// client turns it back into a value. Requests without a fixture fail
/// without a payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTransport;

impl TransportTrait for FixtureTransport {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        match fixtures::dispatch(&request.path, &request.method) {
            Some(payload) if payload_is_present(&payload) => {
                debug!(method = %request.method, path = %request.path, "short-circuiting to fixture");
                Err(ApiError::Rejected {
                    status: None,
                    payload,
                })
            },
            _ => {
                debug!(method = %request.method, path = %request.path, "no fixture for request");
                Err(ApiError::NoFixture {
                    method: request.method,
                    path: request.path,
                })
            },
        }
    }
}
